/// 获取当前 UTC 时间戳（毫秒）
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Lower-case hex SHA-256 of a trimmed, lower-cased e-mail address.
///
/// Analytics tags only ever receive this digest, never the address itself.
pub fn hash_email(email: &str) -> String {
    use sha2::{Digest, Sha256};
    let normalized = email.trim().to_lowercase();
    hex::encode(Sha256::digest(normalized.as_bytes()))
}
