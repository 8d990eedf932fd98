use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use super::error::{Result, TrackingError};

/// Default quiet period before a debounced flush fires
pub const DEFAULT_FLUSH_DEBOUNCE_MS: u64 = 1000;
/// Default per-request timeout of the collector sink
pub const DEFAULT_HTTP_TIMEOUT_MS: u64 = 5000;

/// Canonical dispatch order used when none is configured
pub const DEFAULT_EVENT_ORDER: &[&str] = &[
    "customer_data",
    "content_view",
    "cart",
    "wishlist",
    "view_cart",
    "view_item_list",
    "view_item",
    "select_item",
    "view_promotion",
    "select_promotion",
    "add_to_cart",
    "remove_from_cart",
    "add_to_wishlist",
    "remove_from_wishlist",
    "search",
    "purchase",
];

/// Where flushed events are delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    /// In-process data layer, inspected after the run
    #[default]
    Memory,
    /// Structured `tracing` events
    Tracing,
    /// JSON POST to a collector endpoint
    Http,
}

impl FromStr for SinkKind {
    type Err = TrackingError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "tracing" | "log" => Ok(Self::Tracing),
            "http" => Ok(Self::Http),
            other => Err(TrackingError::Config(format!("unknown sink kind `{other}`"))),
        }
    }
}

/// 追踪配置 - 会话启动时确定，运行期间不可修改
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | TRACKING_EVENT_ORDER | built-in list | Comma-separated canonical event order |
/// | TRACKING_FLUSH_DEBOUNCE_MS | 1000 | Quiet period before flushing |
/// | TRACKING_SINK | memory | memory / tracing / http |
/// | TRACKING_COLLECTOR_URL | - | Collector endpoint for the http sink |
/// | TRACKING_HTTP_TIMEOUT_MS | 5000 | Collector request timeout |
/// | ENVIRONMENT | development | 运行环境 |
/// | LOG_LEVEL | info | Log level |
/// | LOG_JSON | false | JSON log output |
/// | LOG_DIR | - | Directory for daily rotated log files |
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
    /// Canonical event order, index = dispatch priority
    pub event_order: Vec<String>,
    pub flush_debounce_ms: u64,
    pub sink: SinkKind,
    pub collector_url: Option<String>,
    pub http_timeout_ms: u64,
    /// 运行环境: development | staging | production
    pub environment: String,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<String>,
}

fn parse_event_order(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}

impl TrackingConfig {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            event_order: std::env::var("TRACKING_EVENT_ORDER")
                .map(|raw| parse_event_order(&raw))
                .unwrap_or(defaults.event_order),
            flush_debounce_ms: env_parse("TRACKING_FLUSH_DEBOUNCE_MS")
                .unwrap_or(defaults.flush_debounce_ms),
            sink: std::env::var("TRACKING_SINK")
                .ok()
                .and_then(|v| match v.parse() {
                    Ok(kind) => Some(kind),
                    Err(e) => {
                        tracing::warn!("Ignoring TRACKING_SINK: {e}");
                        None
                    }
                })
                .unwrap_or(defaults.sink),
            collector_url: std::env::var("TRACKING_COLLECTOR_URL").ok(),
            http_timeout_ms: env_parse("TRACKING_HTTP_TIMEOUT_MS")
                .unwrap_or(defaults.http_timeout_ms),
            environment: std::env::var("ENVIRONMENT").unwrap_or(defaults.environment),
            log_level: std::env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
            log_json: env_parse("LOG_JSON").unwrap_or(defaults.log_json),
            log_dir: std::env::var("LOG_DIR").ok(),
        }
    }

    /// Load from a JSON file; missing keys fall back to defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// 使用自定义事件顺序覆盖默认配置
    ///
    /// 常用于测试场景
    pub fn with_event_order<I, S>(event_order: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            event_order: event_order.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.sink == SinkKind::Http && self.collector_url.is_none() {
            return Err(TrackingError::Config(
                "http sink requires TRACKING_COLLECTOR_URL".into(),
            ));
        }
        Ok(())
    }

    pub fn flush_debounce(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.flush_debounce_ms)
    }

    pub fn http_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.http_timeout_ms)
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            event_order: DEFAULT_EVENT_ORDER.iter().map(|s| s.to_string()).collect(),
            flush_debounce_ms: DEFAULT_FLUSH_DEBOUNCE_MS,
            sink: SinkKind::default(),
            collector_url: None,
            http_timeout_ms: DEFAULT_HTTP_TIMEOUT_MS,
            environment: "development".into(),
            log_level: "info".into(),
            log_json: false,
            log_dir: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_event_order() {
        assert_eq!(
            parse_event_order(" cart, view_cart ,,purchase "),
            vec!["cart", "view_cart", "purchase"]
        );
    }

    #[test]
    fn test_sink_kind_from_str() {
        assert_eq!("HTTP".parse::<SinkKind>().unwrap(), SinkKind::Http);
        assert_eq!("log".parse::<SinkKind>().unwrap(), SinkKind::Tracing);
        assert!("kafka".parse::<SinkKind>().is_err());
    }

    #[test]
    fn test_from_json_file_uses_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "event_order": ["cart", "purchase"], "sink": "tracing" }}"#).unwrap();

        let config = TrackingConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.event_order, vec!["cart", "purchase"]);
        assert_eq!(config.sink, SinkKind::Tracing);
        assert_eq!(config.flush_debounce_ms, DEFAULT_FLUSH_DEBOUNCE_MS);
    }

    #[test]
    fn test_http_sink_requires_url() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "sink": "http" }}"#).unwrap();

        let err = TrackingConfig::from_json_file(file.path()).unwrap_err();
        assert!(matches!(err, TrackingError::Config(_)));
    }
}
