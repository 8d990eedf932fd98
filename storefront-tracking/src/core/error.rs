use shared::PayloadError;
use thiserror::Error;

/// Errors returned by an [`crate::sink::AnalyticsSink`]
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("sink rejected payload: {0}")]
    Rejected(String),

    #[error("collector request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("collector responded with status {0}")]
    Status(u16),
}

#[derive(Error, Debug)]
pub enum TrackingError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid payload: {0}")]
    Payload(#[from] PayloadError),

    #[error("sink error: {0}")]
    Sink(#[from] SinkError),

    #[error("flush worker is not running")]
    WorkerStopped,
}

/// 追踪层 Result 类型别名
pub type Result<T> = std::result::Result<T, TrackingError>;
