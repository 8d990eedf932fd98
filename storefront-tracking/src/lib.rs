//! Storefront Tracking - 电商前台分析事件编排
//!
//! # 架构概述
//!
//! Queues analytics events raised by storefront call sites, reorders them by
//! a configured canonical order, and flushes them in debounced batches to an
//! analytics sink.
//!
//! # 模块结构
//!
//! ```text
//! storefront-tracking/src/
//! ├── core/          # 配置、会话、页面上下文、错误、后台任务
//! ├── queue/         # 待发送队列与事件排序
//! ├── sink/          # 分析数据出口 (memory / tracing / http)
//! ├── worker/        # Tracker 与防抖 flush worker
//! ├── mappers/       # 领域快照 -> 分析 payload
//! ├── events/        # 按业务域划分的追踪事件与变更监听
//! └── utils/         # 日志
//! ```

pub mod core;
pub mod events;
pub mod mappers;
pub mod queue;
pub mod sink;
pub mod utils;
pub mod worker;

// Re-export 公共类型
pub use core::{
    FlushReport, PageContext, Result, SinkError, SinkKind, TrackingConfig, TrackingError,
    TrackingSession,
};
pub use events::{BasketWatcher, TrackingEvents, WishlistWatcher};
pub use sink::{AnalyticsSink, HttpSink, MemorySink, TracingSink, build_sink};
pub use worker::Tracker;

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 设置运行环境 (日志)
pub fn setup_environment(config: &TrackingConfig) -> anyhow::Result<()> {
    init_logger_with_file(&config.log_level, config.log_json, config.log_dir.as_deref())?;
    tracing::debug!(environment = %config.environment, "Logging initialized");
    Ok(())
}
