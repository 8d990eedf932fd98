//! 核心模块 - 配置、会话、错误定义和后台任务
//!
//! - [`TrackingConfig`] - 追踪配置
//! - [`TrackingSession`] - 会话级追踪上下文
//! - [`PageContext`] - 当前页面上下文
//! - [`BackgroundTasks`] - 后台任务管理
//! - [`TrackingError`] - 错误类型

pub mod config;
pub mod error;
pub mod page;
pub mod session;
pub mod tasks;

pub use config::{SinkKind, TrackingConfig};
pub use error::{Result, SinkError, TrackingError};
pub use page::{PageContext, PageContextStore};
pub use session::{FlushReport, TrackingSession};
pub use tasks::BackgroundTasks;
