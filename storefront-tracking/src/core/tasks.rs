//! 后台任务管理
//!
//! 追踪会话只有一个长期任务：flush worker。这里负责启动、panic 隔离和关闭。
//! 关闭即页面卸载信号：取消令牌触发后，worker 执行最后一次 flush 再退出。

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// 会话后台任务
///
/// ```ignore
/// let mut tasks = BackgroundTasks::new();
/// let token = tasks.shutdown_token();
/// tasks.spawn("flush_worker", async move { token.cancelled().await });
///
/// // page unload
/// tasks.shutdown().await;
/// ```
#[derive(Default)]
pub struct BackgroundTasks {
    handles: Vec<(&'static str, JoinHandle<()>)>,
    shutdown: CancellationToken,
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}

impl BackgroundTasks {
    pub fn new() -> Self {
        Self::default()
    }

    /// 任务内部监听的卸载信号
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// 启动任务；panic 被捕获并记录，不会传播到 runtime
    pub fn spawn<F>(&mut self, name: &'static str, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let shutdown = self.shutdown.clone();
        let handle = tokio::spawn(async move {
            match AssertUnwindSafe(future).catch_unwind().await {
                Ok(()) if !shutdown.is_cancelled() => {
                    tracing::warn!(task = name, "Task exited before page unload");
                }
                Ok(()) => {}
                Err(payload) => {
                    tracing::error!(
                        task = name,
                        panic = panic_message(payload.as_ref()),
                        "Task panicked, queued analytics events may be lost"
                    );
                }
            }
        });
        tracing::debug!(task = name, "Task started");
        self.handles.push((name, handle));
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// 已经退出的任务数（卸载前应为 0）
    pub fn finished_count(&self) -> usize {
        self.handles
            .iter()
            .filter(|(_, handle)| handle.is_finished())
            .count()
    }

    /// 发送卸载信号并等待所有任务结束
    pub async fn shutdown(self) {
        self.shutdown.cancel();
        for (name, handle) in self.handles {
            if let Err(e) = handle.await {
                tracing::error!(task = name, error = ?e, "Task join failed");
            }
        }
        tracing::debug!("Session tasks stopped");
    }
}
