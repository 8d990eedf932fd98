//! Tracker - push 入口与防抖 flush
//!
//! ```text
//! push() ──► TrackingSession.queue
//!    │
//!    └── Schedule ──► FlushWorker ── debounce ──► flush() ──► AnalyticsSink
//!                          ▲
//!            unload() ─────┘ (immediate flush, then stop)
//! ```

mod flush_worker;

use std::sync::Arc;
use std::time::Duration;

use shared::DataLayerObject;
use tokio::runtime::Handle;
use tokio::sync::{mpsc, oneshot};

use crate::core::config::TrackingConfig;
use crate::core::error::{Result, TrackingError};
use crate::core::session::{FlushReport, TrackingSession};
use crate::core::tasks::BackgroundTasks;
use flush_worker::{Command, FlushWorker};

/// Handle used by call sites to queue analytics events
///
/// Must be created inside a tokio runtime.
pub struct Tracker {
    session: Arc<TrackingSession>,
    commands: mpsc::UnboundedSender<Command>,
    tasks: tokio::sync::Mutex<Option<BackgroundTasks>>,
}

impl Tracker {
    /// Start a tracker over `session` using the configured quiet period
    pub fn start(session: Arc<TrackingSession>, config: &TrackingConfig) -> Self {
        Self::with_debounce(session, config.flush_debounce())
    }

    pub fn with_debounce(session: Arc<TrackingSession>, debounce: Duration) -> Self {
        let (commands, rx) = mpsc::unbounded_channel();
        let mut tasks = BackgroundTasks::new();
        let worker = FlushWorker::new(session.clone(), debounce, tasks.shutdown_token());
        tasks.spawn("flush_worker", worker.run(rx));

        Self {
            session,
            commands,
            tasks: tokio::sync::Mutex::new(Some(tasks)),
        }
    }

    pub fn session(&self) -> &Arc<TrackingSession> {
        &self.session
    }

    /// Queue a payload and restart the debounce window
    ///
    /// Returns false when the payload was dropped. After [`Self::unload`]
    /// (a teardown that did not actually leave the page) there is no
    /// debounce any more: each push is flushed right away on the current
    /// runtime.
    pub fn push(&self, payload: DataLayerObject) -> bool {
        if !self.is_running() && Handle::try_current().is_err() {
            tracing::warn!(
                event = payload.event_name().unwrap_or_default(),
                "Tracker unloaded outside a runtime, dropping event"
            );
            return false;
        }
        if !self.session.enqueue(payload) {
            return false;
        }
        if self.commands.send(Command::Schedule).is_err() {
            self.spawn_flush();
        }
        true
    }

    fn spawn_flush(&self) {
        let Ok(handle) = Handle::try_current() else {
            tracing::warn!("No runtime for a post-unload flush");
            return;
        };
        let session = self.session.clone();
        handle.spawn(async move {
            let report = session.flush().await;
            tracing::debug!(dispatched = report.dispatched, "Post-unload flush");
        });
    }

    pub fn has_event_in_queue(&self, event_name: &str) -> bool {
        self.session.has_event_in_queue(event_name)
    }

    /// Flush immediately, bypassing the debounce window
    ///
    /// Once the worker is stopped the session is flushed directly.
    pub async fn flush_now(&self) -> Result<FlushReport> {
        let (ack, report) = oneshot::channel();
        if self.commands.send(Command::FlushNow(ack)).is_err() {
            return Ok(self.session.flush().await);
        }
        report.await.map_err(|_| TrackingError::WorkerStopped)
    }

    /// Page teardown: flush everything still queued and stop the worker
    ///
    /// Idempotent; later calls return immediately.
    pub async fn unload(&self) {
        if let Some(tasks) = self.tasks.lock().await.take() {
            tasks.shutdown().await;
        }
    }

    /// Whether the worker is still accepting commands
    pub fn is_running(&self) -> bool {
        !self.commands.is_closed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;

    fn tracker() -> (Tracker, Arc<MemorySink>) {
        let config = TrackingConfig::with_event_order(["cart", "view_cart", "add_to_cart"]);
        let sink = Arc::new(MemorySink::new());
        let session = Arc::new(TrackingSession::with_sink(&config, sink.clone()));
        (Tracker::start(session, &config), sink)
    }

    #[tokio::test(start_paused = true)]
    async fn test_debounce_coalesces_burst() {
        let (tracker, sink) = tracker();

        tracker.push(DataLayerObject::event("add_to_cart"));
        tokio::time::sleep(Duration::from_millis(500)).await;
        tracker.push(DataLayerObject::event("cart"));
        tokio::time::sleep(Duration::from_millis(999)).await;

        // window was reset by the second push
        assert!(sink.is_empty());
        assert!(tracker.has_event_in_queue("cart"));

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(sink.event_names(), vec!["cart", "add_to_cart"]);
        assert!(!tracker.has_event_in_queue("cart"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_flush_now_bypasses_debounce() {
        let (tracker, sink) = tracker();

        tracker.push(DataLayerObject::event("view_cart"));
        let report = tracker.flush_now().await.unwrap();
        assert_eq!(report.dispatched, 1);
        assert_eq!(sink.event_names(), vec!["view_cart"]);

        // the cancelled deadline does not fire an empty flush later
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(sink.len(), 1);
    }

    #[tokio::test]
    async fn test_unload_flushes_pending_events() {
        let (tracker, sink) = tracker();

        tracker.push(DataLayerObject::event("cart"));
        tracker.push(DataLayerObject::event("view_cart"));
        tracker.unload().await;

        assert_eq!(sink.event_names(), vec!["cart", "view_cart"]);
        assert!(!tracker.is_running());
        assert!(tracker.flush_now().await.unwrap().is_empty());

        // second unload is a no-op
        tracker.unload().await;
    }

    #[tokio::test]
    async fn test_push_after_unload_is_still_delivered() {
        let (tracker, sink) = tracker();
        tracker.unload().await;

        assert!(tracker.push(DataLayerObject::event("cart")));
        assert!(tracker.push(DataLayerObject::event("view_cart")));
        let report = tracker.flush_now().await.unwrap();
        // whatever the spawned flushes have not sent yet goes out here
        assert_eq!(report.failed, 0);

        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
        assert_eq!(tracker.session().queued_len(), 0);
        assert!(!tracker.has_event_in_queue("cart"));
        assert_eq!(sink.len(), 2);
    }

    #[tokio::test]
    async fn test_push_without_sink_reports_drop() {
        let session = Arc::new(TrackingSession::new(&TrackingConfig::default()));
        let tracker = Tracker::with_debounce(session, Duration::from_millis(10));

        assert!(!tracker.push(DataLayerObject::event("cart")));
        assert_eq!(tracker.session().queued_len(), 0);
    }
}
