//! Tracking session - 页面会话级别的追踪上下文
//!
//! Owns the pending queue, the page context and the (possibly not yet
//! attached) analytics sink for one page session. Constructed at session
//! start, dropped at session end. Nothing here is a process-wide singleton.

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use shared::DataLayerObject;
use uuid::Uuid;

use super::config::TrackingConfig;
use super::page::{PageContext, PageContextStore};
use crate::queue::{EventQueue, PendingEvent};
use crate::sink::AnalyticsSink;

/// Outcome of one flush
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FlushReport {
    /// Events delivered to the sink
    pub dispatched: usize,
    /// Events the sink failed to accept
    pub failed: usize,
    /// `{ "ecommerce": null }` resets sent
    pub cleared: usize,
    /// Resets the sink failed to accept; the event itself is still sent
    pub reset_failed: usize,
}

impl FlushReport {
    pub fn is_empty(&self) -> bool {
        self.dispatched == 0 && self.failed == 0
    }
}

pub struct TrackingSession {
    id: Uuid,
    started_at: i64,
    /// Fixed at boot, never overridden at runtime
    event_order: Arc<[String]>,
    queue: Mutex<EventQueue>,
    page: PageContextStore,
    sink: RwLock<Option<Arc<dyn AnalyticsSink>>>,
    /// Serializes flushes so two batches never interleave at the sink
    flush_lock: tokio::sync::Mutex<()>,
}

impl TrackingSession {
    pub fn new(config: &TrackingConfig) -> Self {
        let session = Self {
            id: Uuid::new_v4(),
            started_at: shared::util::now_millis(),
            event_order: config.event_order.clone().into(),
            queue: Mutex::new(EventQueue::new()),
            page: PageContextStore::default(),
            sink: RwLock::new(None),
            flush_lock: tokio::sync::Mutex::new(()),
        };
        tracing::debug!(
            session_id = %session.id,
            ordered_events = session.event_order.len(),
            "Tracking session created"
        );
        session
    }

    /// Session with a sink attached from the start
    pub fn with_sink(config: &TrackingConfig, sink: Arc<dyn AnalyticsSink>) -> Self {
        let session = Self::new(config);
        session.attach_sink(sink);
        session
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> i64 {
        self.started_at
    }

    pub fn event_order(&self) -> &[String] {
        &self.event_order
    }

    /// Attach the sink once the analytics tag is available
    pub fn attach_sink(&self, sink: Arc<dyn AnalyticsSink>) {
        tracing::info!(session_id = %self.id, sink = sink.name(), "Analytics sink attached");
        *self.sink.write() = Some(sink);
    }

    pub fn detach_sink(&self) -> Option<Arc<dyn AnalyticsSink>> {
        self.sink.write().take()
    }

    pub fn is_ready(&self) -> bool {
        self.sink.read().is_some()
    }

    pub fn page_context(&self) -> PageContext {
        self.page.get()
    }

    pub fn set_page_context(&self, context: PageContext) {
        self.page.set(context);
    }

    /// Queue a payload. Without a sink the payload is dropped with a warning.
    pub fn enqueue(&self, payload: DataLayerObject) -> bool {
        if !self.is_ready() {
            tracing::warn!(
                event = payload.event_name().unwrap_or_default(),
                "Analytics sink not initialized, dropping event"
            );
            return false;
        }
        let order_index = self.queue.lock().enqueue(payload, &self.event_order);
        tracing::trace!(order_index, "Event queued");
        true
    }

    /// Whether an event with this name is waiting for the next flush
    pub fn has_event_in_queue(&self, event_name: &str) -> bool {
        if !self.is_ready() {
            tracing::warn!(event = event_name, "Analytics sink not initialized");
            return false;
        }
        self.queue.lock().has_event(event_name)
    }

    pub fn queued_len(&self) -> usize {
        self.queue.lock().len()
    }

    /// Drain the queue and dispatch every event in canonical order
    ///
    /// The queue is emptied before the first dispatch. A failing push is
    /// logged and the remaining events are still dispatched; failed events
    /// are not re-queued.
    pub async fn flush(&self) -> FlushReport {
        let sink = self.sink.read().clone();
        let Some(sink) = sink else {
            tracing::warn!("Analytics sink not initialized, nothing flushed");
            return FlushReport::default();
        };

        let _guard = self.flush_lock.lock().await;
        let batch = self.queue.lock().drain_sorted();
        if batch.is_empty() {
            return FlushReport::default();
        }

        let page = self.page.get();
        let mut report = FlushReport::default();

        for PendingEvent {
            payload,
            order_index,
        } in batch
        {
            if payload.has_ecommerce_key() {
                match sink.push(&DataLayerObject::clear_ecommerce()).await {
                    Ok(()) => report.cleared += 1,
                    Err(e) => {
                        report.reset_failed += 1;
                        tracing::error!(sink = sink.name(), "Failed to reset ecommerce slot: {e}");
                    }
                }
            }

            let object = stamp_page_context(payload, &page);
            match sink.push(&object).await {
                Ok(()) => report.dispatched += 1,
                Err(e) => {
                    report.failed += 1;
                    tracing::error!(
                        sink = sink.name(),
                        event = object.event_name().unwrap_or_default(),
                        order_index,
                        "Failed to dispatch event: {e}"
                    );
                }
            }
        }

        tracing::debug!(
            session_id = %self.id,
            dispatched = report.dispatched,
            failed = report.failed,
            reset_failed = report.reset_failed,
            "Flushed tracking queue"
        );
        report
    }
}

/// Fill `page_type`/`page_type_id` from the page context where the payload
/// has none. `event`, `content_name` and the field bag pass through as-is.
pub(crate) fn stamp_page_context(mut payload: DataLayerObject, page: &PageContext) -> DataLayerObject {
    if payload.page_type.is_none() {
        payload.page_type = Some(page.page_type.clone());
    }
    if payload.page_type_id.is_none() {
        payload.page_type_id = Some(page.page_type_id.clone());
    }
    payload
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::SinkError;
    use crate::sink::MemorySink;
    use async_trait::async_trait;
    use serde_json::json;

    fn config() -> TrackingConfig {
        TrackingConfig::with_event_order(["cart", "view_cart", "add_to_cart", "purchase"])
    }

    fn session_with_memory() -> (TrackingSession, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::new());
        let session = TrackingSession::with_sink(&config(), sink.clone());
        (session, sink)
    }

    #[tokio::test]
    async fn test_flush_orders_and_empties_queue() {
        let (session, sink) = session_with_memory();

        session.enqueue(DataLayerObject::event("cart"));
        session.enqueue(DataLayerObject::event("view_cart"));
        session.enqueue(DataLayerObject::event("custom_x"));
        session.enqueue(DataLayerObject::event("add_to_cart"));
        session.enqueue(DataLayerObject::event("cart"));

        let report = session.flush().await;
        assert_eq!(report.dispatched, 5);
        assert_eq!(
            sink.event_names(),
            vec!["cart", "cart", "view_cart", "custom_x", "add_to_cart"]
        );
        assert_eq!(session.queued_len(), 0);
        assert!(!session.has_event_in_queue("cart"));
    }

    #[tokio::test]
    async fn test_ecommerce_events_are_preceded_by_reset() {
        let (session, sink) = session_with_memory();

        session.enqueue(DataLayerObject::event("view_cart").with_ecommerce(json!({ "items": [] })));
        session.enqueue(DataLayerObject::event("custom_x"));
        session.enqueue(DataLayerObject::event("purchase").with_ecommerce(json!({ "value": 1.0 })));

        let report = session.flush().await;
        assert_eq!(report.cleared, 2);

        let log = sink.dispatched();
        assert_eq!(log.len(), 5);
        for (i, obj) in log.iter().enumerate() {
            if obj.has_ecommerce() {
                assert!(log[i - 1].is_clear_signal());
            }
        }
        assert!(log[0].is_clear_signal());
        assert_eq!(log[2].event_name(), Some("custom_x"));
        assert!(log[3].is_clear_signal());
        assert_eq!(log[4].event_name(), Some("purchase"));
        // the sink model holds the latest ecommerce only
        assert_eq!(sink.model().get("ecommerce"), Some(&json!({ "value": 1.0 })));
    }

    #[tokio::test]
    async fn test_page_context_fallback_and_content_name() {
        let (session, sink) = session_with_memory();
        session.set_page_context(PageContext::new("pdp", "1234"));

        session.enqueue(DataLayerObject::event("cart"));
        session.enqueue(
            DataLayerObject::event("view_cart")
                .with_page("basket", "")
                .with_content_name("Basket"),
        );
        session.flush().await;

        let log = sink.dispatched();
        assert_eq!(
            log[0].to_json(),
            json!({ "event": "cart", "page_type": "pdp", "page_type_id": "1234" })
        );
        assert_eq!(log[1].page_type.as_deref(), Some("basket"));
        assert_eq!(log[1].page_type_id.as_deref(), Some(""));
        assert_eq!(log[1].content_name.as_deref(), Some("Basket"));
        assert!(log[0].to_json().get("content_name").is_none());
    }

    #[tokio::test]
    async fn test_uninitialized_sink_drops_events() {
        let session = TrackingSession::new(&config());

        assert!(!session.enqueue(DataLayerObject::event("cart")));
        assert!(!session.has_event_in_queue("cart"));
        assert_eq!(session.flush().await, FlushReport::default());
        assert_eq!(session.queued_len(), 0);

        // late attach: dropped events are not replayed
        let sink = Arc::new(MemorySink::new());
        session.attach_sink(sink.clone());
        assert!(session.enqueue(DataLayerObject::event("view_cart")));
        session.flush().await;
        assert_eq!(sink.event_names(), vec!["view_cart"]);
    }

    struct FailingSink {
        inner: MemorySink,
        fail_event: &'static str,
    }

    #[async_trait]
    impl AnalyticsSink for FailingSink {
        fn name(&self) -> &'static str {
            "failing"
        }

        async fn push(&self, object: &DataLayerObject) -> Result<(), SinkError> {
            if object.event_name() == Some(self.fail_event) {
                return Err(SinkError::Rejected("boom".into()));
            }
            self.inner.push(object).await
        }
    }

    #[tokio::test]
    async fn test_sink_failure_does_not_stop_flush() {
        let sink = Arc::new(FailingSink {
            inner: MemorySink::new(),
            fail_event: "view_cart",
        });
        let session = TrackingSession::with_sink(&config(), sink.clone());

        session.enqueue(DataLayerObject::event("cart"));
        session.enqueue(DataLayerObject::event("view_cart"));
        session.enqueue(DataLayerObject::event("add_to_cart"));

        let report = session.flush().await;
        assert_eq!(report.dispatched, 2);
        assert_eq!(report.failed, 1);
        assert_eq!(sink.inner.event_names(), vec!["cart", "add_to_cart"]);

        // nothing is re-flushed
        assert!(session.flush().await.is_empty());
    }

    #[tokio::test]
    async fn test_null_ecommerce_event_still_gets_reset() {
        let (session, sink) = session_with_memory();

        session.enqueue(DataLayerObject::event("view_cart").with_ecommerce(serde_json::Value::Null));
        let report = session.flush().await;

        assert_eq!(report.cleared, 1);
        let log = sink.dispatched();
        assert_eq!(log.len(), 2);
        assert!(log[0].is_clear_signal());
        assert_eq!(log[1].to_json(), json!({
            "event": "view_cart",
            "ecommerce": null,
            "page_type": "",
            "page_type_id": ""
        }));
    }

    /// Rejects only the bare reset object
    struct ResetRejectingSink {
        inner: MemorySink,
    }

    #[async_trait]
    impl AnalyticsSink for ResetRejectingSink {
        fn name(&self) -> &'static str {
            "reset-rejecting"
        }

        async fn push(&self, object: &DataLayerObject) -> Result<(), SinkError> {
            if object.is_clear_signal() {
                return Err(SinkError::Rejected("reset".into()));
            }
            self.inner.push(object).await
        }
    }

    #[tokio::test]
    async fn test_reset_failure_counted_separately() {
        let sink = Arc::new(ResetRejectingSink {
            inner: MemorySink::new(),
        });
        let session = TrackingSession::with_sink(&config(), sink.clone());

        session.enqueue(DataLayerObject::event("purchase").with_ecommerce(json!({ "value": 1.0 })));
        let report = session.flush().await;

        assert_eq!(
            report,
            FlushReport {
                dispatched: 1,
                failed: 0,
                cleared: 0,
                reset_failed: 1,
            }
        );
        assert_eq!(sink.inner.event_names(), vec!["purchase"]);
    }
}
