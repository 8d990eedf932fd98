//! Analytics sinks
//!
//! A sink is the outbound end of the tracking pipeline. It receives fully
//! prepared [`DataLayerObject`]s one at a time, in dispatch order.
//!
//! Sinks may retain state between pushes (the tag manager data layer keeps
//! the last `ecommerce` object), which is why the flush sends an explicit
//! `{ "ecommerce": null }` before every ecommerce event.

mod http;
mod memory;
mod tracing_sink;

pub use http::HttpSink;
pub use memory::MemorySink;
pub use tracing_sink::TracingSink;

use std::sync::Arc;

use async_trait::async_trait;
use shared::DataLayerObject;

use crate::core::config::{SinkKind, TrackingConfig};
use crate::core::error::{Result, SinkError, TrackingError};

#[async_trait]
pub trait AnalyticsSink: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    async fn push(&self, object: &DataLayerObject) -> std::result::Result<(), SinkError>;
}

/// Build the sink selected by configuration
pub fn build_sink(config: &TrackingConfig) -> Result<Arc<dyn AnalyticsSink>> {
    let sink: Arc<dyn AnalyticsSink> = match config.sink {
        SinkKind::Memory => Arc::new(MemorySink::new()),
        SinkKind::Tracing => Arc::new(TracingSink),
        SinkKind::Http => {
            let url = config.collector_url.as_deref().ok_or_else(|| {
                TrackingError::Config("http sink requires TRACKING_COLLECTOR_URL".into())
            })?;
            Arc::new(HttpSink::new(url, config.http_timeout())?)
        }
    };
    tracing::info!(sink = sink.name(), "Analytics sink ready");
    Ok(sink)
}
