use async_trait::async_trait;
use shared::DataLayerObject;

use super::AnalyticsSink;
use crate::core::error::SinkError;

/// Writes each dispatch as a structured log line under the `analytics` target
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

#[async_trait]
impl AnalyticsSink for TracingSink {
    fn name(&self) -> &'static str {
        "tracing"
    }

    async fn push(&self, object: &DataLayerObject) -> Result<(), SinkError> {
        tracing::info!(
            target: "analytics",
            event = object.event_name().unwrap_or_default(),
            payload = %object.to_json(),
            "dataLayer.push"
        );
        Ok(())
    }
}
