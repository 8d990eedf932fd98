use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{Map, Value};
use shared::DataLayerObject;

use super::AnalyticsSink;
use crate::core::error::SinkError;

#[derive(Debug, Default)]
struct MemoryState {
    /// Every push, in order
    log: Vec<DataLayerObject>,
    /// Merged view, later keys overwrite earlier ones
    model: Map<String, Value>,
}

/// In-process data layer
///
/// Behaves like the tag manager data layer: keeps a push log and a merged
/// model in which a key survives until overwritten. `ecommerce` in
/// particular stays set until a `{ "ecommerce": null }` push.
#[derive(Debug, Default)]
pub struct MemorySink {
    state: Mutex<MemoryState>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every dispatched object
    pub fn dispatched(&self) -> Vec<DataLayerObject> {
        self.state.lock().log.clone()
    }

    /// Event names of dispatched objects, skipping ecommerce resets
    pub fn event_names(&self) -> Vec<String> {
        self.state
            .lock()
            .log
            .iter()
            .filter(|o| !o.is_clear_signal())
            .map(|o| o.event_name().unwrap_or_default().to_string())
            .collect()
    }

    /// Merged data layer model
    pub fn model(&self) -> Map<String, Value> {
        self.state.lock().model.clone()
    }

    pub fn len(&self) -> usize {
        self.state.lock().log.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().log.is_empty()
    }

    pub fn clear(&self) {
        let mut state = self.state.lock();
        state.log.clear();
        state.model.clear();
    }
}

#[async_trait]
impl AnalyticsSink for MemorySink {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn push(&self, object: &DataLayerObject) -> Result<(), SinkError> {
        let mut state = self.state.lock();
        let map: Map<String, Value> = object.clone().into();
        state.model.extend(map);
        state.log.push(object.clone());
        Ok(())
    }
}
