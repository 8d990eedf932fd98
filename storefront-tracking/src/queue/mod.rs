//! Pending event queue
//!
//! Events are tagged with an order index at enqueue time. Known events take
//! their canonical position and advance `last_index`; unknown events inherit
//! `last_index` so they stay right behind the known event pushed before them.
//! Draining sorts stably by index, so ties keep insertion order.

pub mod order;

pub use order::{UNORDERED_INDEX, resolve_index};

use shared::DataLayerObject;

/// A queued payload and its resolved dispatch position
#[derive(Debug, Clone, PartialEq)]
pub struct PendingEvent {
    pub payload: DataLayerObject,
    /// Resolved once at enqueue time, never changes
    pub order_index: i64,
}

#[derive(Debug)]
pub struct EventQueue {
    pending: Vec<PendingEvent>,
    /// Index of the last known event seen this session
    last_index: i64,
}

impl EventQueue {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
            last_index: UNORDERED_INDEX,
        }
    }

    /// Append a payload, returning the order index it was given
    pub fn enqueue(&mut self, payload: DataLayerObject, canonical_order: &[String]) -> i64 {
        let resolved = resolve_index(payload.event_name(), canonical_order);
        let order_index = if resolved == UNORDERED_INDEX {
            self.last_index
        } else {
            self.last_index = resolved;
            resolved
        };
        self.pending.push(PendingEvent {
            payload,
            order_index,
        });
        order_index
    }

    /// Whether a not-yet-flushed event has this name
    pub fn has_event(&self, event_name: &str) -> bool {
        self.pending
            .iter()
            .any(|e| e.payload.event_name() == Some(event_name))
    }

    /// Take every pending event, stably sorted by order index
    ///
    /// The queue is empty afterwards. `last_index` is session state and is
    /// kept across drains.
    pub fn drain_sorted(&mut self) -> Vec<PendingEvent> {
        let mut batch = std::mem::take(&mut self.pending);
        batch.sort_by_key(|e| e.order_index);
        batch
    }

    pub fn last_index(&self) -> i64 {
        self.last_index
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}
