//! Page context
//!
//! Set by page-level lifecycle code, read at flush time to stamp events that
//! carry no page fields of their own.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageContext {
    pub page_type: String,
    pub page_type_id: String,
}

impl PageContext {
    pub fn new(page_type: impl Into<String>, page_type_id: impl Into<String>) -> Self {
        Self {
            page_type: page_type.into(),
            page_type_id: page_type_id.into(),
        }
    }
}

/// Synchronously readable page context store
#[derive(Debug, Default)]
pub struct PageContextStore {
    inner: RwLock<PageContext>,
}

impl PageContextStore {
    pub fn get(&self) -> PageContext {
        self.inner.read().clone()
    }

    pub fn set(&self, context: PageContext) {
        tracing::debug!(
            page_type = %context.page_type,
            page_type_id = %context.page_type_id,
            "Page context updated"
        );
        *self.inner.write() = context;
    }
}
