//! Shared types for the storefront tracking workspace
//!
//! Read-only storefront snapshots (orders, baskets, products, promotions),
//! the data layer payload pushed to analytics sinks, money helpers and
//! payload-level errors.

pub mod error;
pub mod models;
pub mod money;
pub mod payload;
pub mod util;

// Re-exports
pub use error::{PayloadError, PayloadResult};
pub use payload::{DataLayerObject, RESERVED_KEYS};
pub use serde::{Deserialize, Serialize};
