//! Storefront snapshots
//!
//! Read-only views of storefront API entities as handed over by UI code.
//! Field names follow the storefront API (camelCase on the wire). All
//! monetary amounts are `i64` minor units (cents).

pub mod basket;
pub mod category;
pub mod customer;
pub mod order;
pub mod price;
pub mod product;
pub mod promotion;
pub mod search;
pub mod wishlist;

// Re-exports
pub use basket::*;
pub use category::*;
pub use customer::*;
pub use order::*;
pub use price::*;
pub use product::*;
pub use promotion::*;
pub use search::*;
pub use wishlist::*;
