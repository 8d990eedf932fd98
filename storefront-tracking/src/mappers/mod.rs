//! Payload mappers
//!
//! Pure functions from storefront snapshots to analytics payload sections.
//! Missing nested data degrades to empty strings / `None`; an absent order,
//! basket or wishlist yields an empty item list. Nothing here panics on
//! partial input.

pub mod basket;
pub mod change;
pub mod customer;
pub mod item;
pub mod product;
pub mod promotion;
pub mod purchase;
pub mod quantity;
pub mod search;
pub mod wishlist;

pub use basket::{map_basket, map_basket_change, map_basket_item, map_basket_items};
pub use change::did_data_change;
pub use customer::{CustomerData, map_customer};
pub use item::{ItemList, ItemsEcommerce, TrackingItem};
pub use product::{map_item_list, map_select_item, map_view_item};
pub use promotion::{PromotionEcommerce, by_priority, map_promotion, resolve_promotion_for_product};
pub use purchase::{PurchaseEcommerce, map_purchase, map_purchase_items};
pub use quantity::{MAX_SELECTABLE_QUANTITY, get_max_quantity};
pub use search::{SearchData, map_search};
pub use wishlist::{map_wishlist, map_wishlist_item};
