//! Event names pushed by [`super::TrackingEvents`]

pub const PURCHASE: &str = "purchase";
pub const CART: &str = "cart";
pub const VIEW_CART: &str = "view_cart";
pub const ADD_TO_CART: &str = "add_to_cart";
pub const REMOVE_FROM_CART: &str = "remove_from_cart";
pub const WISHLIST: &str = "wishlist";
pub const ADD_TO_WISHLIST: &str = "add_to_wishlist";
pub const REMOVE_FROM_WISHLIST: &str = "remove_from_wishlist";
pub const VIEW_ITEM: &str = "view_item";
pub const VIEW_ITEM_LIST: &str = "view_item_list";
pub const SELECT_ITEM: &str = "select_item";
pub const VIEW_PROMOTION: &str = "view_promotion";
pub const SELECT_PROMOTION: &str = "select_promotion";
pub const SEARCH: &str = "search";
pub const CUSTOMER_DATA: &str = "customer_data";
pub const CONTENT_VIEW: &str = "content_view";
