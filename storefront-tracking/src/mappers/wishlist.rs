//! Wishlist mapping

use shared::models::{Wishlist, WishlistItem};

use super::item::{ItemsEcommerce, TrackingItem};

/// Wishlist entry, `None` when the product is no longer available
pub fn map_wishlist_item(item: &WishlistItem) -> Option<TrackingItem> {
    let product = item.product.as_ref()?;
    Some(TrackingItem::from_product(product, item.variant.as_ref(), None))
}

pub fn map_wishlist(wishlist: Option<&Wishlist>) -> ItemsEcommerce {
    let items = wishlist
        .map(|w| w.items.iter().filter_map(map_wishlist_item).collect())
        .unwrap_or_default();
    ItemsEcommerce::new(items)
}
