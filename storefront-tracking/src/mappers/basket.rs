//! Basket mapping

use shared::models::{Basket, BasketItem};
use shared::money::cents_to_major;

use super::item::{ItemsEcommerce, TrackingItem};

/// Single basket line, priced per unit
pub fn map_basket_item(item: &BasketItem) -> TrackingItem {
    let mapped = TrackingItem::from_product(&item.product, Some(&item.variant), Some(&item.price.unit))
        .with_quantity(item.quantity);
    match &item.promotion_id {
        Some(id) => mapped.with_promotion(id.clone()),
        None => mapped,
    }
}

pub fn map_basket_items(basket: Option<&Basket>) -> Vec<TrackingItem> {
    basket
        .map(|b| b.items.iter().map(map_basket_item).collect())
        .unwrap_or_default()
}

/// Whole basket with total value and currency
pub fn map_basket(basket: Option<&Basket>) -> ItemsEcommerce {
    ItemsEcommerce {
        currency: basket.map(|b| b.currency_code.clone()),
        value: basket.map(|b| cents_to_major(b.cost.with_tax)),
        items: map_basket_items(basket),
    }
}

/// Basket line for add/remove events, with the quantity that changed
pub fn map_basket_change(item: &BasketItem, quantity: i64) -> ItemsEcommerce {
    let line = map_basket_item(item).with_quantity(quantity);
    ItemsEcommerce {
        currency: Some(item.price.unit.currency_code.clone()),
        value: Some(cents_to_major(item.price.unit.with_tax * quantity)),
        items: vec![line],
    }
}
