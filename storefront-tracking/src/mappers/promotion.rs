//! Promotion mapping and product -> promotion resolution

use std::cmp::Ordering;

use serde::Serialize;
use shared::models::{Product, Promotion};

use super::item::TrackingItem;

/// Default priority comparator: higher `priority` sorts first
pub fn by_priority(a: &Promotion, b: &Promotion) -> Ordering {
    b.priority.cmp(&a.priority)
}

/// Promotion that applies to `product`
///
/// Candidates are the promotions whose custom-data attribute id equals the
/// product's promotion attribute id. Among them the first in `cmp` order
/// wins; on ties the earliest candidate in `promotions` is kept.
pub fn resolve_promotion_for_product<'a, F>(
    product: Option<&Product>,
    promotions: &'a [Promotion],
    cmp: F,
) -> Option<&'a Promotion>
where
    F: Fn(&Promotion, &Promotion) -> Ordering,
{
    let attribute_id = product?.promotion_attribute_id()?;
    promotions
        .iter()
        .filter(|p| p.custom_data.product_attribute_id == Some(attribute_id))
        .min_by(|a, b| cmp(a, b))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromotionEcommerce {
    pub promotion_id: String,
    pub promotion_name: String,
    pub creative_name: String,
    pub creative_slot: String,
    pub items: Vec<TrackingItem>,
}

/// Promotion impression / click, optionally tied to a product
pub fn map_promotion(
    promotion: &Promotion,
    product: Option<&Product>,
    creative_slot: &str,
) -> PromotionEcommerce {
    let items = product
        .map(|p| vec![TrackingItem::from_product(p, None, None).with_promotion(promotion.id.clone())])
        .unwrap_or_default();

    PromotionEcommerce {
        promotion_id: promotion.id.clone(),
        promotion_name: promotion.name.clone(),
        creative_name: promotion.custom_data.headline.clone().unwrap_or_default(),
        creative_slot: creative_slot.to_string(),
        items,
    }
}
