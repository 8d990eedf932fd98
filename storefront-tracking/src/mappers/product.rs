//! Product detail and product list mapping

use shared::models::{Product, Variant};

use super::item::{ItemList, ItemsEcommerce, TrackingItem};

pub fn map_view_item(product: &Product, variant: Option<&Variant>) -> ItemsEcommerce {
    let item = TrackingItem::from_product(product, variant, None);
    ItemsEcommerce {
        currency: variant
            .map(|v| &v.price)
            .or_else(|| product.lowest_price())
            .map(|p| p.currency_code.clone()),
        value: Some(item.price),
        items: vec![item],
    }
}

/// Products as shown in a list, `index` counted from `offset`
pub fn map_item_list(products: &[Product], list: &ItemList, offset: usize) -> ItemsEcommerce {
    let items = products
        .iter()
        .enumerate()
        .map(|(i, p)| TrackingItem::from_product(p, None, None).in_list(list, offset + i))
        .collect();
    ItemsEcommerce::new(items)
}

pub fn map_select_item(product: &Product, list: &ItemList, index: usize) -> ItemsEcommerce {
    ItemsEcommerce::new(vec![
        TrackingItem::from_product(product, None, None).in_list(list, index),
    ])
}
