//! Purchase mapping (checkout confirmation)

use std::collections::HashSet;

use serde::Serialize;
use shared::models::Order;
use shared::money::cents_to_major;

use super::item::TrackingItem;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PurchaseEcommerce {
    pub transaction_id: String,
    pub value: f64,
    pub tax: f64,
    pub shipping: f64,
    pub currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coupon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_type: Option<String>,
    pub items: Vec<TrackingItem>,
}

/// One item per variant; quantity counts the order lines sharing it
///
/// The first line of a variant provides product and price data. An absent
/// order yields an empty list.
pub fn map_purchase_items(order: Option<&Order>) -> Vec<TrackingItem> {
    let Some(order) = order else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    order
        .items
        .iter()
        .filter(|line| seen.insert(line.variant.id))
        .map(|line| {
            let quantity = order
                .items
                .iter()
                .filter(|other| other.variant.id == line.variant.id)
                .count() as i64;
            TrackingItem::from_product(&line.product, Some(&line.variant), Some(&line.price))
                .with_quantity(quantity)
        })
        .collect()
}

pub fn map_purchase(order: Option<&Order>) -> Option<PurchaseEcommerce> {
    let snapshot = order?;
    Some(PurchaseEcommerce {
        transaction_id: snapshot.id.to_string(),
        value: cents_to_major(snapshot.cost.with_tax),
        tax: cents_to_major(snapshot.cost.tax()),
        shipping: cents_to_major(snapshot.cost.shipping_with_tax()),
        currency: snapshot.currency_code.clone(),
        coupon: snapshot.coupon(),
        payment_type: snapshot.payment_method.clone(),
        items: map_purchase_items(order),
    })
}

#[cfg(test)]
mod tests {
    use super::super::item::fixtures::*;
    use super::*;
    use serde_json::json;
    use shared::models::*;

    fn line(id: i64, product: &Product, variant: &Variant, price: Price) -> OrderItem {
        OrderItem {
            id,
            product: product.clone(),
            variant: variant.clone(),
            price,
        }
    }

    fn order() -> Order {
        let v1 = variant(101, 2000);
        let v2 = variant(102, 3000);
        let p1 = product(1, vec![v1.clone()]);
        let mut p2 = product(2, vec![v2.clone()]);
        p2.is_sold_out = true;

        Order {
            id: 5001,
            currency_code: "EUR".into(),
            items: vec![
                line(1, &p1, &v1, reduced_price(2000, 500, 100)),
                line(2, &p2, &v2, price(3000)),
                line(3, &p1, &v1, price(9999)),
            ],
            cost: OrderCost {
                with_tax: 7495,
                without_tax: 6298,
                applied_fees: vec![AppliedFee {
                    category: "delivery".into(),
                    amount: FeeAmount {
                        with_tax: 495,
                        without_tax: 416,
                    },
                }],
            },
            vouchers: vec![OrderVoucher { code: "WELCOME".into() }],
            payment_method: Some("paypal".into()),
        }
    }

    #[test]
    fn test_duplicate_variants_merge_with_quantity() {
        let order = order();
        let items = map_purchase_items(Some(&order));

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].item_variant, "101");
        assert_eq!(items[0].quantity, 2);
        assert_eq!(items[1].item_variant, "102");
        assert_eq!(items[1].quantity, 1);

        // first occurrence wins
        assert_eq!(items[0].price, 20.0);
    }

    #[test]
    fn test_original_price_and_discounts() {
        let items = map_purchase_items(Some(&order()));

        assert_eq!(items[0].original_price, 26.0);
        assert_eq!(items[0].sale_discount, 5.0);
        assert_eq!(items[0].campaign_discount, 1.0);

        assert_eq!(items[1].original_price, 30.0);
        assert_eq!(items[1].sale_discount, 0.0);
    }

    #[test]
    fn test_category_and_sold_out() {
        let items = map_purchase_items(Some(&order()));
        let first = serde_json::to_value(&items[0]).unwrap();
        let second = serde_json::to_value(&items[1]).unwrap();

        assert_eq!(first["item_category"], json!("Sneakers"));
        assert_eq!(first["item_category_id"], json!("3"));
        assert!(first.get("sold_out").is_none());
        assert_eq!(second["sold_out"], json!(true));
    }

    #[test]
    fn test_order_totals() {
        let purchase = map_purchase(Some(&order())).unwrap();

        assert_eq!(purchase.transaction_id, "5001");
        assert_eq!(purchase.value, 74.95);
        assert_eq!(purchase.tax, 11.97);
        assert_eq!(purchase.shipping, 4.95);
        assert_eq!(purchase.currency, "EUR");
        assert_eq!(purchase.coupon.as_deref(), Some("WELCOME"));
        assert_eq!(purchase.payment_type.as_deref(), Some("paypal"));
    }

    #[test]
    fn test_absent_order() {
        assert!(map_purchase(None).is_none());
        assert!(map_purchase_items(None).is_empty());
    }
}
