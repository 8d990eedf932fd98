//! Shared analytics item shape
//!
//! Every mapper that reports products (purchase, basket, wishlist, product
//! lists, promotions) produces [`TrackingItem`]s through [`TrackingItem::from_product`].

use serde::Serialize;
use shared::models::{Price, Product, ReductionCategory, Variant};
use shared::money::cents_to_major;

/// List a product was shown in (category page, search results, recommendations)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemList {
    pub id: String,
    pub name: String,
}

impl ItemList {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TrackingItem {
    pub item_id: String,
    pub item_name: String,
    pub item_brand: String,
    pub item_brand_id: String,
    pub item_variant: String,
    pub item_category: String,
    pub item_category_id: String,
    pub item_image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_size: Option<String>,
    pub price: f64,
    pub original_price: f64,
    pub sale_discount: f64,
    pub campaign_discount: f64,
    pub quantity: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_list_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_list_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promotion_id: Option<String>,
    /// Only ever `Some(true)`; the key is omitted for available products
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sold_out: Option<bool>,
}

impl TrackingItem {
    /// Build an item from a product snapshot
    ///
    /// Price resolution: explicit `price`, then the variant's price, then the
    /// product's cheapest variant. Missing brand, category and image degrade
    /// to empty strings.
    pub fn from_product(product: &Product, variant: Option<&Variant>, price: Option<&Price>) -> Self {
        let price = price
            .or_else(|| variant.map(|v| &v.price))
            .or_else(|| product.lowest_price());
        let category = product.deepest_category();

        let mut item = Self {
            item_id: product.id.to_string(),
            item_name: product.name.clone().unwrap_or_default(),
            item_brand: product
                .brand
                .as_ref()
                .map(|b| b.name.clone())
                .unwrap_or_default(),
            item_brand_id: product
                .brand
                .as_ref()
                .map(|b| b.id.to_string())
                .unwrap_or_default(),
            item_variant: variant.map(|v| v.id.to_string()).unwrap_or_default(),
            item_category: category
                .map(|c| c.category_name.clone())
                .unwrap_or_default(),
            item_category_id: category
                .map(|c| c.category_id.to_string())
                .unwrap_or_default(),
            item_image: product.first_image_hash().unwrap_or_default().to_string(),
            item_color: product.color_label().map(String::from),
            item_size: variant.and_then(|v| v.size_label()).map(String::from),
            quantity: 1,
            sold_out: product.is_sold_out.then_some(true),
            ..Self::default()
        };
        if let Some(price) = price {
            item.apply_price(price);
        }
        item
    }

    /// Set price, original price and discount split from a price snapshot
    pub fn apply_price(&mut self, price: &Price) {
        self.price = cents_to_major(price.with_tax);
        self.original_price = cents_to_major(price.original_with_tax());
        self.sale_discount = cents_to_major(price.reductions_by_category(ReductionCategory::Sale));
        self.campaign_discount =
            cents_to_major(price.reductions_by_category(ReductionCategory::Campaign));
    }

    pub fn with_quantity(mut self, quantity: i64) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn in_list(mut self, list: &ItemList, index: usize) -> Self {
        self.item_list_id = Some(list.id.clone());
        self.item_list_name = Some(list.name.clone());
        self.index = Some(index);
        self
    }

    pub fn with_promotion(mut self, promotion_id: impl Into<String>) -> Self {
        self.promotion_id = Some(promotion_id.into());
        self
    }
}

/// Ecommerce section carrying only an item list
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ItemsEcommerce {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    pub items: Vec<TrackingItem>,
}

impl ItemsEcommerce {
    pub fn new(items: Vec<TrackingItem>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    //! Snapshot builders shared by the mapper tests

    use shared::models::*;

    pub fn price(with_tax: CentAmount) -> Price {
        Price {
            currency_code: "EUR".into(),
            with_tax,
            without_tax: with_tax * 100 / 119,
            ..Default::default()
        }
    }

    pub fn reduced_price(with_tax: CentAmount, sale: CentAmount, campaign: CentAmount) -> Price {
        let mut applied = Vec::new();
        for (category, cents) in [(ReductionCategory::Sale, sale), (ReductionCategory::Campaign, campaign)] {
            if cents > 0 {
                applied.push(AppliedReduction {
                    category,
                    kind: ReductionType::Absolute,
                    amount: ReductionAmount {
                        relative: 0.0,
                        absolute_with_tax: cents,
                    },
                });
            }
        }
        Price {
            applied_reductions: applied,
            total_applied_reductions: Some(TotalAppliedReductions {
                relative: 0.0,
                absolute_with_tax: sale + campaign,
            }),
            ..price(with_tax)
        }
    }

    pub fn variant(id: i64, with_tax: CentAmount) -> Variant {
        Variant {
            id,
            price: price(with_tax),
            stock: Some(Stock {
                quantity: 5,
                is_sellable_without_stock: false,
            }),
            attributes: Default::default(),
        }
    }

    pub fn category(id: i64, name: &str) -> ProductCategory {
        ProductCategory {
            category_id: id,
            category_name: name.into(),
            category_url: None,
            category_hidden: false,
        }
    }

    pub fn product(id: i64, variants: Vec<Variant>) -> Product {
        Product {
            id,
            name: Some(format!("Product {id}")),
            is_sold_out: false,
            brand: Some(Brand {
                id: 9,
                name: "Acme".into(),
            }),
            categories: vec![
                vec![category(1, "Women")],
                vec![category(1, "Women"), category(2, "Shoes"), category(3, "Sneakers")],
            ],
            images: vec![ProductImage {
                hash: format!("img-{id}"),
            }],
            variants,
            attributes: Default::default(),
        }
    }

    pub fn basket_item(key: &str, variant_id: i64, unit: CentAmount, quantity: i64) -> BasketItem {
        let v = variant(variant_id, unit);
        BasketItem {
            key: key.into(),
            quantity,
            product: product(variant_id / 10, vec![v.clone()]),
            variant: v,
            price: BasketItemPrice {
                total: price(unit * quantity),
                unit: price(unit),
            },
            promotion_id: None,
        }
    }

    pub fn bare_product(id: i64) -> Product {
        Product {
            id,
            name: None,
            is_sold_out: false,
            brand: None,
            categories: vec![],
            images: vec![],
            variants: vec![],
            attributes: Default::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_product_full() {
        let v = variant(11, 2500);
        let p = product(1, vec![v.clone()]);
        let item = TrackingItem::from_product(&p, Some(&v), Some(&reduced_price(2000, 300, 200)));

        assert_eq!(item.item_id, "1");
        assert_eq!(item.item_brand, "Acme");
        assert_eq!(item.item_brand_id, "9");
        assert_eq!(item.item_variant, "11");
        assert_eq!(item.item_category, "Sneakers");
        assert_eq!(item.item_category_id, "3");
        assert_eq!(item.item_image, "img-1");
        assert_eq!(item.price, 20.0);
        assert_eq!(item.original_price, 25.0);
        assert_eq!(item.sale_discount, 3.0);
        assert_eq!(item.campaign_discount, 2.0);
        assert_eq!(item.quantity, 1);
    }

    #[test]
    fn test_missing_fields_degrade_to_empty() {
        let item = TrackingItem::from_product(&bare_product(5), None, None);
        let value = serde_json::to_value(&item).unwrap();

        assert_eq!(value["item_brand"], json!(""));
        assert_eq!(value["item_category"], json!(""));
        assert_eq!(value["item_image"], json!(""));
        assert_eq!(value["price"], json!(0.0));
        assert!(value.get("sold_out").is_none());
        assert!(value.get("index").is_none());
    }

    #[test]
    fn test_sold_out_only_when_true() {
        let mut p = bare_product(5);
        p.is_sold_out = true;
        let value = serde_json::to_value(TrackingItem::from_product(&p, None, None)).unwrap();
        assert_eq!(value["sold_out"], json!(true));
    }

    #[test]
    fn test_list_position() {
        let list = ItemList::new("cat-3", "Sneakers");
        let item = TrackingItem::from_product(&bare_product(1), None, None).in_list(&list, 4);
        assert_eq!(item.index, Some(4));
        assert_eq!(item.item_list_name.as_deref(), Some("Sneakers"));
    }
}
