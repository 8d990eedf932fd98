//! Basket Model

use serde::{Deserialize, Serialize};

use super::price::{CentAmount, Price};
use super::product::{Product, Variant};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BasketItemPrice {
    pub total: Price,
    pub unit: Price,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BasketItem {
    pub key: String,
    pub quantity: i64,
    pub product: Product,
    pub variant: Variant,
    pub price: BasketItemPrice,
    #[serde(default)]
    pub promotion_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BasketCost {
    pub with_tax: CentAmount,
    #[serde(default)]
    pub without_tax: CentAmount,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Basket {
    pub key: String,
    #[serde(default)]
    pub currency_code: String,
    #[serde(default)]
    pub items: Vec<BasketItem>,
    #[serde(default)]
    pub cost: BasketCost,
}

impl Basket {
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}
