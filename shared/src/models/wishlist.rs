//! Wishlist Model

use serde::{Deserialize, Serialize};

use super::product::{Product, Variant};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WishlistItem {
    pub key: String,
    #[serde(default)]
    pub product_id: Option<i64>,
    /// Missing when the product went offline after being saved
    #[serde(default)]
    pub product: Option<Product>,
    #[serde(default)]
    pub variant: Option<Variant>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Wishlist {
    pub key: String,
    #[serde(default)]
    pub items: Vec<WishlistItem>,
}
