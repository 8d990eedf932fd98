//! Promotion Model

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PromotionCustomData {
    /// Matches [`super::Product::promotion_attribute_id`]
    #[serde(default)]
    pub product_attribute_id: Option<i64>,
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Promotion {
    pub id: String,
    pub name: String,
    /// Higher value = higher priority, not unique
    #[serde(default)]
    pub priority: i32,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub custom_data: PromotionCustomData,
}
