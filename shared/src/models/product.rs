//! Product Model

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::category::{ProductCategory, deepest_category};
use super::price::Price;

/// Attribute key holding the promotion a product takes part in
pub const PROMOTION_ATTRIBUTE: &str = "promotion";
/// Attribute key holding the colour label
pub const COLOR_ATTRIBUTE: &str = "color";
/// Attribute key holding the size label (variants)
pub const SIZE_ATTRIBUTE: &str = "size";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Brand {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductImage {
    pub hash: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AttributeValue {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub value: Option<String>,
}

/// Attribute values come either as a single object or as a list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum AttributeValues {
    Single(AttributeValue),
    Multi(Vec<AttributeValue>),
}

impl AttributeValues {
    pub fn first(&self) -> Option<&AttributeValue> {
        match self {
            Self::Single(v) => Some(v),
            Self::Multi(vs) => vs.first(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductAttribute {
    pub key: String,
    #[serde(default)]
    pub label: String,
    pub values: AttributeValues,
}

pub type Attributes = HashMap<String, ProductAttribute>;

fn first_value<'a>(attributes: &'a Attributes, key: &str) -> Option<&'a AttributeValue> {
    attributes.get(key).and_then(|a| a.values.first())
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Stock {
    pub quantity: i64,
    #[serde(default)]
    pub is_sellable_without_stock: bool,
}

/// Product variant (size / article)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    pub id: i64,
    pub price: Price,
    #[serde(default)]
    pub stock: Option<Stock>,
    #[serde(default)]
    pub attributes: Attributes,
}

impl Variant {
    pub fn size_label(&self) -> Option<&str> {
        first_value(&self.attributes, SIZE_ATTRIBUTE).map(|v| v.label.as_str())
    }
}

/// Product snapshot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub is_sold_out: bool,
    #[serde(default)]
    pub brand: Option<Brand>,
    /// Category paths, each ordered root -> leaf
    #[serde(default)]
    pub categories: Vec<Vec<ProductCategory>>,
    #[serde(default)]
    pub images: Vec<ProductImage>,
    #[serde(default)]
    pub variants: Vec<Variant>,
    #[serde(default)]
    pub attributes: Attributes,
}

impl Product {
    pub fn deepest_category(&self) -> Option<&ProductCategory> {
        deepest_category(&self.categories)
    }

    pub fn first_image_hash(&self) -> Option<&str> {
        self.images.first().map(|i| i.hash.as_str())
    }

    /// Id of the promotion this product is attached to
    pub fn promotion_attribute_id(&self) -> Option<i64> {
        first_value(&self.attributes, PROMOTION_ATTRIBUTE).and_then(|v| v.id)
    }

    pub fn color_label(&self) -> Option<&str> {
        first_value(&self.attributes, COLOR_ATTRIBUTE).map(|v| v.label.as_str())
    }

    pub fn variant(&self, variant_id: i64) -> Option<&Variant> {
        self.variants.iter().find(|v| v.id == variant_id)
    }

    /// Cheapest variant price, used for list views where no variant is chosen
    pub fn lowest_price(&self) -> Option<&Price> {
        self.variants.iter().map(|v| &v.price).min_by_key(|p| p.with_tax)
    }
}
