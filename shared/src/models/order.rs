//! Order Model (checkout confirmation snapshot)

use serde::{Deserialize, Serialize};

use super::price::{CentAmount, Price};
use super::product::{Product, Variant};

/// Fee categories counted as shipping
const SHIPPING_FEE_CATEGORIES: &[&str] = &["delivery", "shipping"];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FeeAmount {
    pub with_tax: CentAmount,
    #[serde(default)]
    pub without_tax: CentAmount,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppliedFee {
    pub category: String,
    pub amount: FeeAmount,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderCost {
    pub with_tax: CentAmount,
    #[serde(default)]
    pub without_tax: CentAmount,
    #[serde(default)]
    pub applied_fees: Vec<AppliedFee>,
}

impl OrderCost {
    pub fn tax(&self) -> CentAmount {
        self.with_tax - self.without_tax
    }

    pub fn shipping_with_tax(&self) -> CentAmount {
        self.applied_fees
            .iter()
            .filter(|f| SHIPPING_FEE_CATEGORIES.contains(&f.category.as_str()))
            .map(|f| f.amount.with_tax)
            .sum()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderVoucher {
    pub code: String,
}

/// One order line. Multiple lines may share a variant (quantity > 1).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: i64,
    pub product: Product,
    pub variant: Variant,
    pub price: Price,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    #[serde(default)]
    pub currency_code: String,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub cost: OrderCost,
    #[serde(default)]
    pub vouchers: Vec<OrderVoucher>,
    #[serde(default)]
    pub payment_method: Option<String>,
}

impl Order {
    /// Voucher codes joined as a single coupon string
    pub fn coupon(&self) -> Option<String> {
        if self.vouchers.is_empty() {
            return None;
        }
        Some(
            self.vouchers
                .iter()
                .map(|v| v.code.as_str())
                .collect::<Vec<_>>()
                .join(","),
        )
    }
}
