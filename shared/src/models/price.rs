//! Price Model

use serde::{Deserialize, Serialize};

/// Amount in minor units (cents)
pub type CentAmount = i64;

/// Reduction category, used to split sale and campaign discounts
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ReductionCategory {
    Sale,
    Campaign,
    Voucher,
    /// Any category this crate does not split out
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReductionType {
    Relative,
    Absolute,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReductionAmount {
    /// Fraction of the original price (0.2 = 20%)
    #[serde(default)]
    pub relative: f64,
    pub absolute_with_tax: CentAmount,
}

/// A single reduction applied to a price
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppliedReduction {
    pub category: ReductionCategory,
    #[serde(rename = "type")]
    pub kind: ReductionType,
    pub amount: ReductionAmount,
}

/// Sum of all applied reductions
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TotalAppliedReductions {
    #[serde(default)]
    pub relative: f64,
    pub absolute_with_tax: CentAmount,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Tax {
    pub amount: CentAmount,
    #[serde(default)]
    pub rate: f64,
}

/// Price snapshot (variant, basket line or order line)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    #[serde(default)]
    pub currency_code: String,
    pub with_tax: CentAmount,
    #[serde(default)]
    pub without_tax: CentAmount,
    #[serde(default)]
    pub tax: Option<Tax>,
    #[serde(default)]
    pub applied_reductions: Vec<AppliedReduction>,
    #[serde(default)]
    pub total_applied_reductions: Option<TotalAppliedReductions>,
}

impl Price {
    /// Sum of applied reductions of one category, in cents
    pub fn reductions_by_category(&self, category: ReductionCategory) -> CentAmount {
        self.applied_reductions
            .iter()
            .filter(|r| r.category == category)
            .map(|r| r.amount.absolute_with_tax)
            .sum()
    }

    /// Price before any reduction, in cents
    ///
    /// `withTax + totalAppliedReductions.absoluteWithTax` when reductions are
    /// applied, `withTax` otherwise.
    pub fn original_with_tax(&self) -> CentAmount {
        if self.applied_reductions.is_empty() {
            return self.with_tax;
        }
        let total = self
            .total_applied_reductions
            .as_ref()
            .map(|t| t.absolute_with_tax)
            .unwrap_or_default();
        self.with_tax + total
    }

    pub fn has_reductions(&self) -> bool {
        !self.applied_reductions.is_empty()
    }
}
