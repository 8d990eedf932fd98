//! Money conversion utilities using rust_decimal for precision
//!
//! Storefront snapshots carry amounts in minor units (cents). Analytics
//! payloads carry major units. Conversion goes through `Decimal` so that
//! sums of many small amounts never pick up binary floating point noise.

use rust_decimal::prelude::*;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Minor units per major unit
const CENTS_PER_UNIT: i64 = 100;

/// Convert a cent amount into a `Decimal` in major units
#[inline]
pub fn cents_to_decimal(cents: i64) -> Decimal {
    Decimal::from(cents) / Decimal::from(CENTS_PER_UNIT)
}

/// Convert Decimal to f64 for serialization, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_else(|| {
            tracing::error!(value = %value, "Decimal out of f64 range, defaulting to zero");
            0.0
        })
}

/// Convert a cent amount to major units (`1999` -> `19.99`)
#[inline]
pub fn cents_to_major(cents: i64) -> f64 {
    to_f64(cents_to_decimal(cents))
}

/// Sum cent amounts and convert the total to major units
pub fn sum_cents_to_major<I>(amounts: I) -> f64
where
    I: IntoIterator<Item = i64>,
{
    let total = amounts
        .into_iter()
        .fold(Decimal::ZERO, |acc, cents| acc + cents_to_decimal(cents));
    to_f64(total)
}
