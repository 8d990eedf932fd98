/// Upper bound of the quantity selector
pub const MAX_SELECTABLE_QUANTITY: i64 = 10;

/// Largest quantity a shopper may pick for a variant
///
/// Unknown stock allows a single unit; known stock is capped at
/// [`MAX_SELECTABLE_QUANTITY`].
pub fn get_max_quantity(stock: Option<i64>) -> i64 {
    match stock {
        None => 1,
        Some(quantity) => quantity.clamp(0, MAX_SELECTABLE_QUANTITY),
    }
}
