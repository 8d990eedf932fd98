//! Canonical event order resolution

/// Index used when an event name is absent from the canonical order
pub const UNORDERED_INDEX: i64 = -1;

/// Position of `event_name` in `canonical_order`, or `-1` if absent/undefined
pub fn resolve_index(event_name: Option<&str>, canonical_order: &[String]) -> i64 {
    event_name
        .and_then(|name| canonical_order.iter().position(|e| e == name))
        .map(|i| i as i64)
        .unwrap_or(UNORDERED_INDEX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order() -> Vec<String> {
        ["cart", "view_cart", "add_to_cart"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_resolve_known_events() {
        assert_eq!(resolve_index(Some("cart"), &order()), 0);
        assert_eq!(resolve_index(Some("add_to_cart"), &order()), 2);
    }

    #[test]
    fn test_resolve_unknown_or_missing() {
        assert_eq!(resolve_index(Some("custom_x"), &order()), UNORDERED_INDEX);
        assert_eq!(resolve_index(None, &order()), UNORDERED_INDEX);
        assert_eq!(resolve_index(Some("cart"), &[]), UNORDERED_INDEX);
    }
}
