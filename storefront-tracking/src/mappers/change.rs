//! Change detection for re-tracking on state mutation

use serde::Serialize;
use serde_json::Value;

fn to_value<T: Serialize>(data: Option<&T>) -> Option<Value> {
    data.map(|d| {
        serde_json::to_value(d).unwrap_or_else(|e| {
            tracing::warn!("Change detection could not serialize snapshot: {e}");
            Value::Null
        })
    })
}

/// True when `new` differs from `old`
///
/// Appearing or disappearing counts as a change, as does any difference in
/// nested content.
pub fn did_data_change<T: Serialize>(old: Option<&T>, new: Option<&T>) -> bool {
    to_value(old) != to_value(new)
}
