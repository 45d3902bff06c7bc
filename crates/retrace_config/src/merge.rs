//! Deep merge of JSON documents along an `extends` chain.

use serde_json::Value;

/// Merges `child` over `parent`, returning the combined document.
///
/// Objects merge key by key, recursively. Any other pairing, arrays included,
/// takes the child's value: a child array replaces the parent's rather than
/// extending it.
pub fn deep_merge(parent: Value, child: Value) -> Value {
    match (parent, child) {
        (Value::Object(mut base), Value::Object(overlay)) => {
            for (key, value) in overlay {
                let merged = match base.remove(&key) {
                    Some(existing) => deep_merge(existing, value),
                    None => value,
                };
                base.insert(key, merged);
            }
            Value::Object(base)
        }
        (_, child) => child,
    }
}
