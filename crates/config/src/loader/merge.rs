//! Overlaying a user document onto the default settings.

use serde_yaml::Value;

/// Deep-merge `overlay_value` onto `base`: mappings merge recursively,
/// sequences and scalars from the overlay replace the base, and an explicit
/// `null` in the overlay keeps the base value.
pub fn overlay(base: &Value, overlay_value: &Value) -> Value {
    match (base, overlay_value) {
        (Value::Mapping(bm), Value::Mapping(om)) => {
            let mut merged = bm.clone();
            for (key, child) in om {
                let value = match bm.get(key) {
                    Some(parent) => overlay(parent, child),
                    None => child.clone(),
                };
                merged.insert(key.clone(), value);
            }
            Value::Mapping(merged)
        }
        (base, Value::Null) => base.clone(),
        (_, child) => child.clone(),
    }
}
