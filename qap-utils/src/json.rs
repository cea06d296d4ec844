use serde::{Deserialize, Serialize};
use serde_json::{to_string, to_value, Map, Value};

pub fn dejsonify<'a, T>(json_str: &'a str) -> serde_json::Result<T>
where
    T: Deserialize<'a>,
{
    serde_json::from_str::<T>(json_str)
}

/// Serializes `obj` with object keys sorted at every depth, so equal values
/// always produce byte-identical strings.
pub fn jsonify<T>(obj: &T) -> serde_json::Result<String>
where
    T: Serialize,
{
    to_string(&jsonify_internal(&to_value(obj)?))
}

pub fn jsonify_internal(json_value: &Value) -> Value {
    match json_value {
        Value::Object(obj) => {
            let mut sorted_map = Map::new();
            let mut keys: Vec<&String> = obj.keys().collect();
            keys.sort();
            for key in keys {
                if let Some(value) = obj.get(key) {
                    sorted_map.insert(key.clone(), jsonify_internal(value));
                }
            }
            Value::Object(sorted_map)
        }
        Value::Array(arr) => Value::Array(arr.iter().map(jsonify_internal).collect()),
        _ => json_value.clone(),
    }
}

/// Reads an optional hyperparameter map entry, falling back to `default` when
/// the map or the key is absent.
pub fn hyperparameter<T>(
    hyperparameters: &Option<Map<String, Value>>,
    key: &str,
    default: T,
) -> serde_json::Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    match hyperparameters.as_ref().and_then(|m| m.get(key)) {
        Some(value) => serde_json::from_value(value.clone()),
        None => Ok(default),
    }
}
