//! Encoding of universal values into JSON.

use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use serde_json::{Map, Value};

use uniwire_model::UniValue;

/// Encodes a universal value as a JSON node.
///
/// Encoding is total: every value renders to some JSON and there is no
/// error path. Scalars map to native JSON scalars. The composite
/// conventions are:
///
/// - binary: `{"bit_length": <8 * byte count>, "base64": "<payload>"}`,
///   URL-safe base64 with padding
/// - dict: array of two-element `[key, value]` arrays
/// - union: `{"type": "ok" | "error", "value": <payload>}`
/// - enum: `{"variant": "<tag>", "value": <payload>}`
/// - object: JSON object with fields in declaration order
/// - absent optional, unit: `null`
///
/// A non-finite float has no JSON representation and renders as `null`.
pub fn encode_value(value: &UniValue) -> Value {
    match value {
        UniValue::Str(s) => Value::String(s.clone()),
        UniValue::Bool(b) => Value::Bool(*b),
        UniValue::Float(f) => Value::from(*f),
        UniValue::Int(i) => Value::from(*i),
        UniValue::Binary(bytes) => {
            let mut obj = Map::new();
            obj.insert(
                "bit_length".to_string(),
                Value::from(bytes.len() as u64 * 8),
            );
            obj.insert("base64".to_string(), Value::String(URL_SAFE.encode(bytes)));
            Value::Object(obj)
        }
        UniValue::Opaque(node) => node.clone(),
        UniValue::List(items) => Value::Array(items.iter().map(encode_value).collect()),
        UniValue::Dict(pairs) => Value::Array(
            pairs
                .iter()
                .map(|(k, v)| Value::Array(vec![encode_value(k), encode_value(v)]))
                .collect(),
        ),
        UniValue::Object(fields) => {
            let mut obj = Map::new();
            for (name, field_value) in fields {
                obj.insert(name.clone(), encode_value(field_value));
            }
            Value::Object(obj)
        }
        UniValue::Optional(None) => Value::Null,
        UniValue::Optional(Some(inner)) => encode_value(inner),
        UniValue::Union(side) => {
            let (tag, payload) = match side {
                Ok(v) => ("ok", v),
                Err(v) => ("error", v),
            };
            let mut obj = Map::new();
            obj.insert("type".to_string(), Value::String(tag.to_string()));
            obj.insert("value".to_string(), encode_value(payload));
            Value::Object(obj)
        }
        UniValue::Enum { tag, value } => {
            let mut obj = Map::new();
            obj.insert("variant".to_string(), Value::String(tag.clone()));
            obj.insert("value".to_string(), encode_value(value));
            Value::Object(obj)
        }
        UniValue::Unit => Value::Null,
    }
}

/// Encodes a universal value straight to JSON text.
pub fn encode_to_string(value: &UniValue) -> String {
    serde_json::to_string(&encode_value(value)).unwrap_or_else(|_| "null".to_string())
}
