//! Strict, descriptor-driven decoding of JSON into universal values.

use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use serde_json::{Map, Value};

use uniwire_model::{PrimitiveKind, UniType, UniValue};

use crate::error::{DecodeError, DecodeErrorKind, PathSegment};

/// Decodes a parsed JSON node against a descriptor.
///
/// The descriptor and the node tree are walked together; the first shape
/// mismatch aborts the whole call with a [`DecodeError`] locating the
/// offending node. Keys of a JSON object that the descriptor does not
/// declare are ignored. Recursion depth is bounded only by the descriptor
/// and document nesting.
pub fn decode_value(ty: &UniType, node: &Value) -> Result<UniValue, DecodeError> {
    let mut path = Vec::new();
    decode_at(ty, node, &mut path)
}

/// Parses JSON text and decodes it against a descriptor.
pub fn decode_str(ty: &UniType, text: &str) -> Result<UniValue, DecodeError> {
    let node: Value = serde_json::from_str(text).map_err(|e| {
        DecodeError::new(DecodeErrorKind::InvalidJson(e.to_string()), Vec::new())
    })?;
    decode_value(ty, &node)
}

fn decode_at(
    ty: &UniType,
    node: &Value,
    path: &mut Vec<PathSegment>,
) -> Result<UniValue, DecodeError> {
    match ty {
        UniType::Primitive(kind) => decode_primitive(*kind, node, path),
        UniType::Binary => decode_binary(node, path),
        UniType::Opaque => Ok(UniValue::Opaque(node.clone())),
        UniType::Unit => Ok(UniValue::Unit),
        UniType::List(element) => {
            let items = node.as_array().ok_or_else(|| mismatch("array", node, path))?;
            let mut out = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                path.push(PathSegment::Index(i));
                out.push(decode_at(element, item, path)?);
                path.pop();
            }
            Ok(UniValue::List(out))
        }
        UniType::Dict { key, value } => {
            let rows = node.as_array().ok_or_else(|| mismatch("array", node, path))?;
            let mut pairs: Vec<(UniValue, UniValue)> = Vec::with_capacity(rows.len());
            for (i, row) in rows.iter().enumerate() {
                path.push(PathSegment::Index(i));
                let cells = row.as_array().ok_or_else(|| mismatch("array", row, path))?;
                if cells.len() != 2 {
                    return Err(fail(DecodeErrorKind::BadDictRow(cells.len()), path));
                }
                path.push(PathSegment::Index(0));
                let k = decode_at(key, &cells[0], path)?;
                path.pop();
                path.push(PathSegment::Index(1));
                let v = decode_at(value, &cells[1], path)?;
                path.pop();
                path.pop();
                // Duplicate keys: the last row wins, in the slot of the first.
                if let Some(pos) = pairs.iter().position(|(prev, _)| prev == &k) {
                    pairs[pos].1 = v;
                } else {
                    pairs.push((k, v));
                }
            }
            Ok(UniValue::Dict(pairs))
        }
        UniType::Optional(inner) => {
            if node.is_null() {
                Ok(UniValue::Optional(None))
            } else {
                let v = decode_at(inner, node, path)?;
                Ok(UniValue::Optional(Some(Box::new(v))))
            }
        }
        UniType::Object(fields) => {
            let map = node.as_object().ok_or_else(|| mismatch("object", node, path))?;
            let mut out = Vec::with_capacity(fields.len());
            for field in fields {
                let field_node = map.get(&field.name).ok_or_else(|| {
                    fail(DecodeErrorKind::MissingField(field.name.clone()), path)
                })?;
                path.push(PathSegment::Field(field.name.clone()));
                let v = decode_at(&field.ty, field_node, path)?;
                path.pop();
                out.push((field.name.clone(), v));
            }
            Ok(UniValue::Object(out))
        }
        UniType::Union { ok, err } => {
            let map = node.as_object().ok_or_else(|| mismatch("object", node, path))?;
            let tag_node = require(map, "type", path)?;
            path.push(PathSegment::Field("type".to_string()));
            let tag = tag_node
                .as_str()
                .ok_or_else(|| mismatch("string", tag_node, path))?;
            let inner_ty = match tag {
                "ok" => ok,
                "error" => err,
                other => {
                    return Err(fail(
                        DecodeErrorKind::UnknownUnionTag {
                            tag: other.to_string(),
                        },
                        path,
                    ))
                }
            };
            path.pop();
            let payload_node = require(map, "value", path)?;
            path.push(PathSegment::Field("value".to_string()));
            let payload = Box::new(decode_at(inner_ty, payload_node, path)?);
            path.pop();
            Ok(UniValue::Union(if tag == "ok" {
                Ok(payload)
            } else {
                Err(payload)
            }))
        }
        UniType::Enum(variants) => {
            let map = node.as_object().ok_or_else(|| mismatch("object", node, path))?;
            let tag_node = require(map, "variant", path)?;
            path.push(PathSegment::Field("variant".to_string()));
            let tag = tag_node
                .as_str()
                .ok_or_else(|| mismatch("string", tag_node, path))?;
            let variant = variants
                .iter()
                .find(|variant| variant.tag == tag)
                .ok_or_else(|| {
                    let expected = variants
                        .iter()
                        .map(|variant| variant.tag.as_str())
                        .collect::<Vec<_>>()
                        .join(", ");
                    fail(
                        DecodeErrorKind::UnknownEnumTag {
                            tag: tag.to_string(),
                            expected,
                        },
                        path,
                    )
                })?;
            path.pop();
            let payload_node = require(map, "value", path)?;
            path.push(PathSegment::Field("value".to_string()));
            let payload = Box::new(decode_at(&variant.ty, payload_node, path)?);
            path.pop();
            Ok(UniValue::Enum {
                tag: variant.tag.clone(),
                value: payload,
            })
        }
    }
}

fn decode_primitive(
    kind: PrimitiveKind,
    node: &Value,
    path: &[PathSegment],
) -> Result<UniValue, DecodeError> {
    match kind {
        PrimitiveKind::Str => node.as_str().map(|s| UniValue::Str(s.to_string())),
        PrimitiveKind::Bool => node.as_bool().map(UniValue::Bool),
        PrimitiveKind::Float => node.as_f64().map(UniValue::Float),
        PrimitiveKind::Int => node.as_i64().map(UniValue::Int),
    }
    .ok_or_else(|| mismatch(kind.as_str(), node, path))
}

fn decode_binary(node: &Value, path: &mut Vec<PathSegment>) -> Result<UniValue, DecodeError> {
    let map = node.as_object().ok_or_else(|| mismatch("object", node, path))?;
    let len_node = require(map, "bit_length", path)?;
    path.push(PathSegment::Field("bit_length".to_string()));
    let declared = len_node
        .as_i64()
        .ok_or_else(|| mismatch("int", len_node, path))?;
    path.pop();
    let b64_node = require(map, "base64", path)?;
    path.push(PathSegment::Field("base64".to_string()));
    let b64 = b64_node
        .as_str()
        .ok_or_else(|| mismatch("string", b64_node, path))?;
    let bytes = URL_SAFE
        .decode(b64)
        .map_err(|e| fail(DecodeErrorKind::InvalidBase64(e.to_string()), path))?;
    path.pop();
    let actual = bytes.len() as i64 * 8;
    if declared != actual {
        return Err(fail(
            DecodeErrorKind::BitLengthMismatch { declared, actual },
            path,
        ));
    }
    Ok(UniValue::Binary(bytes))
}

fn require<'a>(
    map: &'a Map<String, Value>,
    name: &'static str,
    path: &[PathSegment],
) -> Result<&'a Value, DecodeError> {
    map.get(name)
        .ok_or_else(|| fail(DecodeErrorKind::MissingField(name.to_string()), path))
}

fn fail(kind: DecodeErrorKind, path: &[PathSegment]) -> DecodeError {
    DecodeError::new(kind, path.to_vec())
}

fn mismatch(expected: &'static str, node: &Value, path: &[PathSegment]) -> DecodeError {
    fail(
        DecodeErrorKind::Mismatch {
            expected,
            found: json_kind(node),
        },
        path,
    )
}

/// Kind name of a JSON node for mismatch messages. Integral numbers report
/// as "int" when i64-representable, "uint" when only u64 fits the literal,
/// and anything else as "float".
fn json_kind(node: &Value) -> &'static str {
    match node {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) => {
            if n.is_i64() {
                "int"
            } else if n.is_u64() {
                "uint"
            } else {
                "float"
            }
        }
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
