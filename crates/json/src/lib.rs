//! JSON wire codec for universal values.
//!
//! Two mirror-image recursions over a [`UniType`] descriptor and its data:
//!
//! - [`encode_value`] / [`encode_to_string`] turn a [`UniValue`] into JSON.
//!   Encoding is total and never fails.
//! - [`decode_value`] / [`decode_str`] turn JSON back into a [`UniValue`],
//!   guided by the descriptor. Decoding is strict and fails fast with a
//!   [`DecodeError`] locating the first offending node.
//!
//! # Lenient encode, strict decode
//!
//! The asymmetry is deliberate. The encoder checks nothing against any
//! descriptor: a malformed value still renders to some JSON (a non-finite
//! float becomes `null`). The decoder rejects exactly what does not match
//! the descriptor. Callers that rely on the round-trip law
//! `decode(encode(v)) == v` should gate on [`UniValue::conforms_to`] before
//! encoding.
//!
//! # Wire conventions
//!
//! - binary: `{"bit_length": <8 * byte count>, "base64": "<payload>"}`,
//!   URL-safe base64 with padding
//! - float: shortest decimal rendering; decoding re-reads the exact bits
//! - dict: array of two-element `[key, value]` arrays, never a JSON object,
//!   so keys are not limited to strings
//! - union: `{"type": "ok" | "error", "value": <payload>}`
//! - enum: `{"variant": "<tag>", "value": <payload>}`
//! - object: JSON object with fields in declaration order; undeclared keys
//!   are ignored on decode
//! - optional: `null` when absent, otherwise the inner value
//! - unit: `null`, and any node decodes as unit
//!
//! Because an absent optional renders as `null`, an optional directly over
//! a shape that can itself render as `null` (unit, another optional, an
//! opaque null) is ambiguous on the wire: `Some(Unit)` re-decodes as
//! `None`. Descriptor authors should avoid such nestings.
//!
//! Both recursions consume call stack proportional to nesting depth; there
//! is no built-in depth limit.

pub mod decode;
pub mod encode;
pub mod error;

pub use decode::{decode_str, decode_value};
pub use encode::{encode_to_string, encode_value};
pub use error::{DecodeError, DecodeErrorKind, PathSegment};

pub use uniwire_model::{Field, PrimitiveKind, RandomUni, UniType, UniValue, Variant};
