//! Random descriptor and value generation.
//!
//! Used by round-trip and conformance tests to cover shape combinations
//! that hand-written fixtures miss.

use rand::Rng;
use serde_json::Value as Json;

use crate::descriptor::{Field, PrimitiveKind, UniType, Variant};
use crate::value::UniValue;

const FIELD_NAMES: [&str; 4] = ["alpha", "beta", "gamma", "delta"];
const VARIANT_TAGS: [&str; 3] = ["first", "second", "third"];

/// Generates random well-formed descriptors and random conforming values.
pub struct RandomUni;

impl RandomUni {
    pub fn new() -> Self {
        Self
    }

    /// Generate a random value conforming to `ty`.
    ///
    /// Floats are always finite and dict keys pairwise distinct, so the
    /// result satisfies [`UniValue::conforms_to`] for any well-formed `ty`.
    pub fn value_for(&self, ty: &UniType) -> UniValue {
        match ty {
            UniType::Primitive(PrimitiveKind::Str) => UniValue::Str(gen_word()),
            UniType::Primitive(PrimitiveKind::Bool) => {
                UniValue::Bool(rand::thread_rng().gen_bool(0.5))
            }
            UniType::Primitive(PrimitiveKind::Float) => UniValue::Float(gen_float()),
            UniType::Primitive(PrimitiveKind::Int) => {
                UniValue::Int(rand::thread_rng().gen_range(-1_000_000..=1_000_000))
            }
            UniType::Binary => UniValue::Binary(gen_bytes()),
            UniType::Opaque => UniValue::Opaque(gen_json()),
            UniType::Unit => UniValue::Unit,
            UniType::List(element) => {
                let count = rand::thread_rng().gen_range(0..=4);
                UniValue::List((0..count).map(|_| self.value_for(element)).collect())
            }
            UniType::Dict { key, value } => self.gen_dict(key, value),
            UniType::Optional(inner) => {
                if rand::thread_rng().gen_bool(0.3) {
                    UniValue::none()
                } else {
                    UniValue::some(self.value_for(inner))
                }
            }
            UniType::Object(fields) => UniValue::Object(
                fields
                    .iter()
                    .map(|field| (field.name.clone(), self.value_for(&field.ty)))
                    .collect(),
            ),
            UniType::Union { ok, err } => {
                if rand::thread_rng().gen_bool(0.5) {
                    UniValue::ok(self.value_for(ok))
                } else {
                    UniValue::err(self.value_for(err))
                }
            }
            UniType::Enum(variants) => {
                if variants.is_empty() {
                    return UniValue::Unit;
                }
                let idx = rand::thread_rng().gen_range(0..variants.len());
                let variant = &variants[idx];
                UniValue::tagged(variant.tag.clone(), self.value_for(&variant.ty))
            }
        }
    }

    /// Generate a random well-formed descriptor at most `max_depth` levels
    /// deep.
    ///
    /// An optional never directly wraps a shape that can render as `null`
    /// on the wire (unit, another optional, opaque): such a wrapping is
    /// ambiguous when re-decoded, and generated descriptors are meant to
    /// round-trip exactly.
    pub fn descriptor(&self, max_depth: usize) -> UniType {
        self.gen_type(max_depth, true)
    }

    fn gen_dict(&self, key: &UniType, value: &UniType) -> UniValue {
        let count = rand::thread_rng().gen_range(0..=4);
        let mut pairs: Vec<(UniValue, UniValue)> = Vec::with_capacity(count);
        for _ in 0..count {
            let k = self.value_for(key);
            if pairs.iter().any(|(prev, _)| *prev == k) {
                continue;
            }
            let v = self.value_for(value);
            pairs.push((k, v));
        }
        UniValue::Dict(pairs)
    }

    fn gen_type(&self, depth: usize, allow_null_shapes: bool) -> UniType {
        let mut rng = rand::thread_rng();
        if depth == 0 || rng.gen_bool(0.4) {
            return self.gen_leaf(allow_null_shapes);
        }
        let arms = if allow_null_shapes { 6 } else { 5 };
        match rng.gen_range(0..arms) {
            0 => UniType::list(self.gen_type(depth - 1, true)),
            1 => UniType::dict(
                self.gen_type(depth - 1, true),
                self.gen_type(depth - 1, true),
            ),
            2 => {
                let count = rng.gen_range(0..=4);
                let mut fields = Vec::with_capacity(count);
                for i in 0..count {
                    fields.push(Field {
                        name: FIELD_NAMES[i].to_string(),
                        ty: self.gen_type(depth - 1, true),
                    });
                }
                UniType::Object(fields)
            }
            3 => UniType::union(
                self.gen_type(depth - 1, true),
                self.gen_type(depth - 1, true),
            ),
            4 => {
                let count = rng.gen_range(1..=3);
                let mut variants = Vec::with_capacity(count);
                for i in 0..count {
                    variants.push(Variant {
                        tag: VARIANT_TAGS[i].to_string(),
                        ty: self.gen_type(depth - 1, true),
                    });
                }
                UniType::Enum(variants)
            }
            _ => UniType::optional(self.gen_type(depth - 1, false)),
        }
    }

    fn gen_leaf(&self, allow_null_shapes: bool) -> UniType {
        let arms = if allow_null_shapes { 7 } else { 5 };
        match rand::thread_rng().gen_range(0..arms) {
            0 => UniType::str(),
            1 => UniType::bool(),
            2 => UniType::float(),
            3 => UniType::int(),
            4 => UniType::Binary,
            5 => UniType::Unit,
            _ => UniType::Opaque,
        }
    }
}

impl Default for RandomUni {
    fn default() -> Self {
        Self::new()
    }
}

fn gen_word() -> String {
    let len = rand::thread_rng().gen_range(0..=12);
    (0..len)
        .map(|_| rand::thread_rng().gen_range(b'a'..=b'z') as char)
        .collect()
}

fn gen_float() -> f64 {
    (rand::thread_rng().gen::<f64>() - 0.5) * 2_000_000.0
}

fn gen_bytes() -> Vec<u8> {
    let len = rand::thread_rng().gen_range(0..=16);
    (0..len).map(|_| rand::thread_rng().gen::<u8>()).collect()
}

fn gen_json() -> Json {
    let mut rng = rand::thread_rng();
    match rng.gen_range(0..5) {
        0 => Json::Null,
        1 => Json::Bool(rng.gen_bool(0.5)),
        2 => serde_json::json!(rng.gen_range(-1000..1000)),
        3 => Json::String(gen_word()),
        _ => serde_json::json!([rng.gen_range(0..100), rng.gen_range(0..100)]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn optional_inner_can_render_null(ty: &UniType) -> bool {
        match ty {
            UniType::Optional(inner) => {
                matches!(
                    inner.as_ref(),
                    UniType::Unit | UniType::Optional(_) | UniType::Opaque
                ) || optional_inner_can_render_null(inner)
            }
            UniType::List(element) => optional_inner_can_render_null(element),
            UniType::Dict { key, value } => {
                optional_inner_can_render_null(key) || optional_inner_can_render_null(value)
            }
            UniType::Object(fields) => fields
                .iter()
                .any(|field| optional_inner_can_render_null(&field.ty)),
            UniType::Union { ok, err } => {
                optional_inner_can_render_null(ok) || optional_inner_can_render_null(err)
            }
            UniType::Enum(variants) => variants
                .iter()
                .any(|variant| optional_inner_can_render_null(&variant.ty)),
            _ => false,
        }
    }

    #[test]
    fn generated_values_conform_to_fixed_descriptors() {
        let random = RandomUni::new();
        let descriptors = [
            UniType::str(),
            UniType::Binary,
            UniType::list(UniType::optional(UniType::int())),
            UniType::dict(UniType::bool(), UniType::float()),
            UniType::object([("alpha", UniType::int()), ("beta", UniType::Opaque)]),
            UniType::union(UniType::Unit, UniType::str()),
            UniType::enumeration([("first", UniType::Unit), ("second", UniType::Binary)]),
        ];
        for ty in &descriptors {
            for _ in 0..20 {
                let value = random.value_for(ty);
                assert!(value.conforms_to(ty), "{value:?} does not conform to {ty:?}");
            }
        }
    }

    #[test]
    fn generated_descriptors_are_well_formed() {
        let random = RandomUni::new();
        for _ in 0..100 {
            let ty = random.descriptor(3);
            assert!(ty.is_well_formed(), "{ty:?} is not well-formed");
        }
    }

    #[test]
    fn generated_descriptors_avoid_ambiguous_optionals() {
        let random = RandomUni::new();
        for _ in 0..100 {
            let ty = random.descriptor(4);
            assert!(
                !optional_inner_can_render_null(&ty),
                "{ty:?} nests a null-rendering shape under an optional"
            );
        }
    }

    #[test]
    fn generated_values_conform_to_generated_descriptors() {
        let random = RandomUni::new();
        for _ in 0..100 {
            let ty = random.descriptor(3);
            let value = random.value_for(&ty);
            assert!(value.conforms_to(&ty), "{value:?} does not conform to {ty:?}");
        }
    }
}
