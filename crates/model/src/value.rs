//! Universal values.

use serde_json::Value as Json;

use crate::descriptor::{PrimitiveKind, UniType};

/// The universal tagged value: the in-memory representation of data
/// conforming to some [`UniType`], independent of any wire format.
#[derive(Debug, Clone, PartialEq)]
pub enum UniValue {
    Str(String),
    Bool(bool),
    Float(f64),
    Int(i64),
    Binary(Vec<u8>),
    /// Arbitrary JSON carried through untouched.
    Opaque(Json),
    List(Vec<UniValue>),
    /// Ordered key/value pairs. Keys are full values, not just strings.
    Dict(Vec<(UniValue, UniValue)>),
    /// Named fields in declaration order.
    Object(Vec<(String, UniValue)>),
    Optional(Option<Box<UniValue>>),
    /// `Ok` is the success arm, `Err` the failure arm.
    Union(Result<Box<UniValue>, Box<UniValue>>),
    Enum {
        tag: String,
        value: Box<UniValue>,
    },
    Unit,
}

impl UniValue {
    pub fn some(inner: UniValue) -> Self {
        Self::Optional(Some(Box::new(inner)))
    }

    pub fn none() -> Self {
        Self::Optional(None)
    }

    pub fn ok(inner: UniValue) -> Self {
        Self::Union(Ok(Box::new(inner)))
    }

    pub fn err(inner: UniValue) -> Self {
        Self::Union(Err(Box::new(inner)))
    }

    pub fn tagged(tag: impl Into<String>, value: UniValue) -> Self {
        Self::Enum {
            tag: tag.into(),
            value: Box::new(value),
        }
    }

    pub fn list(items: impl IntoIterator<Item = UniValue>) -> Self {
        Self::List(items.into_iter().collect())
    }

    pub fn dict(pairs: impl IntoIterator<Item = (UniValue, UniValue)>) -> Self {
        Self::Dict(pairs.into_iter().collect())
    }

    pub fn object<N: Into<String>>(fields: impl IntoIterator<Item = (N, UniValue)>) -> Self {
        Self::Object(
            fields
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        )
    }

    /// Returns the "kind" string identifier for this value.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Str(_) => "string",
            Self::Bool(_) => "bool",
            Self::Float(_) => "float",
            Self::Int(_) => "int",
            Self::Binary(_) => "binary",
            Self::Opaque(_) => "opaque",
            Self::List(_) => "list",
            Self::Dict(_) => "dict",
            Self::Object(_) => "object",
            Self::Optional(_) => "optional",
            Self::Union(_) => "union",
            Self::Enum { .. } => "enum",
            Self::Unit => "unit",
        }
    }

    /// Does this value have exactly the shape a strict decode against `ty`
    /// could produce?
    ///
    /// Encoding never checks anything, so callers that rely on the
    /// round-trip law can gate on this first. Conformance requires finite
    /// floats, pairwise distinct dict keys, object fields matching the
    /// declared names in declared order, and enum tags declared by `ty`.
    pub fn conforms_to(&self, ty: &UniType) -> bool {
        match (self, ty) {
            (Self::Str(_), UniType::Primitive(PrimitiveKind::Str)) => true,
            (Self::Bool(_), UniType::Primitive(PrimitiveKind::Bool)) => true,
            (Self::Float(f), UniType::Primitive(PrimitiveKind::Float)) => f.is_finite(),
            (Self::Int(_), UniType::Primitive(PrimitiveKind::Int)) => true,
            (Self::Binary(_), UniType::Binary) => true,
            (Self::Opaque(_), UniType::Opaque) => true,
            (Self::Unit, UniType::Unit) => true,
            (Self::List(items), UniType::List(element)) => {
                items.iter().all(|item| item.conforms_to(element))
            }
            (Self::Dict(pairs), UniType::Dict { key, value }) => {
                for (i, (k, v)) in pairs.iter().enumerate() {
                    if !k.conforms_to(key) || !v.conforms_to(value) {
                        return false;
                    }
                    if pairs[..i].iter().any(|(prev, _)| prev == k) {
                        return false;
                    }
                }
                true
            }
            (Self::Object(have), UniType::Object(want)) => {
                have.len() == want.len()
                    && have.iter().zip(want).all(|((name, v), field)| {
                        *name == field.name && v.conforms_to(&field.ty)
                    })
            }
            (Self::Optional(opt), UniType::Optional(inner)) => match opt {
                Some(v) => v.conforms_to(inner),
                None => true,
            },
            (Self::Union(side), UniType::Union { ok, err }) => match side {
                Ok(v) => v.conforms_to(ok),
                Err(v) => v.conforms_to(err),
            },
            (Self::Enum { tag, value }, UniType::Enum(variants)) => variants
                .iter()
                .find(|variant| variant.tag == *tag)
                .map_or(false, |variant| value.conforms_to(&variant.ty)),
            _ => false,
        }
    }
}

impl From<&str> for UniValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for UniValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<bool> for UniValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for UniValue {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<f64> for UniValue {
    fn from(n: f64) -> Self {
        Self::Float(n)
    }
}

impl From<Vec<u8>> for UniValue {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Binary(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalar_conformance() {
        assert!(UniValue::from("hi").conforms_to(&UniType::str()));
        assert!(UniValue::Bool(true).conforms_to(&UniType::bool()));
        assert!(UniValue::Int(-3).conforms_to(&UniType::int()));
        assert!(UniValue::Float(1.5).conforms_to(&UniType::float()));
        assert!(!UniValue::Int(3).conforms_to(&UniType::float()));
        assert!(!UniValue::from("hi").conforms_to(&UniType::int()));
    }

    #[test]
    fn non_finite_float_does_not_conform() {
        assert!(!UniValue::Float(f64::NAN).conforms_to(&UniType::float()));
        assert!(!UniValue::Float(f64::INFINITY).conforms_to(&UniType::float()));
    }

    #[test]
    fn object_conformance_is_order_sensitive() {
        let ty = UniType::object([("a", UniType::int()), ("b", UniType::str())]);
        let good = UniValue::object([("a", UniValue::Int(1)), ("b", UniValue::from("x"))]);
        let reordered = UniValue::object([("b", UniValue::from("x")), ("a", UniValue::Int(1))]);
        assert!(good.conforms_to(&ty));
        assert!(!reordered.conforms_to(&ty));
    }

    #[test]
    fn object_conformance_rejects_missing_and_extra_fields() {
        let ty = UniType::object([("a", UniType::int())]);
        assert!(!UniValue::object::<&str>([]).conforms_to(&ty));
        let extra = UniValue::object([("a", UniValue::Int(1)), ("b", UniValue::Int(2))]);
        assert!(!extra.conforms_to(&ty));
    }

    #[test]
    fn dict_conformance_rejects_duplicate_keys() {
        let ty = UniType::dict(UniType::int(), UniType::str());
        let dup = UniValue::dict([
            (UniValue::Int(1), UniValue::from("a")),
            (UniValue::Int(1), UniValue::from("b")),
        ]);
        assert!(!dup.conforms_to(&ty));
        let distinct = UniValue::dict([
            (UniValue::Int(1), UniValue::from("a")),
            (UniValue::Int(2), UniValue::from("b")),
        ]);
        assert!(distinct.conforms_to(&ty));
    }

    #[test]
    fn union_conformance_checks_the_active_arm() {
        let ty = UniType::union(UniType::int(), UniType::str());
        assert!(UniValue::ok(UniValue::Int(7)).conforms_to(&ty));
        assert!(UniValue::err(UniValue::from("boom")).conforms_to(&ty));
        assert!(!UniValue::ok(UniValue::from("boom")).conforms_to(&ty));
    }

    #[test]
    fn enum_conformance_requires_a_declared_tag() {
        let ty = UniType::enumeration([("circle", UniType::float()), ("point", UniType::Unit)]);
        assert!(UniValue::tagged("circle", UniValue::Float(2.0)).conforms_to(&ty));
        assert!(UniValue::tagged("point", UniValue::Unit).conforms_to(&ty));
        assert!(!UniValue::tagged("square", UniValue::Float(2.0)).conforms_to(&ty));
        assert!(!UniValue::tagged("circle", UniValue::Unit).conforms_to(&ty));
    }

    #[test]
    fn opaque_conforms_regardless_of_payload() {
        assert!(UniValue::Opaque(json!(null)).conforms_to(&UniType::Opaque));
        assert!(UniValue::Opaque(json!({"any": [1, 2]})).conforms_to(&UniType::Opaque));
    }

    #[test]
    fn kind_names() {
        assert_eq!(UniValue::Unit.kind(), "unit");
        assert_eq!(UniValue::Binary(vec![1]).kind(), "binary");
        assert_eq!(UniValue::none().kind(), "optional");
        assert_eq!(UniValue::tagged("t", UniValue::Unit).kind(), "enum");
    }
}
