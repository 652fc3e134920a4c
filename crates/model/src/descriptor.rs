//! Universal type descriptors.
//!
//! A [`UniType`] is an immutable, recursive description of a data shape.
//! Descriptors are assembled once when a conversion is defined and then
//! shared read-only by every encode and decode call.

use std::fmt;

/// Scalar kind carried by [`UniType::Primitive`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    Str,
    Bool,
    Float,
    Int,
}

impl PrimitiveKind {
    /// Returns the kind name used in decode error messages.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Str => "string",
            Self::Bool => "bool",
            Self::Float => "float",
            Self::Int => "int",
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named object field.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub ty: UniType,
}

/// A tagged enum variant.
#[derive(Debug, Clone, PartialEq)]
pub struct Variant {
    pub tag: String,
    pub ty: UniType,
}

/// The universal type descriptor covering all supported data shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum UniType {
    /// JSON-native scalar.
    Primitive(PrimitiveKind),
    /// Raw bytes, rendered on the wire as a `{"bit_length", "base64"}` object.
    Binary,
    /// Untyped escape hatch; the codec passes the JSON node through verbatim.
    Opaque,
    /// Homogeneous sequence.
    List(Box<UniType>),
    /// Mapping with arbitrarily typed keys, rendered as `[key, value]` rows.
    Dict {
        key: Box<UniType>,
        value: Box<UniType>,
    },
    /// Present-or-absent value; absent renders as `null`.
    Optional(Box<UniType>),
    /// Fixed set of named fields. Declaration order is significant.
    Object(Vec<Field>),
    /// Result-like either/or, tagged `"ok"` or `"error"` on the wire.
    Union {
        ok: Box<UniType>,
        err: Box<UniType>,
    },
    /// Tagged union over named variants. Declaration order is significant.
    Enum(Vec<Variant>),
    /// Carries no data; renders as `null`.
    Unit,
}

impl UniType {
    pub fn str() -> Self {
        Self::Primitive(PrimitiveKind::Str)
    }

    pub fn bool() -> Self {
        Self::Primitive(PrimitiveKind::Bool)
    }

    pub fn float() -> Self {
        Self::Primitive(PrimitiveKind::Float)
    }

    pub fn int() -> Self {
        Self::Primitive(PrimitiveKind::Int)
    }

    pub fn list(element: UniType) -> Self {
        Self::List(Box::new(element))
    }

    pub fn dict(key: UniType, value: UniType) -> Self {
        Self::Dict {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    pub fn optional(inner: UniType) -> Self {
        Self::Optional(Box::new(inner))
    }

    /// Builds an object descriptor from `(name, type)` pairs, in order.
    pub fn object<N: Into<String>>(fields: impl IntoIterator<Item = (N, UniType)>) -> Self {
        Self::Object(
            fields
                .into_iter()
                .map(|(name, ty)| Field {
                    name: name.into(),
                    ty,
                })
                .collect(),
        )
    }

    pub fn union(ok: UniType, err: UniType) -> Self {
        Self::Union {
            ok: Box::new(ok),
            err: Box::new(err),
        }
    }

    /// Builds an enum descriptor from `(tag, type)` pairs, in order.
    pub fn enumeration<N: Into<String>>(variants: impl IntoIterator<Item = (N, UniType)>) -> Self {
        Self::Enum(
            variants
                .into_iter()
                .map(|(tag, ty)| Variant {
                    tag: tag.into(),
                    ty,
                })
                .collect(),
        )
    }

    /// Returns the "kind" string identifier for this descriptor node.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Primitive(kind) => kind.as_str(),
            Self::Binary => "binary",
            Self::Opaque => "opaque",
            Self::List(_) => "list",
            Self::Dict { .. } => "dict",
            Self::Optional(_) => "optional",
            Self::Object(_) => "object",
            Self::Union { .. } => "union",
            Self::Enum(_) => "enum",
            Self::Unit => "unit",
        }
    }

    /// Structural sanity of the descriptor itself.
    ///
    /// Object field names must be non-empty and unique, enum variant tags
    /// must be non-empty and unique, and an enum must declare at least one
    /// variant. The codec itself never calls this; it exists for layers
    /// that assemble descriptors dynamically.
    pub fn is_well_formed(&self) -> bool {
        match self {
            Self::Primitive(_) | Self::Binary | Self::Opaque | Self::Unit => true,
            Self::List(element) => element.is_well_formed(),
            Self::Optional(inner) => inner.is_well_formed(),
            Self::Dict { key, value } => key.is_well_formed() && value.is_well_formed(),
            Self::Union { ok, err } => ok.is_well_formed() && err.is_well_formed(),
            Self::Object(fields) => {
                let mut seen: Vec<&str> = Vec::with_capacity(fields.len());
                for field in fields {
                    if field.name.is_empty() || seen.contains(&field.name.as_str()) {
                        return false;
                    }
                    if !field.ty.is_well_formed() {
                        return false;
                    }
                    seen.push(&field.name);
                }
                true
            }
            Self::Enum(variants) => {
                if variants.is_empty() {
                    return false;
                }
                let mut seen: Vec<&str> = Vec::with_capacity(variants.len());
                for variant in variants {
                    if variant.tag.is_empty() || seen.contains(&variant.tag.as_str()) {
                        return false;
                    }
                    if !variant.ty.is_well_formed() {
                        return false;
                    }
                    seen.push(&variant.tag);
                }
                true
            }
        }
    }
}
