//! Decode failures and the path that locates them.

use std::fmt;

/// One step from the document root towards a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Object field, union/enum member key, or binary member key.
    Field(String),
    /// List index or dict row index; within a row, 0 is the key cell and 1
    /// the value cell.
    Index(usize),
}

/// What the decoder rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeErrorKind {
    #[error("expected {expected}, got {found}")]
    Mismatch {
        expected: &'static str,
        found: &'static str,
    },
    #[error("missing field {0:?}")]
    MissingField(String),
    #[error("dict entry must be a [key, value] pair, got {0} elements")]
    BadDictRow(usize),
    #[error("invalid base64: {0}")]
    InvalidBase64(String),
    #[error("bit_length says {declared} bits but the payload decodes to {actual}")]
    BitLengthMismatch { declared: i64, actual: i64 },
    #[error("unknown union tag {tag:?}, expected \"ok\" or \"error\"")]
    UnknownUnionTag { tag: String },
    #[error("unknown enum variant {tag:?}, expected one of: {expected}")]
    UnknownEnumTag { tag: String, expected: String },
    #[error("invalid JSON: {0}")]
    InvalidJson(String),
}

/// Strict-decode failure: what went wrong and where.
///
/// The path is the field/index chain from the document root down to the
/// node the decoder rejected. [`DecodeError::pointer`] renders it in JSON
/// Pointer notation, so `at /emails/2: expected string, got int` points at
/// the third element of the `emails` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeError {
    kind: DecodeErrorKind,
    path: Vec<PathSegment>,
}

impl DecodeError {
    pub(crate) fn new(kind: DecodeErrorKind, path: Vec<PathSegment>) -> Self {
        Self { kind, path }
    }

    pub fn kind(&self) -> &DecodeErrorKind {
        &self.kind
    }

    /// The field/index chain to the failing node. Empty means the root
    /// itself was rejected.
    pub fn path(&self) -> &[PathSegment] {
        &self.path
    }

    /// Renders the path as a JSON Pointer (RFC 6901), `""` for the root.
    pub fn pointer(&self) -> String {
        let mut out = String::new();
        for segment in &self.path {
            out.push('/');
            match segment {
                PathSegment::Field(name) => out.push_str(&escape_component(name)),
                PathSegment::Index(i) => out.push_str(&i.to_string()),
            }
        }
        out
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "at {}: {}", self.pointer(), self.kind)
        }
    }
}

impl std::error::Error for DecodeError {}

/// Escapes a single pointer component per RFC 6901: `~` as `~0`, `/` as
/// `~1`.
fn escape_component(component: &str) -> String {
    if !component.contains('~') && !component.contains('/') {
        return component.to_string();
    }
    component.replace('~', "~0").replace('/', "~1")
}
