//! Universal type descriptors and tagged values.
//!
//! This crate is the model half of uniwire. [`UniType`] describes the shape
//! of data, [`UniValue`] is the tagged in-memory representation of data
//! conforming to such a shape, and [`RandomUni`] generates random
//! descriptors and conforming values for tests. The JSON wire codec over
//! these types lives in the `uniwire-json` crate.

pub mod descriptor;
pub mod random;
pub mod value;

pub use descriptor::{Field, PrimitiveKind, UniType, Variant};
pub use random::RandomUni;
pub use value::UniValue;
