//! Canonical JSON bytes: the single serialization-for-hashing implementation.
//!
//! # Canonicalization rules
//!
//! 1. Object keys are sorted lexicographically (byte order).
//! 2. Compact form, no whitespace: `{"a":1,"b":2}`.
//! 3. Numbers must be integers. Floats are rejected so that hashed bytes
//!    never depend on float formatting.
//!
//! Rule 1 relies on `serde_json::Map` being `BTreeMap`-backed, which holds as
//! long as the `preserve_order` feature stays off for this workspace.

/// Error type for canonical JSON serialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CanonError {
    /// A JSON number was not an integer.
    NonIntegerNumber { path: String, raw: String },
    /// `serde_json` failed to encode the value.
    Encode { detail: String },
}

impl std::fmt::Display for CanonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonIntegerNumber { path, raw } => {
                write!(f, "non-integer number at {path}: {raw}")
            }
            Self::Encode { detail } => write!(f, "JSON encode failed: {detail}"),
        }
    }
}

impl std::error::Error for CanonError {}

/// Produce canonical JSON bytes from a `serde_json::Value`.
///
/// # Errors
///
/// Returns [`CanonError::NonIntegerNumber`] if any number in the tree is not
/// representable as `i64` or `u64`.
pub fn canonical_json_bytes(value: &serde_json::Value) -> Result<Vec<u8>, CanonError> {
    reject_floats(value, "$")?;
    serde_json::to_vec(value).map_err(|e| CanonError::Encode {
        detail: e.to_string(),
    })
}

fn reject_floats(value: &serde_json::Value, path: &str) -> Result<(), CanonError> {
    match value {
        serde_json::Value::Number(n) if !(n.is_i64() || n.is_u64()) => {
            Err(CanonError::NonIntegerNumber {
                path: path.to_string(),
                raw: n.to_string(),
            })
        }
        serde_json::Value::Array(items) => items
            .iter()
            .enumerate()
            .try_for_each(|(i, item)| reject_floats(item, &format!("{path}[{i}]"))),
        serde_json::Value::Object(map) => map
            .iter()
            .try_for_each(|(key, item)| reject_floats(item, &format!("{path}.{key}"))),
        _ => Ok(()),
    }
}
