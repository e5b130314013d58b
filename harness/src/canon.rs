//! Canonical JSON bytes and domain-separated digests for run reports.
//!
//! # Canonicalization rules
//!
//! 1. Object keys are sorted in byte order.
//! 2. Compact form, no whitespace: `{"a":1,"b":2}`.
//! 3. Numbers must be integers. Floats are rejected so digests cannot drift
//!    with float formatting; losses travel as text instead.
//!
//! Digest format: `"sha256:<hex>"` over `domain || bytes`.

use sha2::{Digest, Sha256};

/// Domain prefix for run report digests. Null-terminated.
pub const DOMAIN_RUN_REPORT: &[u8] = b"ANONBENCH::RUN_REPORT::V1\0";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CanonError {
    /// A JSON number was not an integer.
    #[error("non-integer number in canonical JSON at {path}: {raw}")]
    NonIntegerNumber { path: String, raw: String },
    #[error("serialization failed: {detail}")]
    Serialize { detail: String },
}

/// Produce canonical JSON bytes from a `serde_json::Value`.
///
/// # Errors
///
/// Returns [`CanonError::NonIntegerNumber`] if any number is not an `i64` or
/// `u64`.
pub fn canonical_json_bytes(value: &serde_json::Value) -> Result<Vec<u8>, CanonError> {
    reject_floats(value, &mut String::from("$"))?;
    // `serde_json::Map` is a `BTreeMap` without `preserve_order`, so keys are
    // already emitted in byte order.
    serde_json::to_vec(value).map_err(|e| CanonError::Serialize {
        detail: e.to_string(),
    })
}

/// Serialize `value` and canonicalize it.
///
/// # Errors
///
/// See [`canonical_json_bytes`].
pub fn to_canonical_bytes<T: serde::Serialize>(value: &T) -> Result<Vec<u8>, CanonError> {
    let value = serde_json::to_value(value).map_err(|e| CanonError::Serialize {
        detail: e.to_string(),
    })?;
    canonical_json_bytes(&value)
}

fn reject_floats(value: &serde_json::Value, path: &mut String) -> Result<(), CanonError> {
    match value {
        serde_json::Value::Number(n) if !(n.is_i64() || n.is_u64()) => {
            Err(CanonError::NonIntegerNumber {
                path: path.clone(),
                raw: n.to_string(),
            })
        }
        serde_json::Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                let len = path.len();
                path.push_str(&format!("[{i}]"));
                reject_floats(item, path)?;
                path.truncate(len);
            }
            Ok(())
        }
        serde_json::Value::Object(map) => {
            for (key, item) in map {
                let len = path.len();
                path.push('.');
                path.push_str(key);
                reject_floats(item, path)?;
                path.truncate(len);
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

/// SHA-256 of `domain || data`, formatted `"sha256:<hex>"`.
#[must_use]
pub fn canonical_hash(domain: &[u8], data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(domain);
    hasher.update(data);
    format!("sha256:{}", hex::encode(hasher.finalize()))
}
