//! Cache Key Module
//!
//! Derives deterministic fingerprints from an operation identifier and its
//! parameters. Identical inputs always hash to the identical key; distinct
//! parameters collide only with negligible probability.

use std::fmt;

use serde_json::{json, Value};
use sha2::{Digest, Sha256};

use crate::cache::FINGERPRINT_LEN;

// == Cache Key ==
/// SHA-256 fingerprint of a (operation, parameters) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey([u8; FINGERPRINT_LEN]);

impl CacheKey {
    // == Derive ==
    /// Derives the key for an operation and its ordered parameter list.
    ///
    /// The pair is serialized to canonical JSON and hashed. serde_json orders
    /// object keys, so logically equal inputs always produce the same bytes,
    /// and parameter order is significant.
    ///
    /// # Arguments
    /// * `operation` - Stable string identifying the operation
    /// * `params` - Ordered parameter values
    pub fn derive(operation: &str, params: &[Value]) -> Self {
        let canonical = json!({
            "operation": operation,
            "params": params,
        })
        .to_string();

        let digest = Sha256::digest(canonical.as_bytes());
        Self(digest.into())
    }

    // == As Bytes ==
    /// Returns the raw fingerprint bytes.
    #[allow(dead_code)]
    pub fn as_bytes(&self) -> &[u8; FINGERPRINT_LEN] {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    /// Formats the fingerprint as lowercase hex.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}
