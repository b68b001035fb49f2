//! # Canonical Serialization: Definition Bytes
//!
//! `CanonicalBytes` is the only path from an asset definition to the bytes
//! that are stored and hashed as its `raw_definition`. Two definitions that
//! differ only in key order or whitespace produce identical bytes, so the
//! stored definition hash does not depend on how a client formatted its JSON.
//!
//! Serialization uses `serde_jcs` (RFC 8785, JSON Canonicalization Scheme):
//! sorted keys, compact separators, ECMAScript number formatting.

use serde::Serialize;

use crate::error::CanonicalizationError;

/// Bytes produced by JCS canonicalization.
///
/// The inner vector is private; `CanonicalBytes::new()` is the sole
/// constructor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalBytes(Vec<u8>);

impl CanonicalBytes {
    /// Canonicalize any serializable value.
    pub fn new(obj: &impl Serialize) -> Result<Self, CanonicalizationError> {
        let s = serde_jcs::to_string(obj)?;
        Ok(Self(s.into_bytes()))
    }

    /// Access the canonical bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consume into the owned byte vector.
    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
