//! # Hash: 32-Byte Content Identifier
//!
//! `Hash` is the fixed-size value underlying every content-addressed
//! identity in the ledger: block hashes, asset ids, definition hashes.
//!
//! ## Representations
//!
//! - **Text**: 64 lowercase hex characters. Parsing accepts either case
//!   and round-trips exactly through `Display`.
//! - **Serde**: the text form, as a JSON string.
//! - **Storage scalar**: the raw 32 bytes (`to_vec()` / `TryFrom`), the
//!   form a `BYTEA`-style column holds. Anything other than 32 bytes is
//!   rejected with [`IdentityError::BadHashLength`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::IdentityError;

/// A 32-byte hash value.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Hash(pub [u8; 32]);

impl Hash {
    /// The all-zero hash.
    pub const ZERO: Hash = Hash([0u8; 32]);

    /// Wrap raw bytes.
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Construct from a slice, failing unless it is exactly 32 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, IdentityError> {
        let arr: [u8; 32] = bytes
            .try_into()
            .map_err(|_| IdentityError::BadHashLength(bytes.len()))?;
        Ok(Self(arr))
    }

    /// Borrow the raw bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Render as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from a 64-character hex string.
    pub fn from_hex(s: &str) -> Result<Self, IdentityError> {
        let bytes = hex::decode(s.trim()).map_err(|e| IdentityError::InvalidHex(e.to_string()))?;
        Self::from_slice(&bytes)
    }

    /// Storage-scalar form: the raw bytes as an owned vector.
    pub fn to_vec(&self) -> Vec<u8> {
        self.0.to_vec()
    }
}

impl AsRef<[u8]> for Hash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for Hash {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl TryFrom<&[u8]> for Hash {
    type Error = IdentityError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::from_slice(bytes)
    }
}

impl TryFrom<Vec<u8>> for Hash {
    type Error = IdentityError;

    fn try_from(bytes: Vec<u8>) -> Result<Self, Self::Error> {
        Self::from_slice(&bytes)
    }
}

impl From<Hash> for Vec<u8> {
    fn from(hash: Hash) -> Self {
        hash.to_vec()
    }
}

impl FromStr for Hash {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash({})", self.to_hex())
    }
}

impl Serialize for Hash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Hash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f";

    fn sample() -> Hash {
        let mut bytes = [0u8; 32];
        for (i, b) in bytes.iter_mut().enumerate() {
            *b = i as u8;
        }
        Hash(bytes)
    }

    #[test]
    fn test_hex_display() {
        assert_eq!(sample().to_string(), SAMPLE);
        assert_eq!(Hash::ZERO.to_string(), "0".repeat(64));
    }

    #[test]
    fn test_parse_round_trip() {
        let parsed: Hash = SAMPLE.parse().unwrap();
        assert_eq!(parsed, sample());
        assert_eq!(parsed.to_string(), SAMPLE);
    }

    #[test]
    fn test_parse_accepts_uppercase() {
        let parsed: Hash = SAMPLE.to_uppercase().parse().unwrap();
        assert_eq!(parsed, sample());
    }

    #[test]
    fn test_parse_rejects_short_hex() {
        let err = "abcd".parse::<Hash>().unwrap_err();
        assert_eq!(err, IdentityError::BadHashLength(2));
    }

    #[test]
    fn test_parse_rejects_non_hex() {
        let err = "zz".repeat(32).parse::<Hash>().unwrap_err();
        assert!(matches!(err, IdentityError::InvalidHex(_)));
    }

    #[test]
    fn test_storage_scalar_round_trip() {
        let scalar: Vec<u8> = sample().into();
        assert_eq!(scalar.len(), 32);
        assert_eq!(Hash::try_from(scalar).unwrap(), sample());
    }

    #[test]
    fn test_storage_scalar_rejects_wrong_length() {
        assert_eq!(
            Hash::try_from(vec![0u8; 31]).unwrap_err(),
            IdentityError::BadHashLength(31)
        );
        assert_eq!(
            Hash::try_from(&[0u8; 33][..]).unwrap_err(),
            IdentityError::BadHashLength(33)
        );
    }

    #[test]
    fn test_serde_as_hex_string() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert_eq!(json, format!("\"{SAMPLE}\""));
        let back: Hash = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sample());
    }

    #[test]
    fn test_serde_rejects_bad_length() {
        let result: Result<Hash, _> = serde_json::from_str("\"00ff\"");
        assert!(result.is_err());
    }
}
