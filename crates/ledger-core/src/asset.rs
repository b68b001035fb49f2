//! # Asset Identity Types
//!
//! `AssetId` is the distinguished 32-byte identity of an asset. It is a
//! pure function of the asset's issuance program, the chain's genesis
//! hash, the asset format version, and the VM version; the derivation
//! itself lives in `ledger-crypto::asset_id`.
//!
//! `IssuanceProgram` and `VmVersion` are the typed inputs to that
//! derivation. Both are guaranteed encodable (see [`crate::encoding`]), so
//! the derivation has no error path.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::encoding::{Varint63, Varstr31, MAX_VARINT31};
use crate::error::{EncodingError, IdentityError};
use crate::hash::Hash;

/// Asset format version hashed into every asset id.
pub const ASSET_VERSION: u64 = 1;

/// 32-byte content-addressed asset identity.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssetId(pub [u8; 32]);

impl AssetId {
    /// Construct from a byte slice.
    ///
    /// Fails with [`IdentityError::BadAssetLength`] unless `bytes` is
    /// exactly 32 bytes long. Never truncates or pads.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, IdentityError> {
        let arr: [u8; 32] = bytes
            .try_into()
            .map_err(|_| IdentityError::BadAssetLength(bytes.len()))?;
        Ok(Self(arr))
    }

    /// Borrow the raw bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// View the id as a plain [`Hash`].
    pub fn as_hash(&self) -> Hash {
        Hash(self.0)
    }

    /// Storage-scalar form.
    pub fn to_vec(&self) -> Vec<u8> {
        self.0.to_vec()
    }
}

impl From<Hash> for AssetId {
    fn from(hash: Hash) -> Self {
        Self(hash.0)
    }
}

impl TryFrom<&[u8]> for AssetId {
    type Error = IdentityError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::from_bytes(bytes)
    }
}

impl TryFrom<Vec<u8>> for AssetId {
    type Error = IdentityError;

    fn try_from(bytes: Vec<u8>) -> Result<Self, Self::Error> {
        Self::from_bytes(&bytes)
    }
}

impl FromStr for AssetId {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s.trim()).map_err(|e| IdentityError::InvalidHex(e.to_string()))?;
        Self::from_bytes(&bytes)
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.as_hash(), f)
    }
}

impl fmt::Debug for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AssetId({})", self.as_hash().to_hex())
    }
}

impl Serialize for AssetId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_hash().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for AssetId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Hash::deserialize(deserializer).map(Self::from)
    }
}

/// An opaque issuance program.
///
/// The length always fits a varstr31, so the program can be hashed into an
/// asset id without a range check at derivation time.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct IssuanceProgram(Vec<u8>);

impl IssuanceProgram {
    /// Wrap program bytes, rejecting programs longer than `2^31 - 1` bytes.
    pub fn new(bytes: Vec<u8>) -> Result<Self, EncodingError> {
        if bytes.len() as u64 > MAX_VARINT31 {
            return Err(EncodingError::Range {
                value: bytes.len() as u64,
                max: MAX_VARINT31,
            });
        }
        Ok(Self(bytes))
    }

    /// Borrow the program bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// The program as a length-prefixed encoder input.
    pub fn as_varstr(&self) -> Varstr31<'_> {
        // Length was checked in `new`.
        Varstr31(&self.0)
    }

    /// Render as lowercase hex.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// Parse from hex.
    pub fn from_hex(s: &str) -> Result<Self, IdentityError> {
        let bytes = hex::decode(s.trim()).map_err(|e| IdentityError::InvalidHex(e.to_string()))?;
        Self::new(bytes).map_err(|e| IdentityError::InvalidHex(e.to_string()))
    }
}

impl AsRef<[u8]> for IssuanceProgram {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for IssuanceProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IssuanceProgram({})", self.to_hex())
    }
}

impl Serialize for IssuanceProgram {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for IssuanceProgram {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Version of the VM an issuance program targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VmVersion(pub u32);

impl VmVersion {
    /// The only VM version currently defined.
    pub const V1: VmVersion = VmVersion(1);

    /// Encoder input for this version.
    pub fn as_varint(self) -> Varint63 {
        Varint63::from_u32(self.0)
    }
}

impl fmt::Display for VmVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
