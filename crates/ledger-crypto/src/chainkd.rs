//! # ChainKD Extended Public Keys
//!
//! An `XPub` is a compressed Ed25519 point followed by a 32-byte chain code.
//! Non-hardened derivation works from the public side alone:
//!
//! ```text
//! h  = HMAC-SHA512(key = chain_code, "N" ‖ pubkey ‖ selector)
//! f  = prune(h[0..32])            f[0] &= 248, f[29] &= 1, f[30] = f[31] = 0
//! P' = P + f·B
//! c' = h[32..64]
//! ```
//!
//! The holder of the matching extended private key derives the same child
//! by adding `f` to its scalar, so a server can hand out derived public keys
//! without ever seeing a private key.
//!
//! ## Serde
//!
//! `XPub` serializes as a 128-character lowercase hex string.

use curve25519_dalek::edwards::{CompressedEdwardsY, EdwardsPoint};
use curve25519_dalek::scalar::Scalar;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::Sha512;

use crate::error::CryptoError;

/// Serialized length of an extended public key.
pub const XPUB_LEN: usize = 64;

/// An extended public key: `pubkey(32) ‖ chain_code(32)`.
#[derive(Clone, Copy)]
pub struct XPub {
    bytes: [u8; XPUB_LEN],
    point: EdwardsPoint,
}

// ---------------------------------------------------------------------------
// Construction and accessors
// ---------------------------------------------------------------------------

impl XPub {
    /// Parse from raw bytes.
    ///
    /// Fails unless `bytes` is exactly 64 bytes and the first half
    /// decompresses to a curve point.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let bytes: [u8; XPUB_LEN] = bytes
            .try_into()
            .map_err(|_| CryptoError::BadXPubLength(bytes.len()))?;
        let mut pk = [0u8; 32];
        pk.copy_from_slice(&bytes[..32]);
        let point = CompressedEdwardsY(pk)
            .decompress()
            .ok_or(CryptoError::InvalidPoint)?;
        Ok(Self { bytes, point })
    }

    /// Parse from a 128-character hex string.
    pub fn from_hex(s: &str) -> Result<Self, CryptoError> {
        let bytes = hex::decode(s.trim()).map_err(|e| CryptoError::InvalidHex(e.to_string()))?;
        Self::from_bytes(&bytes)
    }

    /// The raw 64 bytes.
    pub fn to_bytes(&self) -> [u8; XPUB_LEN] {
        self.bytes
    }

    pub fn as_bytes(&self) -> &[u8; XPUB_LEN] {
        &self.bytes
    }

    /// Lowercase hex of the raw bytes.
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }

    /// The compressed Ed25519 public key.
    pub fn public_key(&self) -> [u8; 32] {
        let mut pk = [0u8; 32];
        pk.copy_from_slice(&self.bytes[..32]);
        pk
    }

    pub fn chain_code(&self) -> [u8; 32] {
        let mut cc = [0u8; 32];
        cc.copy_from_slice(&self.bytes[32..]);
        cc
    }

    fn from_parts(point: EdwardsPoint, chain_code: &[u8]) -> Self {
        let mut bytes = [0u8; XPUB_LEN];
        bytes[..32].copy_from_slice(point.compress().as_bytes());
        bytes[32..].copy_from_slice(chain_code);
        Self { bytes, point }
    }
}

// ---------------------------------------------------------------------------
// Derivation
// ---------------------------------------------------------------------------

impl XPub {
    /// Derive the non-hardened child at `selector`.
    pub fn child(&self, selector: &[u8]) -> XPub {
        let (f, chain_code) = child_tweak(self, selector);
        let point = self.point + EdwardsPoint::mul_base(&Scalar::from_bytes_mod_order(f));
        Self::from_parts(point, &chain_code)
    }

    /// Fold [`XPub::child`] over every component of `path`.
    pub fn derive<P: AsRef<[u8]>>(&self, path: &[P]) -> XPub {
        path.iter().fold(*self, |xpub, sel| xpub.child(sel.as_ref()))
    }
}

/// Pruned scalar tweak and child chain code for one derivation step.
pub(crate) fn child_tweak(xpub: &XPub, selector: &[u8]) -> ([u8; 32], [u8; 32]) {
    let mut mac = Hmac::<Sha512>::new_from_slice(&xpub.bytes[32..])
        .expect("HMAC accepts keys of any length");
    mac.update(b"N");
    mac.update(&xpub.bytes[..32]);
    mac.update(selector);
    let h = mac.finalize().into_bytes();

    let mut f = [0u8; 32];
    f.copy_from_slice(&h[..32]);
    f[0] &= 248;
    f[29] &= 1;
    f[30] = 0;
    f[31] = 0;

    let mut chain_code = [0u8; 32];
    chain_code.copy_from_slice(&h[32..]);
    (f, chain_code)
}

/// Derive every root key along `path`, preserving order.
pub fn derive_xpubs<P: AsRef<[u8]>>(roots: &[XPub], path: &[P]) -> Vec<XPub> {
    roots.iter().map(|root| root.derive(path)).collect()
}

/// The compressed public keys of `xpubs`, in order.
pub fn xpub_keys(xpubs: &[XPub]) -> Vec<[u8; 32]> {
    xpubs.iter().map(XPub::public_key).collect()
}

// ---------------------------------------------------------------------------
// Trait impls
// ---------------------------------------------------------------------------

impl PartialEq for XPub {
    fn eq(&self, other: &Self) -> bool {
        self.bytes == other.bytes
    }
}

impl Eq for XPub {}

impl std::hash::Hash for XPub {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.bytes.hash(state);
    }
}

impl PartialOrd for XPub {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for XPub {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.bytes.cmp(&other.bytes)
    }
}

impl std::str::FromStr for XPub {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl std::fmt::Display for XPub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl std::fmt::Debug for XPub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "XPub({}...)", &self.to_hex()[..16])
    }
}

impl Serialize for XPub {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for XPub {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
