//! # Derivation Paths and Derived Keys
//!
//! A path is two components: the keyspace byte, then the signer's
//! `key_index` as 8 little-endian bytes. It is recomputed from the persisted
//! signer on demand and never stored as free-form data.

use ledger_crypto::chainkd::derive_xpubs;
use ledger_crypto::XPub;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::signer::{KeySpace, Signer};

/// Ordered derivation path components.
///
/// Serializes as a JSON array of hex strings, one per component.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DerivationPath(Vec<Vec<u8>>);

impl DerivationPath {
    pub fn new(components: Vec<Vec<u8>>) -> Self {
        Self(components)
    }

    pub fn components(&self) -> &[Vec<u8>] {
        &self.0
    }

    /// Components rendered as lowercase hex.
    pub fn to_hex(&self) -> Vec<String> {
        self.0.iter().map(hex::encode).collect()
    }
}

impl Serialize for DerivationPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_hex().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for DerivationPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let parts = Vec::<String>::deserialize(deserializer)?;
        parts
            .iter()
            .map(|p| hex::decode(p).map_err(serde::de::Error::custom))
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

/// The derivation path for `signer` in `keyspace`.
///
/// Pure: repeated calls return equal paths and change nothing.
pub fn path(signer: &Signer, keyspace: KeySpace) -> DerivationPath {
    DerivationPath(vec![
        vec![keyspace.as_byte()],
        signer.key_index.to_le_bytes().to_vec(),
    ])
}

/// One root key and its keyspace-scoped child.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedKey {
    pub root: XPub,
    pub derived: XPub,
    pub path: DerivationPath,
}

/// Derive every root key of `signer` along its `keyspace` path.
///
/// The result has one record per root key, in the signer's key order.
pub fn derive_keys(signer: &Signer, keyspace: KeySpace) -> Vec<DerivedKey> {
    let path = path(signer, keyspace);
    let derived = derive_xpubs(signer.xpubs(), path.components());
    signer
        .xpubs()
        .iter()
        .zip(derived)
        .map(|(root, derived)| DerivedKey {
            root: *root,
            derived,
            path: path.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signer::SignerSpec;

    fn base() -> XPub {
        XPub::from_hex(&format!(
            "5866666666666666666666666666666666666666666666666666666666666666{}",
            "03".repeat(32)
        ))
        .unwrap()
    }

    fn signer(key_index: u64) -> Signer {
        let keys = vec![base().child(b"a"), base().child(b"b")];
        Signer::new("acc1", KeySpace::Account, SignerSpec::new(keys, 2).unwrap(), key_index)
    }

    #[test]
    fn test_path_layout() {
        let p = path(&signer(5), KeySpace::Account);
        assert_eq!(
            p.components(),
            &[vec![1u8], vec![5, 0, 0, 0, 0, 0, 0, 0]]
        );
        assert_eq!(path(&signer(5), KeySpace::Asset).components()[0], vec![0u8]);
    }

    #[test]
    fn test_path_is_idempotent() {
        let s = signer(9);
        assert_eq!(path(&s, KeySpace::Account), path(&s, KeySpace::Account));
        assert_eq!(s.key_index, 9);
    }

    #[test]
    fn test_path_serializes_as_hex_list() {
        let p = path(&signer(1), KeySpace::Account);
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json, serde_json::json!(["01", "0100000000000000"]));
        let back: DerivationPath = serde_json::from_value(json).unwrap();
        assert_eq!(back, p);
    }

    #[test]
    fn test_derive_keys_one_per_root_in_order() {
        let s = signer(3);
        let keys = derive_keys(&s, KeySpace::Account);
        assert_eq!(keys.len(), 2);
        for (k, root) in keys.iter().zip(s.xpubs()) {
            assert_eq!(&k.root, root);
            assert_eq!(k.derived, root.derive(k.path.components()));
        }
    }

    #[test]
    fn test_derive_keys_is_deterministic() {
        let s = signer(3);
        assert_eq!(derive_keys(&s, KeySpace::Asset), derive_keys(&s, KeySpace::Asset));
        assert_ne!(
            derive_keys(&s, KeySpace::Asset)[0].derived,
            derive_keys(&s, KeySpace::Account)[0].derived
        );
    }
}
