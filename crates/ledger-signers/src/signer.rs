//! Signer specifications and persisted signers.

use std::collections::HashSet;
use std::fmt;

use ledger_crypto::XPub;
use serde::{Deserialize, Serialize};

use crate::error::SignerError;

/// Which kind of entity a signer protects.
///
/// The discriminant is the first derivation path component, so it is part
/// of the derivation contract and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum KeySpace {
    Asset = 0,
    Account = 1,
}

impl KeySpace {
    /// The path component byte for this keyspace.
    pub fn as_byte(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for KeySpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeySpace::Asset => f.write_str("asset"),
            KeySpace::Account => f.write_str("account"),
        }
    }
}

/// Validated root keys and quorum, ready to hand to a create/define call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignerSpec {
    xpubs: Vec<XPub>,
    quorum: usize,
}

impl SignerSpec {
    /// Validate `xpubs` and `quorum`.
    ///
    /// Key order is kept exactly as submitted.
    pub fn new(xpubs: Vec<XPub>, quorum: usize) -> Result<Self, SignerError> {
        if xpubs.is_empty() {
            return Err(SignerError::NoXPubs);
        }
        let mut seen = HashSet::with_capacity(xpubs.len());
        for (i, xpub) in xpubs.iter().enumerate() {
            if !seen.insert(xpub) {
                return Err(SignerError::DupeXPub(i));
            }
        }
        if quorum == 0 || quorum > xpubs.len() {
            return Err(SignerError::BadQuorum {
                quorum,
                keys: xpubs.len(),
            });
        }
        Ok(Self { xpubs, quorum })
    }

    pub fn xpubs(&self) -> &[XPub] {
        &self.xpubs
    }

    pub fn quorum(&self) -> usize {
        self.quorum
    }
}

/// Parse hex-encoded root keys, reporting the index of the first bad one.
pub fn parse_xpubs<S: AsRef<str>>(keys: &[S]) -> Result<Vec<XPub>, SignerError> {
    keys.iter()
        .enumerate()
        .map(|(index, s)| {
            XPub::from_hex(s.as_ref()).map_err(|source| SignerError::BadXPub { index, source })
        })
        .collect()
}

/// A signer as persisted by the store.
///
/// Root keys and quorum are only reachable through a validated
/// [`SignerSpec`], both on creation and when reloaded from storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredSigner")]
pub struct Signer {
    /// Identity of the owning account or asset.
    pub id: String,
    pub kind: KeySpace,
    /// Root keys in submitted order.
    xpubs: Vec<XPub>,
    quorum: usize,
    /// Position in the store's signer sequence; assigned once, starting at 1.
    pub key_index: u64,
}

impl Signer {
    /// Build the persisted form of a validated spec.
    pub fn new(id: impl Into<String>, kind: KeySpace, spec: SignerSpec, key_index: u64) -> Self {
        Self {
            id: id.into(),
            kind,
            xpubs: spec.xpubs,
            quorum: spec.quorum,
            key_index,
        }
    }

    pub fn xpubs(&self) -> &[XPub] {
        &self.xpubs
    }

    pub fn quorum(&self) -> usize {
        self.quorum
    }
}

#[derive(Deserialize)]
struct StoredSigner {
    id: String,
    kind: KeySpace,
    xpubs: Vec<XPub>,
    quorum: usize,
    key_index: u64,
}

impl TryFrom<StoredSigner> for Signer {
    type Error = SignerError;

    fn try_from(stored: StoredSigner) -> Result<Self, Self::Error> {
        let spec = SignerSpec::new(stored.xpubs, stored.quorum)?;
        Ok(Self::new(stored.id, stored.kind, spec, stored.key_index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ed25519_dalek::SigningKey;
    use rand::rngs::OsRng;
    use rand::RngCore;

    fn random_xpub() -> XPub {
        let sk = SigningKey::generate(&mut OsRng);
        let mut bytes = sk.verifying_key().to_bytes().to_vec();
        let mut cc = [0u8; 32];
        OsRng.fill_bytes(&mut cc);
        bytes.extend_from_slice(&cc);
        XPub::from_bytes(&bytes).unwrap()
    }

    #[test]
    fn test_valid_spec_keeps_order() {
        let keys: Vec<XPub> = (0..3).map(|_| random_xpub()).collect();
        let spec = SignerSpec::new(keys.clone(), 2).unwrap();
        assert_eq!(spec.xpubs(), keys.as_slice());
        assert_eq!(spec.quorum(), 2);
    }

    #[test]
    fn test_quorum_above_key_count_rejected() {
        let keys = vec![random_xpub(), random_xpub()];
        assert_eq!(
            SignerSpec::new(keys, 3).unwrap_err(),
            SignerError::BadQuorum { quorum: 3, keys: 2 }
        );
    }

    #[test]
    fn test_zero_quorum_rejected() {
        assert!(matches!(
            SignerSpec::new(vec![random_xpub()], 0).unwrap_err(),
            SignerError::BadQuorum { quorum: 0, .. }
        ));
    }

    #[test]
    fn test_empty_keys_rejected() {
        assert_eq!(SignerSpec::new(vec![], 1).unwrap_err(), SignerError::NoXPubs);
    }

    #[test]
    fn test_duplicate_keys_rejected() {
        let a = random_xpub();
        let b = random_xpub();
        assert_eq!(
            SignerSpec::new(vec![a, b, a], 1).unwrap_err(),
            SignerError::DupeXPub(2)
        );
    }

    #[test]
    fn test_parse_xpubs_reports_index() {
        let good = random_xpub().to_hex();
        let err = parse_xpubs(&[good.as_str(), "abcd"]).unwrap_err();
        assert!(matches!(err, SignerError::BadXPub { index: 1, .. }));
    }

    #[test]
    fn test_signer_keeps_spec_keys_and_quorum() {
        let keys: Vec<XPub> = (0..3).map(|_| random_xpub()).collect();
        let signer = Signer::new("acc1", KeySpace::Account, SignerSpec::new(keys.clone(), 2).unwrap(), 4);
        assert_eq!(signer.xpubs(), keys.as_slice());
        assert_eq!(signer.quorum(), 2);
        assert_eq!(signer.key_index, 4);
    }

    #[test]
    fn test_stored_signer_with_bad_quorum_rejected() {
        let keys: Vec<XPub> = (0..2).map(|_| random_xpub()).collect();
        let mut stored = serde_json::to_value(Signer::new(
            "acc1",
            KeySpace::Account,
            SignerSpec::new(keys, 1).unwrap(),
            1,
        ))
        .unwrap();
        stored["quorum"] = serde_json::json!(3);
        let err = serde_json::from_value::<Signer>(stored).unwrap_err();
        assert!(err.to_string().contains("quorum"), "{err}");
    }

    #[test]
    fn test_stored_signer_without_keys_rejected() {
        let stored = serde_json::json!({
            "id": "acc1",
            "kind": "account",
            "xpubs": [],
            "quorum": 1,
            "key_index": 1,
        });
        assert!(serde_json::from_value::<Signer>(stored).is_err());
    }

    #[test]
    fn test_keyspace_bytes() {
        assert_eq!(KeySpace::Asset.as_byte(), 0);
        assert_eq!(KeySpace::Account.as_byte(), 1);
        assert_eq!(serde_json::to_string(&KeySpace::Account).unwrap(), "\"account\"");
    }
}
