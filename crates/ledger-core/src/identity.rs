//! # Entity Identifiers
//!
//! Accounts carry an opaque string identity that is assigned by the store
//! and is not content-addressed (contrast [`crate::AssetId`]). Client tokens
//! are caller-chosen idempotency keys for the create/define collaborators.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

const ACCOUNT_PREFIX: &str = "acc";

/// Opaque account identity: `acc` followed by 32 lowercase hex characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    /// Generate a fresh random account identifier.
    pub fn generate() -> Self {
        Self(format!("{ACCOUNT_PREFIX}{}", Uuid::new_v4().simple()))
    }

    /// Wrap an identifier previously issued by [`AccountId::generate`].
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Idempotency token supplied with a create/define request.
///
/// Repeating a token must not create a second entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientToken(String);

impl ClientToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// A random token for requests that did not supply one.
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClientToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_id_shape() {
        let id = AccountId::generate();
        let s = id.as_str();
        assert!(s.starts_with("acc"));
        assert_eq!(s.len(), 35);
        assert!(s[3..].chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_account_ids_are_unique() {
        assert_ne!(AccountId::generate(), AccountId::generate());
    }

    #[test]
    fn test_account_id_serializes_as_plain_string() {
        let id = AccountId::from_string("acc00");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"acc00\"");
        assert_eq!(id.to_string(), "acc00");
    }

    #[test]
    fn test_random_tokens_differ() {
        assert_ne!(ClientToken::random(), ClientToken::random());
        assert_eq!(ClientToken::new("t-1").as_str(), "t-1");
    }
}
