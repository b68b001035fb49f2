//! Registry errors.

use ledger_core::CanonicalizationError;
use ledger_crypto::ProgramError;
use thiserror::Error;

/// Failure inside a create/define collaborator.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Another entity of the same kind already uses this alias.
    #[error("{kind} alias {alias:?} already exists")]
    DuplicateAlias {
        /// "account" or "asset".
        kind: &'static str,
        alias: String,
    },

    /// An alias, when supplied, must be non-empty.
    #[error("alias must not be empty")]
    EmptyAlias,

    /// The issuance program could not be built.
    #[error("issuance program: {0}")]
    Program(#[from] ProgramError),

    /// The asset definition could not be canonicalized.
    #[error("definition: {0}")]
    Definition(#[from] CanonicalizationError),

    /// A client token maps to an entity that no longer exists.
    #[error("idempotency record for token {0:?} is dangling")]
    DanglingToken(String),

    /// The backing store failed.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
