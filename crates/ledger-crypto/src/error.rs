//! Error types for key parsing and program construction.

use thiserror::Error;

/// Error parsing or deriving an extended public key.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// The key was not exactly 64 bytes.
    #[error("bad xpub length: expected 64 bytes, got {0}")]
    BadXPubLength(usize),

    /// The public-key half is not a valid curve point.
    #[error("xpub public key is not a valid curve point")]
    InvalidPoint,

    /// The text form was not valid hex.
    #[error("invalid xpub hex: {0}")]
    InvalidHex(String),
}

/// Error building an issuance program.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProgramError {
    /// A multisig program needs at least one key.
    #[error("multisig program requires at least one public key")]
    NoKeys,

    /// The quorum is zero or exceeds the number of keys.
    #[error("quorum {quorum} is invalid for {keys} keys")]
    BadQuorum {
        /// Requested signature threshold.
        quorum: usize,
        /// Number of keys supplied.
        keys: usize,
    },

    /// The assembled program cannot be length-prefixed.
    #[error("program too long: {0}")]
    TooLong(#[from] ledger_core::EncodingError),
}
