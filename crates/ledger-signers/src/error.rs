use ledger_crypto::CryptoError;
use thiserror::Error;

/// Signer validation failure.
///
/// Every variant is an input-validation error: it is raised before any
/// entity is persisted or any key is derived.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SignerError {
    /// At least one root key is required.
    #[error("at least one xpub is required")]
    NoXPubs,

    /// The same root key appears more than once.
    #[error("root xpubs contain duplicate (index {0})")]
    DupeXPub(usize),

    /// The quorum is zero or exceeds the number of keys.
    #[error("quorum must be greater than 0 and at most the number of xpubs (quorum {quorum}, xpubs {keys})")]
    BadQuorum {
        /// Requested quorum.
        quorum: usize,
        /// Number of root keys supplied.
        keys: usize,
    },

    /// A root key failed to parse.
    #[error("invalid xpub at index {index}: {source}")]
    BadXPub {
        /// Position of the key in the submitted list.
        index: usize,
        /// Underlying parse failure.
        #[source]
        source: CryptoError,
    },
}
