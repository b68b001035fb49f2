//! # ledger-signers: Multi-Signature Signer Policies
//!
//! A signer is an ordered list of root extended public keys plus a quorum
//! threshold. Accounts and assets each own exactly one signer.
//!
//! ## Lifecycle
//!
//! 1. Client input is parsed into a [`SignerSpec`], which enforces
//!    `1 <= quorum <= keys`, a non-empty key list, and no duplicate keys.
//!    This happens before any store mutation or identity derivation.
//! 2. The store persists a [`Signer`], assigning it a `key_index` from a
//!    monotonically increasing sequence.
//! 3. [`path`] and [`derive_keys`] recompute the keyspace-scoped derivation
//!    path and per-key derived public keys from the persisted signer alone.
//!    Neither advances any counter.
//!
//! ## Crate Policy
//!
//! - Depends only on `ledger-crypto` internally.
//! - Submitted key order is significant and preserved everywhere.

pub mod error;
pub mod path;
pub mod signer;

pub use error::SignerError;
pub use path::{derive_keys, path, DerivationPath, DerivedKey};
pub use signer::{parse_xpubs, KeySpace, Signer, SignerSpec};
