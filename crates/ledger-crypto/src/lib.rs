//! # ledger-crypto: Identity and Key Derivation Primitives
//!
//! Provides the cryptographic building blocks for provisioning:
//!
//! - **Pooled SHA3-256** hashers, shared across tasks with scoped
//!   acquire/release.
//! - **Asset identity derivation** (`compute_asset_id`), the frozen
//!   genesis ‖ version ‖ vm ‖ program hash.
//! - **ChainKD extended public keys** (`XPub`) with non-hardened public
//!   derivation. No private key material is ever handled here.
//! - **Issuance programs** for M-of-N multisig assets.
//!
//! ## Crate Policy
//!
//! - Depends only on `ledger-core` internally.
//! - No mocking of cryptographic operations in tests. Known-answer vectors
//!   pin both the asset id layout and the derivation function.
//! - No `unsafe` code.

pub mod asset_id;
pub mod chainkd;
pub mod error;
pub mod program;
pub mod sha3pool;

pub use asset_id::compute_asset_id;
pub use chainkd::{XPub, XPUB_LEN};
pub use error::{CryptoError, ProgramError};
pub use program::{multisig_issuance_program, IssuanceProgramBuilder, VM_VERSION};
pub use sha3pool::{sha3_256, PooledSha3, Sha3Pool};
