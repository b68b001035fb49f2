//! # ledger-core: Foundational Types for Ledger Provisioning
//!
//! This crate is the leaf of the workspace DAG. It defines the identity and
//! encoding primitives that every other crate builds on; it depends on
//! nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Fixed-size identities.** `Hash` and `AssetId` are 32-byte newtypes.
//!    Constructing either from a byte slice of the wrong length is an
//!    explicit error, never a truncation or zero-pad.
//!
//! 2. **Frozen encoding.** The varint/varstr layout in [`encoding`] feeds
//!    asset identity derivation. Any change to it changes every AssetID ever
//!    derived, so the layout is pinned by known-answer tests.
//!
//! 3. **Typed encoder inputs.** `Varint63`, `Varstr31`, `IssuanceProgram`
//!    and `VmVersion` carry their range checks in their constructors, so the
//!    identity derivation path has no error branch once inputs are typed.
//!
//! 4. **Opaque metadata stays opaque.** Tags and definitions are JSON objects
//!    the provisioning layer stores and echoes but never interprets.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `ledger-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod asset;
pub mod canonical;
pub mod encoding;
pub mod error;
pub mod hash;
pub mod identity;
pub mod metadata;

// Re-export primary types for ergonomic imports.
pub use asset::{AssetId, IssuanceProgram, VmVersion, ASSET_VERSION};
pub use canonical::CanonicalBytes;
pub use encoding::{ByteSink, Reader, Varint31, Varint63, Varstr31};
pub use error::{CanonicalizationError, EncodingError, IdentityError, MetadataError};
pub use hash::Hash;
pub use identity::{AccountId, ClientToken};
pub use metadata::{Definition, Tags};
