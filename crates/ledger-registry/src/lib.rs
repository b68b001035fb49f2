//! # ledger-registry: Create/Define Collaborators
//!
//! The provisioning pipeline hands validated input to a registry, which
//! owns persistence. Two object-safe traits form the boundary:
//!
//! - [`AccountRegistry::create_account`]
//! - [`AssetRegistry::define_asset`]
//!
//! Both are idempotent on the request's client token: a repeated token
//! returns the entity created the first time and has no further effect.
//!
//! [`MemoryRegistry`] is the in-memory reference implementation. It fixes an
//! asset's identity at definition time with the same derivation the
//! pipeline uses to display keys (`ledger_signers::derive_keys`), so the two
//! cannot drift apart.
//!
//! ## Crate Policy
//!
//! - Registries never see unvalidated signer input; they accept
//!   `SignerSpec` only.
//! - Implementations must be `Send + Sync` so they can be shared across
//!   tasks behind an `Arc`.

pub mod error;
pub mod memory;
pub mod model;

use async_trait::async_trait;

pub use error::RegistryError;
pub use memory::{MemoryRegistry, RegistryConfig};
pub use model::{Account, Asset, NewAccount, NewAsset};

/// Account creation collaborator.
#[async_trait]
pub trait AccountRegistry: Send + Sync {
    /// Persist a new account, or return the one already created for this
    /// request's client token.
    async fn create_account(&self, req: NewAccount) -> Result<Account, RegistryError>;

    /// Check that the backing store is reachable.
    async fn health_check(&self) -> Result<(), RegistryError> {
        Ok(())
    }
}

/// Asset definition collaborator.
#[async_trait]
pub trait AssetRegistry: Send + Sync {
    /// Define a new asset, fixing its identity, or return the one already
    /// defined for this request's client token.
    async fn define_asset(&self, req: NewAsset) -> Result<Asset, RegistryError>;

    /// Check that the backing store is reachable.
    async fn health_check(&self) -> Result<(), RegistryError> {
        Ok(())
    }
}
