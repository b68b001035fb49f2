//! # In-Memory Registry
//!
//! DashMap-backed reference store. Data lives for the life of the process.
//!
//! ## Idempotency
//!
//! Each entity kind keeps a client-token map. Creation runs while holding
//! the token's map entry, so two concurrent requests with the same token
//! serialize on it: the first creates, the second observes the record and
//! returns the same entity.
//!
//! ## Lock order
//!
//! token entry, then alias entry, then entity map. Lookups take alias then
//! entity, never a token entry.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use ledger_core::{AccountId, AssetId, CanonicalBytes, Hash};
use ledger_crypto::chainkd::xpub_keys;
use ledger_crypto::{compute_asset_id, multisig_issuance_program, sha3_256, VM_VERSION};
use ledger_signers::{derive_keys, KeySpace, Signer};

use crate::error::RegistryError;
use crate::model::{Account, Asset, NewAccount, NewAsset};
use crate::{AccountRegistry, AssetRegistry};

/// Chain parameters the registry needs to fix asset identities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryConfig {
    pub genesis_hash: Hash,
}

struct Inner {
    config: RegistryConfig,
    accounts: DashMap<AccountId, Account>,
    account_aliases: DashMap<String, AccountId>,
    account_tokens: DashMap<String, AccountId>,
    assets: DashMap<AssetId, Asset>,
    asset_aliases: DashMap<String, AssetId>,
    asset_tokens: DashMap<String, AssetId>,
    next_key_index: AtomicU64,
}

/// In-memory account and asset store.
///
/// Cheaply cloneable via `Arc`; all clones share the same data.
#[derive(Clone)]
pub struct MemoryRegistry {
    inner: Arc<Inner>,
}

impl MemoryRegistry {
    pub fn new(config: RegistryConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                config,
                accounts: DashMap::new(),
                account_aliases: DashMap::new(),
                account_tokens: DashMap::new(),
                assets: DashMap::new(),
                asset_aliases: DashMap::new(),
                asset_tokens: DashMap::new(),
                next_key_index: AtomicU64::new(1),
            }),
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.inner.config
    }

    pub fn account(&self, id: &AccountId) -> Option<Account> {
        self.inner.accounts.get(id).map(|a| a.clone())
    }

    pub fn account_by_alias(&self, alias: &str) -> Option<Account> {
        let id = self.inner.account_aliases.get(alias)?.clone();
        self.account(&id)
    }

    pub fn asset(&self, id: &AssetId) -> Option<Asset> {
        self.inner.assets.get(id).map(|a| a.clone())
    }

    pub fn asset_by_alias(&self, alias: &str) -> Option<Asset> {
        let id = *self.inner.asset_aliases.get(alias)?;
        self.asset(&id)
    }

    pub fn account_count(&self) -> usize {
        self.inner.accounts.len()
    }

    pub fn asset_count(&self) -> usize {
        self.inner.assets.len()
    }

    fn next_key_index(&self) -> u64 {
        self.inner.next_key_index.fetch_add(1, Ordering::Relaxed)
    }

    fn create_account_now(&self, req: NewAccount) -> Result<Account, RegistryError> {
        let inner = &*self.inner;
        let slot = match inner.account_tokens.entry(req.client_token.as_str().to_owned()) {
            Entry::Occupied(e) => {
                tracing::debug!(token = %req.client_token, account_id = %e.get(), "replayed account token");
                return inner
                    .accounts
                    .get(e.get())
                    .map(|a| a.clone())
                    .ok_or_else(|| RegistryError::DanglingToken(e.key().clone()));
            }
            Entry::Vacant(v) => v,
        };

        let id = AccountId::generate();
        if let Some(alias) = &req.alias {
            reserve_alias(&inner.account_aliases, "account", alias, id.clone())?;
        }
        let signer = Signer::new(id.as_str(), KeySpace::Account, req.signer, self.next_key_index());
        let account = Account {
            id: id.clone(),
            alias: req.alias,
            signer,
            tags: req.tags,
            created_at: Utc::now(),
        };
        inner.accounts.insert(id.clone(), account.clone());
        slot.insert(id);

        tracing::info!(
            account_id = %account.id,
            key_index = account.signer.key_index,
            quorum = account.signer.quorum(),
            keys = account.signer.xpubs().len(),
            "account created"
        );
        Ok(account)
    }

    fn define_asset_now(&self, req: NewAsset) -> Result<Asset, RegistryError> {
        let inner = &*self.inner;
        let slot = match inner.asset_tokens.entry(req.client_token.as_str().to_owned()) {
            Entry::Occupied(e) => {
                tracing::debug!(token = %req.client_token, asset_id = %e.get(), "replayed asset token");
                return inner
                    .assets
                    .get(e.get())
                    .map(|a| a.clone())
                    .ok_or_else(|| RegistryError::DanglingToken(e.key().clone()));
            }
            Entry::Vacant(v) => v,
        };
        if matches!(&req.alias, Some(a) if a.is_empty()) {
            return Err(RegistryError::EmptyAlias);
        }

        let raw_definition = CanonicalBytes::new(&req.definition)?;
        let definition_hash = sha3_256(raw_definition.as_bytes());

        let key_index = self.next_key_index();
        let signer_id = format!("asset-signer-{key_index}");
        let mut signer = Signer::new(signer_id, KeySpace::Asset, req.signer, key_index);
        let derived: Vec<_> = derive_keys(&signer, KeySpace::Asset)
            .into_iter()
            .map(|k| k.derived)
            .collect();
        let program = multisig_issuance_program(&xpub_keys(&derived), signer.quorum())?;
        let genesis_hash = inner.config.genesis_hash;
        let id = compute_asset_id(&program, &genesis_hash, VM_VERSION);

        if let Some(alias) = &req.alias {
            reserve_alias(&inner.asset_aliases, "asset", alias, id)?;
        }
        signer.id = id.to_string();
        let asset = Asset {
            id,
            alias: req.alias,
            signer,
            issuance_program: program,
            vm_version: VM_VERSION,
            genesis_hash,
            definition: req.definition,
            raw_definition: raw_definition.into_vec(),
            definition_hash,
            tags: req.tags,
            is_local: true,
            created_at: Utc::now(),
        };
        inner.assets.insert(id, asset.clone());
        slot.insert(id);

        tracing::info!(
            asset_id = %asset.id,
            key_index = asset.signer.key_index,
            quorum = asset.signer.quorum(),
            keys = asset.signer.xpubs().len(),
            "asset defined"
        );
        Ok(asset)
    }
}

fn reserve_alias<V>(
    aliases: &DashMap<String, V>,
    kind: &'static str,
    alias: &str,
    owner: V,
) -> Result<(), RegistryError> {
    if alias.is_empty() {
        return Err(RegistryError::EmptyAlias);
    }
    match aliases.entry(alias.to_owned()) {
        Entry::Occupied(_) => Err(RegistryError::DuplicateAlias {
            kind,
            alias: alias.to_owned(),
        }),
        Entry::Vacant(v) => {
            v.insert(owner);
            Ok(())
        }
    }
}

impl std::fmt::Debug for MemoryRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryRegistry")
            .field("accounts", &self.account_count())
            .field("assets", &self.asset_count())
            .finish()
    }
}

#[async_trait]
impl AccountRegistry for MemoryRegistry {
    async fn create_account(&self, req: NewAccount) -> Result<Account, RegistryError> {
        self.create_account_now(req)
    }
}

#[async_trait]
impl AssetRegistry for MemoryRegistry {
    async fn define_asset(&self, req: NewAsset) -> Result<Asset, RegistryError> {
        self.define_asset_now(req)
    }
}
