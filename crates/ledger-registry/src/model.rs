//! Registry requests and persisted entities.

use chrono::{DateTime, Utc};
use ledger_core::{AccountId, AssetId, ClientToken, Definition, Hash, IssuanceProgram, Tags, VmVersion};
use ledger_signers::{Signer, SignerSpec};
use serde::{Deserialize, Serialize};

/// Input to [`crate::AccountRegistry::create_account`].
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub signer: SignerSpec,
    pub alias: Option<String>,
    pub tags: Tags,
    pub client_token: ClientToken,
}

/// A persisted account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub alias: Option<String>,
    pub signer: Signer,
    pub tags: Tags,
    pub created_at: DateTime<Utc>,
}

/// Input to [`crate::AssetRegistry::define_asset`].
#[derive(Debug, Clone)]
pub struct NewAsset {
    pub signer: SignerSpec,
    pub definition: Definition,
    pub alias: Option<String>,
    pub tags: Tags,
    pub client_token: ClientToken,
}

/// A defined asset.
///
/// `id` is fixed at definition time from `issuance_program`,
/// `genesis_hash` and `vm_version`, and never recomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: AssetId,
    pub alias: Option<String>,
    pub signer: Signer,
    pub issuance_program: IssuanceProgram,
    pub vm_version: VmVersion,
    pub genesis_hash: Hash,
    pub definition: Definition,
    /// JCS bytes of `definition`.
    pub raw_definition: Vec<u8>,
    /// SHA3-256 of `raw_definition`.
    pub definition_hash: Hash,
    pub tags: Tags,
    /// Defined by this node rather than learned from the chain.
    pub is_local: bool,
    pub created_at: DateTime<Utc>,
}
