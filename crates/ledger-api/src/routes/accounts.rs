//! # Account Provisioning
//!
//! `POST /create-account` creates a batch of multi-signature accounts.
//! Each item is decoded, validated, and passed to the account registry
//! independently; the response holds one result or error per item, in
//! request order.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Extension, Json, Router};
use ledger_core::metadata::parse_object;
use ledger_core::{AccountId, ClientToken, Tags};
use ledger_crypto::XPub;
use ledger_registry::{Account, AccountRegistry, NewAccount};
use ledger_signers::{derive_keys, parse_xpubs, DerivationPath, KeySpace, SignerSpec};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::batch::{run_batch, BatchItem, ItemContext};
use crate::error::{AppError, ItemError};
use crate::extractors::{decode_item, extract_batch, validate_alias, Validate};
use crate::request_id::RequestId;
use crate::state::AppState;

/// One account to create.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateAccountRequest {
    /// Hex-encoded 64-byte root extended public keys, in signing order.
    pub root_xpubs: Vec<String>,
    /// Number of signatures required.
    pub quorum: usize,
    #[serde(default)]
    pub alias: Option<String>,
    /// Free-form JSON object.
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub tags: Option<Value>,
    /// Idempotency token. Generated when absent.
    #[serde(default)]
    pub client_token: Option<String>,
}

impl Validate for CreateAccountRequest {
    fn validate(&self) -> Result<(), String> {
        validate_alias(self.alias.as_deref())?;
        if matches!(&self.client_token, Some(t) if t.is_empty()) {
            return Err("client_token must not be empty".to_string());
        }
        Ok(())
    }
}

/// A root key and the account key derived from it.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AccountKey {
    #[schema(value_type = String)]
    pub root_xpub: XPub,
    #[schema(value_type = String)]
    pub account_xpub: XPub,
    #[schema(value_type = Vec<String>)]
    pub account_derivation_path: DerivationPath,
}

/// A created account.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AccountResponse {
    #[schema(value_type = String)]
    pub id: AccountId,
    pub alias: Option<String>,
    pub keys: Vec<AccountKey>,
    pub quorum: usize,
    #[schema(value_type = Object)]
    pub tags: Tags,
}

impl From<&Account> for AccountResponse {
    fn from(account: &Account) -> Self {
        let keys = derive_keys(&account.signer, KeySpace::Account)
            .into_iter()
            .map(|k| AccountKey {
                root_xpub: k.root,
                account_xpub: k.derived,
                account_derivation_path: k.path,
            })
            .collect();
        Self {
            id: account.id.clone(),
            alias: account.alias.clone(),
            keys,
            quorum: account.signer.quorum(),
            tags: account.tags.clone(),
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new().route("/create-account", post(create_accounts))
}

/// POST /create-account: Create a batch of accounts.
///
/// Each slot of the response is either an account or an error body.
#[utoipa::path(
    post,
    path = "/create-account",
    request_body = Vec<CreateAccountRequest>,
    responses(
        (status = 200, description = "One result or error per item, in request order", body = Vec<AccountResponse>),
        (status = 422, description = "Body is not a JSON array or exceeds the batch limit", body = crate::error::ErrorBody),
    ),
    tag = "accounts"
)]
pub async fn create_accounts(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    body: Result<Json<Vec<Value>>, JsonRejection>,
) -> Result<Json<Vec<BatchItem<AccountResponse>>>, AppError> {
    let items = extract_batch(body, state.config.max_batch_size)?;
    let registry = Arc::clone(&state.accounts);

    let outcomes = run_batch(
        request_id,
        &state.shutdown,
        state.config.batch_deadline,
        items,
        move |ctx, raw| {
            let registry = Arc::clone(&registry);
            async move { create_one(registry.as_ref(), ctx, raw).await }
        },
    )
    .await;

    Ok(Json(outcomes.into_iter().map(BatchItem::from).collect()))
}

async fn create_one(
    registry: &dyn AccountRegistry,
    ctx: ItemContext,
    raw: Value,
) -> Result<AccountResponse, ItemError> {
    let req: CreateAccountRequest = decode_item(raw)?;
    let tags = parse_object("tags", req.tags.as_ref())?;
    let signer = SignerSpec::new(parse_xpubs(&req.root_xpubs)?, req.quorum)?;
    let client_token = req.client_token.map(ClientToken::new).unwrap_or_else(ClientToken::random);

    let account = registry
        .create_account(NewAccount {
            signer,
            alias: req.alias,
            tags,
            client_token,
        })
        .await?;

    tracing::debug!(index = ctx.index, account_id = %account.id, "account created");
    Ok(AccountResponse::from(&account))
}
