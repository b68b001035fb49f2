//! # Asset Definition
//!
//! `POST /create-asset` defines a batch of assets. Definition fixes each
//! asset's identity: the registry derives the signer's asset keys, builds
//! the multisig issuance program from them, and hashes that program with
//! the genesis hash into the asset id.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Extension, Json, Router};
use ledger_core::metadata::parse_object;
use ledger_core::{AssetId, ClientToken, Definition, IssuanceProgram, Tags};
use ledger_crypto::XPub;
use ledger_registry::{Asset, AssetRegistry, NewAsset};
use ledger_signers::{derive_keys, parse_xpubs, DerivationPath, KeySpace, SignerSpec};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::batch::{run_batch, BatchItem, ItemContext};
use crate::error::{AppError, ItemError};
use crate::extractors::{decode_item, extract_batch, validate_alias, Validate};
use crate::request_id::RequestId;
use crate::state::AppState;

/// One asset to define.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateAssetRequest {
    /// Hex-encoded 64-byte root extended public keys, in signing order.
    pub root_xpubs: Vec<String>,
    /// Number of issuance signatures required.
    pub quorum: usize,
    #[serde(default)]
    pub alias: Option<String>,
    /// Free-form JSON object committed to by the asset's definition hash.
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub definition: Option<Value>,
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub tags: Option<Value>,
    #[serde(default)]
    pub client_token: Option<String>,
}

impl Validate for CreateAssetRequest {
    fn validate(&self) -> Result<(), String> {
        validate_alias(self.alias.as_deref())?;
        if matches!(&self.client_token, Some(t) if t.is_empty()) {
            return Err("client_token must not be empty".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AssetKey {
    #[schema(value_type = String)]
    pub root_xpub: XPub,
    /// Derived extended key; its first 32 bytes are the issuance public key.
    #[schema(value_type = String)]
    pub asset_pubkey: XPub,
    #[schema(value_type = Vec<String>)]
    pub asset_derivation_path: DerivationPath,
}

/// A defined asset.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AssetResponse {
    #[schema(value_type = String)]
    pub id: AssetId,
    pub alias: Option<String>,
    #[schema(value_type = String)]
    pub issuance_program: IssuanceProgram,
    pub keys: Vec<AssetKey>,
    pub quorum: usize,
    #[schema(value_type = Object)]
    pub definition: Definition,
    #[schema(value_type = Object)]
    pub tags: Tags,
    pub is_local: bool,
}

impl From<&Asset> for AssetResponse {
    fn from(asset: &Asset) -> Self {
        let keys = derive_keys(&asset.signer, KeySpace::Asset)
            .into_iter()
            .map(|k| AssetKey {
                root_xpub: k.root,
                asset_pubkey: k.derived,
                asset_derivation_path: k.path,
            })
            .collect();
        Self {
            id: asset.id,
            alias: asset.alias.clone(),
            issuance_program: asset.issuance_program.clone(),
            keys,
            quorum: asset.signer.quorum(),
            definition: asset.definition.clone(),
            tags: asset.tags.clone(),
            is_local: asset.is_local,
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new().route("/create-asset", post(create_assets))
}

/// POST /create-asset: Define a batch of assets.
#[utoipa::path(
    post,
    path = "/create-asset",
    request_body = Vec<CreateAssetRequest>,
    responses(
        (status = 200, description = "One result or error per item, in request order", body = Vec<AssetResponse>),
        (status = 422, description = "Body is not a JSON array or exceeds the batch limit", body = crate::error::ErrorBody),
    ),
    tag = "assets"
)]
pub async fn create_assets(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    body: Result<Json<Vec<Value>>, JsonRejection>,
) -> Result<Json<Vec<BatchItem<AssetResponse>>>, AppError> {
    let items = extract_batch(body, state.config.max_batch_size)?;
    let registry = Arc::clone(&state.assets);

    let outcomes = run_batch(
        request_id,
        &state.shutdown,
        state.config.batch_deadline,
        items,
        move |ctx, raw| {
            let registry = Arc::clone(&registry);
            async move { define_one(registry.as_ref(), ctx, raw).await }
        },
    )
    .await;

    Ok(Json(outcomes.into_iter().map(BatchItem::from).collect()))
}

async fn define_one(
    registry: &dyn AssetRegistry,
    ctx: ItemContext,
    raw: Value,
) -> Result<AssetResponse, ItemError> {
    let req: CreateAssetRequest = decode_item(raw)?;
    let definition = parse_object("definition", req.definition.as_ref())?;
    let tags = parse_object("tags", req.tags.as_ref())?;
    let signer = SignerSpec::new(parse_xpubs(&req.root_xpubs)?, req.quorum)?;
    let client_token = req.client_token.map(ClientToken::new).unwrap_or_else(ClientToken::random);

    let asset = registry
        .define_asset(NewAsset {
            signer,
            definition,
            alias: req.alias,
            tags,
            client_token,
        })
        .await?;

    tracing::debug!(index = ctx.index, asset_id = %asset.id, "asset defined");
    Ok(AssetResponse::from(&asset))
}
