//! # OpenAPI Specification Assembly
//!
//! Serves the utoipa-generated OpenAPI 3.1 document at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "ledgerd: Ledger Provisioning API",
        version = "0.1.0",
        description = "Batch creation of multi-signature accounts and definition of assets.\n\nEvery batch endpoint accepts a JSON array and returns an array of the same length. Each slot holds either the created entity or an `{error: {code, message, details}}` body; one failing item never affects another.",
    ),
    paths(
        crate::routes::accounts::create_accounts,
        crate::routes::assets::create_assets,
    ),
    components(schemas(
        crate::routes::accounts::CreateAccountRequest,
        crate::routes::accounts::AccountResponse,
        crate::routes::accounts::AccountKey,
        crate::routes::assets::CreateAssetRequest,
        crate::routes::assets::AssetResponse,
        crate::routes::assets::AssetKey,
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
    )),
    tags(
        (name = "accounts", description = "Multi-signature account provisioning"),
        (name = "assets", description = "Asset definition and identity"),
    )
)]
pub struct ApiDoc;

pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json: Return the generated OpenAPI specification.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
