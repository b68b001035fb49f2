//! # ledger-api: Batch Provisioning Service
//!
//! HTTP surface for creating accounts and defining assets in batches.
//!
//! ## API Surface
//!
//! | Route                    | Module                | Purpose                    |
//! |--------------------------|-----------------------|----------------------------|
//! | `POST /create-account`   | [`routes::accounts`]  | Batch account creation     |
//! | `POST /create-asset`     | [`routes::assets`]    | Batch asset definition     |
//! | `GET /health/liveness`   | this module           | Process is up              |
//! | `GET /health/readiness`  | this module           | Registries are reachable   |
//! | `GET /openapi.json`      | [`openapi`]           | Generated OpenAPI document |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → RequestId → Handler
//! ```
//!
//! Batch handlers hand every item to [`batch::run_batch`], which isolates
//! items from each other and keeps response slots in request order.

pub mod batch;
pub mod config;
pub mod error;
pub mod extractors;
pub mod openapi;
pub mod request_id;
pub mod routes;
pub mod state;

use axum::extract::{DefaultBodyLimit, State};
use axum::middleware::from_fn;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::state::AppState;

/// Request bodies above this size are rejected before parsing.
const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

/// Assemble the application router with all routes and middleware.
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .merge(routes::accounts::router())
        .merge(routes::assets::router())
        .merge(openapi::router())
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(from_fn(request_id::request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state.clone());

    let health = Router::new()
        .route("/health/liveness", axum::routing::get(liveness))
        .route("/health/readiness", axum::routing::get(readiness))
        .with_state(state);

    Router::new().merge(health).merge(api)
}

/// Liveness: the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness: both registries answer their health check.
///
/// Returns 200 "ready", or 503 with the standard error body naming the
/// registry that failed.
async fn readiness(State(state): State<AppState>) -> Result<&'static str, AppError> {
    if state.shutdown.is_cancelled() {
        return Err(AppError::ServiceUnavailable("shutting down".to_string()));
    }
    state
        .accounts
        .health_check()
        .await
        .map_err(|e| AppError::ServiceUnavailable(format!("account registry: {e}")))?;
    state
        .assets
        .health_check()
        .await
        .map_err(|e| AppError::ServiceUnavailable(format!("asset registry: {e}")))?;
    Ok("ready")
}
