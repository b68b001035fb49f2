//! # API Error Types
//!
//! Two layers of failure reach clients:
//!
//! - [`AppError`] rejects a whole request (malformed body, oversized batch,
//!   unready store). It implements [`IntoResponse`].
//! - [`ItemError`] fails one batch item. It is rendered into that item's
//!   response slot and never affects sibling items.
//!
//! Both render the same [`ErrorBody`] shape. Internal failure details are
//! logged, never returned.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use ledger_core::MetadataError;
use ledger_registry::RegistryError;
use ledger_signers::SignerError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::request_id::RequestId;

/// Structured JSON error response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g. "VALIDATION_ERROR").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Additional context. Batch item errors carry their `request_id` here.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Whole-request failure.
#[derive(Error, Debug)]
pub enum AppError {
    /// Request content violates a service limit or rule (422).
    #[error("validation error: {0}")]
    Validation(String),

    /// Request body could not be parsed (422).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// A collaborator is not ready (503).
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
            Self::BadRequest(_) => (StatusCode::UNPROCESSABLE_ENTITY, "BAD_REQUEST"),
            Self::ServiceUnavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = self.to_string();

        match &self {
            Self::ServiceUnavailable(_) => tracing::warn!(error = %self, "service unavailable"),
            _ => tracing::debug!(error = %self, "request rejected"),
        }

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                details: None,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Failure of a single batch item.
#[derive(Error, Debug)]
pub enum ItemError {
    /// The item, or a metadata field inside it, is not well-formed.
    #[error("input parse error: {0}")]
    InputParse(String),

    /// The item is well-formed but semantically invalid.
    #[error("validation error: {0}")]
    Validation(String),

    /// The create/define collaborator rejected or failed the item.
    #[error("{0}")]
    Collaborator(#[from] RegistryError),

    /// The item's task panicked. Holds the panic payload for the log.
    #[error("item task panicked: {0}")]
    ContainedFault(String),

    /// The item was abandoned by cancellation or the batch deadline.
    #[error("cancelled: {0}")]
    Cancelled(&'static str),
}

impl ItemError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::InputParse(_) => "INPUT_PARSE_ERROR",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Collaborator(_) => "COLLABORATOR_ERROR",
            Self::ContainedFault(_) => "CONTAINED_FAULT",
            Self::Cancelled(_) => "CANCELLED",
        }
    }

    /// Client-facing message. Store internals and panic payloads stay in
    /// the server log.
    fn public_message(&self) -> String {
        match self {
            Self::ContainedFault(_) => "An internal error occurred while processing this item".to_string(),
            Self::Collaborator(RegistryError::Unavailable(_) | RegistryError::DanglingToken(_)) => {
                "The store could not complete this item".to_string()
            }
            other => other.to_string(),
        }
    }

    /// Log at the severity the failure class deserves.
    pub(crate) fn log(&self, index: usize) {
        match self {
            Self::ContainedFault(_) => tracing::error!(index, error = %self, "batch item fault contained"),
            Self::Collaborator(RegistryError::Unavailable(_) | RegistryError::DanglingToken(_)) => {
                tracing::error!(index, error = %self, "batch item store failure")
            }
            Self::Cancelled(_) => tracing::warn!(index, error = %self, "batch item cancelled"),
            _ => tracing::debug!(index, code = self.code(), error = %self, "batch item rejected"),
        }
    }

    /// Render into the error slot of a batch response.
    pub fn to_error_body(&self, request_id: RequestId) -> ErrorBody {
        ErrorBody {
            error: ErrorDetail {
                code: self.code().to_string(),
                message: self.public_message(),
                details: Some(serde_json::json!({ "request_id": request_id.to_string() })),
            },
        }
    }
}

impl From<MetadataError> for ItemError {
    fn from(err: MetadataError) -> Self {
        Self::InputParse(err.to_string())
    }
}

impl From<SignerError> for ItemError {
    fn from(err: SignerError) -> Self {
        Self::Validation(err.to_string())
    }
}
