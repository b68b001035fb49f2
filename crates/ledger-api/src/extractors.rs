//! # Batch Extraction & Item Validation
//!
//! A batch body is accepted as a JSON array of raw values. Whole-request
//! failures (not JSON, not an array, too many items) become [`AppError`];
//! everything inside an item is decoded later, per item, so one bad item
//! cannot reject its siblings.

use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{AppError, ItemError};

/// Business rules an item checks after deserialization.
pub trait Validate {
    /// Returns an error message on failure.
    fn validate(&self) -> Result<(), String>;
}

/// Extract a batch body, enforcing the configured size limit.
pub fn extract_batch(
    result: Result<Json<Vec<Value>>, JsonRejection>,
    max_batch_size: usize,
) -> Result<Vec<Value>, AppError> {
    let Json(items) = result.map_err(|err| AppError::BadRequest(err.body_text()))?;
    if items.len() > max_batch_size {
        return Err(AppError::Validation(format!(
            "batch of {} items exceeds the limit of {max_batch_size}",
            items.len()
        )));
    }
    Ok(items)
}

/// Decode one raw batch item and check its [`Validate`] rules.
pub fn decode_item<T: DeserializeOwned + Validate>(raw: Value) -> Result<T, ItemError> {
    let item: T = serde_json::from_value(raw).map_err(|e| ItemError::InputParse(e.to_string()))?;
    item.validate().map_err(ItemError::Validation)?;
    Ok(item)
}

/// Shared alias rule for account and asset items.
pub(crate) fn validate_alias(alias: Option<&str>) -> Result<(), String> {
    match alias {
        Some(a) if a.trim().is_empty() => Err("alias must not be empty".to_string()),
        Some(a) if a.len() > MAX_ALIAS_LEN => Err(format!("alias exceeds {MAX_ALIAS_LEN} bytes")),
        _ => Ok(()),
    }
}

const MAX_ALIAS_LEN: usize = 255;
