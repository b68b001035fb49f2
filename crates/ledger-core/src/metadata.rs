//! # Opaque Metadata
//!
//! Tags (accounts and assets) and definitions (assets) are JSON objects the
//! provisioning layer stores and echoes back without interpreting. The only
//! check applied is structural: each must be an object, or absent.

use serde_json::{Map, Value};

use crate::error::MetadataError;

/// Free-form key/value tags.
pub type Tags = Map<String, Value>;

/// Structured asset definition.
pub type Definition = Map<String, Value>;

/// Parse an optional metadata field.
///
/// Absent and `null` both yield an empty object. Any other non-object value
/// fails with [`MetadataError::NotAnObject`].
pub fn parse_object(field: &'static str, value: Option<&Value>) -> Result<Map<String, Value>, MetadataError> {
    match value {
        None | Some(Value::Null) => Ok(Map::new()),
        Some(Value::Object(map)) => Ok(map.clone()),
        Some(other) => Err(MetadataError::NotAnObject {
            field,
            found: json_type_name(other),
        }),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
