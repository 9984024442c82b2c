//! Presence and shape checks on create payloads.
//!
//! Callers check presence of every required field first, then shape, so the
//! first error reported is always the first missing field.

use serde_json::Value;

use crate::error::{HarvestError, Result};
use crate::layer::Payload;

/// Fails with `MissingArgument` naming the first absent field. JSON `null`
/// counts as absent.
pub fn require_present(payload: &Payload, fields: &[&str]) -> Result<()> {
    match fields.iter().find(|field| matches!(payload.get(**field), None | Some(Value::Null))) {
        Some(field) => Err(HarvestError::MissingArgument((*field).to_string())),
        None => Ok(()),
    }
}

pub fn require_string(payload: &Payload, field: &str) -> Result<()> {
    require_present(payload, &[field])?;
    match payload.get(field) {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(()),
        _ => Err(invalid(field, "a non-empty string")),
    }
}

pub fn require_integer(payload: &Payload, field: &str) -> Result<()> {
    require_present(payload, &[field])?;
    match payload.get(field).and_then(as_integer) {
        Some(n) if n != 0 => Ok(()),
        _ => Err(invalid(field, "a non-empty integer")),
    }
}

pub fn require_array(payload: &Payload, field: &str) -> Result<()> {
    require_present(payload, &[field])?;
    match payload.get(field) {
        Some(Value::Array(items)) if !items.is_empty() => Ok(()),
        _ => Err(invalid(field, "a non-empty array")),
    }
}

fn as_integer(value: &Value) -> Option<i128> {
    value
        .as_i64()
        .map(i128::from)
        .or_else(|| value.as_u64().map(i128::from))
}

fn invalid(field: &str, expected: &str) -> HarvestError {
    HarvestError::InvalidArgument(format!("The \"{field}\" parameter must be {expected}."))
}
