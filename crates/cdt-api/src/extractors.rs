//! Request body extraction helpers.
//!
//! Axum's `Json` rejection is an opaque response; routing it through
//! [`AppError`] keeps every error body in the same envelope. Handlers
//! take `Result<Json<T>, JsonRejection>` and call one of these.

use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde_json::Value;

use crate::error::AppError;

/// Request payloads that carry their own structural checks, beyond
/// what deserialization enforces.
pub trait Validate {
    fn validate(&self) -> Result<(), AppError>;
}

/// Unwrap a JSON body, mapping deserialization failures to 400.
pub fn extract_json<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    match payload {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => Err(AppError::BadRequest(rejection.body_text())),
    }
}

/// Unwrap a JSON body and run its [`Validate`] impl.
pub fn extract_validated_json<T: Validate>(
    payload: Result<Json<T>, JsonRejection>,
) -> Result<T, AppError> {
    let value = extract_json(payload)?;
    value.validate()?;
    Ok(value)
}

/// Parse a raw body as JSON first, then as YAML.
///
/// The inspector accepts OpenAPI documents in either syntax and clients
/// rarely label them correctly, so the content type is ignored. JSON is
/// tried first because every JSON document is also valid YAML and the
/// JSON parser gives the better error positions.
pub fn parse_json_or_yaml(raw: &str) -> Result<Value, AppError> {
    if raw.trim().is_empty() {
        return Err(AppError::BadRequest("request body is empty".to_string()));
    }
    if let Ok(value) = serde_json::from_str::<Value>(raw) {
        return Ok(value);
    }
    match serde_yaml::from_str::<Value>(raw) {
        Ok(value) => Ok(value),
        Err(error) => Err(AppError::BadRequest(format!(
            "body is neither valid JSON nor valid YAML: {error}"
        ))),
    }
}
