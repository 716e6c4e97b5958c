//! # JSON Rendering
//!
//! Every artifact committed to the governance repository is UTF-8 JSON with
//! two-space indentation, so diffs in pull requests stay readable and
//! re-publishing an unchanged document produces a byte-identical file.

use serde::Serialize;

use crate::error::RenderError;

/// Render a payload to the committed JSON form: UTF-8, two-space indent.
///
/// The output carries no trailing newline; the governance repository stores
/// files exactly as the editors serialize them.
pub fn to_pretty_json<T: Serialize>(payload: &T) -> Result<String, RenderError> {
    Ok(serde_json::to_string_pretty(payload)?)
}
