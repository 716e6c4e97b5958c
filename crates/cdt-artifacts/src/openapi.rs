//! # OpenAPI document inspection
//!
//! The design tools work against HTTP APIs described by OpenAPI
//! documents. The inspector condenses such a document to what a
//! designer actually scans for: which operations exist, where the
//! servers are, and which schemas are defined. The full document stays
//! with the caller; nothing here is resolved or dereferenced.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ArtifactError;

/// HTTP methods recognized inside a path item. Everything else at that
/// level (`parameters`, `summary`, `$ref`) is not an operation.
const METHODS: [&str; 8] =
    ["get", "put", "post", "delete", "options", "head", "patch", "trace"];

/// Condensed view of an OpenAPI document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSummary {
    /// `info.title`, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// `info.version`, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// The `openapi` version string, or `swagger` for 2.0 documents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openapi_version: Option<String>,
    /// Server URLs, in document order.
    pub servers: Vec<String>,
    /// Every operation, sorted by path then method.
    pub operations: Vec<OperationSummary>,
    /// Schema names under `components.schemas` (or `definitions` for
    /// 2.0 documents), sorted.
    pub schemas: Vec<String>,
}

/// One operation of a summarized document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationSummary {
    /// Upper-case HTTP method.
    pub method: String,
    /// Path template, e.g. `/pets/{petId}`.
    pub path: String,
    /// The operation's `summary` field, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// Summarize an OpenAPI document.
///
/// Tolerant by intent: missing sections yield empty lists, unknown keys
/// are ignored, and only a non-object root is an error. A designer
/// pastes in half-written documents and still wants the half that
/// parses.
pub fn summarize(document: &Value) -> Result<DocumentSummary, ArtifactError> {
    let root = document.as_object().ok_or_else(|| ArtifactError::Malformed {
        kind: "OpenAPI",
        reason: "document root must be an object".to_string(),
    })?;

    let info = root.get("info").and_then(Value::as_object);
    let title = info
        .and_then(|i| i.get("title"))
        .and_then(Value::as_str)
        .map(str::to_string);
    let version = info
        .and_then(|i| i.get("version"))
        .and_then(Value::as_str)
        .map(str::to_string);
    let openapi_version = root
        .get("openapi")
        .or_else(|| root.get("swagger"))
        .and_then(Value::as_str)
        .map(str::to_string);

    let servers = root
        .get("servers")
        .and_then(Value::as_array)
        .map(|servers| {
            servers
                .iter()
                .filter_map(|s| s.get("url").and_then(Value::as_str))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let mut operations = Vec::new();
    if let Some(paths) = root.get("paths").and_then(Value::as_object) {
        for (path, item) in paths {
            let Some(item) = item.as_object() else { continue };
            for method in METHODS {
                if let Some(operation) = item.get(method) {
                    operations.push(OperationSummary {
                        method: method.to_uppercase(),
                        path: path.clone(),
                        summary: operation
                            .get("summary")
                            .and_then(Value::as_str)
                            .map(str::to_string),
                    });
                }
            }
        }
    }
    operations.sort_by(|a, b| a.path.cmp(&b.path).then_with(|| a.method.cmp(&b.method)));

    let mut schemas: Vec<String> = root
        .get("components")
        .and_then(|c| c.get("schemas"))
        .or_else(|| root.get("definitions"))
        .and_then(Value::as_object)
        .map(|schemas| schemas.keys().cloned().collect())
        .unwrap_or_default();
    schemas.sort();

    Ok(DocumentSummary { title, version, openapi_version, servers, operations, schemas })
}
