//! # Inspect Subcommand
//!
//! Summarizes an OpenAPI document from a local file: title, version,
//! servers, the operation list (sorted by path, then method), and the
//! component schema names. Accepts JSON or YAML input.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde_json::Value;

/// Arguments for the `cdt inspect` subcommand.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Print the summary as JSON instead of text.
    #[arg(long)]
    pub json: bool,

    /// Path to the OpenAPI document (JSON or YAML).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

/// Execute the inspect subcommand.
pub fn run_inspect(args: &InspectArgs) -> Result<u8> {
    let content = std::fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read file: {}", args.file.display()))?;
    let document = parse_document(&content)
        .with_context(|| format!("failed to parse {} as JSON or YAML", args.file.display()))?;

    let summary = match cdt_artifacts::summarize(&document) {
        Ok(summary) => summary,
        Err(e) => {
            println!("FAIL: {e}");
            return Ok(1);
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(0);
    }

    match (&summary.title, &summary.version) {
        (Some(title), Some(version)) => println!("{title} {version}"),
        (Some(title), None) => println!("{title}"),
        _ => println!("(untitled document)"),
    }
    if let Some(openapi) = &summary.openapi_version {
        println!("OpenAPI {openapi}");
    }
    for server in &summary.servers {
        println!("Server: {server}");
    }
    println!("Operations: {}", summary.operations.len());
    for op in &summary.operations {
        match &op.summary {
            Some(text) => println!("  {:6} {} — {}", op.method, op.path, text),
            None => println!("  {:6} {}", op.method, op.path),
        }
    }
    if !summary.schemas.is_empty() {
        println!("Schemas: {}", summary.schemas.join(", "));
    }
    Ok(0)
}

/// Parse as JSON first, falling back to YAML. JSON is tried first so a
/// JSON syntax error is reported as such rather than as YAML's.
fn parse_document(content: &str) -> Result<Value> {
    if let Ok(value) = serde_json::from_str(content) {
        return Ok(value);
    }
    let value: Value = serde_yaml::from_str(content)?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn inspect_reads_a_json_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("api.json");
        let document = json!({
            "openapi": "3.1.0",
            "info": {"title": "Demo API", "version": "1.0.0"},
            "paths": {"/pets": {"get": {"summary": "List pets"}}}
        });
        std::fs::write(&path, serde_json::to_string_pretty(&document).unwrap()).unwrap();

        let args = InspectArgs { json: false, file: path };
        assert_eq!(run_inspect(&args).unwrap(), 0);
    }

    #[test]
    fn inspect_reads_a_yaml_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("api.yaml");
        let document = concat!(
            "openapi: 3.0.0\n",
            "info:\n",
            "  title: Yaml API\n",
            "  version: \"1.0\"\n",
            "paths:\n",
            "  /things:\n",
            "    get:\n",
            "      summary: List things\n",
        );
        std::fs::write(&path, document).unwrap();

        let args = InspectArgs { json: true, file: path };
        assert_eq!(run_inspect(&args).unwrap(), 0);
    }

    #[test]
    fn a_scalar_document_is_a_domain_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scalar.json");
        std::fs::write(&path, b"42").unwrap();

        let args = InspectArgs { json: false, file: path };
        assert_eq!(run_inspect(&args).unwrap(), 1);
    }

    #[test]
    fn unparseable_input_is_an_operational_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("garbage.txt");
        std::fs::write(&path, b"{ not json\n\t- not yaml: [").unwrap();

        let args = InspectArgs { json: false, file: path };
        assert!(run_inspect(&args).is_err());
    }
}
