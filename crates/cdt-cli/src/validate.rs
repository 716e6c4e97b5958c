//! # Validate Subcommand
//!
//! Validates artifact documents against their kind's rules: JSON Schema
//! files must compile under Draft 2020-12, VCT and context documents
//! must carry their required fields, and so on. Prints one OK/FAIL line
//! per file.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::payload::{check_artifact, load_json, PayloadKind};

/// Arguments for the `cdt validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Artifact kind to validate the files as. For `vocab` this is a
    /// single vocabulary type document, not a batch file.
    #[arg(long, value_enum)]
    pub kind: PayloadKind,

    /// Paths to the artifact documents (JSON).
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,
}

/// Execute the validate subcommand.
///
/// Returns exit code 0 when every file passes, 1 otherwise. Unreadable
/// files count as failures rather than aborting the run, so one bad
/// path does not hide the verdict on the rest.
pub fn run_validate(args: &ValidateArgs) -> Result<u8> {
    let mut passed = 0usize;

    for file in &args.files {
        let verdict = match load_json(file) {
            Ok(document) => check_artifact(args.kind, &document).map_err(|e| e.to_string()),
            Err(e) => Err(format!("{e:#}")),
        };
        match verdict {
            Ok(()) => {
                println!("OK: {}", file.display());
                passed += 1;
            }
            Err(reason) => println!("FAIL: {} — {}", file.display(), reason),
        }
    }

    if args.files.len() > 1 {
        println!("{passed}/{} passed", args.files.len());
    }
    Ok(if passed == args.files.len() { 0 } else { 1 })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn write_json(dir: &tempfile::TempDir, name: &str, value: &serde_json::Value) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, serde_json::to_string_pretty(value).unwrap()).unwrap();
        path
    }

    #[test]
    fn valid_schema_passes() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_json(
            &dir,
            "good.json",
            &json!({
                "$schema": "https://json-schema.org/draft/2020-12/schema",
                "type": "object",
                "properties": {"name": {"type": "string"}}
            }),
        );

        let args = ValidateArgs { kind: PayloadKind::Schema, files: vec![file] };
        assert_eq!(run_validate(&args).unwrap(), 0);
    }

    #[test]
    fn one_bad_file_fails_the_run_but_not_the_others() {
        let dir = tempfile::tempdir().unwrap();
        let good = write_json(&dir, "good.json", &json!({"type": "object"}));
        let bad = write_json(&dir, "bad.json", &json!("not a schema"));

        let args = ValidateArgs { kind: PayloadKind::Schema, files: vec![good, bad] };
        assert_eq!(run_validate(&args).unwrap(), 1);
    }

    #[test]
    fn missing_file_counts_as_a_failure() {
        let args = ValidateArgs {
            kind: PayloadKind::Schema,
            files: vec![PathBuf::from("/tmp/cdt-no-such-artifact.json")],
        };
        assert_eq!(run_validate(&args).unwrap(), 1);
    }
}
