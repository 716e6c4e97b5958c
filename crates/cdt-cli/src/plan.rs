//! # Plan Subcommand
//!
//! Dry-run of the placement planner. Derives repository paths and the
//! working-branch slug for a payload file without writing anything to
//! the forge. With `--check-remote` it additionally probes the base
//! branch (read-only) and reports which paths would be created and
//! which updated.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use url::Url;

use cdt_forge::RepoRef;
use cdt_publish::{check_existing, draft, resolve_base_branch, ForgeRemote};

use crate::payload::{build_payload, load_json, PayloadKind};
use crate::{forge_client, resolve_token};

/// Arguments for the `cdt plan` subcommand.
#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Artifact kind of the payload file.
    #[arg(long, value_enum)]
    pub kind: PayloadKind,

    /// Artifact name (required except for entities and vocab).
    #[arg(long)]
    pub name: Option<String>,

    /// Grouping category, prefixed onto the derived filename.
    #[arg(long)]
    pub category: Option<String>,

    /// Explicit filename, overriding derivation from the name.
    #[arg(long)]
    pub filename: Option<String>,

    /// Probe the base branch (read-only) to report create vs update.
    #[arg(long)]
    pub check_remote: bool,

    /// Forge token for --check-remote; falls back to $FORGE_TOKEN.
    #[arg(long)]
    pub token: Option<String>,

    /// Governance repository, as owner/name.
    #[arg(long, default_value = "openwallet-labs/credential-governance")]
    pub repo: RepoRef,

    /// Forge API base URL.
    #[arg(long, default_value = "https://api.github.com")]
    pub api_url: Url,

    /// Base branch to plan against instead of the repository default.
    #[arg(long)]
    pub base: Option<String>,

    /// Path to the payload file.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

/// Execute the plan subcommand.
pub async fn run_plan(args: &PlanArgs) -> Result<u8> {
    let document = load_json(&args.file)?;
    let payload = build_payload(
        args.kind,
        document,
        args.name.as_deref(),
        args.category.as_deref(),
        args.filename.as_deref(),
    )?;

    let plan = match draft(&payload) {
        Ok(plan) => plan,
        Err(e) => {
            println!("FAIL: {e}");
            return Ok(1);
        }
    };

    println!("Plan: kind={} slug={}", plan.kind, plan.slug);

    if !args.check_remote {
        for file in &plan.files {
            println!("  {} ({} bytes)", file.path, file.content.len());
        }
        println!(
            "Branch: {}/<add|update>-{}-<millis>",
            plan.kind.branch_prefix(),
            plan.slug
        );
        return Ok(0);
    }

    let token = resolve_token(args.token.as_deref())?;
    let client = forge_client(&args.api_url, &token)?;
    let remote = ForgeRemote::new(client, args.repo.clone());

    let base = resolve_base_branch(&remote, args.base.as_deref())
        .await
        .context("could not resolve the base branch")?;
    let checked = check_existing(&remote, plan, &base.branch_name)
        .await
        .context("could not probe planned paths on the base branch")?;

    for file in &checked.files {
        let action = if file.previous_sha.is_some() { "update" } else { "create" };
        println!("  {action} {} ({} bytes)", file.path, file.content.len());
    }
    let action = if checked.is_update() { "update" } else { "add" };
    println!(
        "Branch: {}/{action}-{}-<millis> from {}",
        checked.kind.branch_prefix(),
        checked.slug,
        base.branch_name
    );
    Ok(0)
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

    fn offline_args(kind: PayloadKind, name: Option<&str>, file: PathBuf) -> PlanArgs {
        PlanArgs {
            kind,
            name: name.map(str::to_string),
            category: None,
            filename: None,
            check_remote: false,
            token: None,
            repo: RepoRef::new("openwallet-labs", "credential-governance"),
            api_url: "https://api.github.com".parse().unwrap(),
            base: None,
            file,
        }
    }

    #[tokio::test]
    async fn offline_plan_derives_the_schema_path() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_json(&dir, "schema.json", &json!({"type": "object"}));

        let args = offline_args(PayloadKind::Schema, Some("Person Credential"), file);
        let code = run_plan(&args).await.unwrap();
        assert_eq!(code, 0);
    }

    #[tokio::test]
    async fn plan_with_an_unusable_name_is_a_domain_failure() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_json(&dir, "schema.json", &json!({"type": "object"}));

        let args = offline_args(PayloadKind::Schema, Some("???"), file);
        let code = run_plan(&args).await.unwrap();
        assert_eq!(code, 1);
    }

    #[tokio::test]
    async fn plan_with_a_missing_file_is_an_operational_error() {
        let args = offline_args(
            PayloadKind::Schema,
            Some("Person Credential"),
            PathBuf::from("/tmp/cdt-no-such-payload.json"),
        );
        assert!(run_plan(&args).await.is_err());
    }
}
