//! # Publish Subcommand
//!
//! Publishes a payload file as a governance pull request: validates the
//! document, plans placement, cuts a working branch, writes the files,
//! and opens the PR. Prints the PR URL on success.
//!
//! The author handle on the working branch comes from the forge token's
//! own identity, so a CLI publish is attributed exactly like one made
//! through the API service.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use url::Url;

use cdt_core::SystemClock;
use cdt_forge::RepoRef;
use cdt_publish::{draft, ArtifactPayload, ForgeRemote, PublishJob, PublishOptions};

use crate::payload::{build_payload, check_payload, load_json, PayloadKind};
use crate::{forge_client, resolve_token};

/// Arguments for the `cdt publish` subcommand.
#[derive(Args, Debug)]
pub struct PublishArgs {
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

    /// Forge token; falls back to $FORGE_TOKEN.
    #[arg(long)]
    pub token: Option<String>,

    /// Governance repository, as owner/name.
    #[arg(long, default_value = "openwallet-labs/credential-governance")]
    pub repo: RepoRef,

    /// Forge API base URL.
    #[arg(long, default_value = "https://api.github.com")]
    pub api_url: Url,

    /// Commit message override.
    #[arg(long)]
    pub message: Option<String>,

    /// Pull request title override.
    #[arg(long)]
    pub title: Option<String>,

    /// Pull request body override.
    #[arg(long)]
    pub body: Option<String>,

    /// Base branch override.
    #[arg(long)]
    pub base: Option<String>,

    /// Path to the payload file.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

/// Execute the publish subcommand.
pub async fn run_publish(args: &PublishArgs) -> Result<u8> {
    let document = load_json(&args.file)?;
    let payload = build_payload(
        args.kind,
        document,
        args.name.as_deref(),
        args.category.as_deref(),
        args.filename.as_deref(),
    )?;

    if let Err(e) = check_payload(&payload) {
        println!("FAIL: {e}");
        return Ok(1);
    }
    let plan = match draft(&payload) {
        Ok(plan) => plan,
        Err(e) => {
            println!("FAIL: {e}");
            return Ok(1);
        }
    };

    let token = resolve_token(args.token.as_deref())?;
    let client = forge_client(&args.api_url, &token)?;
    let author = client
        .users()
        .authenticated_user()
        .await
        .context("the forge rejected the token")?;
    tracing::info!(login = %author.login, "publishing as");

    let remote = ForgeRemote::new(client, args.repo.clone());
    let job = PublishJob {
        draft: plan,
        author_handle: author.login,
        options: PublishOptions {
            commit_message: args.message.clone(),
            pr_title: args.title.clone(),
            pr_body: args.body.clone(),
            base_branch_override: args.base.clone(),
        },
    };

    let outcome = if matches!(payload, ArtifactPayload::VocabBatch(_)) {
        cdt_publish::run_vocab_batch(&remote, &SystemClock, job).await
    } else {
        cdt_publish::run_publish(&remote, &SystemClock, job, None).await
    };

    match outcome {
        Ok(result) => {
            println!("OK: pull request #{} opened", result.pr_number);
            println!("  {}", result.pr_url);
            for path in &result.file_paths {
                println!("  {path}");
            }
            Ok(0)
        }
        Err(e) => {
            println!("FAIL: {:#}", anyhow::Error::from(e));
            Ok(1)
        }
    }
}
