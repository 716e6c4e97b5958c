//! # cdt-cli — Operator CLI for the Credential Design Tools
//!
//! Provides the `cdt` command-line interface for working with
//! governance artifacts outside the API service: offline placement
//! planning, artifact validation, publishing as pull requests, and
//! OpenAPI inspection.
//!
//! ## Subcommands
//!
//! - `cdt plan` — Dry-run the placement planner for a payload file.
//! - `cdt publish` — Publish an artifact file as a governance pull request.
//! - `cdt validate` — Validate artifact documents against their kind's rules.
//! - `cdt inspect` — Summarize an OpenAPI document (JSON or YAML).
//!
//! ## Exit Codes
//!
//! Every subcommand reports through the same scheme: `0` success, `1`
//! domain failure (invalid artifact, refused publish), `2` operational
//! error (unreadable file, missing token, unreachable forge).

pub mod inspect;
pub mod payload;
pub mod plan;
pub mod publish;
pub mod validate;

use anyhow::{bail, Context, Result};
use cdt_forge::{ForgeClient, ForgeConfig};
use url::Url;

/// Environment variable consulted when `--token` is not given.
pub const TOKEN_ENV_VAR: &str = "FORGE_TOKEN";

/// Resolve the forge token from a flag value or the environment.
pub fn resolve_token(flag: Option<&str>) -> Result<String> {
    if let Some(token) = flag {
        return Ok(token.to_string());
    }
    match std::env::var(TOKEN_ENV_VAR) {
        Ok(token) if !token.trim().is_empty() => Ok(token),
        _ => bail!("no forge token: pass --token or set {TOKEN_ENV_VAR}"),
    }
}

/// Build a forge client for the given API base URL and token.
pub fn forge_client(api_url: &Url, token: &str) -> Result<ForgeClient> {
    let config = ForgeConfig {
        api_url: api_url.clone(),
        token: token.to_string(),
        timeout_secs: 30,
    };
    ForgeClient::new(config).context("failed to build the forge client")
}
