//! # cdt-forge — Typed Rust client for the governance forge REST API
//!
//! Provides ergonomic, typed access to the forge operations the publish
//! workflow needs:
//! - **Repositories** — default-branch resolution
//! - **Branches** — head SHA lookup, branch creation
//! - **Contents** — file read (404 as `None`) and create/update writes
//! - **Git data** — blobs, trees, commits (the vocabulary batch path)
//! - **Pulls** — pull request creation
//! - **Users** — the authenticated identity behind a token
//!
//! ## Architecture
//!
//! This crate is the only path to the forge. It performs exactly one
//! outbound call per method and never retries: a spurious duplicate
//! branch or PR costs more than a manual retry by the user, so retry
//! policy stays with the caller.
//!
//! Expected 404s are first-class absent values (`Ok(None)` /
//! typed NotFound variants), never conflated with transport failures.

pub mod branches;
pub mod config;
pub mod contents;
pub mod error;
pub mod git;
pub mod pulls;
pub mod repos;
pub mod types;
pub mod users;

pub use config::{ConfigError, ForgeConfig};
pub use error::ForgeError;
pub use types::{PullRequest, RepoFile, RepoRef, TreeEntry};

use std::time::Duration;

/// Top-level forge client. Holds sub-clients for each endpoint family,
/// all sharing one authenticated HTTP client.
#[derive(Debug, Clone)]
pub struct ForgeClient {
    repos: repos::RepoClient,
    branches: branches::BranchClient,
    contents: contents::ContentsClient,
    git: git::GitDataClient,
    pulls: pulls::PullsClient,
    users: users::UserClient,
}

impl ForgeClient {
    /// Create a new forge client from configuration.
    pub fn new(config: ForgeConfig) -> Result<Self, ForgeError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent("credential-design-tools")
            .default_headers({
                let mut headers = reqwest::header::HeaderMap::new();
                headers.insert(
                    reqwest::header::AUTHORIZATION,
                    reqwest::header::HeaderValue::from_str(&format!("Bearer {}", config.token))
                        .map_err(|_| ForgeError::Config(ConfigError::MissingToken))?,
                );
                headers.insert(
                    reqwest::header::ACCEPT,
                    reqwest::header::HeaderValue::from_static("application/vnd.github+json"),
                );
                headers
            })
            .build()
            .map_err(|e| ForgeError::RemoteUnavailable {
                endpoint: "client_init".into(),
                source: e,
            })?;

        Ok(Self {
            repos: repos::RepoClient::new(http.clone(), config.api_url.clone()),
            branches: branches::BranchClient::new(http.clone(), config.api_url.clone()),
            contents: contents::ContentsClient::new(http.clone(), config.api_url.clone()),
            git: git::GitDataClient::new(http.clone(), config.api_url.clone()),
            pulls: pulls::PullsClient::new(http.clone(), config.api_url.clone()),
            users: users::UserClient::new(http, config.api_url),
        })
    }

    /// Access the repository metadata client.
    pub fn repos(&self) -> &repos::RepoClient {
        &self.repos
    }

    /// Access the branch reference client.
    pub fn branches(&self) -> &branches::BranchClient {
        &self.branches
    }

    /// Access the contents client.
    pub fn contents(&self) -> &contents::ContentsClient {
        &self.contents
    }

    /// Access the git data client (blobs, trees, commits).
    pub fn git(&self) -> &git::GitDataClient {
        &self.git
    }

    /// Access the pull request client.
    pub fn pulls(&self) -> &pulls::PullsClient {
        &self.pulls
    }

    /// Access the authenticated-user client.
    pub fn users(&self) -> &users::UserClient {
        &self.users
    }
}
