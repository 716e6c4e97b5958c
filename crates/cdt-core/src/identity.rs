//! # Staff Identity
//!
//! The identity provider hands each session an authenticated staff profile.
//! The publish workflow consumes it only as an attribution handle; the
//! service layer also shows name and avatar in the UI payloads.

use serde::{Deserialize, Serialize};

/// An authenticated staff member, as supplied by the identity provider.
///
/// Field names match the provider's wire form (`/user`), so this type
/// deserializes directly from its response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffIdentity {
    /// Provider-assigned numeric account id.
    pub id: i64,
    /// Login handle, used as the PR attribution (`@login`).
    pub login: String,
    /// Display name, if the profile carries one.
    #[serde(default)]
    pub name: Option<String>,
    /// Public email, if the profile exposes one.
    #[serde(default)]
    pub email: Option<String>,
    /// Avatar image URL.
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl StaffIdentity {
    /// The handle attributed in commit messages and PR bodies.
    pub fn author_handle(&self) -> &str {
        &self.login
    }
}
