//! Forge API client configuration.
//!
//! Configures the forge base URL and bearer credential. The default points
//! at the public GitHub REST endpoint; override via environment variables
//! or explicit construction for enterprise installs and testing.

use url::Url;

/// Configuration for connecting to the forge REST API.
///
/// Custom `Debug` implementation redacts the `token` field to prevent
/// credential leakage in log output.
#[derive(Clone)]
pub struct ForgeConfig {
    /// Base URL of the forge REST API.
    /// Default: <https://api.github.com>
    pub api_url: Url,
    /// Bearer token for API authentication.
    pub token: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl std::fmt::Debug for ForgeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ForgeConfig")
            .field("api_url", &self.api_url)
            .field("token", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl ForgeConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `FORGE_API_URL` (default: `https://api.github.com`)
    /// - `FORGE_TOKEN` (required)
    /// - `FORGE_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        let token = std::env::var("FORGE_TOKEN").map_err(|_| ConfigError::MissingToken)?;
        Self::with_token(token)
    }

    /// Build a configuration from an explicit bearer token, reading the
    /// base URL and timeout from the environment. Used by the service
    /// layer, where each session carries its own forge credential.
    pub fn with_token(token: impl Into<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            api_url: env_url("FORGE_API_URL", "https://api.github.com")?,
            token: token.into(),
            timeout_secs: std::env::var("FORGE_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
        })
    }

    /// Create a configuration pointing at a local mock server (for
    /// testing).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if the localhost URL cannot be
    /// parsed (should not occur for valid port numbers, but avoids
    /// `expect()`).
    pub fn local_mock(port: u16, token: &str) -> Result<Self, ConfigError> {
        let api_url = Url::parse(&format!("http://127.0.0.1:{port}"))
            .map_err(|e| ConfigError::InvalidUrl("localhost".to_string(), e.to_string()))?;
        Ok(Self {
            api_url,
            token: token.to_string(),
            timeout_secs: 5,
        })
    }
}

fn env_url(var: &str, default: &str) -> Result<Url, ConfigError> {
    let raw = std::env::var(var).unwrap_or_else(|_| default.to_string());
    Url::parse(&raw).map_err(|e| ConfigError::InvalidUrl(var.to_string(), e.to_string()))
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("FORGE_TOKEN environment variable is required")]
    MissingToken,
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    #[error("invalid repository reference {0:?}: expected owner/name")]
    InvalidRepo(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_mock_builds_valid_config() {
        let cfg = ForgeConfig::local_mock(9000, "test-token").unwrap();
        assert_eq!(cfg.token, "test-token");
        assert_eq!(cfg.timeout_secs, 5);
        assert_eq!(cfg.api_url.as_str(), "http://127.0.0.1:9000/");
    }

    #[test]
    fn debug_redacts_token() {
        let cfg = ForgeConfig::local_mock(9000, "hunter2").unwrap();
        let debug = format!("{cfg:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn env_url_uses_default_when_var_absent() {
        let url = env_url("NONEXISTENT_VAR_67890", "https://api.github.com").unwrap();
        assert_eq!(url.as_str(), "https://api.github.com/");
    }

    #[test]
    fn env_url_rejects_invalid_url() {
        std::env::set_var("TEST_BAD_URL_FC", "not a url");
        let result = env_url("TEST_BAD_URL_FC", "https://api.github.com");
        std::env::remove_var("TEST_BAD_URL_FC");
        assert!(result.is_err());
    }
}
