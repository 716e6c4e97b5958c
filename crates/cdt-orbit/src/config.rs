//! Orbit API client configuration.
//!
//! Orbit is an external SaaS, so there is no sensible default base URL;
//! both the endpoint and the API key must be supplied explicitly or via
//! the environment.

use url::Url;

/// Configuration for connecting to the Orbit issuance API.
///
/// Custom `Debug` implementation redacts the `api_key` field to prevent
/// credential leakage in log output.
#[derive(Clone)]
pub struct OrbitConfig {
    /// Base URL of the Orbit REST API.
    pub api_url: Url,
    /// API key sent on every request.
    pub api_key: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl std::fmt::Debug for OrbitConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrbitConfig")
            .field("api_url", &self.api_url)
            .field("api_key", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl OrbitConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `ORBIT_API_URL` (required)
    /// - `ORBIT_API_KEY` (required)
    /// - `ORBIT_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw_url = std::env::var("ORBIT_API_URL").map_err(|_| ConfigError::MissingApiUrl)?;
        let api_url = Url::parse(&raw_url)
            .map_err(|e| ConfigError::InvalidUrl("ORBIT_API_URL".to_string(), e.to_string()))?;
        let api_key = std::env::var("ORBIT_API_KEY").map_err(|_| ConfigError::MissingApiKey)?;
        Ok(Self {
            api_url,
            api_key,
            timeout_secs: std::env::var("ORBIT_TIMEOUT_SECS")
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
    pub fn local_mock(port: u16, api_key: &str) -> Result<Self, ConfigError> {
        let api_url = Url::parse(&format!("http://127.0.0.1:{port}"))
            .map_err(|e| ConfigError::InvalidUrl("localhost".to_string(), e.to_string()))?;
        Ok(Self {
            api_url,
            api_key: api_key.to_string(),
            timeout_secs: 5,
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("ORBIT_API_URL environment variable is required")]
    MissingApiUrl,
    #[error("ORBIT_API_KEY environment variable is required")]
    MissingApiKey,
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_mock_builds_valid_config() {
        let cfg = OrbitConfig::local_mock(9100, "test-key").unwrap();
        assert_eq!(cfg.api_key, "test-key");
        assert_eq!(cfg.timeout_secs, 5);
        assert_eq!(cfg.api_url.as_str(), "http://127.0.0.1:9100/");
    }

    #[test]
    fn debug_redacts_api_key() {
        let cfg = OrbitConfig::local_mock(9100, "hunter2").unwrap();
        let debug = format!("{cfg:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("[REDACTED]"));
    }
}
