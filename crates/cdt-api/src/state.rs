//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor.
//!
//! ## Architecture
//!
//! AppState holds only design-tool-owned concerns:
//! - **Sessions** — opaque tokens bound to a forge identity
//! - **Proof templates** — the one artifact kind authored inside the
//!   tool rather than pasted in, so it gets CRUD and persistence
//! - **Catalogue** — definitions imported from the ledger explorer
//! - **Issuer offers** — test offers created through Orbit
//! - **Access log** — bounded ring of request summaries
//!
//! The governance repository's content is NOT stored here. Artifacts
//! live in the repo and are accessed through `cdt-forge`; credential
//! offers live in Orbit and are accessed through `cdt-orbit`. Every
//! forge call uses the credential of the session that asked for it.

use std::collections::HashMap;
use std::hash::Hash;
use std::path::PathBuf;
use std::sync::Arc;

use cdt_artifacts::ClaimRequirement;
use cdt_forge::{ForgeClient, ForgeConfig, RepoRef};
use cdt_orbit::{CatalogueClient, OfferState, OrbitClient, OrbitConfig};
use cdt_publish::ForgeRemote;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use url::Url;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::SessionStore;
use crate::error::AppError;
use crate::middleware::access_log::AccessLog;
use crate::settings::{IssuerSettings, JsonFileStore};

// -- Generic In-Memory Store --------------------------------------------------

/// Thread-safe, cloneable in-memory key-value store.
///
/// Generic over the key because the stores here disagree on identity:
/// proof templates use a server-assigned `Uuid`, catalogue entries and
/// offers use the remote system's own string id. All operations are
/// synchronous (the RwLock is `parking_lot`, not `tokio::sync`) because
/// the lock is never held across `.await` points.
#[derive(Debug)]
pub struct Store<K, T>
where
    K: Eq + Hash + Clone + Send + Sync,
    T: Clone + Send + Sync,
{
    data: Arc<RwLock<HashMap<K, T>>>,
}

impl<K, T> Clone for Store<K, T>
where
    K: Eq + Hash + Clone + Send + Sync,
    T: Clone + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
        }
    }
}

impl<K, T> Store<K, T>
where
    K: Eq + Hash + Clone + Send + Sync,
    T: Clone + Send + Sync,
{
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Insert a record, returning the previous value if the key existed.
    pub fn insert(&self, key: K, value: T) -> Option<T> {
        self.data.write().insert(key, value)
    }

    /// Retrieve a record by key.
    pub fn get(&self, key: &K) -> Option<T> {
        self.data.read().get(key).cloned()
    }

    /// List all records.
    pub fn list(&self) -> Vec<T> {
        self.data.read().values().cloned().collect()
    }

    /// Update a record in place. Returns the updated record, or `None`
    /// if not found.
    pub fn update(&self, key: &K, f: impl FnOnce(&mut T)) -> Option<T> {
        let mut guard = self.data.write();
        if let Some(entry) = guard.get_mut(key) {
            f(entry);
            Some(entry.clone())
        } else {
            None
        }
    }

    /// Remove a record by key.
    pub fn remove(&self, key: &K) -> Option<T> {
        self.data.write().remove(key)
    }

    /// Check if a record exists.
    #[allow(dead_code)]
    pub fn contains(&self, key: &K) -> bool {
        self.data.read().contains_key(key)
    }

    /// Return the number of records.
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// Whether the store is empty.
    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K, T> Default for Store<K, T>
where
    K: Eq + Hash + Clone + Send + Sync,
    T: Clone + Send + Sync,
{
    fn default() -> Self {
        Self::new()
    }
}

// -- Record Types -------------------------------------------------------------

/// A proof template as stored by the API layer.
///
/// Templates are the only artifact authored inside the tool rather than
/// submitted as finished JSON, so they live here with ownership and
/// publication bookkeeping. The publishable document is derived on
/// demand via [`cdt_artifacts::ProofTemplate`].
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProofTemplateRecord {
    pub id: Uuid,
    /// Login of the author. Non-owners get 404, not 403, so template
    /// names do not leak across users.
    pub owner_login: String,
    pub name: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The credential type (VCT) the proof draws from.
    pub credential_type: String,
    /// Claims the verifier asks to be disclosed.
    #[schema(value_type = Vec<Object>)]
    pub requested_claims: Vec<ClaimRequirement>,
    /// Set by the publish hook once the pull request exists.
    pub published: bool,
    /// Where the template will resolve once the PR merges.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vdr_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A credential definition imported from the ledger explorer.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CatalogueRecord {
    /// Ledger definition id, e.g. `GHJ123:3:CL:99:home`.
    pub definition_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
    /// Explorer page the entry links to.
    pub explorer_url: String,
    /// Login that ran the import which first saw this entry.
    pub imported_by: String,
    pub imported_at: DateTime<Utc>,
}

/// A test credential offer created through Orbit.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IssuerOfferRecord {
    /// Orbit's offer id; Orbit owns the offer lifecycle.
    pub offer_id: String,
    pub credential_definition_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offer_url: Option<String>,
    /// Last state seen from Orbit. Refreshed on every poll.
    #[schema(value_type = String)]
    pub state: OfferState,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

// -- Application State --------------------------------------------------------

/// Application configuration.
///
/// Carries no credentials: the forge token arrives with each session and
/// the Orbit key lives in the issuer settings file.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// Base URL of the forge REST API.
    pub forge_api_url: Url,
    /// Forge request timeout in seconds.
    pub forge_timeout_secs: u64,
    /// The governance repository publishes target.
    pub repo: RepoRef,
    /// Base URL published artifacts resolve under once merged.
    pub vdr_base_url: Url,
    /// Default ledger-explorer page for catalogue imports.
    pub explorer_url: Option<Url>,
    /// Logins allowed to read the access log.
    pub admin_logins: Vec<String>,
    /// Directory for the file-backed stores (settings, catalogue, log).
    pub data_dir: PathBuf,
    /// Entries kept in the in-memory access-log ring.
    pub access_log_capacity: usize,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables and defaults:
    /// - `PORT` (8080)
    /// - `FORGE_API_URL` (`https://api.github.com`)
    /// - `FORGE_TIMEOUT_SECS` (30)
    /// - `GOVERNANCE_REPO` (`openwallet-labs/credential-governance`)
    /// - `VDR_BASE_URL` (`https://<owner>.github.io/<repo>`)
    /// - `CATALOGUE_EXPLORER_URL` (unset: imports must name a page)
    /// - `ADMIN_LOGINS` (comma-separated, empty)
    /// - `DATA_DIR` (`./data`)
    /// - `ACCESS_LOG_CAPACITY` (500)
    pub fn from_env() -> Result<Self, String> {
        let repo: RepoRef = std::env::var("GOVERNANCE_REPO")
            .unwrap_or_else(|_| "openwallet-labs/credential-governance".to_string())
            .parse()
            .map_err(|e| format!("GOVERNANCE_REPO: {e}"))?;
        let vdr_default = format!("https://{}.github.io/{}", repo.owner, repo.name);

        Ok(Self {
            port: env_parse("PORT", 8080),
            forge_api_url: env_url("FORGE_API_URL", "https://api.github.com")?,
            forge_timeout_secs: env_parse("FORGE_TIMEOUT_SECS", 30),
            vdr_base_url: env_url("VDR_BASE_URL", &vdr_default)?,
            explorer_url: match std::env::var("CATALOGUE_EXPLORER_URL") {
                Ok(raw) => Some(
                    Url::parse(&raw).map_err(|e| format!("CATALOGUE_EXPLORER_URL: {e}"))?,
                ),
                Err(_) => None,
            },
            admin_logins: std::env::var("ADMIN_LOGINS")
                .unwrap_or_default()
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            data_dir: PathBuf::from(
                std::env::var("DATA_DIR").unwrap_or_else(|_| "./data".to_string()),
            ),
            access_log_capacity: env_parse("ACCESS_LOG_CAPACITY", 500),
            repo,
        })
    }
}

fn env_parse<T: std::str::FromStr>(var: &str, default: T) -> T {
    std::env::var(var).ok().and_then(|s| s.parse().ok()).unwrap_or(default)
}

fn env_url(var: &str, default: &str) -> Result<Url, String> {
    let raw = std::env::var(var).unwrap_or_else(|_| default.to_string());
    Url::parse(&raw).map_err(|e| format!("{var}: {e}"))
}

/// Shared application state accessible to all route handlers.
///
/// Clone-friendly via `Arc` internals in each store.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Active sessions, keyed by token digest.
    pub sessions: SessionStore,
    pub proof_templates: Store<Uuid, ProofTemplateRecord>,
    pub catalogue: Store<String, CatalogueRecord>,
    pub offers: Store<String, IssuerOfferRecord>,

    /// File-backed snapshot of the catalogue store.
    pub catalogue_file: JsonFileStore<Vec<CatalogueRecord>>,
    /// File-backed issuer settings (Orbit URL and key).
    pub settings: JsonFileStore<IssuerSettings>,
    /// Request summaries, ring-buffered and mirrored to a file.
    pub access_log: AccessLog,

    /// PostgreSQL connection pool for durable proof-template storage.
    /// When `None`, the API operates in in-memory-only mode.
    pub db_pool: Option<PgPool>,

    pub config: AppConfig,
}

impl AppState {
    /// Create application state, loading the file-backed stores from
    /// `config.data_dir`.
    ///
    /// File loads are tolerant: a missing or unreadable file starts the
    /// store empty with a warning, it never stops the server.
    pub fn with_config(config: AppConfig, db_pool: Option<PgPool>) -> Self {
        if let Err(error) = std::fs::create_dir_all(&config.data_dir) {
            tracing::warn!(dir = %config.data_dir.display(), %error, "could not create data dir");
        }

        let catalogue_file: JsonFileStore<Vec<CatalogueRecord>> =
            JsonFileStore::new(config.data_dir.join("catalogue.json"));
        let catalogue = Store::new();
        for record in catalogue_file.load_or_default() {
            catalogue.insert(record.definition_id.clone(), record);
        }

        let access_log = AccessLog::load(
            config.data_dir.join("access-log.json"),
            config.access_log_capacity,
        );

        Self {
            sessions: SessionStore::new(),
            proof_templates: Store::new(),
            catalogue,
            offers: Store::new(),
            catalogue_file,
            settings: JsonFileStore::new(config.data_dir.join("issuer-settings.json")),
            access_log,
            db_pool,
            config,
        }
    }

    /// Build a forge client for one session's credential.
    pub fn forge(&self, token: &str) -> Result<ForgeClient, AppError> {
        let config = ForgeConfig {
            api_url: self.config.forge_api_url.clone(),
            token: token.to_string(),
            timeout_secs: self.config.forge_timeout_secs,
        };
        ForgeClient::new(config).map_err(AppError::from)
    }

    /// Build the publish remote for one session's credential, bound to
    /// the governance repository.
    pub fn remote(&self, token: &str) -> Result<ForgeRemote, AppError> {
        Ok(ForgeRemote::new(self.forge(token)?, self.config.repo.clone()))
    }

    /// Build an Orbit client from the issuer settings file.
    ///
    /// Returns 503 while the issuer is unconfigured; the settings
    /// endpoint is how it becomes configured.
    pub fn orbit(&self) -> Result<OrbitClient, AppError> {
        let settings = self.settings.load_or_default();
        let (api_url, api_key) = match (settings.api_url, settings.api_key) {
            (Some(url), Some(key)) if !key.is_empty() => (url, key),
            _ => {
                return Err(AppError::ServiceUnavailable(
                    "issuer not configured: set the Orbit URL and API key first".to_string(),
                ))
            }
        };
        let client = OrbitClient::new(OrbitConfig {
            api_url,
            api_key,
            timeout_secs: settings.timeout_secs,
        })?;
        Ok(client)
    }

    /// Build the unauthenticated explorer scraper. Works with or
    /// without issuer credentials.
    pub fn scraper(&self) -> Result<CatalogueClient, AppError> {
        CatalogueClient::standalone(self.config.forge_timeout_secs).map_err(AppError::from)
    }

    /// Snapshot the catalogue store to its file. Best-effort: a write
    /// failure is logged and the in-memory store stays authoritative.
    pub fn persist_catalogue(&self) {
        let mut records = self.catalogue.list();
        records.sort_by(|a, b| a.definition_id.cmp(&b.definition_id));
        if let Err(error) = self.catalogue_file.save(&records) {
            tracing::warn!(%error, "could not persist catalogue snapshot");
        }
    }

    /// Hydrate the proof-template store from the database.
    ///
    /// Called once on startup when a database pool is available, so
    /// read operations stay fast and synchronous.
    pub async fn hydrate_from_db(&self) -> Result<(), String> {
        let pool = match &self.db_pool {
            Some(pool) => pool,
            None => return Ok(()),
        };

        let templates = crate::db::proof_templates::load_all(pool)
            .await
            .map_err(|e| format!("failed to load proof templates: {e}"))?;
        let template_count = templates.len();
        for record in templates {
            self.proof_templates.insert(record.id, record);
        }

        tracing::info!(proof_templates = template_count, "hydrated in-memory stores from database");
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    fn sample_template(id: Uuid, owner: &str) -> ProofTemplateRecord {
        let now = Utc::now();
        ProofTemplateRecord {
            id,
            owner_login: owner.to_string(),
            name: "Age Proof".to_string(),
            category: "identity".to_string(),
            description: None,
            credential_type: "https://vdr.example/vct/person.json".to_string(),
            requested_claims: vec![ClaimRequirement {
                claim: "birthdate".to_string(),
                purpose: None,
                optional: false,
            }],
            published: false,
            vdr_uri: None,
            published_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn store_insert_get_and_list() {
        let store: Store<Uuid, ProofTemplateRecord> = Store::new();
        assert!(store.is_empty());

        let id = Uuid::new_v4();
        assert!(store.insert(id, sample_template(id, "octocat")).is_none());
        assert_eq!(store.get(&id).unwrap().name, "Age Proof");
        assert_eq!(store.list().len(), 1);
        assert!(store.contains(&id));
    }

    #[test]
    fn store_insert_returns_previous_value() {
        let store = Store::new();
        let id = Uuid::new_v4();
        store.insert(id, sample_template(id, "octocat"));
        let prev = store.insert(id, sample_template(id, "hubot"));
        assert_eq!(prev.unwrap().owner_login, "octocat");
    }

    #[test]
    fn store_update_modifies_in_place() {
        let store = Store::new();
        let id = Uuid::new_v4();
        store.insert(id, sample_template(id, "octocat"));

        let updated = store.update(&id, |t| t.published = true).unwrap();
        assert!(updated.published);
        assert!(store.get(&id).unwrap().published);
    }

    #[test]
    fn store_update_missing_returns_none() {
        let store: Store<Uuid, ProofTemplateRecord> = Store::new();
        assert!(store.update(&Uuid::new_v4(), |t| t.published = true).is_none());
    }

    #[test]
    fn store_remove_takes_the_record() {
        let store = Store::new();
        let id = Uuid::new_v4();
        store.insert(id, sample_template(id, "octocat"));
        assert!(store.remove(&id).is_some());
        assert!(store.get(&id).is_none());
    }

    #[test]
    fn store_allows_string_keys() {
        let store: Store<String, CatalogueRecord> = Store::new();
        let record = CatalogueRecord {
            definition_id: "GHJ123:3:CL:99:home".to_string(),
            name: "Home Credential".to_string(),
            issuer: None,
            explorer_url: "https://explorer.example/def/GHJ123".to_string(),
            imported_by: "octocat".to_string(),
            imported_at: Utc::now(),
        };
        store.insert(record.definition_id.clone(), record);
        assert!(store.get(&"GHJ123:3:CL:99:home".to_string()).is_some());
    }

    #[test]
    fn config_env_parse_falls_back_on_garbage() {
        std::env::set_var("TEST_CDT_PORT_GARBAGE", "not-a-number");
        let parsed: u16 = env_parse("TEST_CDT_PORT_GARBAGE", 8080);
        std::env::remove_var("TEST_CDT_PORT_GARBAGE");
        assert_eq!(parsed, 8080);
    }

    #[test]
    fn state_with_config_starts_empty_without_files() {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::with_config(test_config(dir.path().into()), None);
        assert!(state.proof_templates.is_empty());
        assert!(state.catalogue.is_empty());
        assert!(state.offers.is_empty());
        assert!(state.db_pool.is_none());
    }

    #[test]
    fn catalogue_snapshot_round_trips_through_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path().into());
        let state = AppState::with_config(config.clone(), None);

        let record = CatalogueRecord {
            definition_id: "DEF:1".to_string(),
            name: "Proof of Address".to_string(),
            issuer: Some("did:example:gov".to_string()),
            explorer_url: "https://explorer.example/def/1".to_string(),
            imported_by: "octocat".to_string(),
            imported_at: Utc::now(),
        };
        state.catalogue.insert(record.definition_id.clone(), record);
        state.persist_catalogue();

        let reloaded = AppState::with_config(config, None);
        assert_eq!(reloaded.catalogue.len(), 1);
        assert_eq!(reloaded.catalogue.get(&"DEF:1".to_string()).unwrap().name, "Proof of Address");
    }

    pub(crate) fn test_config(data_dir: PathBuf) -> AppConfig {
        AppConfig {
            port: 0,
            forge_api_url: Url::parse("http://127.0.0.1:1").unwrap(),
            forge_timeout_secs: 5,
            repo: RepoRef::new("openwallet-labs", "credential-governance"),
            vdr_base_url: Url::parse("https://vdr.example").unwrap(),
            explorer_url: None,
            admin_logins: vec!["admin-user".to_string()],
            data_dir,
            access_log_capacity: 10,
        }
    }
}
