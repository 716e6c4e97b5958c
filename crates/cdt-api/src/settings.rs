//! File-backed JSON stores.
//!
//! The issuer settings, the catalogue snapshot, and the access log each
//! persist as one JSON document under the data directory. Writes are
//! whole-file read-modify-write with no locking: the deployment is one
//! process per instance and last-writer-wins is acceptable for these
//! stores, where every write is a full snapshot anyway.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

/// One JSON document at a fixed path.
#[derive(Debug, Clone)]
pub struct JsonFileStore<T> {
    path: PathBuf,
    _marker: std::marker::PhantomData<fn() -> T>,
}

/// Failure reading or writing a [`JsonFileStore`].
#[derive(Debug, thiserror::Error)]
pub enum FileStoreError {
    #[error("could not read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{path} holds malformed JSON: {source}")]
    Malformed {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl<T: Serialize + DeserializeOwned + Default> JsonFileStore<T> {
    /// Bind a store to `path`. Nothing is read until [`load`] runs.
    ///
    /// [`load`]: JsonFileStore::load
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _marker: std::marker::PhantomData,
        }
    }

    /// The file this store reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the document. A missing file is `Ok(None)`; a present but
    /// unreadable or malformed file is an error.
    pub fn load(&self) -> Result<Option<T>, FileStoreError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(FileStoreError::Read {
                    path: self.path.display().to_string(),
                    source: e,
                })
            }
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| FileStoreError::Malformed {
                path: self.path.display().to_string(),
                source: e,
            })
    }

    /// Read the document, falling back to `T::default()` on a missing
    /// file and on errors. Errors are logged; startup and read paths
    /// must not fail over a damaged sidecar file.
    pub fn load_or_default(&self) -> T {
        match self.load() {
            Ok(Some(value)) => value,
            Ok(None) => T::default(),
            Err(error) => {
                tracing::warn!(%error, "file store unreadable, using defaults");
                T::default()
            }
        }
    }

    /// Write the document, replacing whatever is there.
    pub fn save(&self, value: &T) -> Result<(), FileStoreError> {
        let raw = serde_json::to_string_pretty(value).map_err(|e| FileStoreError::Malformed {
            path: self.path.display().to_string(),
            source: e,
        })?;
        std::fs::write(&self.path, raw).map_err(|e| FileStoreError::Write {
            path: self.path.display().to_string(),
            source: e,
        })
    }

    /// Read, apply `f`, write back. Unlocked: concurrent writers race
    /// and the last write wins.
    pub fn modify(&self, f: impl FnOnce(&mut T)) -> Result<T, FileStoreError> {
        let mut value = self.load_or_default();
        f(&mut value);
        self.save(&value)?;
        Ok(value)
    }
}

/// Orbit issuer credentials, configured at runtime through the settings
/// endpoint rather than the environment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IssuerSettings {
    /// Base URL of the Orbit API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<Url>,
    /// Orbit API key. Stored in the settings file, never echoed back by
    /// the settings endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Orbit request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

impl IssuerSettings {
    /// Whether both the URL and the key are present.
    pub fn is_configured(&self) -> bool {
        self.api_url.is_some() && self.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }
}
