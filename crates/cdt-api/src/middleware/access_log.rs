//! # Access Log Recorder
//!
//! Records one summary line per request into a bounded in-memory ring,
//! mirrored to a JSON file so the log survives restarts. The recorder
//! sits outside the auth layer and attributes requests through the
//! [`AuthenticatedLogin`] extension that auth stamps on the response;
//! requests that never authenticate are logged without a login.
//!
//! Every append rewrites the snapshot file. That is a whole-file write
//! per request, which is fine at staff-tool traffic and keeps the file
//! format identical to the other JSON stores.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::AuthenticatedLogin;
use crate::settings::JsonFileStore;
use crate::state::AppState;

/// One recorded request.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AccessLogEntry {
    pub timestamp: DateTime<Utc>,
    pub method: String,
    pub path: String,
    pub status: u16,
    pub latency_ms: u64,
    /// Login of the session, when the request authenticated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,
}

/// Bounded request log with a file-backed snapshot.
#[derive(Debug, Clone)]
pub struct AccessLog {
    entries: Arc<RwLock<VecDeque<AccessLogEntry>>>,
    capacity: usize,
    file: JsonFileStore<Vec<AccessLogEntry>>,
}

impl AccessLog {
    /// Open the log at `path`, reloading whatever snapshot is there.
    /// Keeps at most `capacity` entries; older ones fall off the front.
    pub fn load(path: PathBuf, capacity: usize) -> Self {
        let file: JsonFileStore<Vec<AccessLogEntry>> = JsonFileStore::new(path);
        let mut entries: VecDeque<AccessLogEntry> = file.load_or_default().into();
        while entries.len() > capacity {
            entries.pop_front();
        }
        Self {
            entries: Arc::new(RwLock::new(entries)),
            capacity,
            file,
        }
    }

    /// Append an entry, evicting the oldest past capacity, and rewrite
    /// the snapshot file. The file write is best-effort.
    pub fn record(&self, entry: AccessLogEntry) {
        let snapshot: Vec<AccessLogEntry> = {
            let mut entries = self.entries.write();
            entries.push_back(entry);
            while entries.len() > self.capacity {
                entries.pop_front();
            }
            entries.iter().cloned().collect()
        };
        if let Err(error) = self.file.save(&snapshot) {
            tracing::warn!(%error, "could not persist access log snapshot");
        }
    }

    /// The most recent entries, newest first, at most `limit`.
    pub fn recent(&self, limit: usize) -> Vec<AccessLogEntry> {
        self.entries.read().iter().rev().take(limit).cloned().collect()
    }

    /// Number of entries currently held.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether the log is empty.
    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Middleware that appends one entry per completed request.
pub async fn access_log_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;

    state.access_log.record(AccessLogEntry {
        timestamp: Utc::now(),
        method,
        path,
        status: response.status().as_u16(),
        latency_ms: started.elapsed().as_millis() as u64,
        login: response.extensions().get::<AuthenticatedLogin>().map(|l| l.0.clone()),
    });

    response
}
