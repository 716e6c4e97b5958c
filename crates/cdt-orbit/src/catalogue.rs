//! Ledger-explorer catalogue scraper.
//!
//! The explorer publishes credential definitions as an HTML table, one
//! row per definition, with the definition id and display name in an
//! anchor and the issuer DID in a neighbouring cell. There is no JSON
//! endpoint, so the catalogue import scrapes the page with regular
//! expressions and keeps whatever parses.
//!
//! A malformed row is logged at `warn` and skipped; the page layout
//! drifts between explorer releases and one broken row must not sink an
//! entire import. The explorer is a public page, so this client carries
//! no Orbit credentials.

use std::sync::OnceLock;

use regex::Regex;
use url::Url;

use crate::error::OrbitError;
use crate::types::CatalogueEntry;

fn row_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?is)<tr[^>]*>(.*?)</tr>").expect("row regex must compile"))
}

fn definition_link_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r#"(?is)href\s*=\s*"(?P<href>[^"]*credential-definitions/(?P<id>[^"/?#]+))"[^>]*>(?P<name>.*?)</a>"#,
        )
        .expect("definition link regex must compile")
    })
}

fn cell_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?is)<td[^>]*>(.*?)</td>").expect("cell regex must compile"))
}

fn tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<[^>]*>").expect("tag regex must compile"))
}

/// Drop markup and collapse whitespace to a single-line cell text.
fn strip_tags(html: &str) -> String {
    let text = tag_re().replace_all(html, " ");
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// First 120 characters of a row, for warning context.
fn snippet(row: &str) -> String {
    row.chars().take(120).collect()
}

/// Extract credential-definition rows from a ledger-explorer page.
///
/// `page_url` resolves relative definition links to absolute URLs. Rows
/// without a definition link (headers, pagination) are ignored; rows that
/// mention a definition but fail to parse are skipped with a warning.
pub fn parse_catalogue(page_url: &Url, html: &str) -> Vec<CatalogueEntry> {
    let mut entries = Vec::new();

    for row in row_re().captures_iter(html) {
        let inner = &row[1];
        if !inner.contains("credential-definitions") {
            continue;
        }

        let Some(link) = definition_link_re().captures(inner) else {
            tracing::warn!(
                row = %snippet(inner),
                "skipping catalogue row without a parseable definition link"
            );
            continue;
        };

        let definition_id = link["id"].to_string();
        let name = strip_tags(&link["name"]);
        if name.is_empty() {
            tracing::warn!(
                definition_id = %definition_id,
                "skipping catalogue row with an empty definition name"
            );
            continue;
        }

        let explorer_url = match page_url.join(&link["href"]) {
            Ok(url) => url.to_string(),
            Err(e) => {
                tracing::warn!(
                    definition_id = %definition_id,
                    error = %e,
                    "skipping catalogue row with an unresolvable link"
                );
                continue;
            }
        };

        let cells: Vec<String> = cell_re()
            .captures_iter(inner)
            .map(|c| strip_tags(&c[1]))
            .collect();
        let issuer = cells.get(1).filter(|s| !s.is_empty()).cloned();

        entries.push(CatalogueEntry {
            definition_id,
            name,
            issuer,
            explorer_url,
        });
    }

    entries
}

/// Client that fetches explorer pages for the catalogue import.
#[derive(Debug, Clone)]
pub struct CatalogueClient {
    http: reqwest::Client,
}

impl CatalogueClient {
    pub(crate) fn new(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// Build a scraper with its own unauthenticated HTTP client.
    ///
    /// Explorer pages need no credentials, so a catalogue import can run
    /// without any Orbit API key configured.
    pub fn standalone(timeout_secs: u64) -> Result<Self, OrbitError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .user_agent("credential-design-tools")
            .build()
            .map_err(|e| OrbitError::RemoteUnavailable {
                endpoint: "client_init".into(),
                source: e,
            })?;
        Ok(Self { http })
    }

    /// Fetch `page_url` and extract its credential-definition rows.
    pub async fn scrape(&self, page_url: &Url) -> Result<Vec<CatalogueEntry>, OrbitError> {
        let endpoint = format!("GET {page_url}");

        let resp = self
            .http
            .get(page_url.clone())
            .send()
            .await
            .map_err(|e| OrbitError::RemoteUnavailable {
                endpoint: endpoint.clone(),
                source: e,
            })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(OrbitError::Api {
                endpoint,
                status,
                body,
            });
        }

        let html = resp
            .text()
            .await
            .map_err(|e| OrbitError::Deserialization {
                endpoint,
                source: e,
            })?;

        let entries = parse_catalogue(page_url, &html);
        tracing::debug!(
            page = %page_url,
            count = entries.len(),
            "scraped catalogue page"
        );
        Ok(entries)
    }
}
