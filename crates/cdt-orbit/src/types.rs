//! Wire types for the Orbit issuance API and the catalogue scraper.
//!
//! Orbit is a third-party API we do not control: response fields are
//! optional where the live service has been seen to omit them, and the
//! offer state tolerates values this client does not know about.

use serde::{Deserialize, Serialize};

/// A credential definition registered with the issuer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialDefinition {
    /// Ledger identifier of the definition.
    pub id: String,
    /// Human-readable credential name.
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
    /// Identifier of the schema the definition was built from.
    #[serde(default)]
    pub schema_id: Option<String>,
}

/// Request body for `POST /credential-offers`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOfferRequest {
    /// Definition to issue against.
    pub credential_definition_id: String,
    /// Claim name to value map placed into the issued credential.
    pub claims: serde_json::Map<String, serde_json::Value>,
}

/// A credential offer, as created or polled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialOffer {
    /// Offer identifier, used for status polling.
    pub id: String,
    /// Deep link the holder's wallet opens to claim the credential.
    /// Rendered as a QR code by the UI.
    #[serde(default)]
    pub offer_url: Option<String>,
    /// Lifecycle state of the offer.
    pub state: OfferState,
}

/// Lifecycle state of a credential offer.
///
/// `Unknown` absorbs states added by the service after this client was
/// written; callers treat it as "still in progress".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OfferState {
    /// Created, not yet claimed by a wallet.
    Pending,
    /// A wallet accepted the offer and the credential was issued.
    Claimed,
    /// The offer lapsed before being claimed.
    Expired,
    /// Any state this client does not model.
    #[serde(other)]
    Unknown,
}

impl OfferState {
    /// Whether polling can stop: the offer will not change state again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Claimed | Self::Expired)
    }
}

/// One credential-definition row scraped from a ledger-explorer page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogueEntry {
    /// Ledger identifier extracted from the row's definition link.
    pub definition_id: String,
    /// Display name from the link text.
    pub name: String,
    /// Issuer DID from the row, when the page carries one.
    #[serde(default)]
    pub issuer: Option<String>,
    /// Absolute URL of the definition's explorer page.
    pub explorer_url: String,
}
