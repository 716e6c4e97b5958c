#![deny(missing_docs)]

//! # cdt-core — Foundational Types for Credential Design Tools
//!
//! This crate defines the types every other crate in the workspace depends
//! on. It has no internal crate dependencies — only `serde`, `serde_json`,
//! `thiserror`, and `chrono` from the external ecosystem.
//!
//! ## Design Principles
//!
//! 1. **One publish data model.** [`PublishRequest`] is the single input
//!    shape for every artifact kind; [`PublishResult`] is the single
//!    terminal output. Kind-specific behavior lives in the planner, not in
//!    parallel type families.
//!
//! 2. **Validated at construction.** A [`PublishRequest`] with zero files
//!    or a duplicated path cannot be built; callers handle a
//!    [`ValidationError`] before any remote call is made.
//!
//! 3. **The clock is a seam.** Branch names embed a millisecond timestamp,
//!    so anything that names branches takes a [`Clock`] rather than
//!    calling `Utc::now()` inline.

pub mod artifact;
pub mod clock;
pub mod error;
pub mod identity;
pub mod render;
pub mod slug;

// Re-export primary types at crate root for ergonomic imports.
pub use artifact::{
    is_repo_relative, ArtifactFile, ArtifactKind, BaseBranchResolution, ContentEncoding,
    FileWriteOutcome, PublishRequest, PublishResult,
};
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{RenderError, ValidationError};
pub use identity::StaffIdentity;
pub use render::to_pretty_json;
pub use slug::{normalize_filename, slugify};
