//! # Publish-as-Pull-Request Workflow
//!
//! Everything between "a designer hit Publish" and "a pull request is
//! open against the governance repo". The pipeline has four parts:
//!
//! 1. [`resolve::resolve_base_branch`] pins the branch and head commit
//!    the publish targets, honoring a per-request override.
//! 2. [`plan`] derives repository paths from the folder conventions,
//!    renders payloads to JSON text, and checks which paths already
//!    exist so updates carry a compare-and-swap SHA.
//! 3. [`orchestrator`] drives the branch → write → pull-request state
//!    machine, with a single absorbing failure state and no retries.
//! 4. [`batch`] is the vocabulary variant that lands N files as one
//!    commit through the git-data endpoints.
//!
//! All remote access goes through the [`RemoteRepository`] trait, so
//! the whole workflow can be exercised against a scripted in-memory
//! remote. [`ForgeRemote`] is the production implementation, binding a
//! [`cdt_forge::ForgeClient`] to one repository.

pub mod batch;
pub mod error;
pub mod orchestrator;
pub mod plan;
pub mod remote;
pub mod resolve;
pub mod templates;

#[cfg(test)]
mod fake_remote;

pub use batch::run_vocab_batch;
pub use error::{PlanError, PublishError};
pub use orchestrator::{
    run_publish, HookError, PublishHook, PublishJob, PublishOptions, PublishPhase, PublishState,
};
pub use plan::{
    check_existing, draft, ArtifactPayload, DraftPlan, NamedDocument, PlacementPlan, VocabItem,
};
pub use remote::{ForgeRemote, RemoteRepository};
pub use resolve::resolve_base_branch;
