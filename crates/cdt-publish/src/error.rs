//! Failure taxonomy for the publish workflow.
//!
//! Each step of the workflow has its own variant so callers can report
//! which stage failed without parsing message text. The underlying
//! remote-client error is always preserved as the source.

use cdt_core::ValidationError;
use cdt_forge::ForgeError;

/// Errors raised while assembling a placement plan, before any branch
/// or file is created on the remote.
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    /// The artifact name produced an empty slug, so no filename can be
    /// derived from it.
    #[error("artifact name {name:?} produces an empty slug")]
    UnusableName {
        /// The name as supplied by the caller.
        name: String,
    },

    /// A vocabulary batch was submitted with no items.
    #[error("vocabulary batch contains no items")]
    EmptyBatch,

    /// A derived or explicit filename escaped the artifact folder.
    /// Rejected before any remote call is made.
    #[error("planned path {path} is not repository-relative")]
    UnsafePath {
        /// The offending path.
        path: String,
    },

    /// The existence check for a planned path failed for a reason other
    /// than the file being absent.
    #[error("existence check for {path} failed")]
    ExistenceCheck {
        /// Repository-relative path that was being checked.
        path: String,
        /// The remote-client failure.
        #[source]
        source: ForgeError,
    },

    /// The artifact payload could not be rendered to JSON text.
    #[error(transparent)]
    Render(#[from] cdt_core::RenderError),
}

/// Errors raised by the publish orchestrator.
///
/// The workflow stops at the first failure; a variant here names the
/// step that was in progress when it happened. Base-branch resolution
/// failures are always fatal, never silently defaulted.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    /// Neither the override nor the repository default produced a base
    /// branch with a resolvable head commit.
    #[error("base branch could not be resolved")]
    BaseBranchUnresolvable {
        /// The remote-client failure.
        #[source]
        source: ForgeError,
    },

    /// Creating the working branch failed. A name collision surfaces
    /// here as [`ForgeError::BranchAlreadyExists`].
    #[error("failed to create branch {branch}")]
    BranchCreateFailed {
        /// The branch name the orchestrator attempted to create.
        branch: String,
        /// The remote-client failure.
        #[source]
        source: ForgeError,
    },

    /// Writing one of the planned files failed. Files already written
    /// before this one remain on the working branch.
    #[error("failed to write {path}")]
    FileWriteFailed {
        /// Repository-relative path of the file that failed.
        path: String,
        /// The remote-client failure. A compare-and-swap mismatch
        /// surfaces here as [`ForgeError::Conflict`].
        #[source]
        source: ForgeError,
    },

    /// One of the commit-building steps of a vocabulary batch failed
    /// (blob, tree, or commit creation, or reading the base commit).
    #[error("failed to build batch commit")]
    CommitBuildFailed {
        /// The remote-client failure.
        #[source]
        source: ForgeError,
    },

    /// Opening the pull request failed. The branch and its files remain
    /// on the remote for manual recovery.
    #[error("failed to open pull request")]
    PullRequestCreateFailed {
        /// The remote-client failure.
        #[source]
        source: ForgeError,
    },

    /// The placement plan could not be assembled.
    #[error(transparent)]
    Plan(#[from] PlanError),

    /// The assembled publish request failed structural validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl PublishError {
    /// Name of the workflow step this error belongs to, for logs and
    /// API error bodies.
    pub fn step(&self) -> &'static str {
        match self {
            PublishError::BaseBranchUnresolvable { .. } => "resolve-base",
            PublishError::BranchCreateFailed { .. } => "create-branch",
            PublishError::FileWriteFailed { .. } => "write-files",
            PublishError::CommitBuildFailed { .. } => "build-commit",
            PublishError::PullRequestCreateFailed { .. } => "create-pull-request",
            PublishError::Plan(_) => "plan",
            PublishError::Validation(_) => "validate",
        }
    }
}
