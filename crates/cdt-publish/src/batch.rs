//! Single-commit publishing for vocabulary batches.
//!
//! A batch of N vocabulary types lands as exactly one commit built
//! through the low-level git-data endpoints, instead of N per-file
//! commits through the contents endpoint:
//!
//! ```text
//! resolve base ─▶ read base tree ─▶ N blobs ─▶ tree ─▶ commit
//!                                                        │
//!                 PR ◀─ branch (created at the commit) ◀─┘
//! ```
//!
//! Unlike the per-file flow, the working branch is created only after
//! the commit exists, pointing directly at it. A failure while the
//! commit is being built therefore leaves no branch behind at all.

use cdt_core::{ArtifactFile, Clock, PublishRequest, PublishResult};
use cdt_forge::TreeEntry;
use tracing::{debug, info};

use crate::error::PublishError;
use crate::orchestrator::PublishJob;
use crate::remote::RemoteRepository;
use crate::resolve::resolve_base_branch;
use crate::templates;

/// Publish a drafted vocabulary batch as one commit and one PR.
///
/// Blobs are created in the draft's order, which is the caller's
/// submission order. No existence checks are made: batch items are new
/// vocabulary types, and the tree write replaces any colliding path
/// wholesale.
pub async fn run_vocab_batch(
    remote: &dyn RemoteRepository,
    clock: &dyn Clock,
    job: PublishJob,
) -> Result<PublishResult, PublishError> {
    let PublishJob { draft, author_handle, options } = job;

    let names: Vec<String> = draft.files.iter().map(|f| f.name.clone()).collect();
    let paths: Vec<String> = draft.files.iter().map(|f| f.path.clone()).collect();
    let default_message = templates::batch_commit_message(&names);
    let commit_message = options.commit_message.unwrap_or_else(|| default_message.clone());
    let pr_title = options.pr_title.unwrap_or_else(|| default_message.clone());
    let pr_body = options
        .pr_body
        .unwrap_or_else(|| templates::pr_body(&paths, false, &author_handle));

    let files: Vec<ArtifactFile> = draft
        .files
        .iter()
        .map(|file| ArtifactFile::utf8(file.path.clone(), file.content.clone()))
        .collect();
    let request = PublishRequest::new(
        draft.kind,
        files,
        commit_message,
        pr_title,
        pr_body,
        author_handle,
    )?;

    let base = resolve_base_branch(remote, options.base_branch_override.as_deref()).await?;

    let base_tree = remote
        .commit_tree_sha(&base.head_commit_sha)
        .await
        .map_err(|source| PublishError::CommitBuildFailed { source })?;

    let mut entries = Vec::with_capacity(request.files.len());
    for file in &request.files {
        let blob_sha = remote
            .create_blob(&file.content)
            .await
            .map_err(|source| PublishError::CommitBuildFailed { source })?;
        entries.push(TreeEntry::blob(file.path.clone(), blob_sha));
    }

    let tree_sha = remote
        .create_tree(&base_tree, entries)
        .await
        .map_err(|source| PublishError::CommitBuildFailed { source })?;
    let commit_sha = remote
        .create_commit(
            &request.commit_message,
            &tree_sha,
            vec![base.head_commit_sha.clone()],
        )
        .await
        .map_err(|source| PublishError::CommitBuildFailed { source })?;
    debug!(commit = %commit_sha, files = request.files.len(), "batch commit built");

    // The branch comes into existence already pointing at the finished
    // commit. Nothing is ever force-pushed to it.
    let branch_name = format!(
        "{}/add-{}-{}",
        draft.kind.branch_prefix(),
        draft.slug,
        clock.unix_millis()
    );
    remote
        .create_branch(&branch_name, &commit_sha)
        .await
        .map_err(|source| PublishError::BranchCreateFailed {
            branch: branch_name.clone(),
            source,
        })?;

    let pr = remote
        .create_pull_request(
            &request.pr_title,
            &request.pr_body,
            &branch_name,
            &base.branch_name,
        )
        .await
        .map_err(|source| PublishError::PullRequestCreateFailed { source })?;

    info!(pr = pr.number, branch = %branch_name, types = names.len(), "vocabulary batch published");
    Ok(PublishResult {
        pr_number: pr.number,
        pr_url: pr.html_url,
        pr_title: pr.title,
        branch_name,
        file_paths: request.file_paths(),
    })
}
