//! Base-branch resolution.

use cdt_core::BaseBranchResolution;
use tracing::debug;

use crate::error::PublishError;
use crate::remote::RemoteRepository;

/// Resolve the branch a publish will target.
///
/// With an override the default-branch lookup is skipped entirely and
/// the override name is used as-is. Without one the repository's
/// default branch is looked up first. Either way the branch's head
/// commit SHA is then fetched, so a misspelt override or an unborn
/// default branch fails here rather than at branch-creation time.
///
/// Any failure is [`PublishError::BaseBranchUnresolvable`]. There is no
/// fallback to a guessed branch name.
pub async fn resolve_base_branch(
    remote: &dyn RemoteRepository,
    override_branch: Option<&str>,
) -> Result<BaseBranchResolution, PublishError> {
    let branch_name = match override_branch.map(str::trim).filter(|name| !name.is_empty()) {
        Some(name) => name.to_owned(),
        None => remote
            .default_branch()
            .await
            .map_err(|source| PublishError::BaseBranchUnresolvable { source })?,
    };

    let head_commit_sha = remote
        .branch_head_sha(&branch_name)
        .await
        .map_err(|source| PublishError::BaseBranchUnresolvable { source })?;

    debug!(branch = %branch_name, head = %head_commit_sha, "resolved base branch");
    Ok(BaseBranchResolution { branch_name, head_commit_sha })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake_remote::FakeRemote;

    #[tokio::test]
    async fn resolves_default_branch_when_no_override() {
        let remote = FakeRemote::new();

        let base = resolve_base_branch(&remote, None).await.unwrap();

        assert_eq!(base.branch_name, "main");
        assert_eq!(base.head_commit_sha, FakeRemote::HEAD_SHA);
        assert_eq!(remote.calls(), vec!["default_branch", "branch_head_sha main"]);
    }

    #[tokio::test]
    async fn override_skips_default_branch_lookup() {
        let remote = FakeRemote::new().with_branch("develop", "develop-head");

        let base = resolve_base_branch(&remote, Some("develop")).await.unwrap();

        assert_eq!(base.branch_name, "develop");
        assert_eq!(base.head_commit_sha, "develop-head");
        assert_eq!(remote.calls(), vec!["branch_head_sha develop"]);
    }

    #[tokio::test]
    async fn blank_override_falls_through_to_default_branch() {
        let remote = FakeRemote::new();

        let base = resolve_base_branch(&remote, Some("   ")).await.unwrap();

        assert_eq!(base.branch_name, "main");
        assert_eq!(remote.calls(), vec!["default_branch", "branch_head_sha main"]);
    }

    #[tokio::test]
    async fn unknown_override_is_fatal() {
        let remote = FakeRemote::new();

        let err = resolve_base_branch(&remote, Some("no-such-branch")).await.unwrap_err();

        assert!(matches!(err, PublishError::BaseBranchUnresolvable { .. }));
    }

    #[tokio::test]
    async fn default_branch_failure_is_fatal() {
        let remote = FakeRemote::new().failing_on("default_branch");

        let err = resolve_base_branch(&remote, None).await.unwrap_err();

        assert!(matches!(err, PublishError::BaseBranchUnresolvable { .. }));
        // Resolution stops at the first failure.
        assert_eq!(remote.calls(), vec!["default_branch"]);
    }
}
