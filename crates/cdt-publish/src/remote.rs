//! Seam between the publish workflow and the hosted-forge client.
//!
//! The orchestrator and planner talk to a [`RemoteRepository`] rather
//! than to [`ForgeClient`] directly, so workflow tests can substitute a
//! scripted in-memory remote and assert on the exact call sequence.
//! The trait is scoped to a single repository; the binding from client
//! to repository happens once, in [`ForgeRemote::new`].

use async_trait::async_trait;
use cdt_forge::{ForgeClient, ForgeError, PullRequest, RepoFile, RepoRef, TreeEntry};

/// One governance repository, as seen by the publish workflow.
///
/// Every method maps to exactly one remote call and performs no
/// retries. Absence (a missing file) is `Ok(None)`, never an error.
#[async_trait]
pub trait RemoteRepository: Send + Sync {
    /// Name of the repository's default branch.
    async fn default_branch(&self) -> Result<String, ForgeError>;

    /// Head commit SHA of the named branch.
    async fn branch_head_sha(&self, branch: &str) -> Result<String, ForgeError>;

    /// Create a branch pointing at `from_sha`.
    async fn create_branch(&self, branch: &str, from_sha: &str) -> Result<(), ForgeError>;

    /// Fetch a file at `path` on `reference`, or `None` if absent.
    async fn get_file(&self, path: &str, reference: &str)
        -> Result<Option<RepoFile>, ForgeError>;

    /// Write `content` to `path` on `branch`, returning the new blob SHA.
    ///
    /// `previous_sha` must be the current blob SHA when updating an
    /// existing file and `None` when creating a new one.
    async fn write_file(
        &self,
        path: &str,
        content: &[u8],
        message: &str,
        branch: &str,
        previous_sha: Option<&str>,
    ) -> Result<String, ForgeError>;

    /// Open a pull request from `head` into `base`.
    async fn create_pull_request(
        &self,
        title: &str,
        body: &str,
        head: &str,
        base: &str,
    ) -> Result<PullRequest, ForgeError>;

    /// Create a loose blob from raw bytes, returning its SHA.
    async fn create_blob(&self, content: &[u8]) -> Result<String, ForgeError>;

    /// Tree SHA of the commit at `commit_sha`.
    async fn commit_tree_sha(&self, commit_sha: &str) -> Result<String, ForgeError>;

    /// Create a tree extending `base_tree_sha` with `entries`.
    async fn create_tree(
        &self,
        base_tree_sha: &str,
        entries: Vec<TreeEntry>,
    ) -> Result<String, ForgeError>;

    /// Create a commit on `tree_sha` with the given parents.
    async fn create_commit(
        &self,
        message: &str,
        tree_sha: &str,
        parents: Vec<String>,
    ) -> Result<String, ForgeError>;
}

/// [`RemoteRepository`] backed by a [`ForgeClient`] bound to one
/// repository.
pub struct ForgeRemote {
    client: ForgeClient,
    repo: RepoRef,
}

impl ForgeRemote {
    /// Bind `client` to the governance repository `repo`.
    pub fn new(client: ForgeClient, repo: RepoRef) -> Self {
        Self { client, repo }
    }

    /// The bound repository.
    pub fn repo(&self) -> &RepoRef {
        &self.repo
    }
}

#[async_trait]
impl RemoteRepository for ForgeRemote {
    async fn default_branch(&self) -> Result<String, ForgeError> {
        self.client.repos().get_default_branch(&self.repo).await
    }

    async fn branch_head_sha(&self, branch: &str) -> Result<String, ForgeError> {
        self.client.branches().get_head_sha(&self.repo, branch).await
    }

    async fn create_branch(&self, branch: &str, from_sha: &str) -> Result<(), ForgeError> {
        self.client.branches().create(&self.repo, branch, from_sha).await
    }

    async fn get_file(
        &self,
        path: &str,
        reference: &str,
    ) -> Result<Option<RepoFile>, ForgeError> {
        self.client.contents().get_file(&self.repo, path, reference).await
    }

    async fn write_file(
        &self,
        path: &str,
        content: &[u8],
        message: &str,
        branch: &str,
        previous_sha: Option<&str>,
    ) -> Result<String, ForgeError> {
        self.client
            .contents()
            .write_file(&self.repo, path, content, message, branch, previous_sha)
            .await
    }

    async fn create_pull_request(
        &self,
        title: &str,
        body: &str,
        head: &str,
        base: &str,
    ) -> Result<PullRequest, ForgeError> {
        self.client.pulls().create(&self.repo, title, body, head, base).await
    }

    async fn create_blob(&self, content: &[u8]) -> Result<String, ForgeError> {
        self.client.git().create_blob(&self.repo, content).await
    }

    async fn commit_tree_sha(&self, commit_sha: &str) -> Result<String, ForgeError> {
        let commit = self.client.git().get_commit(&self.repo, commit_sha).await?;
        Ok(commit.tree.sha)
    }

    async fn create_tree(
        &self,
        base_tree_sha: &str,
        entries: Vec<TreeEntry>,
    ) -> Result<String, ForgeError> {
        self.client.git().create_tree(&self.repo, base_tree_sha, entries).await
    }

    async fn create_commit(
        &self,
        message: &str,
        tree_sha: &str,
        parents: Vec<String>,
    ) -> Result<String, ForgeError> {
        self.client.git().create_commit(&self.repo, message, tree_sha, parents).await
    }
}
