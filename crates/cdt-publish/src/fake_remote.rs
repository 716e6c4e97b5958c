//! Scripted in-memory remote for workflow tests.
//!
//! Records every call in order so tests can assert on the exact call
//! sequence, and supports failure injection by call prefix so each
//! workflow step can be made to fail in isolation.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use cdt_forge::{ForgeError, PullRequest, RepoFile, TreeEntry};
use sha2::{Digest, Sha256};

use crate::remote::RemoteRepository;

/// A pull request opened against the fake, kept for assertions.
#[derive(Debug, Clone)]
pub struct OpenedPr {
    pub title: String,
    pub body: String,
    pub head: String,
    pub base: String,
}

/// In-memory [`RemoteRepository`] with a call log and failure injection.
pub struct FakeRemote {
    default_branch: String,
    branches: Mutex<HashMap<String, String>>,
    files: Mutex<HashMap<(String, String), RepoFile>>,
    commit_trees: Mutex<HashMap<String, String>>,
    calls: Mutex<Vec<String>>,
    prs: Mutex<Vec<OpenedPr>>,
    fail_prefix: Option<String>,
    conflict_path: Option<String>,
    tree_seq: AtomicU64,
    commit_seq: AtomicU64,
}

impl FakeRemote {
    /// Head commit SHA of the scripted default branch.
    pub const HEAD_SHA: &'static str = "4d0c9b6e1f2a";
    /// Tree SHA of the commit at [`Self::HEAD_SHA`].
    pub const BASE_TREE_SHA: &'static str = "base-tree-9c1d";

    /// A remote with a `main` default branch and no files.
    pub fn new() -> Self {
        let mut branches = HashMap::new();
        branches.insert("main".to_owned(), Self::HEAD_SHA.to_owned());
        let mut commit_trees = HashMap::new();
        commit_trees.insert(Self::HEAD_SHA.to_owned(), Self::BASE_TREE_SHA.to_owned());
        Self {
            default_branch: "main".to_owned(),
            branches: Mutex::new(branches),
            files: Mutex::new(HashMap::new()),
            commit_trees: Mutex::new(commit_trees),
            calls: Mutex::new(Vec::new()),
            prs: Mutex::new(Vec::new()),
            fail_prefix: None,
            conflict_path: None,
            tree_seq: AtomicU64::new(0),
            commit_seq: AtomicU64::new(0),
        }
    }

    /// Script an additional branch with the given head SHA.
    pub fn with_branch(self, branch: &str, head_sha: &str) -> Self {
        self.branches.lock().unwrap().insert(branch.to_owned(), head_sha.to_owned());
        self
    }

    /// Script a file as existing at `path` on `reference`.
    pub fn with_file(self, reference: &str, path: &str, content: &str, sha: &str) -> Self {
        self.files.lock().unwrap().insert(
            (reference.to_owned(), path.to_owned()),
            RepoFile { content: content.as_bytes().to_vec(), sha: sha.to_owned() },
        );
        self
    }

    /// Fail every call whose log entry starts with `prefix`.
    ///
    /// `failing_on("write_file")` fails the first write;
    /// `failing_on("write_file b.json")` fails only that path.
    pub fn failing_on(mut self, prefix: &str) -> Self {
        self.fail_prefix = Some(prefix.to_owned());
        self
    }

    /// Make writes to `path` fail with a compare-and-swap conflict.
    pub fn conflicting_on(mut self, path: &str) -> Self {
        self.conflict_path = Some(path.to_owned());
        self
    }

    /// The call log, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of logged calls starting with `prefix`.
    pub fn calls_matching(&self, prefix: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|call| call.starts_with(prefix)).count()
    }

    /// Branches created during the test, with their head SHAs.
    pub fn branch_heads(&self) -> HashMap<String, String> {
        self.branches.lock().unwrap().clone()
    }

    /// Pull requests opened during the test, in order.
    pub fn pull_requests(&self) -> Vec<OpenedPr> {
        self.prs.lock().unwrap().clone()
    }

    fn record(&self, call: String) -> Result<(), ForgeError> {
        self.calls.lock().unwrap().push(call.clone());
        if let Some(prefix) = &self.fail_prefix {
            if call.starts_with(prefix.as_str()) {
                return Err(ForgeError::Api {
                    endpoint: call,
                    status: 500,
                    body: "scripted failure".to_owned(),
                });
            }
        }
        Ok(())
    }

    /// The SHA the fake assigns to `content`, for order assertions.
    pub fn content_sha(content: &[u8]) -> String {
        let digest = Sha256::digest(content);
        hex_prefix(&digest)
    }
}

fn hex_prefix(digest: &[u8]) -> String {
    digest.iter().take(6).map(|byte| format!("{byte:02x}")).collect()
}

#[async_trait]
impl RemoteRepository for FakeRemote {
    async fn default_branch(&self) -> Result<String, ForgeError> {
        self.record("default_branch".to_owned())?;
        Ok(self.default_branch.clone())
    }

    async fn branch_head_sha(&self, branch: &str) -> Result<String, ForgeError> {
        self.record(format!("branch_head_sha {branch}"))?;
        self.branches.lock().unwrap().get(branch).cloned().ok_or_else(|| {
            ForgeError::BranchNotFound {
                repo: "openwallet-labs/credential-governance".to_owned(),
                branch: branch.to_owned(),
            }
        })
    }

    async fn create_branch(&self, branch: &str, from_sha: &str) -> Result<(), ForgeError> {
        self.record(format!("create_branch {branch} @ {from_sha}"))?;
        let mut branches = self.branches.lock().unwrap();
        if branches.contains_key(branch) {
            return Err(ForgeError::BranchAlreadyExists {
                repo: "openwallet-labs/credential-governance".to_owned(),
                branch: branch.to_owned(),
            });
        }
        branches.insert(branch.to_owned(), from_sha.to_owned());
        Ok(())
    }

    async fn get_file(
        &self,
        path: &str,
        reference: &str,
    ) -> Result<Option<RepoFile>, ForgeError> {
        self.record(format!("get_file {path} @ {reference}"))?;
        Ok(self.files.lock().unwrap().get(&(reference.to_owned(), path.to_owned())).cloned())
    }

    async fn write_file(
        &self,
        path: &str,
        content: &[u8],
        _message: &str,
        branch: &str,
        previous_sha: Option<&str>,
    ) -> Result<String, ForgeError> {
        self.record(format!(
            "write_file {path} @ {branch} sha={}",
            previous_sha.unwrap_or("-")
        ))?;
        if self.conflict_path.as_deref() == Some(path) {
            return Err(ForgeError::Conflict { path: path.to_owned() });
        }
        let sha = Self::content_sha(content);
        self.files.lock().unwrap().insert(
            (branch.to_owned(), path.to_owned()),
            RepoFile { content: content.to_vec(), sha: sha.clone() },
        );
        Ok(sha)
    }

    async fn create_pull_request(
        &self,
        title: &str,
        body: &str,
        head: &str,
        base: &str,
    ) -> Result<PullRequest, ForgeError> {
        self.record(format!("create_pull_request {head} -> {base}"))?;
        self.prs.lock().unwrap().push(OpenedPr {
            title: title.to_owned(),
            body: body.to_owned(),
            head: head.to_owned(),
            base: base.to_owned(),
        });
        Ok(PullRequest {
            number: 101,
            html_url: "https://forge.example/openwallet-labs/credential-governance/pull/101"
                .to_owned(),
            title: title.to_owned(),
        })
    }

    async fn create_blob(&self, content: &[u8]) -> Result<String, ForgeError> {
        let sha = Self::content_sha(content);
        self.record(format!("create_blob {sha}"))?;
        Ok(sha)
    }

    async fn commit_tree_sha(&self, commit_sha: &str) -> Result<String, ForgeError> {
        self.record(format!("commit_tree_sha {commit_sha}"))?;
        self.commit_trees.lock().unwrap().get(commit_sha).cloned().ok_or_else(|| {
            ForgeError::Api {
                endpoint: format!("commit_tree_sha {commit_sha}"),
                status: 404,
                body: "unknown commit".to_owned(),
            }
        })
    }

    async fn create_tree(
        &self,
        base_tree_sha: &str,
        entries: Vec<TreeEntry>,
    ) -> Result<String, ForgeError> {
        self.record(format!("create_tree base={base_tree_sha} entries={}", entries.len()))?;
        let n = self.tree_seq.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("tree-{n}"))
    }

    async fn create_commit(
        &self,
        message: &str,
        tree_sha: &str,
        parents: Vec<String>,
    ) -> Result<String, ForgeError> {
        self.record(format!("create_commit {message:?} parents={}", parents.join(",")))?;
        let n = self.commit_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let sha = format!("commit-{n}");
        self.commit_trees.lock().unwrap().insert(sha.clone(), tree_sha.to_owned());
        Ok(sha)
    }
}
