//! The publish orchestrator state machine.
//!
//! One publish moves through a linear sequence of phases, with a single
//! absorbing failure state:
//!
//! ```text
//! Planning ─resolve()─▶ BaseResolved ─create_branch()─▶ BranchCreated
//!                                                            │
//!                                                      write_files()
//!                                                            │
//!                                                            ▼
//!        Done ◀─finish()─ PRCreated ◀─open_pull_request()─ FilesWritten
//!
//!        (any edge may land in Failed instead; Failed is terminal)
//! ```
//!
//! Each phase is a distinct type and each edge a consuming method, so a
//! test can construct any mid-workflow state directly and exercise one
//! transition against a scripted remote. The workflow never retries and
//! never rolls back: whatever the remote holds when an edge fails stays
//! there for manual recovery.

use cdt_core::{
    ArtifactFile, ArtifactKind, BaseBranchResolution, Clock, FileWriteOutcome, PublishRequest,
    PublishResult,
};
use tracing::{debug, info, warn};

use crate::error::PublishError;
use crate::plan::{check_existing, DraftPlan, PlacementPlan};
use crate::remote::RemoteRepository;
use crate::resolve::resolve_base_branch;
use crate::templates;

// ── Phases ───────────────────────────────────────────────────────────

/// Runtime label for the workflow phases, for logs and progress
/// reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum PublishPhase {
    /// Paths derived and contents rendered; nothing touched remotely.
    #[serde(rename = "Planning")]
    Planning,
    /// Base branch and its head commit are known; plan is final.
    #[serde(rename = "BaseResolved")]
    BaseResolved,
    /// Working branch exists on the remote.
    #[serde(rename = "BranchCreated")]
    BranchCreated,
    /// Every planned file is committed to the working branch.
    #[serde(rename = "FilesWritten")]
    FilesWritten,
    /// The pull request is open.
    #[serde(rename = "PRCreated")]
    PrCreated,
    /// Publish complete. Terminal.
    #[serde(rename = "Done")]
    Done,
    /// Publish aborted. Terminal; absorbing from every active phase.
    #[serde(rename = "Failed")]
    Failed,
}

impl PublishPhase {
    /// The canonical phase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Planning => "Planning",
            Self::BaseResolved => "BaseResolved",
            Self::BranchCreated => "BranchCreated",
            Self::FilesWritten => "FilesWritten",
            Self::PrCreated => "PRCreated",
            Self::Done => "Done",
            Self::Failed => "Failed",
        }
    }

    /// Whether this is a terminal phase (no further transitions).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }

    /// The set of phases reachable in one transition.
    pub fn valid_transitions(&self) -> &'static [PublishPhase] {
        match self {
            Self::Planning => &[Self::BaseResolved, Self::Failed],
            Self::BaseResolved => &[Self::BranchCreated, Self::Failed],
            Self::BranchCreated => &[Self::FilesWritten, Self::Failed],
            Self::FilesWritten => &[Self::PrCreated, Self::Failed],
            Self::PrCreated => &[Self::Done],
            Self::Done | Self::Failed => &[],
        }
    }
}

impl std::fmt::Display for PublishPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ── Job Input ────────────────────────────────────────────────────────

/// Caller-supplied overrides for one publish. All optional; defaults
/// come from the message templates and the repository default branch.
#[derive(Debug, Clone, Default)]
pub struct PublishOptions {
    /// Commit message override.
    pub commit_message: Option<String>,
    /// Pull-request title override.
    pub pr_title: Option<String>,
    /// Pull-request body override.
    pub pr_body: Option<String>,
    /// Base branch override. Skips the default-branch lookup entirely.
    pub base_branch_override: Option<String>,
}

/// Everything the orchestrator needs to run one publish.
#[derive(Debug, Clone)]
pub struct PublishJob {
    /// The drafted placement plan.
    pub draft: DraftPlan,
    /// Login of the publishing author, credited in the PR body.
    pub author_handle: String,
    /// Caller overrides.
    pub options: PublishOptions,
}

// ── Publish Hook ─────────────────────────────────────────────────────

/// Error from a [`PublishHook`]. Logged, never propagated.
pub type HookError = Box<dyn std::error::Error + Send + Sync>;

/// Callback invoked once the pull request exists, typically to mark a
/// stored artifact as published.
///
/// Runs after the PRCreated phase is reached, so a hook failure can
/// only ever lose the bookkeeping update, never the pull request. The
/// orchestrator logs hook errors and reports the publish as successful
/// regardless.
#[async_trait::async_trait]
pub trait PublishHook: Send + Sync {
    /// Record that the artifact behind `result` is now published.
    async fn mark_published(
        &self,
        result: &PublishResult,
        published_at: chrono::DateTime<chrono::Utc>,
    ) -> Result<(), HookError>;
}

// ── States ───────────────────────────────────────────────────────────

/// Initial state: a drafted plan that has not touched the remote.
#[derive(Debug)]
pub struct Planning {
    /// The job being published.
    pub job: PublishJob,
}

/// Base branch resolved, existence checks done, request validated.
#[derive(Debug)]
pub struct BaseResolved {
    request: PublishRequest,
    plan: PlacementPlan,
    base: BaseBranchResolution,
}

/// Working branch created from the base head.
#[derive(Debug)]
pub struct BranchCreated {
    request: PublishRequest,
    plan: PlacementPlan,
    base: BaseBranchResolution,
    branch_name: String,
}

/// All planned files written to the working branch, in order.
#[derive(Debug)]
pub struct FilesWritten {
    request: PublishRequest,
    base: BaseBranchResolution,
    branch_name: String,
    outcomes: Vec<FileWriteOutcome>,
}

/// Pull request open; only bookkeeping remains.
#[derive(Debug)]
pub struct PrCreated {
    result: PublishResult,
}

/// The workflow state, tagged by phase.
#[derive(Debug)]
pub enum PublishState {
    /// See [`Planning`].
    Planning(Planning),
    /// See [`BaseResolved`].
    BaseResolved(BaseResolved),
    /// See [`BranchCreated`].
    BranchCreated(BranchCreated),
    /// See [`FilesWritten`].
    FilesWritten(FilesWritten),
    /// See [`PrCreated`].
    PrCreated(PrCreated),
    /// Publish complete.
    Done(PublishResult),
    /// Publish aborted.
    Failed(PublishError),
}

impl PublishState {
    /// The phase label of this state.
    pub fn phase(&self) -> PublishPhase {
        match self {
            Self::Planning(_) => PublishPhase::Planning,
            Self::BaseResolved(_) => PublishPhase::BaseResolved,
            Self::BranchCreated(_) => PublishPhase::BranchCreated,
            Self::FilesWritten(_) => PublishPhase::FilesWritten,
            Self::PrCreated(_) => PublishPhase::PrCreated,
            Self::Done(_) => PublishPhase::Done,
            Self::Failed(_) => PublishPhase::Failed,
        }
    }
}

// ── Transitions ──────────────────────────────────────────────────────

impl Planning {
    /// Resolve the base branch and finish the plan against it.
    ///
    /// Transitions: Planning → BaseResolved (or Failed).
    ///
    /// Runs the base-branch resolver, then one existence check per
    /// planned path so updates carry the current blob SHA. Messages are
    /// assembled after the checks because the add/update wording
    /// depends on their outcome. The request is validated here, before
    /// anything is created remotely.
    pub async fn resolve(self, remote: &dyn RemoteRepository) -> PublishState {
        let Planning { job } = self;
        let base = match resolve_base_branch(remote, job.options.base_branch_override.as_deref())
            .await
        {
            Ok(base) => base,
            Err(error) => return PublishState::Failed(error),
        };

        let plan = match check_existing(remote, job.draft, &base.branch_name).await {
            Ok(plan) => plan,
            Err(error) => return PublishState::Failed(error.into()),
        };

        let (commit_message, pr_title, pr_body) =
            assemble_messages(&plan, &job.options, &job.author_handle);
        let files: Vec<ArtifactFile> = plan
            .files
            .iter()
            .map(|file| ArtifactFile::utf8(file.path.clone(), file.content.clone()))
            .collect();
        let request = match PublishRequest::new(
            plan.kind,
            files,
            commit_message,
            pr_title,
            pr_body,
            job.author_handle,
        ) {
            Ok(request) => request,
            Err(error) => return PublishState::Failed(error.into()),
        };

        debug!(base = %base.branch_name, files = plan.files.len(), "base resolved, plan final");
        PublishState::BaseResolved(BaseResolved { request, plan, base })
    }
}

impl BaseResolved {
    /// Create the working branch from the base head.
    ///
    /// Transitions: BaseResolved → BranchCreated (or Failed).
    ///
    /// The branch name embeds the clock reading in milliseconds, so
    /// retried publishes of the same artifact get distinct branches. A
    /// name collision is reported as-is; the caller decides whether to
    /// try again.
    pub async fn create_branch(
        self,
        remote: &dyn RemoteRepository,
        clock: &dyn Clock,
    ) -> PublishState {
        let action = if self.plan.is_update() { "update" } else { "add" };
        let branch_name = branch_name(self.plan.kind, action, &self.plan.slug, clock);

        if let Err(source) = remote.create_branch(&branch_name, &self.base.head_commit_sha).await
        {
            return PublishState::Failed(PublishError::BranchCreateFailed {
                branch: branch_name,
                source,
            });
        }

        debug!(branch = %branch_name, "working branch created");
        PublishState::BranchCreated(BranchCreated {
            request: self.request,
            plan: self.plan,
            base: self.base,
            branch_name,
        })
    }
}

impl BranchCreated {
    /// Write every planned file to the working branch.
    ///
    /// Transitions: BranchCreated → FilesWritten (or Failed).
    ///
    /// Writes are sequential, in plan order. Each write sends the blob
    /// SHA found by the existence check, or none for a new file. The
    /// first failure aborts; earlier writes stay on the branch.
    pub async fn write_files(self, remote: &dyn RemoteRepository) -> PublishState {
        let mut outcomes = Vec::with_capacity(self.plan.files.len());
        for (file, planned) in self.request.files.iter().zip(&self.plan.files) {
            let written = remote
                .write_file(
                    &planned.path,
                    &file.content,
                    &self.request.commit_message,
                    &self.branch_name,
                    planned.previous_sha.as_deref(),
                )
                .await;
            if let Err(source) = written {
                return PublishState::Failed(PublishError::FileWriteFailed {
                    path: planned.path.clone(),
                    source,
                });
            }
            outcomes.push(FileWriteOutcome::new(
                planned.path.clone(),
                planned.previous_sha.clone(),
            ));
        }

        debug!(files = outcomes.len(), branch = %self.branch_name, "files written");
        PublishState::FilesWritten(FilesWritten {
            request: self.request,
            base: self.base,
            branch_name: self.branch_name,
            outcomes,
        })
    }
}

impl FilesWritten {
    /// Open the pull request from the working branch into the base.
    ///
    /// Transitions: FilesWritten → PRCreated (or Failed).
    ///
    /// On failure the branch and its files remain on the remote; the
    /// error names the step so the caller can point the user at the
    /// branch for manual recovery.
    pub async fn open_pull_request(self, remote: &dyn RemoteRepository) -> PublishState {
        let pr = match remote
            .create_pull_request(
                &self.request.pr_title,
                &self.request.pr_body,
                &self.branch_name,
                &self.base.branch_name,
            )
            .await
        {
            Ok(pr) => pr,
            Err(source) => {
                return PublishState::Failed(PublishError::PullRequestCreateFailed { source })
            }
        };

        info!(pr = pr.number, branch = %self.branch_name, "pull request opened");
        PublishState::PrCreated(PrCreated {
            result: PublishResult {
                pr_number: pr.number,
                pr_url: pr.html_url,
                pr_title: pr.title,
                branch_name: self.branch_name,
                file_paths: self.outcomes.into_iter().map(|o| o.path).collect(),
            },
        })
    }
}

impl PrCreated {
    /// Run the post-publish hook and finish.
    ///
    /// Transitions: PRCreated → Done.
    ///
    /// The hook is best-effort. Its failure is logged and the publish
    /// still reports success, because the pull request already exists
    /// and must not be rolled back over a bookkeeping error.
    pub async fn finish(self, clock: &dyn Clock, hook: Option<&dyn PublishHook>) -> PublishState {
        if let Some(hook) = hook {
            if let Err(error) = hook.mark_published(&self.result, clock.now()).await {
                warn!(pr = self.result.pr_number, %error, "mark-published hook failed");
            }
        }
        PublishState::Done(self.result)
    }
}

// ── Driver ───────────────────────────────────────────────────────────

/// Run one publish to completion.
///
/// Steps the state machine until a terminal state, returning the
/// result or the first error. No retries at any step.
pub async fn run_publish(
    remote: &dyn RemoteRepository,
    clock: &dyn Clock,
    job: PublishJob,
    hook: Option<&dyn PublishHook>,
) -> Result<PublishResult, PublishError> {
    let mut state = PublishState::Planning(Planning { job });
    loop {
        debug!(phase = %state.phase(), "publish phase");
        state = match state {
            PublishState::Planning(s) => s.resolve(remote).await,
            PublishState::BaseResolved(s) => s.create_branch(remote, clock).await,
            PublishState::BranchCreated(s) => s.write_files(remote).await,
            PublishState::FilesWritten(s) => s.open_pull_request(remote).await,
            PublishState::PrCreated(s) => s.finish(clock, hook).await,
            PublishState::Done(result) => return Ok(result),
            PublishState::Failed(error) => return Err(error),
        };
    }
}

/// Working-branch name: `<kind prefix>/<action>-<slug>-<unix millis>`.
fn branch_name(kind: ArtifactKind, action: &str, slug: &str, clock: &dyn Clock) -> String {
    format!("{}/{action}-{slug}-{}", kind.branch_prefix(), clock.unix_millis())
}

fn assemble_messages(
    plan: &PlacementPlan,
    options: &PublishOptions,
    author_handle: &str,
) -> (String, String, String) {
    let is_update = plan.is_update();
    let paths = plan.paths();
    let default_message = match plan.kind {
        ArtifactKind::VocabBatch => {
            let names: Vec<String> = plan.files.iter().map(|f| f.name.clone()).collect();
            templates::batch_commit_message(&names)
        }
        _ => {
            let file_name = paths.first().map(|p| templates::file_name(p)).unwrap_or_default();
            templates::commit_message(plan.kind, file_name, is_update)
        }
    };

    let commit_message =
        options.commit_message.clone().unwrap_or_else(|| default_message.clone());
    let pr_title = options.pr_title.clone().unwrap_or_else(|| default_message.clone());
    let pr_body = options
        .pr_body
        .clone()
        .unwrap_or_else(|| templates::pr_body(&paths, is_update, author_handle));
    (commit_message, pr_title, pr_body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake_remote::FakeRemote;
    use crate::plan::{draft, ArtifactPayload, DraftFile, NamedDocument};
    use cdt_core::{ManualClock, ValidationError};
    use serde_json::json;
    use std::sync::Mutex;

    const MILLIS: i64 = 1_700_000_000_000;

    fn schema_job() -> PublishJob {
        let payload = ArtifactPayload::JsonSchema(NamedDocument {
            name: "Home Credential".into(),
            category: Some("property".into()),
            filename: None,
            document: json!({"type": "object"}),
        });
        PublishJob {
            draft: draft(&payload).unwrap(),
            author_handle: "octocat".into(),
            options: PublishOptions::default(),
        }
    }

    #[tokio::test]
    async fn publish_runs_every_step_in_order() {
        let remote = FakeRemote::new();
        let clock = ManualClock::new(MILLIS);

        let result = run_publish(&remote, &clock, schema_job(), None).await.unwrap();

        assert_eq!(result.pr_number, 101);
        assert_eq!(result.pr_title, "Add JSON Schema: property-home-credential.json");
        assert_eq!(result.branch_name, "schema/add-home-credential-1700000000000");
        assert_eq!(result.file_paths, vec!["credentials/schemas/property-home-credential.json"]);
        assert_eq!(
            remote.calls(),
            vec![
                "default_branch",
                "branch_head_sha main",
                "get_file credentials/schemas/property-home-credential.json @ main",
                "create_branch schema/add-home-credential-1700000000000 @ 4d0c9b6e1f2a",
                "write_file credentials/schemas/property-home-credential.json @ schema/add-home-credential-1700000000000 sha=-",
                "create_pull_request schema/add-home-credential-1700000000000 -> main",
            ]
        );
        let pr = &remote.pull_requests()[0];
        assert!(pr.body.contains("adds `credentials/schemas/property-home-credential.json`"));
        assert!(pr.body.contains("@octocat"));
    }

    #[tokio::test]
    async fn republish_sends_the_existing_sha_and_says_updates() {
        let remote = FakeRemote::new().with_file(
            "main",
            "credentials/schemas/property-home-credential.json",
            "{}",
            "existing-blob-sha",
        );
        let clock = ManualClock::new(MILLIS);

        let result = run_publish(&remote, &clock, schema_job(), None).await.unwrap();

        assert_eq!(result.branch_name, "schema/update-home-credential-1700000000000");
        assert_eq!(result.pr_title, "Update JSON Schema: property-home-credential.json");
        let writes: Vec<String> = remote
            .calls()
            .into_iter()
            .filter(|c| c.starts_with("write_file"))
            .collect();
        assert_eq!(
            writes,
            vec![
                "write_file credentials/schemas/property-home-credential.json \
                 @ schema/update-home-credential-1700000000000 sha=existing-blob-sha"
            ]
        );
        let pr = &remote.pull_requests()[0];
        assert!(pr.body.contains("updates `credentials/schemas/property-home-credential.json`"));
        assert!(!pr.body.contains("This PR adds"));
    }

    #[tokio::test]
    async fn base_override_skips_the_default_branch_lookup() {
        let remote = FakeRemote::new().with_branch("develop", "develop-head");
        let clock = ManualClock::new(MILLIS);
        let mut job = schema_job();
        job.options.base_branch_override = Some("develop".into());

        let result = run_publish(&remote, &clock, job, None).await.unwrap();

        assert_eq!(remote.calls_matching("default_branch"), 0);
        assert_eq!(remote.calls()[0], "branch_head_sha develop");
        let pr = &remote.pull_requests()[0];
        assert_eq!(pr.base, "develop");
        assert_eq!(result.pr_number, 101);
    }

    #[tokio::test]
    async fn branch_create_failure_stops_before_any_write() {
        let remote = FakeRemote::new().failing_on("create_branch");
        let clock = ManualClock::new(MILLIS);

        let err = run_publish(&remote, &clock, schema_job(), None).await.unwrap_err();

        assert!(matches!(err, PublishError::BranchCreateFailed { .. }));
        assert_eq!(remote.calls_matching("write_file"), 0);
        assert_eq!(remote.calls_matching("create_pull_request"), 0);
    }

    fn two_file_job() -> PublishJob {
        PublishJob {
            draft: DraftPlan {
                kind: ArtifactKind::Vct,
                slug: "pair".into(),
                files: vec![
                    DraftFile {
                        name: "First".into(),
                        path: "credentials/vct/a.json".into(),
                        content: "{}".into(),
                    },
                    DraftFile {
                        name: "Second".into(),
                        path: "credentials/vct/b.json".into(),
                        content: "{}".into(),
                    },
                ],
            },
            author_handle: "octocat".into(),
            options: PublishOptions::default(),
        }
    }

    #[tokio::test]
    async fn file_write_failure_skips_the_pull_request() {
        let remote = FakeRemote::new().failing_on("write_file credentials/vct/b.json");
        let clock = ManualClock::new(MILLIS);

        let err = run_publish(&remote, &clock, two_file_job(), None).await.unwrap_err();

        match err {
            PublishError::FileWriteFailed { path, .. } => {
                assert_eq!(path, "credentials/vct/b.json");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        // The first write went through and stays on the branch.
        assert_eq!(remote.calls_matching("write_file credentials/vct/a.json"), 1);
        assert_eq!(remote.calls_matching("create_pull_request"), 0);
    }

    #[tokio::test]
    async fn result_paths_follow_plan_order() {
        let remote = FakeRemote::new();
        let clock = ManualClock::new(MILLIS);

        let result = run_publish(&remote, &clock, two_file_job(), None).await.unwrap();

        assert_eq!(
            result.file_paths,
            vec!["credentials/vct/a.json", "credentials/vct/b.json"]
        );
        let writes: Vec<String> = remote
            .calls()
            .into_iter()
            .filter(|c| c.starts_with("write_file"))
            .collect();
        assert!(writes[0].contains("credentials/vct/a.json"));
        assert!(writes[1].contains("credentials/vct/b.json"));
    }

    #[tokio::test]
    async fn same_clock_reading_collides_and_is_not_retried() {
        let remote = FakeRemote::new();
        let clock = ManualClock::new(MILLIS);

        run_publish(&remote, &clock, schema_job(), None).await.unwrap();
        let err = run_publish(&remote, &clock, schema_job(), None).await.unwrap_err();

        match err {
            PublishError::BranchCreateFailed { source, .. } => {
                assert_eq!(source.status(), Some(422));
            }
            other => panic!("unexpected error: {other:?}"),
        }

        clock.advance_millis(1);
        let result = run_publish(&remote, &clock, schema_job(), None).await.unwrap();
        assert_eq!(result.branch_name, "schema/add-home-credential-1700000000001");
    }

    #[tokio::test]
    async fn pr_failure_leaves_the_branch_in_place() {
        let remote = FakeRemote::new().failing_on("create_pull_request");
        let clock = ManualClock::new(MILLIS);

        let err = run_publish(&remote, &clock, schema_job(), None).await.unwrap_err();

        assert!(matches!(err, PublishError::PullRequestCreateFailed { .. }));
        assert!(remote
            .branch_heads()
            .contains_key("schema/add-home-credential-1700000000000"));
    }

    #[tokio::test]
    async fn blank_message_override_fails_validation_before_branching() {
        let remote = FakeRemote::new();
        let clock = ManualClock::new(MILLIS);
        let mut job = schema_job();
        job.options.commit_message = Some("   ".into());

        let err = run_publish(&remote, &clock, job, None).await.unwrap_err();

        assert!(matches!(
            err,
            PublishError::Validation(ValidationError::EmptyField { field: "commit_message" })
        ));
        assert_eq!(remote.calls_matching("create_branch"), 0);
    }

    struct RecordingHook {
        fail: bool,
        seen: Mutex<Option<(u64, i64)>>,
    }

    #[async_trait::async_trait]
    impl PublishHook for RecordingHook {
        async fn mark_published(
            &self,
            result: &PublishResult,
            published_at: chrono::DateTime<chrono::Utc>,
        ) -> Result<(), HookError> {
            *self.seen.lock().unwrap() =
                Some((result.pr_number, published_at.timestamp_millis()));
            if self.fail {
                return Err("bookkeeping store offline".into());
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn hook_runs_after_the_pr_exists() {
        let remote = FakeRemote::new();
        let clock = ManualClock::new(MILLIS);
        let hook = RecordingHook { fail: false, seen: Mutex::new(None) };

        run_publish(&remote, &clock, schema_job(), Some(&hook)).await.unwrap();

        assert_eq!(*hook.seen.lock().unwrap(), Some((101, MILLIS)));
    }

    #[tokio::test]
    async fn hook_failure_does_not_fail_the_publish() {
        let remote = FakeRemote::new();
        let clock = ManualClock::new(MILLIS);
        let hook = RecordingHook { fail: true, seen: Mutex::new(None) };

        let result = run_publish(&remote, &clock, schema_job(), Some(&hook)).await.unwrap();

        assert_eq!(result.pr_number, 101);
        assert!(hook.seen.lock().unwrap().is_some());
    }

    #[test]
    fn phases_chain_linearly_with_an_absorbing_failure() {
        use PublishPhase::*;
        assert_eq!(Planning.valid_transitions(), &[BaseResolved, Failed]);
        assert_eq!(BaseResolved.valid_transitions(), &[BranchCreated, Failed]);
        assert_eq!(BranchCreated.valid_transitions(), &[FilesWritten, Failed]);
        assert_eq!(FilesWritten.valid_transitions(), &[PrCreated, Failed]);
        assert_eq!(PrCreated.valid_transitions(), &[Done]);
        assert!(Done.valid_transitions().is_empty());
        assert!(Failed.valid_transitions().is_empty());
        assert!(Done.is_terminal());
        assert!(Failed.is_terminal());
        assert!(!BranchCreated.is_terminal());
        assert_eq!(PrCreated.to_string(), "PRCreated");
    }
}
