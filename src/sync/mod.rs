//! The template sync workflow.
//!
//! One run against one repository: load local templates, optionally skip an
//! archived repository, branch off the default branch, replace colliding
//! templates, write all templates, open a pull request and optionally label
//! it. Steps run strictly in order and any failure ends the run without
//! rolling back commits already pushed to the branch.

pub mod branch_name;
pub mod errors;
pub mod reconcile;

pub use branch_name::{branch_name, Clock, FixedClock, SystemClock};
pub use errors::SyncError;
pub use reconcile::{ExistingTemplateRecord, ReconcilePlan, ReconcileReport};

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, Instrument};

use crate::github::{NewPullRequest, PullRequestHandle, RepositoryTarget, TemplateSyncApi};
use crate::telemetry::{create_sync_span, generate_correlation_id};
use crate::templates::{load_templates, Template};

pub const DEFAULT_BRANCH_NAMESPACE: &str = "octoherd";
pub const DEFAULT_DESTINATION_DIR: &str = ".github";
pub const DEFAULT_EXISTING_TEMPLATE_PATH: &str = ".github/pull_request_template.md";
pub const DEFAULT_PR_TITLE: &str = "Update issue and pull request templates";
pub const DEFAULT_PR_BODY: &str =
    "This pull request syncs the repository's issue and pull request templates from the shared template directory.";

/// Behaviour switches that distinguish the workflow variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncCapabilities {
    /// Fetch repository metadata first and skip archived repositories
    pub check_archived: bool,
    /// Look up every file in the destination directory instead of the single
    /// canonical pull request template path
    pub replace_all_existing: bool,
    /// Attach `label_name` to the pull request when it is non-empty
    pub label_on_create: bool,
}

impl Default for SyncCapabilities {
    fn default() -> Self {
        Self {
            check_archived: true,
            replace_all_existing: false,
            label_on_create: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SyncOptions {
    pub template_directory: Option<PathBuf>,
    pub label_name: Option<String>,
    pub branch_namespace: String,
    pub destination_dir: String,
    pub existing_template_path: String,
    pub pr_title: String,
    pub pr_body: String,
    pub capabilities: SyncCapabilities,
    /// Upper bound for the whole run
    pub timeout: Option<Duration>,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            template_directory: None,
            label_name: None,
            branch_namespace: DEFAULT_BRANCH_NAMESPACE.to_string(),
            destination_dir: DEFAULT_DESTINATION_DIR.to_string(),
            existing_template_path: DEFAULT_EXISTING_TEMPLATE_PATH.to_string(),
            pr_title: DEFAULT_PR_TITLE.to_string(),
            pr_body: DEFAULT_PR_BODY.to_string(),
            capabilities: SyncCapabilities::default(),
            timeout: None,
        }
    }
}

impl SyncOptions {
    /// Label to attach, if labeling is enabled and a name was given
    pub fn effective_label(&self) -> Option<&str> {
        if !self.capabilities.label_on_create {
            return None;
        }
        self.label_name
            .as_deref()
            .filter(|label| !label.is_empty())
    }

    /// Path probed for templates that may need replacing
    pub fn existing_lookup_path(&self) -> &str {
        if self.capabilities.replace_all_existing {
            &self.destination_dir
        } else {
            &self.existing_template_path
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchRef {
    pub name: String,
    pub base_sha: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Archived,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub repository: String,
    pub base_branch: String,
    pub branch: BranchRef,
    pub deleted: Vec<String>,
    pub written: Vec<String>,
    pub pull_request: PullRequestHandle,
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    Skipped { repository: String, reason: SkipReason },
    Completed(SyncReport),
}

/// Runs the template sync against one repository at a time
pub struct TemplateSyncWorkflow {
    api: Arc<dyn TemplateSyncApi>,
    clock: Arc<dyn Clock>,
    options: SyncOptions,
}

impl TemplateSyncWorkflow {
    pub fn new(api: Arc<dyn TemplateSyncApi>, options: SyncOptions) -> Self {
        Self {
            api,
            clock: Arc::new(SystemClock),
            options,
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn options(&self) -> &SyncOptions {
        &self.options
    }

    pub async fn run(&self, target: &RepositoryTarget) -> Result<SyncOutcome, SyncError> {
        let span = create_sync_span(&target.full_name(), &generate_correlation_id());

        let run = self.run_steps(target).instrument(span);
        match self.options.timeout {
            Some(limit) => tokio::time::timeout(limit, run)
                .await
                .map_err(|_| SyncError::Timeout {
                    seconds: limit.as_secs(),
                })?,
            None => run.await,
        }
    }

    async fn run_steps(&self, target: &RepositoryTarget) -> Result<SyncOutcome, SyncError> {
        let directory = self
            .options
            .template_directory
            .as_deref()
            .filter(|dir| !dir.as_os_str().is_empty())
            .ok_or(SyncError::MissingTemplateDirectory)?;

        let templates = load_templates(directory).await?;

        let Some(base_branch) = self.gate(target).await? else {
            return Ok(SyncOutcome::Skipped {
                repository: target.full_name(),
                reason: SkipReason::Archived,
            });
        };

        let branch = self.create_branch(target, &base_branch).await?;
        let existing = self.resolve_existing(target, &branch.name).await?;

        let plan = reconcile::plan_reconciliation(
            &existing,
            &templates,
            &branch.name,
            &self.options.destination_dir,
        );
        let reconciled =
            reconcile::apply_plan(self.api.as_ref(), &target.owner, &target.name, &plan).await?;

        let (pull_request, label) = self.publish(target, &branch, &base_branch, &templates).await?;

        Ok(SyncOutcome::Completed(SyncReport {
            repository: target.full_name(),
            base_branch,
            branch,
            deleted: reconciled.deleted,
            written: reconciled.written,
            pull_request,
            label,
        }))
    }

    /// Returns the branch to work from, or `None` when the repository is archived
    async fn gate(&self, target: &RepositoryTarget) -> Result<Option<String>, SyncError> {
        if !self.options.capabilities.check_archived {
            return Ok(Some(target.default_branch.clone()));
        }

        let metadata = self
            .api
            .get_repository(&target.owner, &target.name)
            .await
            .map_err(|source| SyncError::RepositoryLookup {
                repository: target.full_name(),
                source,
            })?;

        if metadata.archived {
            info!(repository = %target.full_name(), "repository is archived, skipping");
            return Ok(None);
        }

        Ok(Some(metadata.default_branch))
    }

    async fn create_branch(
        &self,
        target: &RepositoryTarget,
        base_branch: &str,
    ) -> Result<BranchRef, SyncError> {
        let base_sha = self
            .api
            .get_branch_sha(&target.owner, &target.name, base_branch)
            .await
            .map_err(|source| SyncError::RefResolution {
                branch: base_branch.to_string(),
                source,
            })?;

        let name = branch_name(&self.options.branch_namespace, self.clock.now());
        self.api
            .create_branch(&target.owner, &target.name, &name, &base_sha)
            .await
            .map_err(|source| SyncError::BranchCreate {
                branch: name.clone(),
                source,
            })?;

        info!(branch = %name, base = %base_branch, sha = %base_sha, "created branch");
        Ok(BranchRef { name, base_sha })
    }

    async fn resolve_existing(
        &self,
        target: &RepositoryTarget,
        branch: &str,
    ) -> Result<Vec<ExistingTemplateRecord>, SyncError> {
        let path = self.options.existing_lookup_path();
        let entries = self
            .api
            .get_content(&target.owner, &target.name, path, branch)
            .await
            .map_err(|source| SyncError::ExistingTemplateLookup {
                path: path.to_string(),
                source,
            })?;

        Ok(entries
            .unwrap_or_default()
            .into_iter()
            .filter(|entry| entry.is_file())
            .map(ExistingTemplateRecord::from)
            .collect())
    }

    async fn publish(
        &self,
        target: &RepositoryTarget,
        branch: &BranchRef,
        base_branch: &str,
        templates: &[Template],
    ) -> Result<(PullRequestHandle, Option<String>), SyncError> {
        let request = NewPullRequest {
            title: self.options.pr_title.clone(),
            body: self.options.pr_body.clone(),
            head: branch.name.clone(),
            base: base_branch.to_string(),
        };

        let pull_request = self
            .api
            .create_pull_request(&target.owner, &target.name, &request)
            .await
            .map_err(|source| SyncError::PullRequestCreate {
                head: request.head.clone(),
                base: request.base.clone(),
                source,
            })?;
        info!(
            number = pull_request.number,
            url = pull_request.html_url.as_deref().unwrap_or(""),
            templates = templates.len(),
            "opened pull request"
        );

        let Some(label) = self.options.effective_label() else {
            return Ok((pull_request, None));
        };

        self.api
            .add_labels(
                &target.owner,
                &target.name,
                pull_request.number,
                &[label.to_string()],
            )
            .await
            .map_err(|source| SyncError::LabelAttach {
                label: label.to_string(),
                number: pull_request.number,
                source,
            })?;
        info!(number = pull_request.number, label = label, "applied label");

        Ok((pull_request, Some(label.to_string())))
    }
}

/// One-shot convenience wrapper around [`TemplateSyncWorkflow`]
pub async fn sync_repository(
    api: Arc<dyn TemplateSyncApi>,
    target: &RepositoryTarget,
    options: SyncOptions,
) -> Result<SyncOutcome, SyncError> {
    TemplateSyncWorkflow::new(api, options).run(target).await
}
