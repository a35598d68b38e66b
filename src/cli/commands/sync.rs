use anyhow::{anyhow, Result};
use std::sync::Arc;

use super::Command;
use crate::cli::SyncArgs;
use crate::config::{GitHubConfig, TemplateSyncConfig};
use crate::github::{GitHubClient, GitHubError, RepositoryTarget, TemplateSyncApi};
use crate::sync::{SyncOptions, SyncOutcome, TemplateSyncWorkflow};

pub struct SyncCommand {
    args: SyncArgs,
    config: TemplateSyncConfig,
}

impl SyncCommand {
    pub fn new(args: SyncArgs, config: TemplateSyncConfig) -> Self {
        Self { args, config }
    }

    /// Configuration values overridden by whatever was given on the command line
    pub fn options(&self) -> SyncOptions {
        let mut sync = self.config.sync.clone();
        if let Some(dir) = &self.args.template_dir {
            sync.template_directory = Some(dir.clone());
        }
        if let Some(label) = &self.args.label {
            sync.label_name = Some(label.clone());
        }
        if self.args.no_archive_check {
            sync.check_archived = false;
        }
        if self.args.replace_all_existing {
            sync.replace_all_existing = true;
        }
        if let Some(namespace) = &self.args.namespace {
            sync.branch_namespace = namespace.clone();
        }
        if let Some(timeout) = self.args.timeout {
            sync.timeout_seconds = timeout;
        }
        sync.to_options()
    }

    pub fn target(&self) -> Result<RepositoryTarget> {
        let default_branch = self
            .args
            .default_branch
            .as_deref()
            .unwrap_or(&self.config.sync.default_branch);
        RepositoryTarget::parse_slug(&self.args.repository, default_branch).ok_or_else(|| {
            anyhow!(
                "Invalid repository '{}', expected OWNER/REPO",
                self.args.repository
            )
        })
    }

    fn client(github: &GitHubConfig) -> Result<GitHubClient, GitHubError> {
        let token = github.token.as_deref().unwrap_or_default();
        match github.api_base_url.as_deref() {
            Some(url) => GitHubClient::with_base_url(token, url),
            None => GitHubClient::new(token),
        }
    }
}

impl Command for SyncCommand {
    async fn execute(&self) -> Result<()> {
        let target = self.target()?;
        let options = self.options();

        // configuration problems surface before any client is built
        if options.template_directory.is_none() {
            return Err(crate::sync::SyncError::MissingTemplateDirectory.into());
        }

        let api: Arc<dyn TemplateSyncApi> =
            Arc::new(Self::client(&self.config.github).map_err(|e| anyhow!("{e}"))?);

        println!("🔄 Syncing templates into {}", target.full_name());
        let outcome = TemplateSyncWorkflow::new(api, options).run(&target).await?;

        match outcome {
            SyncOutcome::Skipped { repository, .. } => {
                println!("⏭️  {repository} is archived, nothing to do");
            }
            SyncOutcome::Completed(report) => {
                println!("🌿 Branch: {} (from {} @ {})", report.branch.name, report.base_branch, report.branch.base_sha);
                for path in &report.deleted {
                    println!("🗑️  Replaced {path}");
                }
                for path in &report.written {
                    println!("📝 Wrote {path}");
                }
                match &report.pull_request.html_url {
                    Some(url) => println!("📋 Opened PR #{}: {url}", report.pull_request.number),
                    None => println!("📋 Opened PR #{}", report.pull_request.number),
                }
                if let Some(label) = &report.label {
                    println!("🏷️  Labeled '{label}'");
                }
            }
        }
        Ok(())
    }
}
