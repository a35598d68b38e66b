use std::path::PathBuf;
use thiserror::Error;

use crate::github::GitHubError;

/// Every way a template sync run can fail.
///
/// A 404 on the existing-template lookup is not here: it means "nothing to
/// replace" and never surfaces as an error.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("no template directory configured (set --template-dir or sync.template_directory)")]
    MissingTemplateDirectory,

    #[error("template directory not found: {}", path.display())]
    DirectoryNotFound { path: PathBuf },

    #[error("failed to read template {}: {source}", path.display())]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to fetch repository metadata for {repository}: {source}")]
    RepositoryLookup {
        repository: String,
        #[source]
        source: GitHubError,
    },

    #[error("failed to resolve default branch '{branch}': {source}")]
    RefResolution {
        branch: String,
        #[source]
        source: GitHubError,
    },

    #[error("failed to create branch '{branch}': {source}")]
    BranchCreate {
        branch: String,
        #[source]
        source: GitHubError,
    },

    #[error("failed to look up existing templates at '{path}': {source}")]
    ExistingTemplateLookup {
        path: String,
        #[source]
        source: GitHubError,
    },

    #[error("failed to delete '{path}' on branch '{branch}': {source}")]
    DeleteFile {
        path: String,
        branch: String,
        #[source]
        source: GitHubError,
    },

    #[error("failed to write '{path}' on branch '{branch}': {source}")]
    WriteFile {
        path: String,
        branch: String,
        #[source]
        source: GitHubError,
    },

    #[error("failed to open pull request from '{head}' into '{base}': {source}")]
    PullRequestCreate {
        head: String,
        base: String,
        #[source]
        source: GitHubError,
    },

    #[error("failed to add label '{label}' to pull request #{number}: {source}")]
    LabelAttach {
        label: String,
        number: u64,
        #[source]
        source: GitHubError,
    },

    #[error("template sync timed out after {seconds}s")]
    Timeout { seconds: u64 },
}

impl SyncError {
    /// Whether branch commits may already exist when this error surfaces
    pub fn leaves_partial_branch(&self) -> bool {
        matches!(
            self,
            SyncError::DeleteFile { .. }
                | SyncError::WriteFile { .. }
                | SyncError::PullRequestCreate { .. }
                | SyncError::LabelAttach { .. }
                | SyncError::ExistingTemplateLookup { .. }
                | SyncError::Timeout { .. }
        )
    }
}
