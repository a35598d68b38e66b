use async_trait::async_trait;
use octocrab::Octocrab;

#[cfg(any(test, feature = "testing"))]
use mockall::automock;

use super::branches::BranchHandler;
use super::contents::ContentHandler;
use super::errors::GitHubError;
use super::issues::IssueHandler;
use super::pulls::PullRequestHandler;
use super::types::{
    ContentEntry, FileDeletion, FileWrite, NewPullRequest, PullRequestHandle, RepositoryTarget,
};

/// The slice of the GitHub REST API the template sync workflow consumes.
///
/// Every call is addressed by owner/repo so one handle can serve any number
/// of repositories.
#[cfg_attr(any(test, feature = "testing"), automock)]
#[async_trait]
pub trait TemplateSyncApi: Send + Sync {
    /// Repository metadata: archived flag and default branch
    async fn get_repository(&self, owner: &str, repo: &str) -> Result<RepositoryTarget, GitHubError>;

    /// Tip commit sha of `heads/<branch>`
    async fn get_branch_sha(&self, owner: &str, repo: &str, branch: &str) -> Result<String, GitHubError>;

    async fn create_branch(&self, owner: &str, repo: &str, branch: &str, sha: &str) -> Result<(), GitHubError>;

    /// `Ok(None)` when nothing exists at `path`
    async fn get_content(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        reference: &str,
    ) -> Result<Option<Vec<ContentEntry>>, GitHubError>;

    async fn delete_file(&self, owner: &str, repo: &str, deletion: &FileDeletion) -> Result<(), GitHubError>;

    async fn create_file(&self, owner: &str, repo: &str, write: &FileWrite) -> Result<(), GitHubError>;

    async fn create_pull_request(
        &self,
        owner: &str,
        repo: &str,
        request: &NewPullRequest,
    ) -> Result<PullRequestHandle, GitHubError>;

    async fn add_labels(&self, owner: &str, repo: &str, issue_number: u64, labels: &[String]) -> Result<(), GitHubError>;
}

#[derive(Debug, Clone)]
pub struct GitHubClient {
    octocrab: Octocrab,
}

impl GitHubClient {
    pub fn new(token: &str) -> Result<Self, GitHubError> {
        Self::build(token, None)
    }

    /// Point the client at a different API root (GitHub Enterprise, test servers)
    pub fn with_base_url(token: &str, base_url: &str) -> Result<Self, GitHubError> {
        Self::build(token, Some(base_url))
    }

    fn build(token: &str, base_url: Option<&str>) -> Result<Self, GitHubError> {
        let token = token.trim();
        if token.is_empty() || token == "YOUR_GITHUB_TOKEN_HERE" {
            return Err(GitHubError::TokenNotFound(
                "GitHub token not found. Please set GITHUB_TOKEN or TEMPLATE_SYNC_GITHUB_TOKEN.".to_string(),
            ));
        }

        let mut builder = Octocrab::builder();
        if let Some(url) = base_url {
            builder = builder.base_uri(url)?;
        }
        let octocrab = builder.personal_token(token.to_string()).build()?;

        Ok(Self { octocrab })
    }

    pub fn branches(&self, owner: &str, repo: &str) -> BranchHandler {
        BranchHandler::new(self.octocrab.clone(), owner.to_string(), repo.to_string())
    }

    pub fn contents(&self, owner: &str, repo: &str) -> ContentHandler {
        ContentHandler::new(self.octocrab.clone(), owner.to_string(), repo.to_string())
    }

    pub fn pulls(&self, owner: &str, repo: &str) -> PullRequestHandler {
        PullRequestHandler::new(self.octocrab.clone(), owner.to_string(), repo.to_string())
    }

    pub fn issues(&self, owner: &str, repo: &str) -> IssueHandler {
        IssueHandler::new(self.octocrab.clone(), owner.to_string(), repo.to_string())
    }
}

#[async_trait]
impl TemplateSyncApi for GitHubClient {
    async fn get_repository(&self, owner: &str, repo: &str) -> Result<RepositoryTarget, GitHubError> {
        let repository = self.octocrab.repos(owner, repo).get().await?;

        let default_branch = repository.default_branch.ok_or_else(|| {
            GitHubError::UnexpectedResponse(format!("{owner}/{repo} reported no default branch"))
        })?;

        Ok(RepositoryTarget {
            owner: owner.to_string(),
            name: repo.to_string(),
            default_branch,
            archived: repository.archived.unwrap_or(false),
        })
    }

    async fn get_branch_sha(&self, owner: &str, repo: &str, branch: &str) -> Result<String, GitHubError> {
        self.branches(owner, repo).get_tip_sha(branch).await
    }

    async fn create_branch(&self, owner: &str, repo: &str, branch: &str, sha: &str) -> Result<(), GitHubError> {
        self.branches(owner, repo).create_branch(branch, sha).await
    }

    async fn get_content(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        reference: &str,
    ) -> Result<Option<Vec<ContentEntry>>, GitHubError> {
        self.contents(owner, repo).get_content(path, reference).await
    }

    async fn delete_file(&self, owner: &str, repo: &str, deletion: &FileDeletion) -> Result<(), GitHubError> {
        self.contents(owner, repo).delete_file(deletion).await
    }

    async fn create_file(&self, owner: &str, repo: &str, write: &FileWrite) -> Result<(), GitHubError> {
        self.contents(owner, repo).create_file(write).await
    }

    async fn create_pull_request(
        &self,
        owner: &str,
        repo: &str,
        request: &NewPullRequest,
    ) -> Result<PullRequestHandle, GitHubError> {
        self.pulls(owner, repo).create_pull_request(request).await
    }

    async fn add_labels(&self, owner: &str, repo: &str, issue_number: u64, labels: &[String]) -> Result<(), GitHubError> {
        self.issues(owner, repo).add_labels(issue_number, labels).await
    }
}
