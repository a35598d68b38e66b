use octocrab::Octocrab;
use super::errors::GitHubError;

/// Handler for GitHub issue operations.
///
/// Pull requests share their number with an issue, so labels for a freshly
/// opened pull request go through here.
#[derive(Debug)]
pub struct IssueHandler {
    octocrab: Octocrab,
    owner: String,
    repo: String,
}

impl IssueHandler {
    pub fn new(octocrab: Octocrab, owner: String, repo: String) -> Self {
        Self {
            octocrab,
            owner,
            repo,
        }
    }

    /// Add labels to an issue or pull request
    pub async fn add_labels(&self, issue_number: u64, labels: &[String]) -> Result<(), GitHubError> {
        self.octocrab
            .issues(&self.owner, &self.repo)
            .add_labels(issue_number, labels)
            .await
            .map_err(GitHubError::ApiError)?;
        Ok(())
    }
}
