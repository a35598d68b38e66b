use super::errors::GitHubError;
use octocrab::models::repos::Object;
use octocrab::params::repos::Reference;
use octocrab::Octocrab;

/// Handler for GitHub branch reference operations
#[derive(Debug, Clone)]
pub struct BranchHandler {
    octocrab: Octocrab,
    owner: String,
    repo: String,
}

impl BranchHandler {
    pub fn new(octocrab: Octocrab, owner: String, repo: String) -> Self {
        Self {
            octocrab,
            owner,
            repo,
        }
    }

    /// Resolve the commit sha at the tip of `heads/<branch_name>`
    pub async fn get_tip_sha(&self, branch_name: &str) -> Result<String, GitHubError> {
        let reference = self
            .octocrab
            .repos(&self.owner, &self.repo)
            .get_ref(&Reference::Branch(branch_name.to_string()))
            .await?;

        match reference.object {
            Object::Commit { sha, .. } | Object::Tag { sha, .. } => Ok(sha),
            _ => Err(GitHubError::UnexpectedResponse(format!(
                "ref heads/{branch_name} does not point at a commit"
            ))),
        }
    }

    /// Create `refs/heads/<branch_name>` pointing at `sha`
    pub async fn create_branch(&self, branch_name: &str, sha: &str) -> Result<(), GitHubError> {
        self.octocrab
            .repos(&self.owner, &self.repo)
            .create_ref(&Reference::Branch(branch_name.to_string()), sha)
            .await?;

        tracing::debug!(branch = branch_name, sha = sha, "created branch reference");
        Ok(())
    }
}
