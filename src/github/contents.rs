use super::errors::GitHubError;
use super::types::{ContentEntry, FileDeletion, FileWrite};
use octocrab::Octocrab;

/// Handler for the repository contents API
#[derive(Debug, Clone)]
pub struct ContentHandler {
    octocrab: Octocrab,
    owner: String,
    repo: String,
}

impl ContentHandler {
    pub fn new(octocrab: Octocrab, owner: String, repo: String) -> Self {
        Self {
            octocrab,
            owner,
            repo,
        }
    }

    /// Fetch the entries at `path` on `reference`.
    ///
    /// A file yields a single entry, a directory yields its listing.
    /// Returns `Ok(None)` when GitHub answers 404.
    pub async fn get_content(
        &self,
        path: &str,
        reference: &str,
    ) -> Result<Option<Vec<ContentEntry>>, GitHubError> {
        let result = self
            .octocrab
            .repos(&self.owner, &self.repo)
            .get_content()
            .path(path)
            .r#ref(reference)
            .send()
            .await;

        match result {
            Ok(items) => Ok(Some(
                items
                    .items
                    .into_iter()
                    .map(|item| ContentEntry {
                        name: item.name,
                        path: item.path,
                        sha: item.sha,
                        entry_type: item.r#type,
                    })
                    .collect(),
            )),
            Err(octocrab::Error::GitHub { source, .. }) if source.status_code.as_u16() == 404 => {
                Ok(None)
            }
            Err(e) => Err(GitHubError::ApiError(e)),
        }
    }

    pub async fn delete_file(&self, deletion: &FileDeletion) -> Result<(), GitHubError> {
        self.octocrab
            .repos(&self.owner, &self.repo)
            .delete_file(&deletion.path, &deletion.message, &deletion.sha)
            .branch(&deletion.branch)
            .send()
            .await?;
        Ok(())
    }

    /// Create or overwrite a file; octocrab base64-encodes the content
    pub async fn create_file(&self, write: &FileWrite) -> Result<(), GitHubError> {
        self.octocrab
            .repos(&self.owner, &self.repo)
            .create_file(&write.path, &write.message, write.content.as_bytes())
            .branch(&write.branch)
            .send()
            .await?;
        Ok(())
    }
}
