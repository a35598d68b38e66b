//! Local template discovery.
//!
//! A template directory is read flat: every regular file directly inside it
//! becomes one [`Template`], named after its file name. Reads run
//! concurrently but the returned order always follows the directory listing.

use futures::future::try_join_all;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::sync::SyncError;

/// A named text file to be copied verbatim into the target repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub name: String,
    pub content: String,
}

/// Read every regular file directly inside `directory`
pub async fn load_templates(directory: &Path) -> Result<Vec<Template>, SyncError> {
    let metadata = tokio::fs::metadata(directory)
        .await
        .map_err(|source| match source.kind() {
            std::io::ErrorKind::NotFound => SyncError::DirectoryNotFound {
                path: directory.to_path_buf(),
            },
            _ => SyncError::ReadError {
                path: directory.to_path_buf(),
                source,
            },
        })?;
    if !metadata.is_dir() {
        return Err(SyncError::DirectoryNotFound {
            path: directory.to_path_buf(),
        });
    }

    let mut entries = tokio::fs::read_dir(directory)
        .await
        .map_err(|source| SyncError::ReadError {
            path: directory.to_path_buf(),
            source,
        })?;

    let mut candidates: Vec<(String, PathBuf)> = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|source| SyncError::ReadError {
            path: directory.to_path_buf(),
            source,
        })?
    {
        let path = entry.path();
        // follows symlinks, so a link to a regular file still counts
        let is_file = tokio::fs::metadata(&path)
            .await
            .map(|m| m.is_file())
            .unwrap_or(false);
        if !is_file {
            warn!(path = %path.display(), "skipping non-regular entry in template directory");
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        candidates.push((name, path));
    }

    let templates = try_join_all(
        candidates
            .into_iter()
            .map(|(name, path)| async move { read_template(name, path).await }),
    )
    .await?;

    debug!(
        directory = %directory.display(),
        count = templates.len(),
        "loaded templates"
    );
    Ok(templates)
}

async fn read_template(name: String, path: PathBuf) -> Result<Template, SyncError> {
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|source| SyncError::ReadError {
            path: path.clone(),
            source,
        })?;

    let content = String::from_utf8(bytes).map_err(|e| SyncError::ReadError {
        path: path.clone(),
        source: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
    })?;

    Ok(Template { name, content })
}
