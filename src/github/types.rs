
/// Destination repository as reported by the repository metadata endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryTarget {
    pub owner: String,
    pub name: String,
    pub default_branch: String,
    pub archived: bool,
}

impl RepositoryTarget {
    pub fn new(owner: impl Into<String>, name: impl Into<String>, default_branch: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
            default_branch: default_branch.into(),
            archived: false,
        }
    }

    /// Parse an `owner/repo` slug
    pub fn parse_slug(slug: &str, default_branch: &str) -> Option<Self> {
        let (owner, name) = slug.trim().split_once('/')?;
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return None;
        }
        Some(Self::new(owner, name, default_branch))
    }

    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

/// One entry returned by the contents API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentEntry {
    pub name: String,
    pub path: String,
    pub sha: String,
    /// `file`, `dir`, `symlink` or `submodule`
    pub entry_type: String,
}

impl ContentEntry {
    pub fn is_file(&self) -> bool {
        self.entry_type == "file"
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDeletion {
    pub path: String,
    /// Blob sha of the version being deleted
    pub sha: String,
    pub message: String,
    pub branch: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileWrite {
    pub path: String,
    /// Raw text; the client takes care of the transport encoding
    pub content: String,
    pub message: String,
    pub branch: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPullRequest {
    pub title: String,
    pub body: String,
    pub head: String,
    pub base: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestHandle {
    pub number: u64,
    pub html_url: Option<String>,
}
