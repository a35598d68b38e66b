pub mod client;
pub mod issues;
pub mod pulls;
pub mod branches;
pub mod contents;
pub mod types;
pub mod errors;

pub use client::{GitHubClient, TemplateSyncApi};
pub use errors::GitHubError;
pub use types::{
    ContentEntry, FileDeletion, FileWrite, NewPullRequest, PullRequestHandle, RepositoryTarget,
};
