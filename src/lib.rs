// template-sync - push shared issue/PR templates into a GitHub repository
// This exposes the core components for testing and integration

pub mod cli;
pub mod config;
pub mod github;
pub mod sync;
pub mod telemetry;
pub mod templates;

// Re-export key types for easy access
pub use config::{ObservabilityConfig, TemplateSyncConfig};
pub use github::{GitHubClient, GitHubError, RepositoryTarget, TemplateSyncApi};
pub use sync::{
    sync_repository, SyncCapabilities, SyncError, SyncOptions, SyncOutcome, SyncReport,
    TemplateSyncWorkflow,
};
pub use telemetry::{create_sync_span, generate_correlation_id, init_telemetry};
pub use templates::{load_templates, Template};
