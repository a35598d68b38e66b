use anyhow::Result;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::sync::{
    SyncCapabilities, SyncOptions, DEFAULT_BRANCH_NAMESPACE, DEFAULT_DESTINATION_DIR,
    DEFAULT_EXISTING_TEMPLATE_PATH, DEFAULT_PR_BODY, DEFAULT_PR_TITLE,
};

pub const DEFAULT_CONFIG_FILE: &str = "template-sync.toml";
const ENV_PREFIX: &str = "TEMPLATE_SYNC";

/// Main configuration structure for template-sync
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct TemplateSyncConfig {
    /// GitHub configuration
    pub github: GitHubConfig,
    /// Workflow settings
    pub sync: SyncConfig,
    /// Logging settings
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// GitHub API token (can be set via env var)
    pub token: Option<String>,
    /// API root, for GitHub Enterprise
    pub api_base_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Local directory holding the templates
    pub template_directory: Option<PathBuf>,
    /// Label attached to the pull request
    pub label_name: Option<String>,
    pub branch_namespace: String,
    /// Repository directory templates are written into
    pub destination_dir: String,
    /// Canonical path probed for an existing template
    pub existing_template_path: String,
    pub pr_title: String,
    pub pr_body: String,
    pub check_archived: bool,
    pub replace_all_existing: bool,
    pub label_on_create: bool,
    /// Used when the repository metadata is not fetched
    pub default_branch: String,
    pub timeout_seconds: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        let capabilities = SyncCapabilities::default();
        Self {
            template_directory: None,
            label_name: None,
            branch_namespace: DEFAULT_BRANCH_NAMESPACE.to_string(),
            destination_dir: DEFAULT_DESTINATION_DIR.to_string(),
            existing_template_path: DEFAULT_EXISTING_TEMPLATE_PATH.to_string(),
            pr_title: DEFAULT_PR_TITLE.to_string(),
            pr_body: DEFAULT_PR_BODY.to_string(),
            check_archived: capabilities.check_archived,
            replace_all_existing: capabilities.replace_all_existing,
            label_on_create: capabilities.label_on_create,
            default_branch: "main".to_string(),
            timeout_seconds: 300, // 5 minutes
        }
    }
}

impl SyncConfig {
    pub fn to_options(&self) -> SyncOptions {
        SyncOptions {
            template_directory: self.template_directory.clone(),
            label_name: self.label_name.clone(),
            branch_namespace: self.branch_namespace.clone(),
            destination_dir: self.destination_dir.clone(),
            existing_template_path: self.existing_template_path.clone(),
            pr_title: self.pr_title.clone(),
            pr_body: self.pr_body.clone(),
            capabilities: SyncCapabilities {
                check_archived: self.check_archived,
                replace_all_existing: self.replace_all_existing,
                label_on_create: self.label_on_create,
            },
            timeout: (self.timeout_seconds > 0).then(|| Duration::from_secs(self.timeout_seconds)),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level
    pub log_level: String,
    /// Emit JSON lines instead of human-readable logs
    pub json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json: false,
        }
    }
}

impl TemplateSyncConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Default values
    /// 2. Configuration file (`template-sync.toml` or `path`)
    /// 3. Environment variables (`TEMPLATE_SYNC_<SECTION>__<KEY>`)
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        match path {
            Some(path) => {
                builder = builder.add_source(File::from(path));
            }
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                builder = builder.add_source(File::from(Path::new(DEFAULT_CONFIG_FILE)));
            }
            None => {}
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let mut template_sync_config: TemplateSyncConfig = builder.build()?.try_deserialize()?;

        // Special handling for GitHub token - check multiple sources
        if template_sync_config.github.token.is_none() {
            if let Ok(token) = std::env::var("TEMPLATE_SYNC_GITHUB_TOKEN") {
                template_sync_config.github.token = Some(token);
            } else if let Ok(token) = std::env::var("GITHUB_TOKEN") {
                template_sync_config.github.token = Some(token);
            }
        }

        Ok(template_sync_config)
    }

    /// Load .env file if it exists
    pub fn load_env_file() -> Result<()> {
        if Path::new(".env").exists() {
            dotenvy::dotenv()?;
            tracing::info!("Loaded environment variables from .env file");
        }
        Ok(())
    }

    /// TOML rendering with the token masked
    pub fn to_redacted_toml(&self) -> Result<String> {
        let mut redacted = self.clone();
        if redacted.github.token.is_some() {
            redacted.github.token = Some("********".to_string());
        }
        Ok(toml::to_string_pretty(&redacted)?)
    }
}
