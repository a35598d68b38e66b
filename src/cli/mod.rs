use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;

#[derive(Parser)]
#[command(name = "template-sync")]
#[command(about = "Sync issue and pull request templates into a GitHub repository")]
#[command(long_about = "template-sync copies a local directory of templates into a repository's .github/ \
                       directory on a fresh branch and opens a pull request for review. Run it once per \
                       repository; archived repositories are skipped.")]
pub struct Cli {
    /// Configuration file (defaults to ./template-sync.toml when present)
    #[arg(long, global = true, help = "Path to a template-sync.toml configuration file")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open a pull request that syncs the templates into one repository
    Sync(SyncArgs),
    /// Print the effective configuration (token redacted)
    Config,
}

#[derive(Args, Debug, Clone)]
pub struct SyncArgs {
    /// Target repository
    #[arg(value_name = "OWNER/REPO", help = "Repository to open the pull request against")]
    pub repository: String,

    /// Local template directory
    #[arg(long, value_name = "DIR", help = "Directory whose files are copied into .github/")]
    pub template_dir: Option<PathBuf>,

    /// Label for the pull request
    #[arg(long, value_name = "NAME", help = "Label attached to the created pull request")]
    pub label: Option<String>,

    /// Do not fetch repository metadata before syncing
    #[arg(long, help = "Skip the archived-repository check and use --default-branch as base")]
    pub no_archive_check: bool,

    /// Replace every same-named file in the destination directory
    #[arg(long, help = "Look up all files in the destination directory, not only the pull request template")]
    pub replace_all_existing: bool,

    /// Branch namespace
    #[arg(long, value_name = "NS", help = "Prefix of the created branch name")]
    pub namespace: Option<String>,

    /// Base branch when metadata is not fetched
    #[arg(long, value_name = "BRANCH", help = "Default branch used with --no-archive-check")]
    pub default_branch: Option<String>,

    /// Overall timeout
    #[arg(long, value_name = "SECS", help = "Abort the run after this many seconds (0 disables)")]
    pub timeout: Option<u64>,
}
