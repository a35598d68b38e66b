use anyhow::Result;
use clap::Parser;

use template_sync::cli::commands::config::ConfigCommand;
use template_sync::cli::commands::sync::SyncCommand;
use template_sync::cli::commands::{show_how_to_get_started, Command};
use template_sync::cli::{Cli, Commands};
use template_sync::{init_telemetry, TemplateSyncConfig};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        return show_how_to_get_started();
    };

    let _ = TemplateSyncConfig::load_env_file();
    let config = TemplateSyncConfig::load(cli.config.as_deref())?;

    match command {
        Commands::Sync(args) => {
            init_telemetry(&config.observability)?;
            tokio::runtime::Runtime::new()?
                .block_on(async { SyncCommand::new(args, config).execute().await })
        }
        Commands::Config => tokio::runtime::Runtime::new()?
            .block_on(async { ConfigCommand::new(config).execute().await }),
    }
}
