use anyhow::Result;

use super::Command;
use crate::config::TemplateSyncConfig;

pub struct ConfigCommand {
    config: TemplateSyncConfig,
}

impl ConfigCommand {
    pub fn new(config: TemplateSyncConfig) -> Self {
        Self { config }
    }
}

impl Command for ConfigCommand {
    async fn execute(&self) -> Result<()> {
        print!("{}", self.config.to_redacted_toml()?);
        Ok(())
    }
}
