use anyhow::Result;

pub mod config;
pub mod sync;

#[allow(async_fn_in_trait)]
pub trait Command {
    async fn execute(&self) -> Result<()>;
}

pub fn show_how_to_get_started() -> Result<()> {
    println!("📋 template-sync - Issue & PR Template Sync");
    println!();
    println!("To get started:");
    println!("  🚀 template-sync sync OWNER/REPO --template-dir ./templates");
    println!("  🏷️  template-sync sync OWNER/REPO --template-dir ./templates --label documentation");
    println!("  ⚙️  template-sync config     # Show effective configuration");
    println!();
    println!("Authentication:");
    println!("  🔑 export GITHUB_TOKEN=\"$(gh auth token)\"");
    println!();
    println!("💡 Each run opens one pull request on a fresh octoherd/<timestamp> branch.");
    Ok(())
}
