mod cli;
mod commands;
mod presenter;
mod setup;

use anyhow::Result;
use clap::Parser;
use loginseam_core::config::AppConfig;
use loginseam_core::lifecycle;

use crate::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    lifecycle::init_tracing();

    let cli = Cli::parse();
    let config = AppConfig::load_or_default(cli.config.as_deref());

    match cli.command {
        Commands::Login { permissions, json } => {
            commands::login(&config, permissions, json).await?;
        }
        Commands::Run => {
            lifecycle::log_startup();
            commands::run(&config).await?;
            lifecycle::log_shutdown();
        }
    }

    Ok(())
}
