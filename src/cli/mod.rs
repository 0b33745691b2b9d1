pub mod commands;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;

#[derive(Parser)]
#[command(name = "dev-journal")]
#[command(about = "Dev Journal API - project, task and note tracking backend")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP server (default)")]
    Serve,

    #[command(about = "Apply or revert database migrations")]
    Migrate {
        #[command(subcommand)]
        cmd: commands::migrate::MigrateCommands,
    },
}

pub async fn run(cli: Cli, config: AppConfig) -> anyhow::Result<()> {
    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => commands::serve::handle(config).await,
        Commands::Migrate { cmd } => commands::migrate::handle(cmd, &config).await,
    }
}
