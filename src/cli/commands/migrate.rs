use anyhow::Context;
use clap::Subcommand;

use crate::config::AppConfig;
use crate::database::manager;

#[derive(Subcommand)]
pub enum MigrateCommands {
    #[command(about = "Apply all pending migrations")]
    Up,

    #[command(about = "Revert all applied migrations")]
    Down,
}

pub async fn handle(cmd: MigrateCommands, config: &AppConfig) -> anyhow::Result<()> {
    tracing::info!("Migrating {}", config.redacted_database_url());

    let pool = manager::connect(&config.database)
        .await
        .context("failed to connect to database")?;

    match cmd {
        MigrateCommands::Up => manager::migrate_up(&pool).await.context("migrate up failed")?,
        MigrateCommands::Down => manager::migrate_down(&pool)
            .await
            .context("migrate down failed")?,
    }

    pool.close().await;
    Ok(())
}
