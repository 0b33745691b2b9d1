use clap::Parser;
use tracing_subscriber::EnvFilter;

use dev_journal_api::cli::{self, Cli};
use dev_journal_api::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so DATABASE_URL, JWT_SECRET, etc. are picked up.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("dev_journal_api=info,tower_http=info")),
        )
        .init();

    let cli = Cli::parse();

    let config = AppConfig::from_env();
    config.validate()?;

    if let Err(e) = cli::run(cli, config).await {
        match std::env::var("CLI_VERBOSE").as_deref() {
            Ok("true") | Ok("1") => tracing::error!("{e:?}"),
            _ => tracing::error!("{e}"),
        }
        std::process::exit(1);
    }

    Ok(())
}
