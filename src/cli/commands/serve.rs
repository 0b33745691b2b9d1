use std::sync::Arc;

use anyhow::Context;

use crate::app::app;
use crate::auth::TokenService;
use crate::config::AppConfig;
use crate::database::{manager, PgStore};
use crate::state::AppState;

pub async fn handle(config: AppConfig) -> anyhow::Result<()> {
    tracing::info!(
        "Starting Dev Journal API in {:?} mode, database {}",
        config.environment,
        config.redacted_database_url()
    );

    let pool = manager::connect(&config.database)
        .await
        .context("failed to connect to database")?;

    let tokens = TokenService::from_config(&config.security);
    tracing::info!("Issuing tokens valid for {}s", tokens.ttl_secs());

    let state = AppState::new(Arc::new(PgStore::new(pool.clone())), tokens);
    let router = app(state, &config.security.cors_origins);

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!(
        "Listening on {} (public host {}:{})",
        bind_addr,
        config.server.public_host,
        config.server.port
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    pool.close().await;
    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
