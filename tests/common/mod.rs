#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde_json::{json, Value};
use sqlx::postgres::PgPoolOptions;

use dev_journal_api::auth::TokenService;
use dev_journal_api::database::{manager, MemoryStore, PgStore};
use dev_journal_api::{app, AppState};

pub const TEST_SECRET: &str = "integration-test-secret";
pub const PASSWORD: &str = "password123";

/// One router instance per test, served on a free local port and backed by
/// an empty in-memory store.
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub client: reqwest::Client,
}

impl TestServer {
    pub async fn spawn() -> Result<Self> {
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let state = AppState::new(
            Arc::new(MemoryStore::new()),
            TokenService::new(TEST_SECRET, 3600),
        );
        let router = app(state, &["http://localhost:3000".to_string()]);

        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .with_context(|| format!("failed to bind port {}", port))?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        Ok(Self {
            port,
            base_url,
            client: reqwest::Client::new(),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Request against `/api/v1`, carrying `token` as the raw Authorization value.
    pub fn api(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let builder = self
            .client
            .request(method, format!("{}/api/v1{}", self.base_url, path));
        match token {
            Some(token) => builder.header("Authorization", token),
            None => builder,
        }
    }

    pub async fn register(&self, email: &str, password: &str) -> Result<reqwest::Response> {
        Ok(self
            .api(Method::POST, "/register", None)
            .json(&json!({
                "firstName": "Test",
                "lastName": "User",
                "email": email,
                "password": password
            }))
            .send()
            .await?)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<reqwest::Response> {
        Ok(self
            .api(Method::POST, "/login", None)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?)
    }

    /// Register `email` and return a token for it.
    pub async fn signup(&self, email: &str) -> Result<String> {
        let res = self.register(email, PASSWORD).await?;
        anyhow::ensure!(res.status() == StatusCode::CREATED, "register failed: {}", res.status());

        let res = self.login(email, PASSWORD).await?;
        anyhow::ensure!(res.status() == StatusCode::OK, "login failed: {}", res.status());

        let body = res.json::<Value>().await?;
        body["data"]["token"]
            .as_str()
            .map(str::to_string)
            .context("login response has no token")
    }

    /// Create a project owned by the token's user and return its id.
    pub async fn create_project(&self, token: &str, title: &str) -> Result<String> {
        let res = self
            .api(Method::POST, "/projects/create-new-project", Some(token))
            .json(&json!({
                "title": title,
                "description": "A project",
                "priority": "high",
                "deadline": "2026-12-31"
            }))
            .send()
            .await?;
        anyhow::ensure!(res.status() == StatusCode::CREATED, "create project failed: {}", res.status());

        let body = res.json::<Value>().await?;
        body["data"]["projectID"]
            .as_str()
            .map(str::to_string)
            .context("create response has no projectID")
    }
}

/// `PgStore` on the database named by `DATABASE_URL`, migrated to the latest
/// schema. `None` when the variable is unset, so callers can skip.
pub async fn pg_store() -> Result<Option<PgStore>> {
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        return Ok(None);
    };

    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&database_url)
        .await
        .context("failed to connect to DATABASE_URL")?;
    manager::migrate_up(&pool).await?;

    Ok(Some(PgStore::new(pool)))
}
