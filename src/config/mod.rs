use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

/// Signing secret used when `JWT_SECRET` is not set. Refused in production.
pub const DEFAULT_JWT_SECRET: &str = "not-so-secret-anymore?";

/// One week.
pub const DEFAULT_JWT_EXPIRATION_SECS: u64 = 3600 * 24 * 7;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("JWT_SECRET must be set to a non-default value in production")]
    DefaultSecretInProduction,

    #[error("JWT_SECRET must not be empty")]
    EmptySecret,

    #[error("Invalid database URL: {0}")]
    InvalidDatabaseUrl(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub public_host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub connection_timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    #[serde(skip_serializing)]
    pub jwt_secret: String,
    pub jwt_expiration_secs: u64,
    pub cors_origins: Vec<String>,
}

impl AppConfig {
    /// Build the configuration from the process environment.
    ///
    /// `APP_ENV` selects the preset, then individual variables override it.
    /// Call once at startup and pass the result down.
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        Self::preset(environment).with_overrides(|key| env::var(key).ok())
    }

    pub fn preset(environment: Environment) -> Self {
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
    }

    /// Apply overrides from a key lookup. Unparsable numeric values keep the preset.
    fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        // Server overrides
        if let Some(v) = lookup("PUBLIC_HOST") {
            self.server.public_host = v;
        }
        if let Some(v) = lookup("PORT") {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }

        // Database overrides
        match lookup("DATABASE_URL") {
            Some(url) => self.database.url = url,
            None => {
                self.database.url = database_url_from_parts(
                    &lookup("DB_USER").unwrap_or_else(|| "postgres".to_string()),
                    &lookup("DB_PASSWORD").unwrap_or_else(|| "mypassword".to_string()),
                    &lookup("DB_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
                    &lookup("DB_PORT").unwrap_or_else(|| "5432".to_string()),
                    &lookup("DB_NAME").unwrap_or_else(|| "dev_journal".to_string()),
                );
            }
        }
        if let Some(v) = lookup("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Some(v) = lookup("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = v.parse().unwrap_or(self.database.connection_timeout);
        }

        // Security overrides
        if let Some(v) = lookup("JWT_SECRET") {
            self.security.jwt_secret = v;
        }
        if let Some(v) = lookup("JWT_EXPIRATION_IN_SECONDS") {
            self.security.jwt_expiration_secs = v.parse().unwrap_or(self.security.jwt_expiration_secs);
        }
        if let Some(v) = lookup("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        self
    }

    /// Reject configurations that must never reach a running server.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.security.jwt_secret.is_empty() {
            return Err(ConfigError::EmptySecret);
        }
        if self.security.jwt_secret == DEFAULT_JWT_SECRET {
            if self.environment == Environment::Production {
                return Err(ConfigError::DefaultSecretInProduction);
            }
            tracing::warn!("Using the default JWT secret; set JWT_SECRET before deploying");
        }
        url::Url::parse(&self.database.url)
            .map_err(|e| ConfigError::InvalidDatabaseUrl(e.to_string()))?;
        Ok(())
    }

    /// Database URL with the password masked, for logging.
    pub fn redacted_database_url(&self) -> String {
        match url::Url::parse(&self.database.url) {
            Ok(mut url) => {
                if url.password().is_some() {
                    let _ = url.set_password(Some("***"));
                }
                url.to_string()
            }
            Err(_) => "<invalid database url>".to_string(),
        }
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                public_host: "http://localhost".to_string(),
                port: 8080,
            },
            database: DatabaseConfig {
                url: String::new(),
                max_connections: 10,
                connection_timeout: 30,
            },
            security: SecurityConfig {
                jwt_secret: DEFAULT_JWT_SECRET.to_string(),
                jwt_expiration_secs: DEFAULT_JWT_EXPIRATION_SECS,
                cors_origins: vec!["http://localhost:3000".to_string()],
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig {
                public_host: "http://localhost".to_string(),
                port: 8080,
            },
            database: DatabaseConfig {
                url: String::new(),
                max_connections: 20,
                connection_timeout: 10,
            },
            security: SecurityConfig {
                jwt_secret: DEFAULT_JWT_SECRET.to_string(),
                jwt_expiration_secs: DEFAULT_JWT_EXPIRATION_SECS,
                cors_origins: Vec::new(),
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig {
                public_host: "http://localhost".to_string(),
                port: 8080,
            },
            database: DatabaseConfig {
                url: String::new(),
                max_connections: 50,
                connection_timeout: 5,
            },
            security: SecurityConfig {
                jwt_secret: DEFAULT_JWT_SECRET.to_string(),
                jwt_expiration_secs: DEFAULT_JWT_EXPIRATION_SECS,
                cors_origins: Vec::new(),
            },
        }
    }
}

fn database_url_from_parts(user: &str, password: &str, host: &str, port: &str, name: &str) -> String {
    let mut url = match url::Url::parse(&format!("postgres://{}:{}", host, port)) {
        Ok(url) => url,
        Err(_) => return format!("postgres://{}:{}@{}:{}/{}", user, password, host, port, name),
    };
    let _ = url.set_username(user);
    let _ = url.set_password(Some(password));
    url.set_path(&format!("/{}", name));
    url.to_string()
}
