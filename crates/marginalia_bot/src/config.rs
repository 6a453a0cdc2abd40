//! Bot service configuration, loaded from TOML with environment overrides.

use derive_getters::Getters;
use marginalia_error::{ConfigError, MarginaliaResult};
use marginalia_session::SessionStoreConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use typed_builder::TypedBuilder;

/// Environment variable overriding the configured database URL.
pub const DATABASE_URL_VAR: &str = "MARGINALIA_DB";

/// Configuration for the bot service.
#[derive(Debug, Clone, Serialize, Deserialize, Getters, TypedBuilder)]
pub struct BotConfig {
    /// Database configuration
    #[builder(setter(into))]
    database: DatabaseConfig,
    /// Session store configuration
    #[serde(default)]
    #[builder(default)]
    session: SessionConfig,
}

impl BotConfig {
    /// Load bot configuration from a TOML file.
    #[tracing::instrument(skip(path))]
    pub fn from_file(path: impl AsRef<Path>) -> MarginaliaResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        Ok(toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?)
    }

    /// The database URL, with [`DATABASE_URL_VAR`] taking precedence over
    /// the file. A `.env` file is honored if present.
    pub fn database_url(&self) -> String {
        dotenvy::dotenv().ok();
        std::env::var(DATABASE_URL_VAR).unwrap_or_else(|_| self.database.url.clone())
    }
}

/// Configuration for the relational store.
#[derive(Debug, Clone, Serialize, Deserialize, Getters, TypedBuilder)]
pub struct DatabaseConfig {
    /// Connection URL; a file path for SQLite
    #[builder(setter(into))]
    url: String,
}

/// Configuration for the workflow session store.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Getters, TypedBuilder)]
pub struct SessionConfig {
    /// Seconds an untouched workflow stays resumable
    #[serde(default = "default_ttl_secs")]
    #[builder(default = default_ttl_secs())]
    ttl_secs: u64,
}

fn default_ttl_secs() -> u64 {
    3600
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
        }
    }
}

impl From<&SessionConfig> for SessionStoreConfig {
    fn from(config: &SessionConfig) -> Self {
        SessionStoreConfig::default().with_ttl(Duration::from_secs(config.ttl_secs))
    }
}
