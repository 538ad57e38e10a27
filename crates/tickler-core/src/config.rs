use anyhow::Result;
use config::Config;
use serde::Deserialize;

use crate::constants::MEMORY_DATABASE_URL;
use crate::error::{CoreError, CoreResult};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub web: WebConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u8,
}

impl DatabaseConfig {
    /// ## Summary
    /// Returns `true` when tasks should be kept in process memory instead of Postgres.
    #[must_use]
    pub fn is_memory(&self) -> bool {
        self.url.trim() == MEMORY_DATABASE_URL
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// ## Summary
    /// Returns the bind address in the format "host:port".
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    /// Directory served for every path outside the API.
    pub dir: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Settings {
    /// ## Summary
    /// Loads configuration from an optional `config.toml` and environment variables.
    /// Environment variables take precedence over file values.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        Self::load_from(
            config::File::with_name("config.toml").required(false),
            environment(),
        )
    }

    /// Layers defaults, then `file`, then `env`. Later sources win.
    fn load_from<F>(file: F, env: config::Environment) -> Result<Self>
    where
        F: config::Source + Send + Sync + 'static,
    {
        Ok(Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 7540)?
            .set_default("database.url", MEMORY_DATABASE_URL)?
            .set_default("database.max_connections", 4)?
            .set_default("web.dir", "./web")?
            .set_default("logging.level", "info")?
            .add_source(file)
            .add_source(env)
            .build()?
            .try_deserialize::<Settings>()?)
    }

    /// ## Summary
    /// Rejects settings the server cannot start with.
    ///
    /// ## Errors
    /// Returns [`CoreError::ConfigError`] for a zero-sized Postgres pool, a
    /// blank database URL, or a blank web directory.
    pub fn validate(&self) -> CoreResult<()> {
        if self.database.url.trim().is_empty() {
            return Err(CoreError::ConfigError("database.url must not be empty".to_string()));
        }
        if !self.database.is_memory() && self.database.max_connections == 0 {
            return Err(CoreError::ConfigError(
                "database.max_connections must be at least 1".to_string(),
            ));
        }
        if self.web.dir.trim().is_empty() {
            return Err(CoreError::ConfigError("web.dir must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Environment source: `SERVER_PORT` maps to `server.port`.
fn environment() -> config::Environment {
    config::Environment::default()
        .convert_case(config::Case::Snake)
        .separator("_")
        .ignore_empty(true)
        .try_parsing(true)
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    if let Err(e) = dotenvy::dotenv() {
        tracing::debug!(error = %e, "No .env file loaded");
    }

    let settings = Settings::load()?;
    settings.validate()?;
    Ok(settings)
}
