use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use std::path::Path;
use thiserror::Error;

use crate::adapters::http::HEALTH_PATH;
use crate::domain::models::config::{Config, LineConfig};

/// Config file read from the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "kaimono.yaml";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid port: 0")]
    InvalidPort,

    #[error("Invalid webhook_path: {0:?}. Must start with '/', be a literal path and differ from /health")]
    InvalidWebhookPath(String),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid event_timeout_ms: 0. Must be positive")]
    InvalidEventTimeout,

    #[error("Invalid line.timeout_secs: 0. Must be positive")]
    InvalidReplyTimeout,

    #[error("Invalid max_connections: {0}. Must be at least 1")]
    InvalidMaxConnections(u32),

    #[error("Missing credential: {0}")]
    MissingCredential(&'static str),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. kaimono.yaml in the working directory (optional)
    /// 3. KAIMONO_* environment variables, nested with `__`
    /// 4. The platform's conventional variables: LINE_CHANNEL_ACCESS_TOKEN,
    ///    LINE_CHANNEL_SECRET and DATABASE_URL
    pub fn load() -> Result<Config> {
        Self::extract(Self::figment(Path::new(DEFAULT_CONFIG_FILE)))
            .context("Failed to extract configuration from figment")
    }

    /// Same layering, with `path` in place of kaimono.yaml
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        if !path.is_file() {
            anyhow::bail!("Config file not found: {}", path.display());
        }
        Self::extract(Self::figment(path))
            .with_context(|| format!("Failed to load config from {}", path.display()))
    }

    fn figment(file: &Path) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(file))
            .merge(Env::prefixed("KAIMONO_").split("__"))
            .merge(platform_env())
    }

    fn extract(figment: Figment) -> Result<Config> {
        let config: Config = figment.extract()?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.server.port == 0 {
            return Err(ConfigError::InvalidPort);
        }

        if !is_literal_route(&config.server.webhook_path) {
            return Err(ConfigError::InvalidWebhookPath(
                config.server.webhook_path.clone(),
            ));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        if config.dispatch.event_timeout_ms == 0 {
            return Err(ConfigError::InvalidEventTimeout);
        }

        if config.line.timeout_secs == 0 {
            return Err(ConfigError::InvalidReplyTimeout);
        }

        if config.store.max_connections == 0 {
            return Err(ConfigError::InvalidMaxConnections(
                config.store.max_connections,
            ));
        }

        Ok(())
    }

    /// Both channel credentials must be set before serving webhooks.
    pub fn require_credentials(line: &LineConfig) -> Result<(), ConfigError> {
        if line.channel_secret.trim().is_empty() {
            return Err(ConfigError::MissingCredential("LINE_CHANNEL_SECRET"));
        }
        if line.channel_access_token.trim().is_empty() {
            return Err(ConfigError::MissingCredential("LINE_CHANNEL_ACCESS_TOKEN"));
        }
        Ok(())
    }
}

/// A path the router can mount verbatim next to the health probe.
fn is_literal_route(path: &str) -> bool {
    path.starts_with('/')
        && path.trim_end_matches('/') != HEALTH_PATH
        && !path.contains(['{', '}', '*', ':'])
        && !path.contains("//")
}

fn platform_env() -> Env {
    Env::raw().filter_map(|key| {
        let target = match key.as_str().to_ascii_uppercase().as_str() {
            "LINE_CHANNEL_ACCESS_TOKEN" => "line.channel_access_token",
            "LINE_CHANNEL_SECRET" => "line.channel_secret",
            "DATABASE_URL" => "store.database_url",
            _ => return None,
        };
        Some(target.into())
    })
}
