use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Main configuration structure for the webhook service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// HTTP listener configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Chat platform channel configuration
    #[serde(default)]
    pub line: LineConfig,

    /// List store configuration
    #[serde(default)]
    pub store: StoreConfig,

    /// Event dispatch configuration
    #[serde(default)]
    pub dispatch: DispatchConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// What the webhook answers to anything other than POST
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NonPostResponse {
    /// 405 Method Not Allowed
    #[default]
    MethodNotAllowed,
    /// 200 "OK", for platforms that probe the endpoint with GET
    Ok,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Route the platform posts webhooks to
    #[serde(default = "default_webhook_path")]
    pub webhook_path: String,

    #[serde(default)]
    pub non_post_response: NonPostResponse,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    3000
}

fn default_webhook_path() -> String {
    "/webhook".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            webhook_path: default_webhook_path(),
            non_post_response: NonPostResponse::default(),
        }
    }
}

/// Channel credentials and reply API settings
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LineConfig {
    /// Bearer token for the reply API (`LINE_CHANNEL_ACCESS_TOKEN`)
    #[serde(default)]
    pub channel_access_token: String,

    /// Shared secret for webhook signatures (`LINE_CHANNEL_SECRET`)
    #[serde(default)]
    pub channel_secret: String,

    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Reply request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_base_url() -> String {
    "https://api.line.me".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

impl Default for LineConfig {
    fn default() -> Self {
        Self {
            channel_access_token: String::new(),
            channel_secret: String::new(),
            api_base_url: default_api_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn redact(secret: &str) -> &'static str {
    if secret.is_empty() {
        "<unset>"
    } else {
        "<redacted>"
    }
}

impl fmt::Debug for LineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LineConfig")
            .field("channel_access_token", &redact(&self.channel_access_token))
            .field("channel_secret", &redact(&self.channel_secret))
            .field("api_base_url", &self.api_base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl LineConfig {
    /// Copy safe to print or serialize: secrets replaced by markers.
    pub fn redacted(&self) -> Self {
        Self {
            channel_access_token: redact(&self.channel_access_token).to_string(),
            channel_secret: redact(&self.channel_secret).to_string(),
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Process-local table, lost on restart
    #[default]
    Memory,
    /// Durable `SQLite` rows
    Sqlite,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,

    /// Connection URL for the durable backend, e.g. `sqlite:data/kaimono.db`
    #[serde(default)]
    pub database_url: Option<String>,

    /// Maximum number of database connections in pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

const fn default_max_connections() -> u32 {
    5
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            database_url: None,
            max_connections: default_max_connections(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DispatchConfig {
    /// Upper bound for processing one event, reply included
    #[serde(default = "default_event_timeout_ms")]
    pub event_timeout_ms: u64,

    /// How many webhook event ids to remember for redelivery detection (0 disables)
    #[serde(default = "default_redelivery_window")]
    pub redelivery_window: usize,
}

const fn default_event_timeout_ms() -> u64 {
    8_000
}

const fn default_redelivery_window() -> usize {
    1024
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            event_timeout_ms: default_event_timeout_ms(),
            redelivery_window: default_redelivery_window(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotationPolicy {
    #[default]
    Daily,
    Hourly,
    Never,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Stdout format
    #[serde(default)]
    pub format: LogFormat,

    /// Directory for rolling JSON log files (stdout only when unset)
    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    #[serde(default)]
    pub rotation: RotationPolicy,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
            log_dir: None,
            rotation: RotationPolicy::default(),
        }
    }
}
