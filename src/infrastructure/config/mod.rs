//! Configuration management infrastructure
//!
//! Hierarchical configuration using figment:
//! - YAML file loading
//! - Environment variable overrides, including the platform's conventional names
//! - Configuration validation

pub mod loader;

pub use loader::{ConfigError, ConfigLoader, DEFAULT_CONFIG_FILE};
