//! CLI command implementations.

pub mod check_config;
pub mod parse;
pub mod serve;

use anyhow::Result;
use std::path::Path;

use crate::domain::models::Config;
use crate::infrastructure::config::ConfigLoader;

/// Load configuration from `path`, or from the default layering when unset.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    }
}
