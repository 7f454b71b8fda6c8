//! Implementation of the `kaimono check-config` command.

use anyhow::Result;
use clap::Args;
use std::path::Path;

use crate::cli::output::{output, CommandOutput};
use crate::domain::models::Config;
use crate::infrastructure::config::ConfigLoader;

#[derive(Args, Debug)]
pub struct CheckConfigArgs {
    /// Also fail when channel credentials are missing
    #[arg(long)]
    pub require_credentials: bool,
}

#[derive(Debug, serde::Serialize)]
pub struct CheckConfigOutput {
    pub valid: bool,
    pub credentials_present: bool,
    pub config: Config,
}

impl CommandOutput for CheckConfigOutput {
    fn to_human(&self) -> String {
        let mut lines = vec!["Configuration is valid.".to_string()];
        if !self.credentials_present {
            lines.push("Warning: channel credentials are not set; `serve` will refuse to start.".to_string());
        }
        lines.push(String::new());
        lines.push(serde_yaml::to_string(&self.config).unwrap_or_default());
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Summarize a loaded config with secrets redacted.
pub fn summarize(config: Config) -> CheckConfigOutput {
    let credentials_present = ConfigLoader::require_credentials(&config.line).is_ok();
    CheckConfigOutput {
        valid: true,
        credentials_present,
        config: Config {
            line: config.line.redacted(),
            ..config
        },
    }
}

pub fn execute(args: CheckConfigArgs, config_path: Option<&Path>, json_mode: bool) -> Result<()> {
    let config = super::load_config(config_path)?;
    if args.require_credentials {
        ConfigLoader::require_credentials(&config.line)?;
    }
    output(&summarize(config), json_mode);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secrets_never_printed() {
        let mut config = Config::default();
        config.line.channel_access_token = "token-value".to_string();
        config.line.channel_secret = "secret-value".to_string();

        let out = summarize(config);
        assert!(out.credentials_present);

        let human = out.to_human();
        let json = out.to_json().to_string();
        for rendered in [human, json] {
            assert!(!rendered.contains("token-value"));
            assert!(!rendered.contains("secret-value"));
            assert!(rendered.contains("<redacted>"));
        }
    }

    #[test]
    fn test_missing_credentials_warned() {
        let out = summarize(Config::default());
        assert!(!out.credentials_present);
        assert!(out.to_human().contains("Warning"));
    }
}
