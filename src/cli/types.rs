//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::cli::commands::{check_config::CheckConfigArgs, parse::ParseArgs, serve::ServeArgs};

#[derive(Parser)]
#[command(name = "kaimono")]
#[command(about = "Kaimono - shopping list chat bot webhook service", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Config file (defaults to ./kaimono.yaml when present)
    #[arg(short, long, global = true, env = "KAIMONO_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the webhook server
    Serve(ServeArgs),

    /// Show how a chat message would be interpreted
    Parse(ParseArgs),

    /// Load and validate configuration, then print it with secrets redacted
    CheckConfig(CheckConfigArgs),
}
