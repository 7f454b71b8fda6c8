//! Implementation of the `kaimono parse` command.

use anyhow::Result;
use clap::Args;

use crate::cli::output::{output, CommandOutput};
use crate::domain::models::Command;
use crate::services::command_parser;

#[derive(Args, Debug)]
pub struct ParseArgs {
    /// Message text as a user would send it
    pub text: String,
}

#[derive(Debug, serde::Serialize)]
pub struct ParseOutput {
    pub input: String,
    pub command: Command,
    pub needs_store: bool,
}

impl CommandOutput for ParseOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![format!("command: {}", self.command.as_str())];
        if let Some(item) = self.command.item() {
            lines.push(format!("item:    {item}"));
        }
        if self.needs_store {
            lines.push("(touches the list store)".to_string());
        }
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub fn describe(text: &str) -> ParseOutput {
    let command = command_parser::parse(text);
    ParseOutput {
        input: text.to_string(),
        needs_store: command.needs_store(),
        command,
    }
}

pub fn execute(args: ParseArgs, json_mode: bool) -> Result<()> {
    output(&describe(&args.text), json_mode);
    Ok(())
}
