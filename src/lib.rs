//! Kaimono - shopping list chat bot
//!
//! Receives signed webhook deliveries from the messaging platform, reads
//! list commands out of chat text (`追加 <item>`, `削除 <item>`, `一覧`) and
//! answers each event with a single reply.
//!
//! # Architecture
//!
//! This crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Commands, webhook events, config and ports
//! - **Service Layer** (`services`): Parsing, execution, dispatch, webhook admission
//! - **Adapters** (`adapters`): HTTP server, reply client, list stores
//! - **Application Layer** (`application`): Wiring from configuration
//! - **Infrastructure Layer** (`infrastructure`): Config loading and logging
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```
//! use kaimono::domain::models::Command;
//! use kaimono::services::command_parser::parse;
//!
//! assert_eq!(parse("追加 牛乳"), Command::Add("牛乳".to_string()));
//! assert_eq!(parse("一覧"), Command::List);
//! ```

pub mod adapters;
pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::models::{Command, Config, Event, Reply};
pub use domain::ports::{ListStore, ReplySender};
pub use domain::{DomainError, DomainResult};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{CommandExecutor, EventDispatcher, EventOutcome, WebhookGate};
