//! Application wiring: turns a loaded [`Config`](crate::domain::models::Config)
//! into a runnable webhook server.

pub mod webhook_app;

pub use webhook_app::{assemble, build_list_store, build_server};
