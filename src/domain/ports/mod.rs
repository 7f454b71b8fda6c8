//! Port trait definitions (Hexagonal Architecture)
//!
//! - ListStore: per-partition item rows
//! - ReplySender: one-shot replies keyed by a reply token

pub mod list_store;
pub mod reply_sender;

pub use list_store::ListStore;
pub use reply_sender::{ReplySender, TextMessage};
