//! Chat platform messaging adapter.

pub mod client;
pub mod types;

pub use client::LineReplyClient;
pub use types::ReplyRequest;
