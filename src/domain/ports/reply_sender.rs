use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainResult;

/// Outbound text message, serialized as `{"type": "text", "text": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "text")]
pub struct TextMessage {
    pub text: String,
}

impl TextMessage {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Capability to answer one event through the chat platform
///
/// A reply token is valid for a single send. Callers must invoke `send` at
/// most once per token, whether or not the first attempt succeeded.
#[async_trait]
pub trait ReplySender: Send + Sync {
    async fn send(&self, reply_token: &str, message: TextMessage) -> DomainResult<()>;
}
