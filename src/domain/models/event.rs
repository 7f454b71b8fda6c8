//! Inbound webhook envelope delivered by the chat platform.

use serde::{Deserialize, Serialize};

/// Partition key used when an event carries no source identifier.
pub const UNKNOWN_PARTITION: &str = "unknown";

/// Body of one webhook request: `{ "destination": ..., "events": [...] }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WebhookBatch {
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub events: Vec<Event>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Message,
    Follow,
    Unfollow,
    #[serde(other)]
    Other,
}

/// One notification from the platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(rename = "type")]
    pub event_type: EventType,
    #[serde(default)]
    pub reply_token: Option<String>,
    #[serde(default)]
    pub source: Option<EventSource>,
    #[serde(default)]
    pub message: Option<MessageContent>,
    #[serde(default)]
    pub webhook_event_id: Option<String>,
    #[serde(default)]
    pub delivery_context: Option<DeliveryContext>,
    #[serde(default)]
    pub timestamp: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSource {
    #[serde(rename = "type", default)]
    pub source_type: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub group_id: Option<String>,
    #[serde(default)]
    pub room_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageContent {
    #[serde(rename = "type")]
    pub message_type: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryContext {
    #[serde(default)]
    pub is_redelivery: bool,
}

impl EventSource {
    /// First populated identifier among user, group and room.
    pub fn partition_key(&self) -> Option<&str> {
        [&self.user_id, &self.group_id, &self.room_id]
            .into_iter()
            .find_map(|id| id.as_deref().filter(|id| !id.is_empty()))
    }
}

impl Event {
    /// Partition key for the list this event addresses.
    pub fn partition_key(&self) -> &str {
        self.source
            .as_ref()
            .and_then(EventSource::partition_key)
            .unwrap_or(UNKNOWN_PARTITION)
    }

    /// The raw text when this is a text message event.
    ///
    /// A text message with no `text` field is treated as empty text.
    pub fn text_message(&self) -> Option<&str> {
        if self.event_type != EventType::Message {
            return None;
        }
        self.message
            .as_ref()
            .filter(|m| m.message_type == "text")
            .map(|m| m.text.as_deref().unwrap_or(""))
    }

    pub fn is_redelivery(&self) -> bool {
        self.delivery_context
            .as_ref()
            .is_some_and(|ctx| ctx.is_redelivery)
    }

    /// Reply token, ignoring the empty string some test consoles send.
    pub fn usable_reply_token(&self) -> Option<&str> {
        self.reply_token.as_deref().filter(|t| !t.is_empty())
    }
}
