//! Wire types for the reply endpoint.

use serde::Serialize;

use crate::domain::ports::TextMessage;

/// Body of `POST /v2/bot/message/reply`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyRequest<'a> {
    pub reply_token: &'a str,
    pub messages: Vec<TextMessage>,
}
