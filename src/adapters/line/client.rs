//! HTTP client for the platform's reply endpoint.
//!
//! Reply tokens are single-use, so a failed send is reported and never retried.

use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use std::time::Duration;
use tracing::{debug, instrument};

use super::types::ReplyRequest;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::LineConfig;
use crate::domain::ports::{ReplySender, TextMessage};

const REPLY_PATH: &str = "/v2/bot/message/reply";

/// Sends replies with the channel access token.
pub struct LineReplyClient {
    http_client: ReqwestClient,
    access_token: String,
    base_url: String,
}

impl LineReplyClient {
    pub fn new(config: &LineConfig) -> reqwest::Result<Self> {
        let http_client = ReqwestClient::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .pool_max_idle_per_host(10)
            .tcp_nodelay(true)
            .build()?;

        Ok(Self {
            http_client,
            access_token: config.channel_access_token.clone(),
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl ReplySender for LineReplyClient {
    #[instrument(skip(self, reply_token, message), fields(text_len = message.text.len()))]
    async fn send(&self, reply_token: &str, message: TextMessage) -> DomainResult<()> {
        let request = ReplyRequest {
            reply_token,
            messages: vec![message],
        };

        let response = self
            .http_client
            .post(format!("{}{REPLY_PATH}", self.base_url))
            .bearer_auth(&self.access_token)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read response body".to_string());
            return Err(DomainError::ReplyFailed(format!("reply API returned {status}: {body}")));
        }

        debug!("Reply delivered");
        Ok(())
    }
}
