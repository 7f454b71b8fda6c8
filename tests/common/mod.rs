//! Common test utilities for integration tests
//!
//! Spy doubles for the two ports plus helpers for driving the webhook router.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use http_body_util::BodyExt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use kaimono::adapters::memory::InMemoryListStore;
use kaimono::domain::models::{Config, NonPostResponse};
use kaimono::domain::ports::{ListStore, ReplySender, TextMessage};
use kaimono::services::{WebhookGate, SIGNATURE_HEADER};
use kaimono::{DomainError, DomainResult};

pub const CHANNEL_SECRET: &str = "integration-secret";

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
pub fn setup_test_logging() {
    use tracing_subscriber::fmt;

    let _ = fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Config whose channel secret matches [`signed_post`].
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.line.channel_secret = CHANNEL_SECRET.to_string();
    config.line.channel_access_token = "integration-token".to_string();
    config
}

/// Records every reply instead of sending it.
#[derive(Default)]
pub struct SpySender {
    sent: Mutex<Vec<(String, String)>>,
}

impl SpySender {
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn text_for(&self, token: &str) -> Option<String> {
        self.sent()
            .into_iter()
            .find(|(t, _)| t == token)
            .map(|(_, text)| text)
    }
}

#[async_trait]
impl ReplySender for SpySender {
    async fn send(&self, reply_token: &str, message: TextMessage) -> DomainResult<()> {
        self.sent
            .lock()
            .unwrap()
            .push((reply_token.to_string(), message.text));
        Ok(())
    }
}

/// In-memory store that counts calls and can fail one partition.
#[derive(Default)]
pub struct SpyStore {
    inner: InMemoryListStore,
    calls: AtomicUsize,
    failing_partition: Option<String>,
}

impl SpyStore {
    pub fn failing_for(partition: &str) -> Self {
        Self {
            failing_partition: Some(partition.to_string()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn enter(&self, partition: &str) -> DomainResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_partition.as_deref() == Some(partition) {
            return Err(DomainError::DatabaseError("sheet write failed".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl ListStore for SpyStore {
    async fn append(&self, partition: &str, item: &str) -> DomainResult<()> {
        self.enter(partition)?;
        self.inner.append(partition, item).await
    }

    async fn items(&self, partition: &str) -> DomainResult<Vec<String>> {
        self.enter(partition)?;
        self.inner.items(partition).await
    }

    async fn remove_first(&self, partition: &str, item: &str) -> DomainResult<bool> {
        self.enter(partition)?;
        self.inner.remove_first(partition, item).await
    }
}

/// JSON for a text message event from a user.
pub fn text_event(reply_token: &str, user_id: &str, text: &str) -> serde_json::Value {
    serde_json::json!({
        "type": "message",
        "replyToken": reply_token,
        "source": {"type": "user", "userId": user_id},
        "message": {"type": "text", "id": "100001", "text": text},
        "timestamp": 1_700_000_000_000_i64
    })
}

pub fn batch(events: Vec<serde_json::Value>) -> String {
    serde_json::json!({"destination": "Ubot", "events": events}).to_string()
}

/// POST to the default webhook path, signed with [`CHANNEL_SECRET`].
pub fn signed_post(body: &str) -> Request<Body> {
    let signature = WebhookGate::new(CHANNEL_SECRET, NonPostResponse::MethodNotAllowed).sign(body.as_bytes());
    Request::builder()
        .method("POST")
        .uri("/webhook")
        .header("content-type", "application/json")
        .header(SIGNATURE_HEADER, signature)
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_str(&body_text(response).await).unwrap()
}
