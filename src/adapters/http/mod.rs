//! HTTP surface for webhook deliveries.

pub mod webhook;

pub use webhook::{ErrorResponse, WebhookServer, HEALTH_PATH};
