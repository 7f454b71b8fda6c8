//! Webhook HTTP server.
//!
//! One route receives the platform's webhook deliveries; `/health` answers
//! liveness probes.

use axum::{
    body::to_bytes,
    extract::{Request, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{any, get},
    Router,
};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::domain::models::ServerConfig;
use crate::services::{Admission, EventDispatcher, GateError, WebhookGate, SIGNATURE_HEADER};

/// Liveness probe route; the webhook path may not reuse it.
pub const HEALTH_PATH: &str = "/health";

/// Largest webhook body read into memory.
const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

struct AppState {
    gate: WebhookGate,
    dispatcher: EventDispatcher,
}

/// Webhook HTTP server.
pub struct WebhookServer {
    config: ServerConfig,
    gate: WebhookGate,
    dispatcher: EventDispatcher,
}

impl WebhookServer {
    pub fn new(config: ServerConfig, gate: WebhookGate, dispatcher: EventDispatcher) -> Self {
        Self {
            config,
            gate,
            dispatcher,
        }
    }

    /// Build the router.
    pub fn build_router(&self) -> Router {
        let state = Arc::new(AppState {
            gate: self.gate.clone(),
            dispatcher: self.dispatcher.clone(),
        });

        Router::new()
            .route(&self.config.webhook_path, any(receive_webhook))
            .route(HEALTH_PATH, get(health_check))
            .with_state(state)
            .layer(TraceLayer::new_for_http())
    }

    fn addr(&self) -> Result<SocketAddr, Box<dyn std::error::Error + Send + Sync>> {
        Ok(format!("{}:{}", self.config.host, self.config.port).parse()?)
    }

    /// Start the server with a shutdown signal.
    pub async fn serve_with_shutdown<F>(
        self,
        shutdown: F,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let addr = self.addr()?;
        let router = self.build_router();

        info!(%addr, path = %self.config.webhook_path, "Webhook server listening");

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await?;
        Ok(())
    }
}

// Handler functions

async fn health_check() -> &'static str {
    "OK"
}

async fn receive_webhook(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Response, (StatusCode, Json<ErrorResponse>)> {
    // Non-POST requests are answered before the body is read.
    match state.gate.screen(request.method()) {
        Ok(None) => {}
        Ok(Some(_)) => return Ok((StatusCode::OK, "OK").into_response()),
        Err(e) => return Err(rejection(&e)),
    }

    let (parts, body) = request.into_parts();
    let body = to_bytes(body, MAX_BODY_BYTES)
        .await
        .map_err(|e| rejection(&GateError::UnreadableBody(e.to_string())))?;
    let signature = parts.headers.get(SIGNATURE_HEADER).and_then(|v| v.to_str().ok());

    let events = match state.gate.admit(&parts.method, &body, signature) {
        Ok(Admission::Events(events)) => events,
        Ok(Admission::Passthrough) => return Ok((StatusCode::OK, "OK").into_response()),
        Err(e) => return Err(rejection(&e)),
    };

    info!(event_count = events.len(), "Webhook admitted");
    let outcomes = state.dispatcher.dispatch(events).await;
    Ok(Json(outcomes).into_response())
}

fn rejection(error: &GateError) -> (StatusCode, Json<ErrorResponse>) {
    let code = match error {
        GateError::MethodNotAllowed(_) => "METHOD_NOT_ALLOWED",
        GateError::MissingSignature | GateError::InvalidSignature => "INVALID_SIGNATURE",
        GateError::UnreadableBody(_) => "UNREADABLE_BODY",
        GateError::Decode(_) => "DECODE_ERROR",
    };
    warn!(code, error = %error, "Webhook rejected");

    (
        error.status_code(),
        Json(ErrorResponse {
            error: error.to_string(),
            code: code.to_string(),
        }),
    )
}
