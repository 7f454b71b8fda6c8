//! Authenticity check and decoding for inbound webhook requests.
//!
//! The platform signs the raw request body with HMAC-SHA256 keyed by the
//! channel secret and sends the base64 digest in `x-line-signature`. A request
//! that fails the check is rejected before its body is parsed.

use axum::http::{Method, StatusCode};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;

use crate::domain::models::{Event, NonPostResponse, WebhookBatch};

/// Header carrying the base64 HMAC-SHA256 of the raw body.
pub const SIGNATURE_HEADER: &str = "x-line-signature";

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Error)]
pub enum GateError {
    #[error("Method not allowed: {0}")]
    MethodNotAllowed(Method),

    #[error("Missing x-line-signature header")]
    MissingSignature,

    #[error("Signature does not match request body")]
    InvalidSignature,

    #[error("Request body could not be read: {0}")]
    UnreadableBody(String),

    #[error("Malformed webhook body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl GateError {
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            Self::MissingSignature | Self::InvalidSignature => StatusCode::UNAUTHORIZED,
            Self::UnreadableBody(_) => StatusCode::BAD_REQUEST,
            Self::Decode(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Result of admitting a request.
#[derive(Debug)]
pub enum Admission {
    /// Signature verified and body decoded.
    Events(Vec<Event>),
    /// Non-POST request answered with a plain 200 without reading the body.
    Passthrough,
}

#[derive(Clone)]
pub struct WebhookGate {
    channel_secret: String,
    non_post_response: NonPostResponse,
}

impl WebhookGate {
    pub fn new(channel_secret: impl Into<String>, non_post_response: NonPostResponse) -> Self {
        Self {
            channel_secret: channel_secret.into(),
            non_post_response,
        }
    }

    /// Decide on the method alone, before the body is read.
    ///
    /// `Ok(None)` means the request is a POST and must go on to [`admit`](Self::admit).
    pub fn screen(&self, method: &Method) -> Result<Option<Admission>, GateError> {
        if *method == Method::POST {
            return Ok(None);
        }
        match self.non_post_response {
            NonPostResponse::Ok => Ok(Some(Admission::Passthrough)),
            NonPostResponse::MethodNotAllowed => Err(GateError::MethodNotAllowed(method.clone())),
        }
    }

    /// Admit a request: method check, then signature, then decode.
    pub fn admit(
        &self,
        method: &Method,
        raw_body: &[u8],
        signature: Option<&str>,
    ) -> Result<Admission, GateError> {
        if let Some(admission) = self.screen(method)? {
            return Ok(admission);
        }

        let signature = signature
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(GateError::MissingSignature)?;
        self.verify(raw_body, signature)?;

        let batch: WebhookBatch = serde_json::from_slice(raw_body)?;
        Ok(Admission::Events(batch.events))
    }

    /// Constant-time comparison of the expected digest with the header value.
    pub fn verify(&self, raw_body: &[u8], signature: &str) -> Result<(), GateError> {
        let provided = STANDARD
            .decode(signature)
            .map_err(|_| GateError::InvalidSignature)?;

        let mut mac = self.mac();
        mac.update(raw_body);
        mac.verify_slice(&provided).map_err(|_| GateError::InvalidSignature)
    }

    /// Base64 signature the platform would send for `raw_body`.
    pub fn sign(&self, raw_body: &[u8]) -> String {
        let mut mac = self.mac();
        mac.update(raw_body);
        STANDARD.encode(mac.finalize().into_bytes())
    }

    fn mac(&self) -> HmacSha256 {
        // HMAC is defined for keys of any length, including empty ones.
        <HmacSha256 as Mac>::new_from_slice(self.channel_secret.as_bytes())
            .unwrap_or_else(|_| unreachable!("HMAC accepts keys of any length"))
    }
}
