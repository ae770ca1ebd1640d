//! HTTP request handlers

use super::types::ChatResponse;
use super::AppState;
use crate::llm::LlmRequest;
use crate::system_prompt::build_system_prompt;
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use thiserror::Error;

/// Longest accepted message, in characters, after trimming
pub const MAX_MESSAGE_CHARS: usize = 2000;

/// Sent instead of an empty provider output
pub const EMPTY_REPLY_FALLBACK: &str = "I could not think of a reply.";

/// Create the API router
#[must_use]
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/chat", post(chat))
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// Chat
// ============================================================

/// Received -> Parsed -> Validated -> `ProviderInvoked` -> Responded.
/// Every stage can short-circuit to an error response; nothing is retried.
async fn chat(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<ChatResponse>, ProxyError> {
    let body = body.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejecting chat body");
        // A body over the transport limit holds a message over the character limit
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ProxyError::MessageTooLong
        } else {
            ProxyError::InvalidJson
        }
    })?;

    let body: Value = serde_json::from_slice(&body).map_err(|e| {
        tracing::debug!(error = %e, "Rejecting unparsable chat body");
        ProxyError::InvalidJson
    })?;

    let message = validate_message(extract_message(&body)?)?;

    let Some(llm) = state.llm_registry.default() else {
        tracing::warn!(
            credential = %state.llm_registry.credential_name(),
            "Chat request received without provider credential"
        );
        return Err(ProxyError::MissingCredential(
            state.llm_registry.credential_name().to_string(),
        ));
    };

    let request = LlmRequest::new(build_system_prompt(), message);
    match llm.generate(&request).await {
        Ok(response) => Ok(Json(ChatResponse::new(
            response.text().unwrap_or(EMPTY_REPLY_FALLBACK),
        ))),
        Err(e) => {
            // Already logged with details by the registry's LoggingService
            tracing::debug!(
                provider = %state.llm_registry.provider_name(),
                kind = ?e.kind,
                "Answering provider failure with 502"
            );
            Err(ProxyError::Provider {
                provider: state.llm_registry.provider_name().to_string(),
            })
        }
    }
}

/// Pull `message` out of an arbitrary JSON body.
///
/// Anything without a `message` field (including `null` or non-object bodies)
/// counts as an empty message; a `message` that is not a string is malformed.
fn extract_message(body: &Value) -> Result<&str, ProxyError> {
    match body.get("message") {
        None | Some(Value::Null) => Ok(""),
        Some(Value::String(message)) => Ok(message),
        Some(_) => Err(ProxyError::InvalidJson),
    }
}

/// Validation ladder; the first failing rule wins
fn validate_message(raw: &str) -> Result<String, ProxyError> {
    let message = raw.trim();
    if message.is_empty() {
        return Err(ProxyError::EmptyMessage);
    }
    if message.chars().count() > MAX_MESSAGE_CHARS {
        return Err(ProxyError::MessageTooLong);
    }
    Ok(message.to_string())
}

async fn get_version() -> &'static str {
    concat!("littlelogic ", env!("CARGO_PKG_VERSION"))
}

// ============================================================
// Error Handling
// ============================================================

/// Every way a chat request can fail, with its user-facing text
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("Invalid JSON. Send: {{ \"message\": \"hello\" }}")]
    InvalidJson,
    #[error("Please send a message.")]
    EmptyMessage,
    #[error("Message too long.")]
    MessageTooLong,
    #[error("Missing {0}")]
    MissingCredential(String),
    /// Details stay in the server log
    #[error("{provider} request failed. Check server logs for details.")]
    Provider { provider: String },
}

impl ProxyError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::InvalidJson | ProxyError::EmptyMessage | ProxyError::MessageTooLong => {
                StatusCode::BAD_REQUEST
            }
            ProxyError::MissingCredential(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ProxyError::Provider { .. } => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let body = Json(ChatResponse::new(self.to_string()));
        (self.status(), body).into_response()
    }
}
