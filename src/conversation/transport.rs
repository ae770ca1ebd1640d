//! Network boundary between the controller and the inference proxy

use super::ExchangeOutcome;
use crate::api::{ChatRequest, ChatResponse};
use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;

/// Failures seen by the client when talking to the proxy
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Server responded with status {0}")]
    Status(u16),
    #[error("Request failed: {0}")]
    Network(String),
    #[error("Unreadable response: {0}")]
    Decode(String),
}

/// Sends one chat request to the proxy
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, TransportError>;
}

impl From<Result<ChatResponse, TransportError>> for ExchangeOutcome {
    fn from(result: Result<ChatResponse, TransportError>) -> Self {
        match result {
            Ok(response) => ExchangeOutcome::Reply {
                message: response.message,
            },
            Err(TransportError::Status(status)) => ExchangeOutcome::Rejected { status },
            Err(e) => ExchangeOutcome::TransportFailed {
                reason: e.to_string(),
            },
        }
    }
}

/// `reqwest`-backed transport posting to `<server>/chat`
pub struct HttpTransport {
    client: Client,
    url: String,
}

impl HttpTransport {
    /// Transport for the proxy at `server_url`
    ///
    /// # Errors
    ///
    /// Fails if the HTTP client cannot be initialized.
    pub fn new(server_url: &str) -> Result<Self, TransportError> {
        let client = Client::builder()
            .build()
            .map_err(|e| TransportError::Network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            url: format!("{}/chat", server_url.trim_end_matches('/')),
        })
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ChatTransport for HttpTransport {
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, TransportError> {
        let response = self
            .client
            .post(&self.url)
            .json(request)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            // Body intentionally ignored; only the status category matters here
            tracing::debug!(status = %status, "Chat request rejected");
            return Err(TransportError::Status(status.as_u16()));
        }

        response
            .json::<ChatResponse>()
            .await
            .map_err(|e| TransportError::Decode(e.to_string()))
    }
}
