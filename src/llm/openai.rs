//! `OpenAI`-compatible provider implementation
//!
//! Talks to the `v1/responses` endpoint, which Groq and `OpenAI` both expose.

use super::types::{LlmRequest, LlmResponse, Usage};
use super::{LlmError, LlmService};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// OpenAI-compatible service implementation
pub struct OpenAIService {
    client: Client,
    api_key: String,
    model: String,
    url: Url,
}

impl OpenAIService {
    /// Build a client for `<base_url>/responses`.
    ///
    /// # Errors
    ///
    /// Fails if `base_url` does not form a valid URL or the HTTP client
    /// cannot be initialized.
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        let url = format!("{}/responses", base_url.trim_end_matches('/'));
        let url = Url::parse(&url)
            .map_err(|e| LlmError::invalid_request(format!("Invalid base URL {base_url}: {e}")))?;

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::unknown(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
            url,
        })
    }

    fn translate_request(&self, request: &LlmRequest) -> ResponsesApiRequest {
        ResponsesApiRequest {
            model: self.model.clone(),
            instructions: request.instructions.clone(),
            input: request.input.clone(),
        }
    }

    /// Normalize `ResponsesApiResponse` to `LlmResponse`
    fn normalize_response(resp: ResponsesApiResponse) -> LlmResponse {
        let usage = resp.usage.map_or_else(Usage::default, |u| Usage {
            input_tokens: u.input_tokens,
            output_tokens: u.output_tokens,
        });

        // Prefer the aggregated field when the provider supplies it
        if let Some(text) = resp.output_text {
            return LlmResponse {
                output_text: Some(text),
                usage,
            };
        }

        let mut parts = Vec::new();
        for output in resp.output {
            match output.r#type.as_str() {
                "message" => {
                    for item in output.content.unwrap_or_default() {
                        if item.r#type == "output_text" {
                            if let Some(text) = item.text {
                                parts.push(text);
                            }
                        }
                    }
                }
                "reasoning" => {}
                other => {
                    tracing::debug!(output_type = %other, "Ignoring unknown output type");
                }
            }
        }

        LlmResponse {
            output_text: if parts.is_empty() {
                None
            } else {
                Some(parts.concat())
            },
            usage,
        }
    }
}

#[async_trait]
impl LlmService for OpenAIService {
    async fn generate(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        let body = self.translate_request(request);

        let response = self
            .client
            .post(self.url.clone())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::network(format!("Request timeout: {e}"))
                } else if e.is_connect() {
                    LlmError::network(format!("Connection failed: {e}"))
                } else {
                    LlmError::unknown(format!("Request failed: {e}"))
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| LlmError::network(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            let message = serde_json::from_str::<OpenAIErrorResponse>(&body)
                .map_or(body, |error_resp| error_resp.error.message);
            return Err(LlmError::from_status(status.as_u16(), &message));
        }

        let parsed: ResponsesApiResponse = serde_json::from_str(&body).map_err(|e| {
            LlmError::unknown(format!("Failed to parse response: {e} - body: {body}"))
        })?;

        Ok(Self::normalize_response(parsed))
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

// Responses API types

#[derive(Debug, Serialize)]
struct ResponsesApiRequest {
    model: String,
    instructions: String,
    input: String,
}

#[derive(Debug, Deserialize)]
struct ResponsesApiResponse {
    #[serde(default)]
    output: Vec<ResponsesApiOutput>,
    #[serde(default)]
    output_text: Option<String>,
    #[serde(default)]
    usage: Option<ResponsesApiUsage>,
}

#[derive(Debug, Deserialize)]
struct ResponsesApiOutput {
    r#type: String,
    #[serde(default)]
    content: Option<Vec<ResponsesApiContent>>,
}

#[derive(Debug, Deserialize)]
struct ResponsesApiContent {
    r#type: String,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponsesApiUsage {
    input_tokens: u64,
    output_tokens: u64,
}

#[derive(Debug, Deserialize)]
struct OpenAIErrorResponse {
    error: OpenAIError,
}

#[derive(Debug, Deserialize)]
struct OpenAIError {
    message: String,
}
