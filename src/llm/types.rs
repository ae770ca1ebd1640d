//! Common types for LLM interactions

/// Single-turn generation request
///
/// There is no message history: every call carries exactly one input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmRequest {
    pub instructions: String,
    pub input: String,
}

impl LlmRequest {
    #[must_use]
    pub fn new(instructions: impl Into<String>, input: impl Into<String>) -> Self {
        Self {
            instructions: instructions.into(),
            input: input.into(),
        }
    }
}

/// LLM response
#[derive(Debug, Clone, Default)]
pub struct LlmResponse {
    pub output_text: Option<String>,
    pub usage: Usage,
}

impl LlmResponse {
    #[must_use]
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            output_text: Some(text.into()),
            usage: Usage::default(),
        }
    }

    /// Output text, or `None` when the provider produced nothing printable
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.output_text
            .as_deref()
            .filter(|text| !text.trim().is_empty())
    }
}

/// Usage statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Usage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}
