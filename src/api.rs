//! HTTP API for the inference proxy

mod handlers;
mod types;

pub use handlers::{create_router, ProxyError, EMPTY_REPLY_FALLBACK, MAX_MESSAGE_CHARS};
pub use types::*;

use crate::llm::ModelRegistry;
use std::sync::Arc;

/// Application state shared across handlers
///
/// Read-only after startup; requests share nothing mutable.
#[derive(Clone)]
pub struct AppState {
    pub llm_registry: Arc<ModelRegistry>,
}

impl AppState {
    #[must_use]
    pub fn new(llm_registry: Arc<ModelRegistry>) -> Self {
        Self { llm_registry }
    }
}
