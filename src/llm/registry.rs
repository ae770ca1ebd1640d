//! Provider selection from process configuration

use super::{LlmError, LlmService, LoggingService, OpenAIService};
use std::sync::Arc;
use std::time::Duration;

const DEFAULT_CREDENTIAL: &str = "GROQ_API_KEY";
const DEFAULT_PROVIDER: &str = "Groq";
const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Configuration for the LLM provider
///
/// Read once at startup and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: Option<String>,
    /// Name of the credential, as reported when it is missing
    pub credential_name: String,
    /// Human-readable provider name used in error messages
    pub provider_name: String,
    pub base_url: String,
    pub model: String,
    pub request_timeout: Duration,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            credential_name: DEFAULT_CREDENTIAL.to_string(),
            provider_name: DEFAULT_PROVIDER.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            request_timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl LlmConfig {
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_key: std::env::var(DEFAULT_CREDENTIAL)
                .ok()
                .filter(|key| !key.trim().is_empty()),
            credential_name: defaults.credential_name,
            provider_name: std::env::var("LITTLELOGIC_PROVIDER_NAME")
                .unwrap_or(defaults.provider_name),
            base_url: std::env::var("LITTLELOGIC_BASE_URL").unwrap_or(defaults.base_url),
            model: std::env::var("LITTLELOGIC_MODEL").unwrap_or(defaults.model),
            request_timeout: std::env::var("LITTLELOGIC_LLM_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map_or(defaults.request_timeout, Duration::from_secs),
        }
    }
}

/// Holds the configured provider, if its credential was present
pub struct ModelRegistry {
    service: Option<Arc<dyn LlmService>>,
    credential_name: String,
    provider_name: String,
}

impl ModelRegistry {
    /// Build the registry, creating the provider when its credential is set.
    ///
    /// # Errors
    ///
    /// Fails when a credential is present but the provider cannot be built,
    /// so a broken configuration is not mistaken for a missing credential.
    pub fn new(config: &LlmConfig) -> Result<Self, LlmError> {
        let service = match &config.api_key {
            Some(api_key) => {
                let service = OpenAIService::new(
                    api_key.clone(),
                    config.model.clone(),
                    &config.base_url,
                    config.request_timeout,
                )?;
                let service: Arc<dyn LlmService> =
                    Arc::new(LoggingService::new(Arc::new(service)));
                Some(service)
            }
            None => None,
        };

        Ok(Self {
            service,
            credential_name: config.credential_name.clone(),
            provider_name: config.provider_name.clone(),
        })
    }

    /// Registry backed by an already constructed service
    #[must_use]
    pub fn with_service(service: Arc<dyn LlmService>) -> Self {
        let defaults = LlmConfig::default();
        Self {
            service: Some(Arc::new(LoggingService::new(service))),
            credential_name: defaults.credential_name,
            provider_name: defaults.provider_name,
        }
    }

    /// Registry with no usable provider
    #[must_use]
    pub fn new_empty() -> Self {
        let defaults = LlmConfig::default();
        Self {
            service: None,
            credential_name: defaults.credential_name,
            provider_name: defaults.provider_name,
        }
    }

    /// Get the configured service
    #[must_use]
    pub fn default(&self) -> Option<Arc<dyn LlmService>> {
        self.service.clone()
    }

    #[must_use]
    pub fn has_models(&self) -> bool {
        self.service.is_some()
    }

    #[must_use]
    pub fn model_id(&self) -> Option<&str> {
        self.service.as_deref().map(LlmService::model_id)
    }

    #[must_use]
    pub fn credential_name(&self) -> &str {
        &self.credential_name
    }

    #[must_use]
    pub fn provider_name(&self) -> &str {
        &self.provider_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_api_key_no_models() {
        let registry = ModelRegistry::new(&LlmConfig::default()).unwrap();
        assert!(!registry.has_models());
        assert!(registry.default().is_none());
        assert_eq!(registry.credential_name(), "GROQ_API_KEY");
    }

    #[test]
    fn test_api_key_enables_model() {
        let config = LlmConfig {
            api_key: Some("test-key".to_string()),
            ..Default::default()
        };
        let registry = ModelRegistry::new(&config).unwrap();
        assert!(registry.has_models());
        assert_eq!(registry.model_id(), Some("llama-3.1-8b-instant"));
        assert_eq!(registry.provider_name(), "Groq");
    }

    #[test]
    fn test_broken_provider_config_is_an_error() {
        let config = LlmConfig {
            api_key: Some("test-key".to_string()),
            base_url: "::not a url::".to_string(),
            ..Default::default()
        };
        assert!(ModelRegistry::new(&config).is_err());

        // Without a credential nothing is built, so the URL is never checked
        let config = LlmConfig {
            base_url: "::not a url::".to_string(),
            ..Default::default()
        };
        assert!(!ModelRegistry::new(&config).unwrap().has_models());
    }

    #[test]
    fn test_with_service_keeps_model_id() {
        let registry =
            ModelRegistry::with_service(Arc::new(crate::llm::testing::MockLlmService::new()));
        assert_eq!(registry.model_id(), Some("mock-model"));
    }

    #[test]
    fn test_custom_model_and_provider() {
        let config = LlmConfig {
            api_key: Some("test-key".to_string()),
            provider_name: "OpenAI".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            ..Default::default()
        };
        let registry = ModelRegistry::new(&config).unwrap();
        assert_eq!(registry.model_id(), Some("gpt-4o-mini"));
        assert_eq!(registry.provider_name(), "OpenAI");
    }
}
