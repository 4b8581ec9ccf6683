use crate::config::ProviderConfig;
use crate::error::SetupError;
use crate::providers::{LlmProvider, OpenAIProvider};
use std::sync::Arc;

pub struct ProviderFactory;

impl ProviderFactory {
    /// Create a provider instance from configuration
    pub fn create(
        provider_name: &str,
        config: &ProviderConfig,
    ) -> Result<Arc<dyn LlmProvider>, SetupError> {
        match provider_name {
            "openai" => Ok(Arc::new(OpenAIProvider::new(config))),
            _ => Err(SetupError::UnknownGenerator(provider_name.to_string())),
        }
    }

    /// List all available provider names
    pub fn available_providers() -> Vec<&'static str> {
        vec!["openai"]
    }
}
