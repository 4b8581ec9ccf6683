use async_trait::async_trait;
use log::{debug, error, info, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{sleep, timeout};

use crate::config::RetryConfig;
use crate::error::GenerationError;
use crate::generator::RecipeGenerator;
use crate::model::{GenerationRequest, Recipe};
use crate::parse::parse_recipe;
use crate::providers::{LlmProvider, ProviderError, RecipePrompt};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Stateless handler between a validated request and the provider.
///
/// Each `generate` call makes one provider call (plus any retries for
/// network faults enabled through [`RetryConfig`]), parses the result and returns either a
/// complete recipe or a typed error. The gateway keeps no state between calls
/// and is safe to share across tasks; dropping the returned future cancels the
/// in-flight HTTP request.
pub struct RecipeGateway {
    provider: Arc<dyn LlmProvider>,
    timeout: Duration,
    retry: RetryConfig,
}

impl RecipeGateway {
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        RecipeGateway {
            provider,
            timeout: DEFAULT_TIMEOUT,
            retry: RetryConfig::default(),
        }
    }

    pub fn with_timeout(mut self, duration: Duration) -> Self {
        self.timeout = duration;
        self
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// One provider call bounded by the configured timeout
    async fn attempt(&self, prompt: &RecipePrompt) -> Result<String, ProviderError> {
        match timeout(self.timeout, self.provider.complete(prompt)).await {
            Ok(result) => result,
            Err(_) => Err(ProviderError::Timeout(self.timeout)),
        }
    }

    /// Call the provider, retrying only transient network errors
    async fn complete_with_retry(&self, prompt: &RecipePrompt) -> Result<String, ProviderError> {
        let attempts = self.retry.transient_retries + 1;
        let mut attempt = 1;

        loop {
            debug!(
                "Requesting recipe from {} (attempt {}/{})",
                self.provider.provider_name(),
                attempt,
                attempts
            );

            match self.attempt(prompt).await {
                Ok(text) => return Ok(text),
                Err(e) if e.is_transient() && attempt < attempts => {
                    warn!(
                        "Provider {} failed (attempt {}/{}): {}",
                        self.provider.provider_name(),
                        attempt,
                        attempts,
                        e
                    );
                    let delay = Duration::from_millis(self.retry.retry_delay_ms);
                    debug!("Waiting {:?} before retry", delay);
                    sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[async_trait]
impl RecipeGenerator for RecipeGateway {
    fn name(&self) -> &str {
        self.provider.provider_name()
    }

    async fn generate(&self, request: GenerationRequest) -> Result<Recipe, GenerationError> {
        info!(
            "Generating recipe for {:?} ({}, {} servings)",
            request.ingredients().as_slice(),
            request.dietary(),
            request.servings()
        );

        let prompt = RecipePrompt::for_request(&request);
        let raw = self.complete_with_retry(&prompt).await.map_err(|e| {
            error!("Recipe generation failed: {}", e);
            GenerationError::from(e)
        })?;

        let recipe = parse_recipe(&raw, request.servings()).map_err(|e| {
            error!("Failed to parse AI response as a recipe: {}", e);
            debug!("Raw response: {}", raw);
            GenerationError::malformed_response()
        })?;

        info!("Successfully generated recipe: {}", recipe.title);
        Ok(recipe)
    }
}
