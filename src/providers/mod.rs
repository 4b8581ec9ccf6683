mod factory;
mod open_ai;
mod prompt;

pub use factory::ProviderFactory;
pub use open_ai::OpenAIProvider;
pub use prompt::{build_user_prompt, RecipePrompt, RECIPE_SYSTEM_PROMPT};

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

use crate::error::GenerationError;

/// Unified trait for text-generation providers
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Get the provider name (e.g., "openai")
    fn provider_name(&self) -> &str;

    /// Send the prompt pair and return the raw completion text
    async fn complete(&self, prompt: &RecipePrompt) -> Result<String, ProviderError>;
}

/// Transport-level failures of a provider call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// No API key configured
    #[error("provider credentials are not configured")]
    MissingCredentials,

    /// Non-success HTTP status from the provider
    #[error("provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Successful response without completion text
    #[error("provider response contained no content")]
    EmptyContent,

    /// Connection-level failure, worth one more try
    #[error("network error: {0}")]
    Network(String),

    /// The call did not finish within the gateway's timeout
    #[error("provider call timed out after {0:?}")]
    Timeout(Duration),

    /// The HTTP client gave up waiting for the provider
    #[error("HTTP client timed out: {0}")]
    ClientTimeout(String),

    /// Response body could not be read or decoded
    #[error("invalid provider response body: {0}")]
    InvalidBody(String),
}

impl ProviderError {
    /// Only network faults are retried; 429/402 are provider policy, not faults.
    pub fn is_transient(&self) -> bool {
        matches!(self, ProviderError::Network(_))
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProviderError::ClientTimeout(err.to_string())
        } else if err.is_connect() || err.is_request() {
            ProviderError::Network(err.to_string())
        } else {
            ProviderError::InvalidBody(err.to_string())
        }
    }
}

impl From<ProviderError> for GenerationError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::MissingCredentials => GenerationError::service_unavailable(),
            ProviderError::Status { status: 401, .. } | ProviderError::Status { status: 403, .. } => {
                GenerationError::service_unavailable()
            }
            ProviderError::Status { status: 429, .. } => GenerationError::rate_limited(),
            ProviderError::Status { status: 402, .. } => GenerationError::quota_exhausted(),
            ProviderError::Status { .. }
            | ProviderError::EmptyContent
            | ProviderError::Network(_)
            | ProviderError::Timeout(_)
            | ProviderError::ClientTimeout(_)
            | ProviderError::InvalidBody(_) => GenerationError::upstream_failure(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(status: u16) -> ProviderError {
        ProviderError::Status {
            status,
            body: String::new(),
        }
    }

    #[test]
    fn test_status_mapping() {
        assert!(matches!(
            GenerationError::from(status(429)),
            GenerationError::RateLimited(_)
        ));
        assert!(matches!(
            GenerationError::from(status(402)),
            GenerationError::QuotaExhausted(_)
        ));
        assert!(matches!(
            GenerationError::from(status(401)),
            GenerationError::ServiceUnavailable(_)
        ));
        assert!(matches!(
            GenerationError::from(status(503)),
            GenerationError::UpstreamFailure(_)
        ));
    }

    #[test]
    fn test_other_failures_are_upstream() {
        for err in [
            ProviderError::EmptyContent,
            ProviderError::Network("reset".to_string()),
            ProviderError::Timeout(Duration::from_secs(30)),
            ProviderError::ClientTimeout("deadline elapsed".to_string()),
            ProviderError::InvalidBody("eof".to_string()),
        ] {
            assert!(matches!(
                GenerationError::from(err),
                GenerationError::UpstreamFailure(_)
            ));
        }
        assert!(matches!(
            GenerationError::from(ProviderError::MissingCredentials),
            GenerationError::ServiceUnavailable(_)
        ));
    }

    #[test]
    fn test_only_network_is_transient() {
        assert!(ProviderError::Network("refused".to_string()).is_transient());
        assert!(!status(429).is_transient());
        assert!(!status(402).is_transient());
        assert!(!ProviderError::Timeout(Duration::from_secs(1)).is_transient());
        assert!(!ProviderError::ClientTimeout("elapsed".to_string()).is_transient());
    }

    #[tokio::test]
    async fn test_client_timeout_keeps_reqwest_detail() {
        // Accepts connections but never answers
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(100))
            .build()
            .unwrap();
        let err = client
            .get(format!("http://{addr}/"))
            .send()
            .await
            .unwrap_err();
        assert!(err.is_timeout());

        let mapped = ProviderError::from(err);
        assert!(matches!(mapped, ProviderError::ClientTimeout(_)));
        assert!(!mapped.to_string().contains("0ns"));
        assert!(matches!(
            GenerationError::from(mapped),
            GenerationError::UpstreamFailure(_)
        ));
        server.abort();
    }
}
