use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// Top-level service configuration
#[derive(Debug, Deserialize, Clone)]
pub struct GatewayConfig {
    /// Which generator backs the `generate` contract: "openai" or "demo"
    #[serde(default = "default_kind")]
    pub kind: String,
    /// Provider call timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub retry: RetryConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// Configuration for the chat-completions provider
#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    /// Model identifier sent with every request
    #[serde(default = "default_model")]
    pub model: String,
    /// Sampling temperature; only affects variety, not correctness
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Maximum tokens to generate, provider default when absent
    pub max_tokens: Option<u32>,
    /// API key (can also be set via OPENAI_API_KEY)
    pub api_key: Option<String>,
    /// Base URL for API endpoint (for custom or proxy endpoints)
    pub base_url: Option<String>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: None,
            api_key: None,
            base_url: None,
        }
    }
}

/// Retry behaviour for transient network failures.
///
/// Rate limiting and quota responses are never retried.
#[derive(Debug, Deserialize, Clone)]
pub struct RetryConfig {
    /// Extra attempts after a transient network error, none unless configured
    #[serde(default = "default_transient_retries")]
    pub transient_retries: u32,
    /// Delay before a retry in milliseconds
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            transient_retries: default_transient_retries(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

impl RetryConfig {
    /// No retries at all
    pub fn disabled() -> Self {
        Self {
            transient_retries: 0,
            retry_delay_ms: 0,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Listen address
    #[serde(default = "default_address")]
    pub address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
        }
    }
}

// Default value functions
fn default_kind() -> String {
    "openai".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_temperature() -> f32 {
    0.8
}

fn default_timeout() -> u64 {
    30
}

fn default_transient_retries() -> u32 {
    0
}

fn default_retry_delay_ms() -> u64 {
    500
}

fn default_address() -> String {
    "0.0.0.0:3000".to_string()
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            kind: default_kind(),
            timeout: default_timeout(),
            provider: ProviderConfig::default(),
            retry: RetryConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl GatewayConfig {
    /// Load configuration from `config.toml` and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE__ prefix
    /// 2. config.toml file in current directory (or `path` when given)
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE__PROVIDER__API_KEY
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => File::with_name(path).required(true),
            None => File::with_name("config").required(false),
        };

        let settings = Config::builder()
            .add_source(file)
            // Use double underscore for nested: RECIPE__PROVIDER__MODEL
            .add_source(
                Environment::with_prefix("RECIPE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}
