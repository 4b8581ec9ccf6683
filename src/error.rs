use thiserror::Error;

/// Client-side input errors. These never reach the network.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Ingredient was empty or whitespace-only
    #[error("Ingredient cannot be empty")]
    EmptyIngredient,

    /// Ingredient is already in the list (after trimming)
    #[error("This ingredient is already added: {0}")]
    DuplicateIngredient(String),

    /// Dietary preference outside the supported set
    #[error("Unknown dietary preference: {0}")]
    UnknownDietaryPreference(String),

    /// Submission attempted without any ingredients
    #[error("Please add at least one ingredient")]
    EmptyIngredientList,
}

/// Errors returned by a recipe generation.
///
/// Every variant carries the message that is shown to the end user.
/// Diagnostic details are logged where the error is produced and never
/// end up in these messages.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("{0}")]
    NoIngredients(String),

    /// Provider credentials are missing or rejected
    #[error("{0}")]
    ServiceUnavailable(String),

    /// Provider answered HTTP 429
    #[error("{0}")]
    RateLimited(String),

    /// Provider answered HTTP 402
    #[error("{0}")]
    QuotaExhausted(String),

    /// Any other upstream failure: bad status, empty payload, timeout, network
    #[error("{0}")]
    UpstreamFailure(String),

    /// Provider text could not be decoded into a recipe
    #[error("{0}")]
    MalformedResponse(String),
}

impl GenerationError {
    pub fn no_ingredients() -> Self {
        Self::NoIngredients("No ingredients provided".to_string())
    }

    pub fn service_unavailable() -> Self {
        Self::ServiceUnavailable("AI service not configured".to_string())
    }

    pub fn rate_limited() -> Self {
        Self::RateLimited("Rate limit exceeded. Please try again in a moment.".to_string())
    }

    pub fn quota_exhausted() -> Self {
        Self::QuotaExhausted("AI service credits exhausted. Please contact support.".to_string())
    }

    pub fn upstream_failure() -> Self {
        Self::UpstreamFailure("Failed to generate recipe".to_string())
    }

    pub fn malformed_response() -> Self {
        Self::MalformedResponse("Failed to parse recipe data".to_string())
    }

    /// User-facing message text
    pub fn message(&self) -> &str {
        match self {
            Self::NoIngredients(msg)
            | Self::ServiceUnavailable(msg)
            | Self::RateLimited(msg)
            | Self::QuotaExhausted(msg)
            | Self::UpstreamFailure(msg)
            | Self::MalformedResponse(msg) => msg,
        }
    }

    /// HTTP status used at the inbound boundary
    pub fn http_status(&self) -> u16 {
        match self {
            Self::NoIngredients(_) => 400,
            Self::RateLimited(_) => 429,
            Self::QuotaExhausted(_) => 402,
            Self::ServiceUnavailable(_)
            | Self::UpstreamFailure(_)
            | Self::MalformedResponse(_) => 500,
        }
    }
}

/// Errors from driving the generation session state machine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// A generation is already in flight
    #[error("A recipe is already being generated")]
    AlreadyGenerating,

    /// A recipe is displayed; reset before generating another one
    #[error("A recipe is already displayed, reset before generating another")]
    RecipeDisplayed,

    /// The generation this result belongs to was cancelled or superseded
    #[error("Recipe generation was cancelled")]
    Cancelled,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Generation(#[from] GenerationError),
}

/// Errors while wiring the service together from configuration
#[derive(Error, Debug)]
pub enum SetupError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Generator kind not known to the factory
    #[error("Unknown generator kind: {0}")]
    UnknownGenerator(String),

    /// HTTP client could not be constructed
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Invalid listen address
    #[error("Invalid address: {0}")]
    Address(#[from] std::net::AddrParseError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_error_statuses() {
        assert_eq!(GenerationError::no_ingredients().http_status(), 400);
        assert_eq!(GenerationError::rate_limited().http_status(), 429);
        assert_eq!(GenerationError::quota_exhausted().http_status(), 402);
        assert_eq!(GenerationError::service_unavailable().http_status(), 500);
        assert_eq!(GenerationError::upstream_failure().http_status(), 500);
        assert_eq!(GenerationError::malformed_response().http_status(), 500);
    }

    #[test]
    fn test_display_is_user_message() {
        let err = GenerationError::rate_limited();
        assert_eq!(err.to_string(), err.message());
        assert!(err.message().contains("Rate limit exceeded"));
    }
}
