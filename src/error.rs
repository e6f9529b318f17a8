use thiserror::Error;

/// Errors that can occur while searching for recipes
#[derive(Error, Debug)]
pub enum SearchError {
    /// The ingredient list contained no usable terms
    #[error("Please enter at least one ingredient")]
    EmptyQuery,

    /// Failed to reach the recipe service or it answered with an error status
    #[error("Failed to fetch from recipe service: {0}")]
    FetchError(#[from] reqwest::Error),

    /// The recipe service answered with a body we could not decode
    #[error("Failed to parse recipe service response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Builder configuration error
    #[error("Builder error: {0}")]
    BuilderError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}
