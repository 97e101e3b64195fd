use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while looking up nutrition information
#[derive(Error, Debug)]
pub enum NutritionError {
    /// The oracle call failed (transport error, non-2xx status, error body)
    #[error("Nutrition oracle unavailable: {0}")]
    OracleUnavailable(String),

    /// The oracle did not answer in time
    #[error("Nutrition oracle timed out after {0:?}")]
    OracleTimeout(Duration),

    /// No nutrition figure could be recovered from the oracle's answer
    #[error("Unparseable oracle answer: {0}")]
    Unparseable(String),

    /// Provider construction or selection failed
    #[error("Provider error: {0}")]
    Provider(String),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Filesystem error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}
