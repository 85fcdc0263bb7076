//! Error types for the conversion pipeline.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors surfaced by providers, cache engines and the converter.
#[derive(Debug, Error)]
pub enum ForexError {
    /// Currency code not in the source's supported set.
    #[error("Unsupported currency: {0}")]
    UnsupportedCurrency(String),

    /// Source returned malformed or unusable rate data.
    #[error("Invalid rates: {0}")]
    InvalidRates(String),

    /// Source constructed with incomplete configuration. Fatal.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Historical lookup requested for a date after today.
    #[error("Date {0} is in the future")]
    FutureDate(NaiveDate),

    /// Requested currency absent from a resolved rates collection.
    #[error("Rates missing currency {0}")]
    MissingRate(String),

    /// Transport failure talking to a rate source.
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Cache engine could not be reached or set up.
    #[error("Cache error: {0}")]
    Cache(String),
}

/// Result type for forex operations.
pub type Result<T> = std::result::Result<T, ForexError>;
