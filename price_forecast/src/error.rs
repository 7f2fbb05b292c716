//! Error types for the price_forecast crate

use chrono::NaiveDate;
use thiserror::Error;

/// Failures of a macro indicator provider
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProviderError {
    /// The series could not be retrieved
    #[error("failed to fetch {series}: {reason}")]
    Fetch { series: String, reason: String },

    /// The series text could not be understood
    #[error("malformed data for {series}: {reason}")]
    Parse { series: String, reason: String },

    /// No value was published on or before the requested date
    #[error("no {series} value published on or before {date}")]
    Unresolved { series: String, date: NaiveDate },

    /// The provider answered with the wrong number of values
    #[error("{series} returned {got} values for {expected} dates")]
    LengthMismatch {
        series: String,
        expected: usize,
        got: usize,
    },
}

/// Custom error types for the price_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Too few labeled rows, or the fit broke down numerically
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// The most recent recorded price is dated after "today"
    #[error("Latest price entry ({latest}) is dated after today ({today})")]
    StalePrice { latest: NaiveDate, today: NaiveDate },

    /// Macro indicator data could not be obtained
    #[error("Macro data unavailable: {0}")]
    Provider(#[from] ProviderError),

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error related to item or catalog invariants
    #[error("Catalog error: {0}")]
    CatalogError(String),

    /// Error related to stored data
    #[error("Data error: {0}")]
    DataError(String),

    /// Error from mathematical operations
    #[error("Math error: {0}")]
    MathError(#[from] trend_math::MathError),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from CSV parsing
    #[error("CSV error: {0}")]
    CsvError(String),
}

impl ForecastError {
    /// Message shown to the user when a forecast request fails
    pub fn report(&self) -> String {
        format!("forecast failed: {}", self)
    }
}

impl From<csv::Error> for ForecastError {
    fn from(err: csv::Error) -> Self {
        ForecastError::CsvError(err.to_string())
    }
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;
