//! # Trend Math
//!
//! Numerical building blocks for price trend forecasting.
//! This crate provides feature rescaling, polynomial feature expansion and
//! regularized linear regression used by the forecasting pipeline.

use thiserror::Error;

pub mod polynomial;
pub mod regression;
pub mod scaling;

pub use polynomial::{expansion_exponents, exponent_label, PolynomialFit};
pub use regression::RidgeRegression;
pub use scaling::MinMaxScaler;

/// Errors that can occur in numerical calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Calculation error: {0}")]
    CalculationError(String),
}

/// Result type for numerical operations
pub type Result<T> = std::result::Result<T, MathError>;
