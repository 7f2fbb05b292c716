//! Ridge regularized linear regression
//!
//! Minimizes `||y - Xb - c||² + alpha * ||b||²` with an unpenalized intercept `c`.
//!
//! The system is solved through a singular value decomposition of the centered
//! design matrix, augmented with `sqrt(alpha) * I` rows when `alpha > 0`. With
//! `alpha = 0` this yields the minimum-norm least squares solution, so a design
//! with more features than rows still fits instead of failing on a singular
//! normal matrix.

use crate::{MathError, Result};
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

/// Ridge regression model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RidgeRegression {
    alpha: f64,
    coefficients: Option<Vec<f64>>,
    intercept: Option<f64>,
}

impl RidgeRegression {
    /// Create a new ridge regression with regularization strength `alpha`.
    ///
    /// `alpha = 0` gives ordinary least squares.
    pub fn new(alpha: f64) -> Result<Self> {
        if !alpha.is_finite() || alpha < 0.0 {
            return Err(MathError::InvalidInput(format!(
                "Regularization coefficient must be finite and non-negative, got {}",
                alpha
            )));
        }

        Ok(Self {
            alpha,
            coefficients: None,
            intercept: None,
        })
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Fit the model on `rows` (one feature vector per sample) against `targets`
    pub fn fit(&mut self, rows: &[Vec<f64>], targets: &[f64]) -> Result<()> {
        let n = targets.len();
        if rows.len() != n {
            return Err(MathError::InvalidInput(format!(
                "Row count ({}) doesn't match target count ({})",
                rows.len(),
                n
            )));
        }
        if n < 2 {
            return Err(MathError::InsufficientData(format!(
                "Need at least 2 samples to fit a regression, got {}",
                n
            )));
        }

        let p = rows[0].len();
        if rows.iter().any(|r| r.len() != p) {
            return Err(MathError::InvalidInput(
                "All rows must have the same number of features".to_string(),
            ));
        }
        if targets.iter().any(|t| !t.is_finite())
            || rows.iter().flatten().any(|v| !v.is_finite())
        {
            return Err(MathError::InvalidInput(
                "Regression inputs must be finite".to_string(),
            ));
        }

        let y_mean = targets.iter().sum::<f64>() / n as f64;
        let x_mean: Vec<f64> = (0..p)
            .map(|j| rows.iter().map(|r| r[j]).sum::<f64>() / n as f64)
            .collect();

        if p == 0 {
            self.coefficients = Some(Vec::new());
            self.intercept = Some(y_mean);
            return Ok(());
        }

        // Centered design, with sqrt(alpha) * I appended below it for the penalty
        let penalty_rows = if self.alpha > 0.0 { p } else { 0 };
        let sqrt_alpha = self.alpha.sqrt();
        let design = DMatrix::from_fn(n + penalty_rows, p, |i, j| {
            if i < n {
                rows[i][j] - x_mean[j]
            } else if i - n == j {
                sqrt_alpha
            } else {
                0.0
            }
        });
        let response = DVector::from_fn(n + penalty_rows, |i, _| {
            if i < n {
                targets[i] - y_mean
            } else {
                0.0
            }
        });

        let svd = design.svd(true, true);
        let largest = svd.singular_values.max();
        if !(largest > 0.0) {
            return Err(MathError::CalculationError(
                "Feature matrix is singular: no feature varies across samples".to_string(),
            ));
        }
        let tolerance = largest * (n + penalty_rows).max(p) as f64 * f64::EPSILON;

        let solution = svd
            .solve(&response, tolerance)
            .map_err(|e| MathError::CalculationError(e.to_string()))?;

        let coefficients: Vec<f64> = solution.iter().copied().collect();
        if coefficients.iter().any(|c| !c.is_finite()) {
            return Err(MathError::CalculationError(
                "Regression produced non-finite coefficients".to_string(),
            ));
        }

        let intercept = y_mean
            - x_mean
                .iter()
                .zip(coefficients.iter())
                .map(|(m, c)| m * c)
                .sum::<f64>();

        self.coefficients = Some(coefficients);
        self.intercept = Some(intercept);

        Ok(())
    }

    /// Predict the target for a single feature vector
    pub fn predict(&self, row: &[f64]) -> Result<f64> {
        let (coefficients, intercept) = match (&self.coefficients, self.intercept) {
            (Some(c), Some(i)) => (c, i),
            _ => {
                return Err(MathError::CalculationError(
                    "Model has not been fitted".to_string(),
                ))
            }
        };

        if row.len() != coefficients.len() {
            return Err(MathError::InvalidInput(format!(
                "Expected {} features, got {}",
                coefficients.len(),
                row.len()
            )));
        }

        let value = intercept
            + row
                .iter()
                .zip(coefficients.iter())
                .map(|(x, c)| x * c)
                .sum::<f64>();

        if !value.is_finite() {
            return Err(MathError::CalculationError(
                "Prediction is not finite".to_string(),
            ));
        }

        Ok(value)
    }

    /// Predict the target for each row
    pub fn predict_many(&self, rows: &[Vec<f64>]) -> Result<Vec<f64>> {
        rows.iter().map(|r| self.predict(r)).collect()
    }

    /// Fitted slope coefficients, one per feature
    pub fn coefficients(&self) -> Result<&[f64]> {
        self.coefficients.as_deref().ok_or_else(|| {
            MathError::CalculationError("Model has not been fitted".to_string())
        })
    }

    pub fn intercept(&self) -> Result<f64> {
        self.intercept
            .ok_or_else(|| MathError::CalculationError("Model has not been fitted".to_string()))
    }
}
