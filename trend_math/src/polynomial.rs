//! Polynomial feature expansion and polynomial trend fitting

use crate::regression::RidgeRegression;
use crate::{MathError, Result};

/// Exponents used to expand a feature column for a polynomial order.
///
/// Order 1 adds nothing. Higher orders add every integer exponent from 2 up to
/// the order, followed by a square root term.
pub fn expansion_exponents(order: u32) -> Vec<f64> {
    if order <= 1 {
        return Vec::new();
    }

    let mut exponents: Vec<f64> = (2..=order).map(f64::from).collect();
    exponents.push(0.5);
    exponents
}

/// Render an exponent for use in a derived column name ("2", "0.5")
pub fn exponent_label(exponent: f64) -> String {
    if exponent.fract() == 0.0 {
        format!("{}", exponent as i64)
    } else {
        format!("{}", exponent)
    }
}

/// Raise every value of a column to `exponent`
pub fn expand(values: &[f64], exponent: f64) -> Result<Vec<f64>> {
    if exponent.fract() != 0.0 && values.iter().any(|v| *v < 0.0) {
        return Err(MathError::InvalidInput(format!(
            "Fractional exponent {} requires non-negative values",
            exponent
        )));
    }

    Ok(values.iter().map(|v| v.powf(exponent)).collect())
}

/// Least squares polynomial of a single variable
#[derive(Debug, Clone)]
pub struct PolynomialFit {
    order: usize,
    scale: f64,
    model: RidgeRegression,
}

impl PolynomialFit {
    /// Fit `y = c0 + c1 x + ... + cn x^n` where `n = order`.
    ///
    /// `x` is divided by its largest magnitude before the powers are taken to
    /// keep high orders well conditioned.
    pub fn fit(x: &[f64], y: &[f64], order: usize) -> Result<Self> {
        if order == 0 {
            return Err(MathError::InvalidInput(
                "Polynomial order must be at least 1".to_string(),
            ));
        }
        if x.len() != y.len() {
            return Err(MathError::InvalidInput(format!(
                "x length ({}) doesn't match y length ({})",
                x.len(),
                y.len()
            )));
        }

        let largest = x.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
        let scale = if largest > 0.0 { largest } else { 1.0 };

        let rows: Vec<Vec<f64>> = x.iter().map(|v| powers(v / scale, order)).collect();
        let mut model = RidgeRegression::new(0.0)?;
        model.fit(&rows, y)?;

        Ok(Self {
            order,
            scale,
            model,
        })
    }

    pub fn order(&self) -> usize {
        self.order
    }

    /// Evaluate the fitted polynomial at `x`
    pub fn evaluate(&self, x: f64) -> Result<f64> {
        self.model.predict(&powers(x / self.scale, self.order))
    }
}

fn powers(x: f64, order: usize) -> Vec<f64> {
    (1..=order).map(|e| x.powi(e as i32)).collect()
}
