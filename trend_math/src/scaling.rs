//! Min-max feature rescaling
//!
//! Feature columns are mapped into a strictly positive range so that
//! fractional exponents applied afterwards stay real-valued.

use crate::{MathError, Result};

/// Default lower bound of the rescaled range
pub const DEFAULT_LOWER: f64 = 0.001;

/// Default upper bound of the rescaled range
pub const DEFAULT_UPPER: f64 = 2.999;

/// Linear rescaler mapping a column's minimum to `lower` and maximum to `upper`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinMaxScaler {
    lower: f64,
    upper: f64,
}

impl Default for MinMaxScaler {
    fn default() -> Self {
        Self {
            lower: DEFAULT_LOWER,
            upper: DEFAULT_UPPER,
        }
    }
}

impl MinMaxScaler {
    /// Create a new scaler for the range `[lower, upper]`
    pub fn new(lower: f64, upper: f64) -> Result<Self> {
        if !lower.is_finite() || !upper.is_finite() {
            return Err(MathError::InvalidInput(
                "Scaling bounds must be finite".to_string(),
            ));
        }
        if lower >= upper {
            return Err(MathError::InvalidInput(format!(
                "Lower bound ({}) must be below upper bound ({})",
                lower, upper
            )));
        }

        Ok(Self { lower, upper })
    }

    pub fn lower(&self) -> f64 {
        self.lower
    }

    pub fn upper(&self) -> f64 {
        self.upper
    }

    /// Midpoint of the target range, used for columns without any spread
    pub fn midpoint(&self) -> f64 {
        (self.lower + self.upper) / 2.0
    }

    /// Rescale a column of values.
    ///
    /// A column whose values are all identical has no range to divide by; every
    /// value is mapped to the midpoint of the target range instead.
    pub fn rescale(&self, values: &[f64]) -> Result<Vec<f64>> {
        if values.iter().any(|v| !v.is_finite()) {
            return Err(MathError::InvalidInput(
                "Cannot rescale a column containing non-finite values".to_string(),
            ));
        }
        if values.is_empty() {
            return Ok(Vec::new());
        }

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let range = max - min;

        if range == 0.0 {
            return Ok(vec![self.midpoint(); values.len()]);
        }

        let span = self.upper - self.lower;
        Ok(values
            .iter()
            .map(|v| (self.lower + (v - min) * span / range).clamp(self.lower, self.upper))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rescale_maps_extremes_to_bounds() {
        let scaler = MinMaxScaler::default();
        let scaled = scaler.rescale(&[10.0, 15.0, 20.0]).unwrap();

        assert!((scaled[0] - DEFAULT_LOWER).abs() < 1e-12);
        assert!((scaled[1] - 1.5).abs() < 1e-12);
        assert!((scaled[2] - DEFAULT_UPPER).abs() < 1e-12);
    }

    #[test]
    fn test_rescale_is_idempotent() {
        let scaler = MinMaxScaler::default();
        let once = scaler.rescale(&[3.0, -7.5, 120.0, 42.0]).unwrap();
        let twice = scaler.rescale(&once).unwrap();

        for (a, b) in once.iter().zip(twice.iter()) {
            assert!((a - b).abs() < 1e-9);
        }
        assert!(once.iter().all(|v| *v >= DEFAULT_LOWER && *v <= DEFAULT_UPPER));
    }

    #[test]
    fn test_constant_column_maps_to_midpoint() {
        let scaler = MinMaxScaler::default();
        let scaled = scaler.rescale(&[259.05, 259.05, 259.05]).unwrap();

        assert_eq!(scaled, vec![1.5, 1.5, 1.5]);
    }

    #[test]
    fn test_invalid_bounds_and_values() {
        assert!(MinMaxScaler::new(3.0, 1.0).is_err());
        assert!(MinMaxScaler::new(f64::NAN, 1.0).is_err());

        let scaler = MinMaxScaler::default();
        assert!(scaler.rescale(&[1.0, f64::INFINITY]).is_err());
        assert!(scaler.rescale(&[]).unwrap().is_empty());
    }
}
