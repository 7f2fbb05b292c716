//! Parameters of a forecast request

use crate::error::{ForecastError, Result};
use crate::target::DEFAULT_MAX_SLACK_DAYS;
use crate::timeframe::Timeframe;
use serde::{Deserialize, Serialize};

/// Longest accepted horizon, one hundred years
pub const MAX_HORIZON_DAYS: u32 = 36_525;

/// User-selected forecast parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastParams {
    /// Days into the future the forecast targets
    pub horizon_days: u32,
    /// 1 fits plain features; higher orders add powers and a square root
    pub polynomial_order: u32,
    /// Ridge coefficient, 0 for ordinary least squares
    pub regularization: f64,
    /// Largest allowed distance (days) between horizon and a labeling entry
    pub max_slack_days: u32,
}

impl Default for ForecastParams {
    fn default() -> Self {
        Self {
            horizon_days: Timeframe::OneMonth.days(),
            polynomial_order: 1,
            regularization: 0.0,
            max_slack_days: DEFAULT_MAX_SLACK_DAYS as u32,
        }
    }
}

impl ForecastParams {
    pub fn new(horizon_days: u32, polynomial_order: u32, regularization: f64) -> Result<Self> {
        let params = Self {
            horizon_days,
            polynomial_order,
            regularization,
            ..Self::default()
        };
        params.validate()?;
        Ok(params)
    }

    pub fn with_max_slack_days(mut self, max_slack_days: u32) -> Self {
        self.max_slack_days = max_slack_days;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.horizon_days > MAX_HORIZON_DAYS {
            return Err(ForecastError::InvalidParameter(format!(
                "Horizon must be at most {} days, got {}",
                MAX_HORIZON_DAYS, self.horizon_days
            )));
        }
        if self.polynomial_order == 0 {
            return Err(ForecastError::InvalidParameter(
                "Polynomial order must be at least 1".to_string(),
            ));
        }
        if !self.regularization.is_finite() || self.regularization < 0.0 {
            return Err(ForecastError::InvalidParameter(format!(
                "Regularization coefficient must be non-negative, got {}",
                self.regularization
            )));
        }
        if self.max_slack_days == 0 {
            return Err(ForecastError::InvalidParameter(
                "Max slack must be at least 1 day".to_string(),
            ));
        }
        Ok(())
    }
}
