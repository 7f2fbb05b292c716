//! End-to-end price forecasting for a single item

use crate::error::Result;
use crate::features::{assemble, FeatureTable};
use crate::item::Item;
use crate::macro_data::MacroIndicatorProvider;
use crate::model::{fit_and_forecast, ForecastResult};
use crate::params::ForecastParams;
use chrono::{Local, NaiveDate};
use tracing::{info, warn};

/// Runs the training-set construction and fitting pipeline against a provider
#[derive(Debug, Clone)]
pub struct Forecaster<P> {
    provider: P,
}

impl<P: MacroIndicatorProvider> Forecaster<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Build the feature table for `item` as of `today`
    pub fn training_set(
        &self,
        item: &Item,
        params: &ForecastParams,
        today: NaiveDate,
    ) -> Result<FeatureTable> {
        assemble(&item.price_series(), params, &self.provider, today)
    }

    /// Forecast the price of `item` `params.horizon_days` after `today`
    pub fn predict(
        &self,
        item: &Item,
        params: &ForecastParams,
        today: NaiveDate,
    ) -> Result<ForecastResult> {
        info!(
            item = %item.description,
            entries = item.len(),
            horizon_days = params.horizon_days,
            polynomial_order = params.polynomial_order,
            regularization = params.regularization,
            "forecast requested"
        );

        let outcome = self
            .training_set(item, params, today)
            .and_then(|table| fit_and_forecast(&table, params.horizon_days, params.regularization));

        if let Err(err) = &outcome {
            warn!(item = %item.description, error = %err, "forecast failed");
        }
        outcome
    }

    /// Forecast relative to the local calendar date
    pub fn predict_from_today(&self, item: &Item, params: &ForecastParams) -> Result<ForecastResult> {
        self.predict(item, params, Local::now().date_naive())
    }
}

/// One-shot forecast: `(anchor dates, predicted value, fitted curve)` for an item
pub fn predict<P: MacroIndicatorProvider + ?Sized>(
    item: &Item,
    horizon_days: u32,
    polynomial_order: u32,
    regularization: f64,
    provider: &P,
    today: NaiveDate,
) -> Result<(Vec<NaiveDate>, f64, Vec<f64>)> {
    let params = ForecastParams::new(horizon_days, polynomial_order, regularization)?;
    let table = assemble(&item.price_series(), &params, provider, today)?;
    let result = fit_and_forecast(&table, params.horizon_days, params.regularization)?;
    Ok((result.anchor_dates, result.predicted_value, result.fitted_curve))
}
