//! Model fitting and forecast curve reconstruction

use crate::error::{ForecastError, Result};
use crate::features::FeatureTable;
use crate::metrics::{evaluate_fit, FitMetrics};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info};
use trend_math::{MathError, RidgeRegression};

/// Outcome of a successful forecast
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastResult {
    /// One date per training row plus the prediction date, each shifted by the horizon
    pub anchor_dates: Vec<NaiveDate>,
    /// Fitted value per training row, aligned with `anchor_dates` minus the last
    pub fitted_curve: Vec<f64>,
    /// Forecast for `anchor_dates.last()`
    pub predicted_value: f64,
    /// Number of rows the model was fitted on
    pub training_rows: usize,
    /// Regression inputs, in coefficient order
    pub feature_names: Vec<String>,
    /// In-sample fit quality
    pub fit_metrics: FitMetrics,
}

impl ForecastResult {
    /// Date the prediction applies to
    pub fn prediction_date(&self) -> Option<NaiveDate> {
        self.anchor_dates.last().copied()
    }

    /// `(date, value)` points of the fitted curve
    pub fn curve_points(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.anchor_dates
            .iter()
            .copied()
            .zip(self.fitted_curve.iter().copied())
    }
}

/// Fit a ridge regression on the labeled rows of `table` and predict the
/// synthetic "today" row.
///
/// Fewer than two usable rows, or any numerical breakdown of the fit, is
/// reported as insufficient data.
pub fn fit_and_forecast(
    table: &FeatureTable,
    horizon_days: u32,
    regularization: f64,
) -> Result<ForecastResult> {
    if table.is_empty() {
        return Err(ForecastError::InsufficientData(
            "Feature table is empty".to_string(),
        ));
    }

    let prediction_row = table.prediction_row();
    let prediction_input = table.feature_row(prediction_row);

    let training_rows = table.training_rows();
    debug!(
        usable = training_rows.len(),
        dropped = prediction_row - training_rows.len(),
        "partitioned feature table"
    );
    if training_rows.len() < 2 {
        return Err(ForecastError::InsufficientData(format!(
            "Need at least 2 labeled price entries, found {}",
            training_rows.len()
        )));
    }

    let rows: Vec<Vec<f64>> = training_rows
        .iter()
        .map(|&i| table.feature_row(i))
        .collect();
    let labels: Vec<f64> = training_rows
        .iter()
        .filter_map(|&i| table.labels()[i])
        .collect();

    let mut model = RidgeRegression::new(regularization)?;
    model.fit(&rows, &labels).map_err(numerical_failure)?;
    let fitted_curve = model.predict_many(&rows).map_err(numerical_failure)?;
    let predicted_value = model
        .predict(&prediction_input)
        .map_err(numerical_failure)?;

    let anchor_dates = training_rows
        .iter()
        .map(|&i| table.elapsed_days()[i])
        .chain(std::iter::once(table.prediction_elapsed_days()))
        .map(|elapsed| table.date_at(elapsed, horizon_days))
        .collect::<Result<Vec<_>>>()?;

    let fit_metrics = evaluate_fit(&fitted_curve, &labels)?;
    info!(
        rows = training_rows.len(),
        features = prediction_input.len(),
        predicted_value,
        rmse = fit_metrics.rmse,
        "fitted price model"
    );

    Ok(ForecastResult {
        anchor_dates,
        fitted_curve,
        predicted_value,
        training_rows: training_rows.len(),
        feature_names: table.feature_names(),
        fit_metrics,
    })
}

fn numerical_failure(err: MathError) -> ForecastError {
    ForecastError::InsufficientData(format!("Model could not be fitted: {}", err))
}
