//! Polynomial price trendline for plotting next to the raw history

use crate::error::{ForecastError, Result};
use crate::timeframe::shift_date;
use chrono::{Duration, NaiveDate};
use serde::Serialize;
use trend_math::{MathError, PolynomialFit};

/// Number of segments the plotted date range is divided into
pub const TRENDLINE_BINS: i64 = 50;

/// Sampled trendline
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trendline {
    pub order: u32,
    pub points: Vec<(NaiveDate, f64)>,
}

/// Fit price against elapsed days with a polynomial of `order` and sample it
/// from the first observation to `today + horizon_days`
pub fn price_trendline(
    series: &[(NaiveDate, f64)],
    order: u32,
    horizon_days: u32,
    today: NaiveDate,
) -> Result<Trendline> {
    let mut history = series.to_vec();
    history.sort_by_key(|(d, _)| *d);
    let earliest = match history.first() {
        Some((d, _)) => *d,
        None => {
            return Err(ForecastError::InsufficientData(
                "Item has no price entries".to_string(),
            ))
        }
    };

    let x: Vec<f64> = history
        .iter()
        .map(|(d, _)| (*d - earliest).num_days() as f64)
        .collect();
    let y: Vec<f64> = history.iter().map(|(_, p)| *p).collect();
    let fit = PolynomialFit::fit(&x, &y, order as usize).map_err(|e| match e {
        MathError::InsufficientData(msg) => ForecastError::InsufficientData(msg),
        other => ForecastError::MathError(other),
    })?;

    let latest = shift_date(today, i64::from(horizon_days))?;
    let day_range = (latest - earliest).num_days().max(0);
    let stride = (day_range / TRENDLINE_BINS).max(1);

    let mut points = Vec::new();
    let mut day = 0;
    while day <= day_range {
        points.push((earliest + Duration::days(day), fit.evaluate(day as f64)?));
        day += stride;
    }

    Ok(Trendline { order, points })
}
