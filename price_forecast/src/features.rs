//! Feature table construction
//!
//! Turns an item's price history into a regression table:
//!
//! ```text
//!   Date  Price   CPI   GDP   Monetary Base   CPI^2 ... CPI^0.5 ...     Y
//!      0   1.99  0.001 2.999          0.001    ...                   2.29
//!     18   1.99  1.204 2.999          0.870    ...                   2.49
//!     31   2.29  2.999 0.001          2.999    ...                     -
//!    812      -  2.999 0.001          2.999    ...                     -   <- today
//! ```
//!
//! Dates are stored as days elapsed since the earliest observation. The last
//! row stands for today; it carries neither price nor label and only serves
//! as input for the final prediction.

use crate::error::{ForecastError, Result};
use crate::macro_data::MacroIndicatorProvider;
use crate::params::ForecastParams;
use crate::target::synthesize_labels;
use crate::timeframe::shift_date;
use chrono::NaiveDate;
use tracing::{debug, warn};
use trend_math::polynomial::{expand, expansion_exponents, exponent_label};
use trend_math::MinMaxScaler;

/// Name of the elapsed-days column
pub const DATE_COLUMN: &str = "Date";

/// A named, rescaled feature column
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureColumn {
    pub name: String,
    pub values: Vec<f64>,
}

/// Regression table built from one item's price history
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureTable {
    anchor_date: NaiveDate,
    elapsed_days: Vec<i64>,
    prices: Vec<Option<f64>>,
    columns: Vec<FeatureColumn>,
    labels: Vec<Option<f64>>,
}

impl FeatureTable {
    /// Earliest date in the table; elapsed days count from here
    pub fn anchor_date(&self) -> NaiveDate {
        self.anchor_date
    }

    /// Number of rows, including the prediction row
    pub fn len(&self) -> usize {
        self.elapsed_days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elapsed_days.is_empty()
    }

    pub fn elapsed_days(&self) -> &[i64] {
        &self.elapsed_days
    }

    pub fn prices(&self) -> &[Option<f64>] {
        &self.prices
    }

    pub fn labels(&self) -> &[Option<f64>] {
        &self.labels
    }

    /// Rescaled indicator columns and their polynomial expansions
    pub fn columns(&self) -> &[FeatureColumn] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
    }

    /// Names of the regression inputs, in the order of `feature_row`
    pub fn feature_names(&self) -> Vec<String> {
        std::iter::once(DATE_COLUMN.to_string())
            .chain(self.columns.iter().map(|c| c.name.clone()))
            .collect()
    }

    /// Regression inputs of a row: elapsed days followed by every feature column
    pub fn feature_row(&self, row: usize) -> Vec<f64> {
        std::iter::once(self.elapsed_days[row] as f64)
            .chain(self.columns.iter().map(|c| c.values[row]))
            .collect()
    }

    /// Index of the synthetic "today" row
    pub fn prediction_row(&self) -> usize {
        self.len() - 1
    }

    pub fn prediction_elapsed_days(&self) -> i64 {
        self.elapsed_days[self.prediction_row()]
    }

    /// Historical rows that have both a price and a label
    pub fn training_rows(&self) -> Vec<usize> {
        (0..self.prediction_row())
            .filter(|&i| self.prices[i].is_some() && self.labels[i].is_some())
            .collect()
    }

    /// Calendar date of an elapsed-day value shifted `horizon_days` into the future
    pub fn date_at(&self, elapsed_days: i64, horizon_days: u32) -> Result<NaiveDate> {
        shift_date(self.anchor_date, elapsed_days + i64::from(horizon_days))
    }
}

/// Build the feature table for a price history.
///
/// `series` is the item's `(date, price)` history; `today` becomes the
/// prediction row. The provider is queried once for all dates.
pub fn assemble<P>(
    series: &[(NaiveDate, f64)],
    params: &ForecastParams,
    provider: &P,
    today: NaiveDate,
) -> Result<FeatureTable>
where
    P: MacroIndicatorProvider + ?Sized,
{
    params.validate()?;

    let mut history = series.to_vec();
    history.sort_by_key(|(d, _)| *d);
    if history.windows(2).any(|w| w[0].0 == w[1].0) {
        return Err(ForecastError::DataError(
            "Price history contains two entries for the same date".to_string(),
        ));
    }

    let latest = match history.last() {
        Some((date, _)) => *date,
        None => {
            return Err(ForecastError::InsufficientData(
                "Item has no price entries".to_string(),
            ))
        }
    };
    if latest > today {
        warn!(%latest, %today, "latest price entry is dated in the future");
        return Err(ForecastError::StalePrice { latest, today });
    }

    let dates: Vec<NaiveDate> = history
        .iter()
        .map(|(d, _)| *d)
        .chain(std::iter::once(today))
        .collect();

    let macro_data = provider.fetch(&dates)?;
    macro_data.validate(dates.len())?;
    debug!(
        rows = dates.len(),
        indicators = macro_data.len(),
        "joined macro indicators"
    );

    let mut labels = synthesize_labels(
        &history,
        i64::from(params.horizon_days),
        i64::from(params.max_slack_days),
    );
    labels.push(None);
    debug!(
        labeled = labels.iter().filter(|l| l.is_some()).count(),
        rows = labels.len(),
        horizon_days = params.horizon_days,
        "synthesized labels"
    );

    let scaler = MinMaxScaler::default();
    let mut columns = Vec::with_capacity(macro_data.len());
    for series in macro_data.iter() {
        columns.push(FeatureColumn {
            name: series.name.clone(),
            values: scaler.rescale(&series.values)?,
        });
    }

    let exponents = expansion_exponents(params.polynomial_order);
    let mut expanded = Vec::with_capacity(columns.len() * exponents.len());
    for column in &columns {
        for exponent in &exponents {
            expanded.push(FeatureColumn {
                name: format!("{}^{}", column.name, exponent_label(*exponent)),
                values: expand(&column.values, *exponent)?,
            });
        }
    }
    columns.extend(expanded);

    let anchor_date = dates[0];
    let elapsed_days = dates
        .iter()
        .map(|d| (*d - anchor_date).num_days())
        .collect();
    let prices = history
        .iter()
        .map(|(_, p)| Some(*p))
        .chain(std::iter::once(None))
        .collect();

    Ok(FeatureTable {
        anchor_date,
        elapsed_days,
        prices,
        columns,
        labels,
    })
}
