//! Macroeconomic indicator data joined onto price observations

use crate::error::ProviderError;
use chrono::NaiveDate;
use serde::Serialize;

pub mod cache;
pub mod fred;

pub use cache::CachingProvider;
pub use fred::{FredProvider, HttpTextSource, SeriesSource, TextSource};

/// Values of one indicator, aligned with the dates they were requested for
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorSeries {
    pub name: String,
    pub values: Vec<f64>,
}

/// Indicator values for a list of dates, in provider order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MacroData {
    series: Vec<IndicatorSeries>,
}

impl MacroData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, values: Vec<f64>) {
        self.series.push(IndicatorSeries {
            name: name.into(),
            values,
        });
    }

    pub fn get(&self, name: &str) -> Option<&[f64]> {
        self.series
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.values.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = &IndicatorSeries> {
        self.series.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.series.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Check that every series holds exactly `expected` finite values
    pub fn validate(&self, expected: usize) -> Result<(), ProviderError> {
        for s in &self.series {
            if s.values.len() != expected {
                return Err(ProviderError::LengthMismatch {
                    series: s.name.clone(),
                    expected,
                    got: s.values.len(),
                });
            }
            if s.values.iter().any(|v| !v.is_finite()) {
                return Err(ProviderError::Parse {
                    series: s.name.clone(),
                    reason: "non-finite value".to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Source of macroeconomic indicator values.
///
/// For each requested date, every series reports the value most recently
/// published on or before that date.
pub trait MacroIndicatorProvider {
    fn fetch(&self, dates: &[NaiveDate]) -> Result<MacroData, ProviderError>;
}

impl<P: MacroIndicatorProvider + ?Sized> MacroIndicatorProvider for &P {
    fn fetch(&self, dates: &[NaiveDate]) -> Result<MacroData, ProviderError> {
        (**self).fetch(dates)
    }
}

impl<P: MacroIndicatorProvider + ?Sized> MacroIndicatorProvider for Box<P> {
    fn fetch(&self, dates: &[NaiveDate]) -> Result<MacroData, ProviderError> {
        (**self).fetch(dates)
    }
}

/// A published series: dated observations in ascending order
#[derive(Debug, Clone, PartialEq)]
pub struct PublishedSeries {
    name: String,
    observations: Vec<(NaiveDate, f64)>,
}

impl PublishedSeries {
    /// Create a series; observations are sorted by date
    pub fn new(name: impl Into<String>, mut observations: Vec<(NaiveDate, f64)>) -> Self {
        observations.sort_by_key(|(d, _)| *d);
        Self {
            name: name.into(),
            observations,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn observations(&self) -> &[(NaiveDate, f64)] {
        &self.observations
    }

    /// Value published most recently on or before `date`
    pub fn value_at(&self, date: NaiveDate) -> Option<f64> {
        let idx = self.observations.partition_point(|(d, _)| *d <= date);
        if idx == 0 {
            None
        } else {
            Some(self.observations[idx - 1].1)
        }
    }

    /// Step-function lookback join over a list of dates
    pub fn values_at(&self, dates: &[NaiveDate]) -> Result<Vec<f64>, ProviderError> {
        dates
            .iter()
            .map(|d| {
                self.value_at(*d).ok_or_else(|| ProviderError::Unresolved {
                    series: self.name.clone(),
                    date: *d,
                })
            })
            .collect()
    }
}

/// Provider backed by series held in memory
#[derive(Debug, Clone, Default)]
pub struct StaticProvider {
    series: Vec<PublishedSeries>,
}

impl StaticProvider {
    pub fn new(series: Vec<PublishedSeries>) -> Self {
        Self { series }
    }

    pub fn with_series(mut self, series: PublishedSeries) -> Self {
        self.series.push(series);
        self
    }
}

impl MacroIndicatorProvider for StaticProvider {
    fn fetch(&self, dates: &[NaiveDate]) -> Result<MacroData, ProviderError> {
        let mut data = MacroData::new();
        for s in &self.series {
            data.push(s.name(), s.values_at(dates)?);
        }
        Ok(data)
    }
}
