//! Named forecast horizons

use crate::error::{ForecastError, Result};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Horizons offered for selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    Today,
    OneMonth,
    ThreeMonths,
    OneYear,
    ThreeYears,
    TenYears,
}

impl Timeframe {
    pub const ALL: [Timeframe; 6] = [
        Timeframe::Today,
        Timeframe::OneMonth,
        Timeframe::ThreeMonths,
        Timeframe::OneYear,
        Timeframe::ThreeYears,
        Timeframe::TenYears,
    ];

    pub fn days(self) -> u32 {
        match self {
            Timeframe::Today => 0,
            Timeframe::OneMonth => 30,
            Timeframe::ThreeMonths => 91,
            Timeframe::OneYear => 365,
            Timeframe::ThreeYears => 1096,
            Timeframe::TenYears => 3652,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Timeframe::Today => "Today",
            Timeframe::OneMonth => "1 month from today",
            Timeframe::ThreeMonths => "3 months from today",
            Timeframe::OneYear => "1 year from today",
            Timeframe::ThreeYears => "3 years from today",
            Timeframe::TenYears => "10 years from today",
        }
    }

    /// Short name accepted on the command line
    pub fn short_name(self) -> &'static str {
        match self {
            Timeframe::Today => "today",
            Timeframe::OneMonth => "1m",
            Timeframe::ThreeMonths => "3m",
            Timeframe::OneYear => "1y",
            Timeframe::ThreeYears => "3y",
            Timeframe::TenYears => "10y",
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Timeframe {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Timeframe::ALL
            .iter()
            .copied()
            .find(|t| {
                t.short_name().eq_ignore_ascii_case(wanted) || t.label().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| ForecastError::InvalidParameter(format!("Unknown timeframe '{}'", s)))
    }
}

/// `date` moved `days` into the future; fails past the last representable date
pub fn shift_date(date: NaiveDate, days: i64) -> Result<NaiveDate> {
    Duration::try_days(days)
        .and_then(|delta| date.checked_add_signed(delta))
        .ok_or_else(|| {
        ForecastError::InvalidParameter(format!("{} days after {} is out of range", days, date))
    })
}

/// Parse a horizon given either as a timeframe name or as a number of days
pub fn parse_horizon(s: &str) -> Result<u32> {
    match s.trim().parse::<u32>() {
        Ok(days) => Ok(days),
        Err(_) => s.parse::<Timeframe>().map(Timeframe::days),
    }
}
