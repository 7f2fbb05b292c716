//! # Price Forecast
//!
//! A Rust library for tracking the prices of everyday products and forecasting
//! them against macroeconomic indicators.
//!
//! ## Features
//!
//! - Item catalog with per-date price histories and flat-file persistence
//! - Macro indicator providers (FRED text files over HTTP, in-memory, cached)
//! - Training-set construction: horizon labels, rescaled and polynomial features
//! - Ridge regression forecasts anchored on calendar dates
//! - Polynomial price trendlines for plotting
//!
//! ## Pipeline
//!
//! ```text
//! Item price history ──┐
//!                      ├─> features::assemble ──> model::fit_and_forecast ──> ForecastResult
//! Macro provider ──────┘        (labels from target::synthesize_labels)
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use price_forecast::macro_data::{PublishedSeries, StaticProvider};
//! use price_forecast::{Forecaster, ForecastParams, Item};
//!
//! let date = |s: &str| s.parse::<NaiveDate>().unwrap();
//!
//! let mut item = Item::new("milk", "Whole milk gallon", "1 gal", "Aldi", "Main St", true);
//! item.add_price(date("2020-01-01"), 2.00)?;
//! item.add_price(date("2020-02-01"), 2.20)?;
//! item.add_price(date("2020-03-01"), 2.10)?;
//!
//! let provider = StaticProvider::default().with_series(PublishedSeries::new(
//!     "CPI",
//!     vec![(date("2019-12-01"), 256.9), (date("2020-02-01"), 258.7)],
//! ));
//!
//! let forecaster = Forecaster::new(provider);
//! let params = ForecastParams::new(30, 1, 0.0)?;
//! let result = forecaster.predict(&item, &params, date("2020-03-15"))?;
//!
//! assert!(result.predicted_value.is_finite());
//! # Ok::<(), price_forecast::ForecastError>(())
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod features;
pub mod forecaster;
pub mod item;
pub mod logging;
pub mod macro_data;
pub mod metrics;
pub mod model;
pub mod params;
pub mod store;
pub mod target;
pub mod timeframe;
pub mod trendline;

// Re-export commonly used types
pub use crate::catalog::ItemCatalog;
pub use crate::error::{ForecastError, ProviderError};
pub use crate::features::FeatureTable;
pub use crate::forecaster::{predict, Forecaster};
pub use crate::item::{Item, PriceObservation};
pub use crate::macro_data::MacroIndicatorProvider;
pub use crate::model::ForecastResult;
pub use crate::params::ForecastParams;
pub use crate::store::FlatFileStore;
pub use crate::timeframe::Timeframe;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
