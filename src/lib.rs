//! # Price Tracker
//!
//! Umbrella crate for the price tracking workspace.
//!
//! - [`price_forecast`]: items, price histories, macro data and forecasts
//! - [`trend_math`]: rescaling, polynomial features and ridge regression
//!
//! ## Example
//!
//! ```
//! use price_tracker_workspace::{Item, ItemCatalog};
//!
//! let mut catalog = ItemCatalog::new();
//! catalog
//!     .insert(Item::new("apples", "Red delicious apples", "5lb bag", "Walmart", "Main St", false))
//!     .unwrap();
//!
//! assert_eq!(catalog.store_locations("Walmart"), vec!["Main St".to_string()]);
//! ```

pub use price_forecast;
pub use trend_math;

pub use price_forecast::{
    predict, FlatFileStore, ForecastError, ForecastParams, ForecastResult, Forecaster, Item,
    ItemCatalog, MacroIndicatorProvider, PriceObservation, Timeframe,
};

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use price_forecast::macro_data::{PublishedSeries, StaticProvider};

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_predict_through_facade() {
        let mut item = Item::new("eggs", "Large eggs dozen", "12 ct", "Kroger", "Elm St", true);
        item.add_price(date("2021-01-04"), 1.49).unwrap();
        item.add_price(date("2021-02-03"), 1.59).unwrap();
        item.add_price(date("2021-03-05"), 1.79).unwrap();
        item.add_price(date("2021-04-04"), 1.69).unwrap();

        let provider = StaticProvider::default().with_series(PublishedSeries::new(
            "CPI",
            vec![(date("2020-12-01"), 260.5), (date("2021-02-01"), 263.0)],
        ));

        let (dates, predicted, curve) =
            predict(&item, 30, 1, 0.1, &provider, date("2021-04-20")).unwrap();

        assert_eq!(dates.len(), curve.len() + 1);
        assert_eq!(*dates.last().unwrap(), date("2021-05-20"));
        assert!(predicted.is_finite());
    }

    #[test]
    fn test_timeframe_days() {
        assert_eq!(Timeframe::OneYear.days(), 365);
        assert_eq!(Timeframe::TenYears.days(), 3652);
    }
}
