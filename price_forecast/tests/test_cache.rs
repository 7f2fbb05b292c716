use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use price_forecast::macro_data::{
    CachingProvider, MacroData, MacroIndicatorProvider, PublishedSeries, StaticProvider,
};
use price_forecast::{ForecastParams, Forecaster, Item, ProviderError};
use std::cell::Cell;

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn cpi() -> StaticProvider {
    StaticProvider::default().with_series(PublishedSeries::new(
        "CPI",
        vec![(date("2019-12-01"), 256.9), (date("2020-02-01"), 258.7)],
    ))
}

/// Provider that fails every request and counts the attempts
#[derive(Default)]
struct FailingProvider {
    calls: Cell<usize>,
}

impl MacroIndicatorProvider for FailingProvider {
    fn fetch(&self, _dates: &[NaiveDate]) -> Result<MacroData, ProviderError> {
        self.calls.set(self.calls.get() + 1);
        Err(ProviderError::Fetch {
            series: "CPI".to_string(),
            reason: "connection refused".to_string(),
        })
    }
}

#[test]
fn test_repeated_requests_hit_the_cache() {
    let provider = CachingProvider::new(cpi());
    let dates = [date("2020-01-01"), date("2020-02-15")];

    let first = provider.fetch(&dates).unwrap();
    let second = provider.fetch(&dates).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.get("CPI"), Some(&[256.9, 258.7][..]));
    assert_eq!(provider.misses(), 1);
}

#[test]
fn test_different_dates_miss() {
    let provider = CachingProvider::new(cpi());

    provider.fetch(&[date("2020-01-01")]).unwrap();
    provider.fetch(&[date("2020-01-02")]).unwrap();
    assert_eq!(provider.misses(), 2);

    provider.invalidate();
    provider.fetch(&[date("2020-01-01")]).unwrap();
    assert_eq!(provider.misses(), 3);
}

#[test]
fn test_failures_are_not_cached() {
    let provider = CachingProvider::new(FailingProvider::default());

    assert!(provider.fetch(&[date("2020-01-01")]).is_err());
    assert!(provider.fetch(&[date("2020-01-01")]).is_err());
    assert_eq!(provider.inner().calls.get(), 2);
    assert_eq!(provider.misses(), 0);
}

#[test]
fn test_forecaster_reuses_fetched_data() {
    let mut item = Item::new("milk", "Whole milk", "1 gal", "Aldi", "Main St", true);
    item.add_price(date("2020-01-01"), 2.00).unwrap();
    item.add_price(date("2020-02-01"), 2.20).unwrap();
    item.add_price(date("2020-03-01"), 2.10).unwrap();

    let forecaster = Forecaster::new(CachingProvider::new(cpi()));
    let params = ForecastParams::default();
    let today = date("2020-03-15");

    let first = forecaster.predict(&item, &params, today).unwrap();
    let second = forecaster.predict(&item, &params, today).unwrap();
    assert_eq!(first, second);
    assert_eq!(forecaster.provider().misses(), 1);

    // A new observation changes the requested dates
    item.add_price(date("2020-03-10"), 2.15).unwrap();
    forecaster.predict(&item, &params, today).unwrap();
    assert_eq!(forecaster.provider().misses(), 2);
}

#[test]
fn test_oldest_entry_is_evicted_at_capacity() {
    let provider = CachingProvider::with_capacity(cpi(), 2);
    let first = [date("2020-01-01")];
    let second = [date("2020-01-02")];
    let third = [date("2020-01-03")];

    provider.fetch(&first).unwrap();
    provider.fetch(&second).unwrap();
    provider.fetch(&third).unwrap();
    assert_eq!(provider.len(), 2);
    assert_eq!(provider.misses(), 3);

    // Newer entries are still served from memory
    provider.fetch(&third).unwrap();
    provider.fetch(&second).unwrap();
    assert_eq!(provider.misses(), 3);

    provider.fetch(&first).unwrap();
    assert_eq!(provider.misses(), 4);
    assert_eq!(provider.len(), 2);
}

#[test]
fn test_daily_requests_stay_bounded() {
    let provider = CachingProvider::new(cpi());
    let start = date("2020-01-01");

    for day in 0..100 {
        provider
            .fetch(&[start, start + chrono::Duration::days(day)])
            .unwrap();
    }
    assert_eq!(provider.len(), provider.capacity());
    assert_eq!(provider.misses(), 100);
}

#[test]
fn test_zero_capacity_never_caches() {
    let provider = CachingProvider::with_capacity(cpi(), 0);
    provider.fetch(&[date("2020-01-01")]).unwrap();
    provider.fetch(&[date("2020-01-01")]).unwrap();

    assert!(provider.is_empty());
    assert_eq!(provider.misses(), 2);
}
