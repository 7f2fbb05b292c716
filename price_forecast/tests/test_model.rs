use approx::assert_relative_eq;
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use price_forecast::features::assemble;
use price_forecast::macro_data::{PublishedSeries, StaticProvider};
use price_forecast::model::fit_and_forecast;
use price_forecast::{predict, ForecastError, ForecastParams, Forecaster, Item, ProviderError};

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn milk(prices: &[(&str, f64)]) -> Item {
    let mut item = Item::new("milk", "Whole milk gallon", "1 gal", "Aldi", "Main St", true);
    for (d, p) in prices {
        item.add_price(date(d), *p).unwrap();
    }
    item
}

fn indicators() -> StaticProvider {
    StaticProvider::new(vec![
        PublishedSeries::new(
            "CPI",
            vec![
                (date("2019-12-01"), 256.974),
                (date("2020-01-01"), 257.971),
                (date("2020-02-01"), 258.678),
                (date("2020-03-01"), 258.115),
            ],
        ),
        PublishedSeries::new(
            "GDP",
            vec![(date("2019-10-01"), 2.4), (date("2020-01-01"), -5.0)],
        ),
        PublishedSeries::new(
            "Monetary Base",
            vec![
                (date("2019-12-01"), 3_425_000.0),
                (date("2020-01-01"), 3_443_000.0),
                (date("2020-02-01"), 3_413_000.0),
                (date("2020-03-01"), 4_255_000.0),
            ],
        ),
    ])
}

#[test]
fn test_end_to_end_forecast() {
    let item = milk(&[("2020-01-01", 2.00), ("2020-02-01", 2.20), ("2020-03-01", 2.10)]);
    let forecaster = Forecaster::new(indicators());
    let params = ForecastParams::new(30, 1, 0.0).unwrap();

    let result = forecaster.predict(&item, &params, date("2020-03-15")).unwrap();

    assert_eq!(
        result.anchor_dates,
        vec![date("2020-01-31"), date("2020-03-02"), date("2020-04-14")]
    );
    assert_eq!(result.training_rows, 2);
    assert_eq!(result.fitted_curve.len(), 2);
    assert_eq!(result.prediction_date(), Some(date("2020-04-14")));
    assert_eq!(
        result.feature_names,
        vec!["Date", "CPI", "GDP", "Monetary Base"]
    );
    assert!(result.predicted_value.is_finite());

    // More features than rows: the fit interpolates the labels
    assert_relative_eq!(result.fitted_curve[0], 2.20, epsilon = 1e-6);
    assert_relative_eq!(result.fitted_curve[1], 2.10, epsilon = 1e-6);
    assert!(result.fit_metrics.rmse < 1e-6);
}

#[test]
fn test_single_observation_is_insufficient() {
    let item = milk(&[("2020-01-01", 2.00)]);
    let forecaster = Forecaster::new(indicators());
    let params = ForecastParams::new(30, 1, 0.0).unwrap();

    let err = forecaster
        .predict(&item, &params, date("2020-03-15"))
        .unwrap_err();

    assert!(matches!(err, ForecastError::InsufficientData(_)));
    assert!(err.report().starts_with("forecast failed"));
}

#[test]
fn test_zero_horizon_fits_observed_prices() {
    // Prices on a straight line in elapsed days: 2.00 + 0.01 * days
    let item = milk(&[("2020-01-01", 2.00), ("2020-02-01", 2.31), ("2020-03-01", 2.60)]);
    let forecaster = Forecaster::new(StaticProvider::default());
    let params = ForecastParams::new(0, 1, 0.0).unwrap();

    let result = forecaster.predict(&item, &params, date("2020-03-15")).unwrap();

    assert_eq!(result.training_rows, 3);
    assert_eq!(
        result.anchor_dates,
        vec![
            date("2020-01-01"),
            date("2020-02-01"),
            date("2020-03-01"),
            date("2020-03-15"),
        ]
    );
    for (fitted, actual) in result.fitted_curve.iter().zip([2.00, 2.31, 2.60]) {
        assert_relative_eq!(*fitted, actual, epsilon = 1e-9);
    }
    assert_relative_eq!(result.predicted_value, 2.74, epsilon = 1e-9);
    assert_relative_eq!(result.fit_metrics.r_squared, 1.0, epsilon = 1e-9);
}

#[test]
fn test_strong_regularization_predicts_label_mean() {
    let item = milk(&[
        ("2020-01-01", 2.00),
        ("2020-02-01", 2.20),
        ("2020-03-01", 2.10),
        ("2020-04-01", 2.40),
    ]);
    let forecaster = Forecaster::new(StaticProvider::default());
    let params = ForecastParams::new(30, 1, 1e12).unwrap();

    let result = forecaster.predict(&item, &params, date("2020-04-10")).unwrap();

    let mean = (2.20 + 2.10 + 2.40) / 3.0;
    assert_relative_eq!(result.predicted_value, mean, epsilon = 1e-6);
    for fitted in &result.fitted_curve {
        assert_relative_eq!(*fitted, mean, epsilon = 1e-6);
    }
}

#[test]
fn test_no_future_matches_is_insufficient() {
    let item = milk(&[("2018-01-01", 1.50), ("2020-06-01", 2.00), ("2025-01-01", 2.60)]);
    let forecaster = Forecaster::new(StaticProvider::default());
    let params = ForecastParams::new(365, 1, 0.0).unwrap();

    let err = forecaster
        .predict(&item, &params, date("2025-02-01"))
        .unwrap_err();
    assert!(matches!(err, ForecastError::InsufficientData(_)));
}

#[test]
fn test_provider_failure_propagates() {
    let item = milk(&[("2019-01-01", 2.00), ("2019-02-01", 2.20), ("2019-03-01", 2.10)]);
    let forecaster = Forecaster::new(indicators());
    let params = ForecastParams::default();

    let err = forecaster
        .predict(&item, &params, date("2019-03-15"))
        .unwrap_err();
    assert!(matches!(
        err,
        ForecastError::Provider(ProviderError::Unresolved { .. })
    ));
}

#[test]
fn test_fit_on_assembled_table() {
    let item = milk(&[("2020-01-01", 2.00), ("2020-02-01", 2.20), ("2020-03-01", 2.10)]);
    let params = ForecastParams::new(30, 2, 0.5).unwrap();
    let table = assemble(&item.price_series(), &params, &indicators(), date("2020-03-15")).unwrap();

    let result = fit_and_forecast(&table, params.horizon_days, params.regularization).unwrap();

    assert_eq!(result.feature_names.len(), table.feature_names().len());
    assert_eq!(result.anchor_dates.len(), result.fitted_curve.len() + 1);
    assert!(result.fitted_curve.iter().all(|v| v.is_finite()));
}

#[test]
fn test_one_shot_predict_matches_forecaster() {
    let item = milk(&[("2020-01-01", 2.00), ("2020-02-01", 2.20), ("2020-03-01", 2.10)]);
    let provider = indicators();
    let today = date("2020-03-15");

    let (anchors, value, curve) = predict(&item, 30, 1, 0.0, &provider, today).unwrap();
    let result = Forecaster::new(&provider)
        .predict(&item, &ForecastParams::new(30, 1, 0.0).unwrap(), today)
        .unwrap();

    assert_eq!(anchors, result.anchor_dates);
    assert_eq!(curve, result.fitted_curve);
    assert_eq!(value, result.predicted_value);
}

#[test]
fn test_invalid_parameters_are_rejected() {
    let item = milk(&[("2020-01-01", 2.00), ("2020-02-01", 2.20)]);
    let provider = indicators();

    let err = predict(&item, 30, 0, 0.0, &provider, date("2020-03-15")).unwrap_err();
    assert!(matches!(err, ForecastError::InvalidParameter(_)));

    let err = predict(&item, 30, 1, -1.0, &provider, date("2020-03-15")).unwrap_err();
    assert!(matches!(err, ForecastError::InvalidParameter(_)));
}
