use chrono::{Duration, NaiveDate};
use pretty_assertions::assert_eq;
use price_forecast::target::{synthesize_labels, DEFAULT_MAX_SLACK_DAYS};
use rstest::rstest;

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn series(entries: &[(&str, f64)]) -> Vec<(NaiveDate, f64)> {
    entries.iter().map(|(d, p)| (date(d), *p)).collect()
}

#[rstest]
#[case(vec![("2020-01-01", 2.00)])]
#[case(vec![("2020-01-01", 2.00), ("2020-02-01", 2.20), ("2020-03-01", 2.10)])]
#[case(vec![("2019-05-24", 2.59), ("2019-05-28", 0.99), ("2021-01-01", 3.49)])]
fn test_zero_horizon_is_identity(#[case] entries: Vec<(&str, f64)>) {
    let data = series(&entries);
    let labels = synthesize_labels(&data, 0, DEFAULT_MAX_SLACK_DAYS);

    let expected: Vec<Option<f64>> = data.iter().map(|(_, p)| Some(*p)).collect();
    assert_eq!(labels, expected);
}

#[test]
fn test_exact_horizon_match_beats_earlier_entry() {
    let d0 = date("2020-01-01");
    let data = vec![
        (d0, 1.00),
        (d0 + Duration::days(13), 2.00),
        (d0 + Duration::days(60), 3.00),
    ];

    let labels = synthesize_labels(&data, 60, 15);

    // Entry 1 is 47 days from entry 2, which is 13 off the horizon
    assert_eq!(labels, vec![Some(3.00), Some(3.00), None]);
}

#[test]
fn test_reference_table() {
    let data = series(&[
        ("2019-05-24", 2.59),
        ("2019-05-28", 0.99),
        ("2019-06-21", 1.85),
        ("2019-08-05", 5.00),
        ("2019-09-20", 4.33),
        ("2020-02-24", 2.89),
        ("2020-04-11", 13.19),
        ("2020-04-25", 3.29),
        ("2020-05-10", 3.49),
        ("2020-05-18", 1.99),
    ]);

    let labels = synthesize_labels(&data, 60, 15);

    assert_eq!(
        labels,
        vec![
            Some(5.00),
            Some(5.00),
            None, // entry 3 is exactly 15 days off, slack is exclusive
            Some(4.33),
            None,
            Some(3.29),
            None,
            None,
            None,
            None,
        ]
    );
}

#[test]
fn test_ties_choose_earliest_future_entry() {
    let d0 = date("2021-06-01");
    let data = vec![
        (d0, 1.00),
        (d0 + Duration::days(50), 2.00),
        (d0 + Duration::days(70), 3.00),
    ];

    let labels = synthesize_labels(&data, 60, 15);
    assert_eq!(labels[0], Some(2.00));
}

#[rstest]
#[case(30, 15)]
#[case(365, 15)]
#[case(91, 5)]
fn test_sparse_history_has_no_labels(#[case] horizon: i64, #[case] slack: i64) {
    let data = series(&[("2018-01-01", 1.0), ("2020-06-01", 1.5), ("2025-01-01", 2.0)]);

    let labels = synthesize_labels(&data, horizon, slack);
    assert!(labels.iter().all(Option::is_none));
}

#[test]
fn test_last_entry_never_labeled() {
    let data = series(&[("2020-01-01", 1.0), ("2020-01-31", 1.1), ("2020-03-01", 1.2)]);

    let labels = synthesize_labels(&data, 30, 15);
    assert_eq!(labels.len(), 3);
    assert_eq!(labels[2], None);
}

#[test]
fn test_empty_series() {
    assert!(synthesize_labels(&[], 30, 15).is_empty());
    assert!(synthesize_labels(&[], 0, 15).is_empty());
}
