//! Supervised-learning targets for irregular price series
//!
//! The label of an observation is the price of the later observation whose
//! distance in days is closest to the forecast horizon. Observations without
//! a close enough partner get no label and are left out of training.
//!
//! ```text
//! horizon = 60, max slack = 15
//!
//!          Date  Price       Label
//!    2019-05-24   2.59  ---> 5.00   (entry 3 is 13 days off +60)
//!    2019-05-28   0.99  ---> 5.00   (entry 3 is  9 days off +60)
//!    2019-06-21   1.85         -
//!    2019-08-05   5.00  ---> 4.33   (entry 4 is 14 days off +60)
//!    2019-09-20   4.33         -
//! ```

use chrono::NaiveDate;

/// Largest allowed gap (days) between the horizon and an actual future entry
pub const DEFAULT_MAX_SLACK_DAYS: i64 = 15;

/// Produce one label per observation of a date-sorted series.
///
/// With a zero horizon every observation is its own label. Otherwise each
/// entry but the last looks at all later entries and picks the first one
/// minimizing `|days_between - horizon|`; the label is that entry's price when
/// the minimum is strictly below `max_slack_days`.
pub fn synthesize_labels(
    series: &[(NaiveDate, f64)],
    horizon_days: i64,
    max_slack_days: i64,
) -> Vec<Option<f64>> {
    if horizon_days == 0 {
        return series.iter().map(|(_, price)| Some(*price)).collect();
    }

    let mut labels = vec![None; series.len()];
    for (i, (date, _)) in series.iter().enumerate() {
        if let Some((offset, price)) = nearest_to_horizon(*date, &series[i + 1..], horizon_days) {
            if offset < max_slack_days {
                labels[i] = Some(price);
            }
        }
    }
    labels
}

/// First later entry whose offset from `date` is closest to the horizon,
/// returned with its distance from the horizon
fn nearest_to_horizon(
    date: NaiveDate,
    later: &[(NaiveDate, f64)],
    horizon_days: i64,
) -> Option<(i64, f64)> {
    let mut best: Option<(i64, f64)> = None;
    for (future_date, price) in later {
        let distance = ((*future_date - date).num_days() - horizon_days).abs();
        match best {
            Some((min, _)) if distance >= min => {}
            _ => best = Some((distance, *price)),
        }
    }
    best
}
