use chrono::{Duration, NaiveDate};
use price_forecast::macro_data::{PublishedSeries, StaticProvider};
use price_forecast::trendline::price_trendline;
use price_forecast::{ForecastParams, Forecaster, Item, Timeframe};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Price Forecast: Basic Forecasting Example");
    println!("=========================================\n");

    let start = NaiveDate::from_ymd_opt(2019, 1, 5).ok_or("invalid start date")?;
    let item = create_sample_item(start)?;
    let today = start + Duration::days(420);
    println!(
        "Tracking '{}' with {} price entries, today is {}\n",
        item.description,
        item.len(),
        today
    );

    let forecaster = Forecaster::new(create_sample_indicators(start));

    for timeframe in [Timeframe::Today, Timeframe::OneMonth, Timeframe::ThreeMonths] {
        let params = ForecastParams::new(timeframe.days(), 2, 0.5)?;
        match forecaster.predict(&item, &params, today) {
            Ok(result) => {
                println!(
                    "{:<20} ${:.2} (fitted on {} entries, RMSE {:.3})",
                    timeframe.label(),
                    result.predicted_value,
                    result.training_rows,
                    result.fit_metrics.rmse
                );
            }
            Err(err) => println!("{:<20} {}", timeframe.label(), err.report()),
        }
    }

    println!("\nQuadratic trendline, every 10th point:");
    let trend = price_trendline(&item.price_series(), 2, Timeframe::OneMonth.days(), today)?;
    for (date, value) in trend.points.iter().step_by(10) {
        println!("  {}  {:>6.2}", date, value);
    }

    Ok(())
}

/// Weekly purchases with a slow upward drift
fn create_sample_item(start: NaiveDate) -> Result<Item, Box<dyn std::error::Error>> {
    let mut item = Item::new("eggs", "Large eggs dozen", "12 ct", "Aldi", "Main St", true);
    for week in 0..60 {
        let drift = 0.004 * week as f64;
        let wobble = if week % 3 == 0 { 0.05 } else { 0.0 };
        item.add_price(start + Duration::weeks(week), 1.49 + drift + wobble)?;
    }
    Ok(item)
}

/// Monthly CPI readings and quarterly GDP growth covering the sample period
fn create_sample_indicators(start: NaiveDate) -> StaticProvider {
    let cpi = (0..20)
        .map(|month| (start - Duration::days(10) + Duration::days(30 * month), 251.7 + 0.35 * month as f64))
        .collect();
    let gdp = (0..7)
        .map(|quarter| (start - Duration::days(10) + Duration::days(91 * quarter), 2.0 + 0.3 * (quarter % 3) as f64))
        .collect();

    StaticProvider::new(vec![
        PublishedSeries::new("CPI", cpi),
        PublishedSeries::new("GDP", gdp),
    ])
}
