//! Command-line front end: manage tracked items and forecast their prices.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use price_forecast::config::Config;
use price_forecast::logging::init_logging;
use price_forecast::macro_data::{CachingProvider, FredProvider, HttpTextSource};
use price_forecast::timeframe::{parse_horizon, shift_date};
use price_forecast::trendline::price_trendline;
use price_forecast::{FlatFileStore, ForecastParams, Forecaster, Item};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "pricecast")]
#[command(about = "Track grocery prices and forecast where they are heading", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file (defaults to ./pricecast.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Folder holding the item files; overrides the configuration
    #[arg(long, global = true)]
    items_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List tracked items
    Items {
        /// Only items sold by this store
        #[arg(short, long)]
        store: Option<String>,

        /// Only items at this store location (requires --store)
        #[arg(short, long, requires = "store")]
        location: Option<String>,
    },

    /// Start tracking a new item
    AddItem {
        #[arg(long = "type")]
        item_type: String,

        #[arg(long)]
        description: String,

        #[arg(long)]
        unit: String,

        #[arg(long)]
        store: String,

        #[arg(long)]
        location: String,

        #[arg(long)]
        store_brand: bool,
    },

    /// Stop tracking an item and delete its file
    RemoveItem {
        #[arg(short, long)]
        item: String,
    },

    /// Record a price paid; an existing entry for the date is replaced
    AddPrice {
        #[arg(short, long)]
        item: String,

        /// Purchase date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<NaiveDate>,

        #[arg(short, long)]
        price: f64,
    },

    /// Remove the price recorded on a date
    RemovePrice {
        #[arg(short, long)]
        item: String,

        #[arg(short, long)]
        date: NaiveDate,
    },

    /// Forecast an item's price
    Forecast {
        #[arg(short, long)]
        item: String,

        #[command(flatten)]
        overrides: ParamOverrides,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a polynomial trendline through an item's price history
    Trend {
        #[arg(short, long)]
        item: String,

        #[command(flatten)]
        overrides: ParamOverrides,

        #[arg(long)]
        json: bool,
    },
}

#[derive(clap::Args)]
struct ParamOverrides {
    /// Horizon as days or a timeframe name (today, 1m, 3m, 1y, 3y, 10y)
    #[arg(short = 'H', long)]
    horizon: Option<String>,

    /// Polynomial order
    #[arg(short, long)]
    order: Option<u32>,

    /// Regularization coefficient
    #[arg(short, long)]
    alpha: Option<f64>,

    /// Max slack in days when matching future prices
    #[arg(long)]
    slack: Option<u32>,

    /// Pretend today is this date (YYYY-MM-DD)
    #[arg(long)]
    today: Option<NaiveDate>,
}

impl ParamOverrides {
    fn apply(&self, defaults: ForecastParams) -> Result<ForecastParams> {
        let mut params = defaults;
        if let Some(horizon) = &self.horizon {
            params.horizon_days = parse_horizon(horizon)?;
        }
        if let Some(order) = self.order {
            params.polynomial_order = order;
        }
        if let Some(alpha) = self.alpha {
            params.regularization = alpha;
        }
        if let Some(slack) = self.slack {
            params.max_slack_days = slack;
        }
        params.validate()?;
        Ok(params)
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("Error: {:#}", err);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    init_logging(&config.logging.level);

    let items_dir = cli
        .items_dir
        .clone()
        .unwrap_or_else(|| config.store.items_dir.clone());
    let store = FlatFileStore::new(&items_dir);
    let mut catalog = store.load()?;

    match cli.command {
        Commands::Items { store, location } => {
            let items: Vec<&Item> = match (&store, &location) {
                (Some(s), Some(l)) => catalog.items_at(s, l),
                (Some(s), None) => catalog.iter().filter(|i| &i.store_name == s).collect(),
                _ => catalog.iter().collect(),
            };
            for item in items {
                let latest = item
                    .latest()
                    .map(|o| format!("${:.2} on {}", o.price, o.date))
                    .unwrap_or_else(|| "no prices".to_string());
                println!(
                    "{:<40} {:<12} {} ({}) - {} entries, latest {}",
                    item.description,
                    item.unit_quantity,
                    item.store_name,
                    item.store_location,
                    item.len(),
                    latest
                );
            }
        }

        Commands::AddItem {
            item_type,
            description,
            unit,
            store: store_name,
            location,
            store_brand,
        } => {
            let item = Item::new(item_type, description, unit, store_name, location, store_brand);
            catalog.insert(item.clone())?;
            store.save_item(&item)?;
        }

        Commands::RemoveItem { item } => {
            if catalog.remove(&item).is_none() {
                anyhow::bail!("no item described as '{}'", item);
            }
            store.delete_item(&item)?;
        }

        Commands::AddPrice { item, date, price } => {
            let date = date.unwrap_or_else(|| Local::now().date_naive());
            let entry = catalog
                .get_mut(&item)
                .with_context(|| format!("no item described as '{}'", item))?;
            if let Some(old) = entry.add_price(date, price)? {
                println!("Replaced ${:.2} recorded on {}", old, date);
            }
            store.save_item(entry)?;
        }

        Commands::RemovePrice { item, date } => {
            let entry = catalog
                .get_mut(&item)
                .with_context(|| format!("no item described as '{}'", item))?;
            if entry.remove_price(date).is_none() {
                anyhow::bail!("'{}' has no price recorded on {}", item, date);
            }
            store.save_item(entry)?;
        }

        Commands::Forecast {
            item,
            overrides,
            json,
        } => {
            let params = overrides.apply(config.forecast)?;
            let item = catalog.require(&item)?;

            let text_source = HttpTextSource::new(config.provider.timeout())?;
            let provider = CachingProvider::new(FredProvider::new(
                config.macro_series.clone(),
                text_source,
            ));
            let forecaster = Forecaster::new(provider);

            let result = match forecaster.predict(item, &params, overrides.today()) {
                Ok(result) => result,
                Err(err) => {
                    eprintln!("{}", err.report());
                    process::exit(2);
                }
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                let target_date = shift_date(overrides.today(), i64::from(params.horizon_days))?;
                println!(
                    "Predicted price for {} on {}: ${:.2}",
                    item.description, target_date, result.predicted_value
                );
                println!("Fitted on {} entries", result.training_rows);
                for (date, value) in result.curve_points() {
                    println!("  {}  {:>8.2}", date, value);
                }
                print!("{}", result.fit_metrics);
            }
        }

        Commands::Trend {
            item,
            overrides,
            json,
        } => {
            let params = overrides.apply(config.forecast)?;
            let item = catalog.require(&item)?;
            let trend = price_trendline(
                &item.price_series(),
                params.polynomial_order,
                params.horizon_days,
                overrides.today(),
            )?;

            if json {
                println!("{}", serde_json::to_string_pretty(&trend)?);
            } else {
                for (date, value) in &trend.points {
                    println!("{}  {:>8.2}", date, value);
                }
            }
        }
    }

    Ok(())
}
