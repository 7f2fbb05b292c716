//! Tracked items and their price histories

use crate::error::{ForecastError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A single recorded price
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceObservation {
    pub date: NaiveDate,
    pub price: f64,
}

/// A certain product at a certain store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Kind of product, e.g. "apples"
    pub item_type: String,
    /// Detailed description, unique across the catalog
    pub description: String,
    /// Net weight or count, e.g. "5lb bag"
    pub unit_quantity: String,
    pub store_name: String,
    pub store_location: String,
    pub is_store_brand: bool,
    price_history: BTreeMap<NaiveDate, f64>,
}

impl Item {
    /// Create an item with an empty price history
    pub fn new(
        item_type: impl Into<String>,
        description: impl Into<String>,
        unit_quantity: impl Into<String>,
        store_name: impl Into<String>,
        store_location: impl Into<String>,
        is_store_brand: bool,
    ) -> Self {
        Self {
            item_type: item_type.into(),
            description: description.into(),
            unit_quantity: unit_quantity.into(),
            store_name: store_name.into(),
            store_location: store_location.into(),
            is_store_brand,
            price_history: BTreeMap::new(),
        }
    }

    /// Record the price paid on `date`.
    ///
    /// A second entry for the same date replaces the first (last write wins).
    /// Returns the replaced price, if any.
    pub fn add_price(&mut self, date: NaiveDate, price: f64) -> Result<Option<f64>> {
        if !price.is_finite() || price <= 0.0 {
            return Err(ForecastError::InvalidParameter(format!(
                "Price must be a positive number, got {}",
                price
            )));
        }

        Ok(self.price_history.insert(date, price))
    }

    /// Remove the price entry recorded on `date`
    pub fn remove_price(&mut self, date: NaiveDate) -> Option<f64> {
        self.price_history.remove(&date)
    }

    pub fn price_on(&self, date: NaiveDate) -> Option<f64> {
        self.price_history.get(&date).copied()
    }

    /// Observations in ascending date order
    pub fn observations(&self) -> impl Iterator<Item = PriceObservation> + '_ {
        self.price_history
            .iter()
            .map(|(date, price)| PriceObservation {
                date: *date,
                price: *price,
            })
    }

    /// `(date, price)` pairs in ascending date order
    pub fn price_series(&self) -> Vec<(NaiveDate, f64)> {
        self.price_history.iter().map(|(d, p)| (*d, *p)).collect()
    }

    pub fn latest(&self) -> Option<PriceObservation> {
        self.price_history
            .iter()
            .next_back()
            .map(|(date, price)| PriceObservation {
                date: *date,
                price: *price,
            })
    }

    pub fn len(&self) -> usize {
        self.price_history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.price_history.is_empty()
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Item description: \t{}", self.description)?;
        writeln!(f, "Type: \t\t\t{}", self.item_type)?;
        writeln!(f, "Unit quantity: \t\t{}", self.unit_quantity)?;
        writeln!(f, "Store: \t\t\t{} {}", self.store_name, self.store_location)?;
        writeln!(f, " Date: \t\t Price:")?;
        for obs in self.observations() {
            writeln!(f, "{}\t${:>5.2}", obs.date, obs.price)?;
        }
        Ok(())
    }
}
