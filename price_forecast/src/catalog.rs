//! In-memory collection of tracked items keyed by description

use crate::error::{ForecastError, Result};
use crate::item::Item;
use crate::store::file_name_for;
use std::collections::{BTreeMap, BTreeSet};

/// Catalog of items; descriptions are unique
#[derive(Debug, Clone, Default)]
pub struct ItemCatalog {
    items: BTreeMap<String, Item>,
}

impl ItemCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a new item. Fails if an item with the same description, or one
    /// saved under the same file name, exists.
    pub fn insert(&mut self, item: Item) -> Result<()> {
        if item.description.trim().is_empty() {
            return Err(ForecastError::CatalogError(
                "Item description must not be empty".to_string(),
            ));
        }
        if self.items.contains_key(&item.description) {
            return Err(ForecastError::CatalogError(format!(
                "An item described as '{}' already exists",
                item.description
            )));
        }

        let file_name = file_name_for(&item.description);
        if let Some(existing) = self
            .items
            .values()
            .find(|i| file_name_for(&i.description) == file_name)
        {
            return Err(ForecastError::CatalogError(format!(
                "'{}' would be stored in the same file as '{}'",
                item.description, existing.description
            )));
        }

        self.items.insert(item.description.clone(), item);
        Ok(())
    }

    pub fn get(&self, description: &str) -> Option<&Item> {
        self.items.get(description)
    }

    pub fn get_mut(&mut self, description: &str) -> Option<&mut Item> {
        self.items.get_mut(description)
    }

    /// Look up an item, failing with a catalog error when it is unknown
    pub fn require(&self, description: &str) -> Result<&Item> {
        self.get(description)
            .ok_or_else(|| ForecastError::CatalogError(format!("No item described as '{}'", description)))
    }

    pub fn remove(&mut self, description: &str) -> Option<Item> {
        self.items.remove(description)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Distinct store names, sorted
    pub fn store_names(&self) -> Vec<String> {
        self.items
            .values()
            .map(|i| i.store_name.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct locations recorded for a store, sorted
    pub fn store_locations(&self, store_name: &str) -> Vec<String> {
        self.items
            .values()
            .filter(|i| i.store_name == store_name)
            .map(|i| i.store_location.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Items sold at a specific store location
    pub fn items_at(&self, store_name: &str, store_location: &str) -> Vec<&Item> {
        self.items
            .values()
            .filter(|i| i.store_name == store_name && i.store_location == store_location)
            .collect()
    }
}

impl FromIterator<Item> for ItemCatalog {
    /// Builds a catalog; a later item replaces an earlier one with the same description
    fn from_iter<T: IntoIterator<Item = Item>>(iter: T) -> Self {
        Self {
            items: iter
                .into_iter()
                .map(|item| (item.description.clone(), item))
                .collect(),
        }
    }
}
