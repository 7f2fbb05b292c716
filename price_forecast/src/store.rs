//! Flat-file persistence of the item catalog
//!
//! Each item is stored in its own text file inside a folder:
//!
//! ```text
//! apples
//! Store brand red delicious apples
//! 5lb bag
//! Walmart
//! Wake Forest
//! True
//! 2020-01-01,  2.00
//! 2020-02-01,  2.20
//! ```
//!
//! Six attribute lines are followed by one `date, price` line per observation.

use crate::catalog::ItemCatalog;
use crate::error::{ForecastError, Result};
use crate::item::Item;
use chrono::NaiveDate;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const ATTRIBUTE_LINES: usize = 6;

/// Folder of item files
#[derive(Debug, Clone)]
pub struct FlatFileStore {
    dir: PathBuf,
}

impl FlatFileStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `description`
    pub fn item_path(&self, description: &str) -> PathBuf {
        self.dir.join(file_name_for(description))
    }

    /// Load every `*.txt` item file in the folder.
    ///
    /// A missing folder yields an empty catalog.
    pub fn load(&self) -> Result<ItemCatalog> {
        let mut catalog = ItemCatalog::new();
        if !self.dir.exists() {
            info!(dir = %self.dir.display(), "item folder does not exist yet, starting empty");
            return Ok(catalog);
        }

        let mut paths: Vec<PathBuf> = fs::read_dir(&self.dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.extension().map_or(false, |ext| ext == "txt"))
            .collect();
        paths.sort();

        for path in paths {
            let text = fs::read_to_string(&path)?;
            let item = parse_item(&text).map_err(|e| {
                ForecastError::DataError(format!("{}: {}", path.display(), e))
            })?;
            debug!(path = %path.display(), entries = item.len(), "loaded item");
            catalog.insert(item)?;
        }

        info!(items = catalog.len(), dir = %self.dir.display(), "loaded item catalog");
        Ok(catalog)
    }

    /// Write one file per item, creating the folder if needed.
    ///
    /// Nothing is written when two items map to the same file name.
    pub fn save(&self, catalog: &ItemCatalog) -> Result<()> {
        let mut file_names = HashSet::new();
        for item in catalog.iter() {
            if !file_names.insert(file_name_for(&item.description)) {
                return Err(ForecastError::CatalogError(format!(
                    "'{}' shares its file name with another item",
                    item.description
                )));
            }
        }

        fs::create_dir_all(&self.dir)?;
        for item in catalog.iter() {
            self.save_item(item)?;
        }

        info!(items = catalog.len(), dir = %self.dir.display(), "saved item catalog");
        Ok(())
    }

    pub fn save_item(&self, item: &Item) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.item_path(&item.description), render_item(item))?;
        Ok(())
    }

    /// Delete the file of a removed item. Returns whether a file was deleted.
    pub fn delete_item(&self, description: &str) -> Result<bool> {
        let path = self.item_path(description);
        if !path.exists() {
            return Ok(false);
        }

        fs::remove_file(path)?;
        Ok(true)
    }
}

/// "Store brand red delicious apples" -> "store_brand_red_delicious_apples.txt"
pub fn file_name_for(description: &str) -> String {
    let stem: String = description
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            ' ' | '/' | '\\' => '_',
            other => other,
        })
        .collect();
    format!("{}.txt", stem)
}

/// Serialize an item into its file representation
pub fn render_item(item: &Item) -> String {
    let mut out = String::new();
    for attribute in [
        item.item_type.as_str(),
        item.description.as_str(),
        item.unit_quantity.as_str(),
        item.store_name.as_str(),
        item.store_location.as_str(),
        if item.is_store_brand { "True" } else { "False" },
    ] {
        out.push_str(attribute);
        out.push('\n');
    }

    for obs in item.observations() {
        out.push_str(&format!("{}, {:>5.2}\n", obs.date, obs.price));
    }
    out
}

/// Parse an item from its file representation
pub fn parse_item(text: &str) -> Result<Item> {
    let mut lines = text.lines();
    let mut attributes = Vec::with_capacity(ATTRIBUTE_LINES);
    for _ in 0..ATTRIBUTE_LINES {
        match lines.next() {
            Some(line) => attributes.push(line.trim_end_matches('\r').to_string()),
            None => {
                return Err(ForecastError::DataError(format!(
                    "Expected {} attribute lines, found {}",
                    ATTRIBUTE_LINES,
                    attributes.len()
                )))
            }
        }
    }

    let mut item = Item::new(
        attributes[0].clone(),
        attributes[1].clone(),
        attributes[2].clone(),
        attributes[3].clone(),
        attributes[4].clone(),
        parse_flag(&attributes[5])?,
    );

    let rest: String = lines
        .filter(|l| !l.trim().is_empty())
        .map(|l| format!("{}\n", l))
        .collect();
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(rest.as_bytes());

    for record in reader.deserialize::<(NaiveDate, f64)>() {
        let (date, price) = record?;
        item.add_price(date, price)?;
    }

    Ok(item)
}

/// Accepts `true`/`false`, `y`/`n`, `yes`/`no` and `1`/`0`, case-insensitively
pub fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "y" | "yes" | "1" => Ok(true),
        "false" | "n" | "no" | "0" | "" => Ok(false),
        other => Err(ForecastError::DataError(format!(
            "Expected a yes/no flag, found '{}'",
            other
        ))),
    }
}
