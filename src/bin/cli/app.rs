use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;

use mneme_lib::{CardStore, FileCardStorage};

/// Shared application state for CLI commands
pub struct App {
    pub store: CardStore,
}

impl App {
    /// Open the card store, scoped to a category when one is given
    pub fn new(data_dir: Option<&Path>, category: Option<&str>) -> Result<Self> {
        let base_path = match data_dir {
            Some(path) => path.to_path_buf(),
            None => FileCardStorage::default_data_dir()
                .context("Failed to resolve data directory")?,
        };

        let storage = FileCardStorage::new(base_path)
            .context("Failed to initialize card storage")?;

        Ok(Self {
            store: CardStore::new(Box::new(storage), category.map(String::from)),
        })
    }

    /// Today's date in local time, the "now" for all due checks
    pub fn today() -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}
