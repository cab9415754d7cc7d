//! Item catalog loader.

use std::path::Path;

use crate::catalog::ItemCatalog;
use crate::loaders::{LoadResult, read_file};

/// Loader for the item catalog from RON files.
pub struct ItemLoader;

impl ItemLoader {
    /// Load an [`ItemCatalog`] from a RON file. Missing groups are empty.
    pub fn load(path: &Path) -> LoadResult<ItemCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<ItemCatalog> {
        let catalog: ItemCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse item catalog RON: {}", e))?;
        if let Some(w) = catalog.weapons.iter().find(|w| !(1..=2).contains(&w.hands)) {
            anyhow::bail!("Weapon {} needs 1 or 2 hands, not {}", w.name, w.hands);
        }
        Ok(catalog)
    }
}
