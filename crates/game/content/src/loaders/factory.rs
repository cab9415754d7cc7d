//! Content factory for building oracles from data files.

use std::path::{Path, PathBuf};

use game_core::{GameConfig, HeroProfile, MonsterRoster};
use tracing::info;

use crate::catalog::ItemCatalog;
use crate::loaders::{ConfigLoader, HeroLoader, ItemLoader, LoadResult, MonsterLoader};

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── heroes.ron
/// ├── monsters.ron
/// └── items.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load game configuration from `config.toml`. A missing file yields the
    /// defaults.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            info!(path = %path.display(), "no config file; using defaults");
            return Ok(GameConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the hero roster from `heroes.ron`.
    pub fn load_heroes(&self) -> LoadResult<Vec<HeroProfile>> {
        HeroLoader::load(&self.data_dir.join("heroes.ron"))
    }

    /// Load the monster catalog from `monsters.ron`.
    pub fn load_monsters(&self) -> LoadResult<MonsterRoster> {
        MonsterLoader::load(&self.data_dir.join("monsters.ron"))
    }

    /// Load the item catalog from `items.ron`.
    pub fn load_items(&self) -> LoadResult<ItemCatalog> {
        ItemLoader::load(&self.data_dir.join("items.ron"))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }
}
