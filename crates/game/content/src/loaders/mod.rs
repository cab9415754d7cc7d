//! Content loaders for reading game data from files.
//!
//! Each loader turns one RON/TOML file into game-core types. The
//! [`ContentFactory`] resolves the file names inside a data directory.

pub mod config;
pub mod factory;
pub mod heroes;
pub mod items;
pub mod monsters;

pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use heroes::HeroLoader;
pub use items::ItemLoader;
pub use monsters::MonsterLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
