//! Monster catalog loader.

use std::path::Path;

use game_core::{MonsterRoster, MonsterTemplate};

use crate::loaders::{LoadResult, read_file};

/// Loader for the monster catalog from RON files.
///
/// RON format: `Vec<MonsterTemplate>`; `dodge` is a percentage.
pub struct MonsterLoader;

impl MonsterLoader {
    pub fn load(path: &Path) -> LoadResult<MonsterRoster> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<MonsterRoster> {
        let templates: Vec<MonsterTemplate> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse monster catalog RON: {}", e))?;
        if templates.is_empty() {
            anyhow::bail!("Monster catalog is empty");
        }
        if let Some(t) = templates.iter().find(|t| t.level == 0 || t.dodge > 100) {
            anyhow::bail!(
                "Monster {} has level {} and dodge {}; level must be >= 1 and dodge <= 100",
                t.name,
                t.level,
                t.dodge
            );
        }
        Ok(MonsterRoster::new(templates))
    }
}
