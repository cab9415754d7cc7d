//! Hero roster loader.

use std::collections::HashSet;
use std::path::Path;

use game_core::HeroProfile;

use crate::loaders::{LoadResult, read_file};

/// Loader for the hero roster from RON files.
///
/// RON format: `Vec<HeroProfile>`, e.g.
///
/// ```ron
/// [
///     (name: "Gaerdal_Ironhand", class: Warrior, mana: 100, strength: 700,
///      agility: 500, dexterity: 600, gold: 1354, experience: 7),
/// ]
/// ```
pub struct HeroLoader;

impl HeroLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<HeroProfile>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parses a roster. Names must be unique and the roster non-empty.
    pub fn parse(content: &str) -> LoadResult<Vec<HeroProfile>> {
        let roster: Vec<HeroProfile> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse hero roster RON: {}", e))?;
        if roster.is_empty() {
            anyhow::bail!("Hero roster is empty");
        }
        let mut seen = HashSet::new();
        for profile in &roster {
            if !seen.insert(profile.name.as_str()) {
                anyhow::bail!("Duplicate hero name in roster: {}", profile.name);
            }
        }
        Ok(roster)
    }
}
