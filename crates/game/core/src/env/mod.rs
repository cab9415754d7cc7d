//! Read-only collaborators consulted by the engine.
//!
//! Oracles expose the random source and monster templates. The [`BattleEnv`]
//! aggregate bundles them with the match configuration so the engine can
//! access everything it needs without hard coupling to concrete implementations.
mod dice;
mod error;
mod monsters;
mod rng;

pub use dice::{Dice, RollCounter};
pub use error::OracleError;
pub use monsters::{MonsterOracle, MonsterRoster, MonsterTemplate};
pub use rng::{PcgRng, RngOracle, RollContext, compute_seed};

use crate::config::GameConfig;

/// Aggregates read-only oracles required by the engine and action pipeline.
#[derive(Clone, Copy)]
pub struct BattleEnv<'a> {
    config: &'a GameConfig,
    rng: &'a dyn RngOracle,
    monsters: Option<&'a dyn MonsterOracle>,
}

impl<'a> BattleEnv<'a> {
    pub fn new(
        config: &'a GameConfig,
        rng: &'a dyn RngOracle,
        monsters: Option<&'a dyn MonsterOracle>,
    ) -> Self {
        Self {
            config,
            rng,
            monsters,
        }
    }

    pub fn with_all(
        config: &'a GameConfig,
        rng: &'a dyn RngOracle,
        monsters: &'a dyn MonsterOracle,
    ) -> Self {
        Self::new(config, rng, Some(monsters))
    }

    pub fn config(&self) -> &'a GameConfig {
        self.config
    }

    pub fn rng(&self) -> &'a dyn RngOracle {
        self.rng
    }

    /// Returns the MonsterOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::MonstersNotAvailable` if no provider was supplied.
    pub fn monsters(&self) -> Result<&'a dyn MonsterOracle, OracleError> {
        self.monsters.ok_or(OracleError::MonstersNotAvailable)
    }
}

impl core::fmt::Debug for BattleEnv<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BattleEnv")
            .field("config", self.config)
            .field("monsters", &self.monsters.is_some())
            .finish_non_exhaustive()
    }
}
