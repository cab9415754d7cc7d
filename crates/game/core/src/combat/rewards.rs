//! Kill rewards.

use crate::config::BalanceConfig;
use crate::state::{Hero, Monster};

/// What the killing hero received.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KillReward {
    pub xp: u64,
    pub gold: u32,
    /// Levels gained from the XP.
    pub levels: u32,
}

/// Pays `hero` for defeating `monster`: `level * xp_per_monster_level` XP and
/// `level * gold_per_monster_level` gold.
pub fn grant_kill_reward(hero: &mut Hero, monster: &Monster, balance: &BalanceConfig) -> KillReward {
    let xp = u64::from(monster.level) * balance.xp_per_monster_level;
    let gold = monster.level * balance.gold_per_monster_level;
    hero.add_gold(gold);
    let levels = hero.gain_experience(xp, balance);
    KillReward { xp, gold, levels }
}
