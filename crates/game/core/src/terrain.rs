//! Terrain buffs and terrain combat multipliers.
//!
//! Bush, Cave and Koulou raise dexterity, agility and strength respectively
//! while a hero stands on them. The buff is stored as `(tile, stat, delta)` so
//! it can be reversed exactly when the hero leaves.

use crate::board::TileKind;
use crate::config::BalanceConfig;
use crate::state::{Hero, Side, Stat};

/// Active buff on one hero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TerrainBuff {
    pub tile: TileKind,
    pub stat: Stat,
    pub delta: u32,
}

/// Stat boosted by a tile, if any.
pub const fn buffed_stat(tile: TileKind) -> Option<Stat> {
    match tile {
        TileKind::Bush => Some(Stat::Dexterity),
        TileKind::Cave => Some(Stat::Agility),
        TileKind::Koulou => Some(Stat::Strength),
        _ => None,
    }
}

/// Removes `previous` from the hero, then applies the buff for `tile`.
///
/// # Formula
///
/// `delta = max(1, stat / divisor)`, computed on the stat after the old buff
/// has been removed.
pub fn reapply(
    hero: &mut Hero,
    previous: Option<TerrainBuff>,
    tile: TileKind,
    divisor: u32,
) -> Option<TerrainBuff> {
    if let Some(old) = previous {
        let value = hero.stats.get_mut(old.stat);
        *value = value.saturating_sub(old.delta);
    }

    let stat = buffed_stat(tile)?;
    let value = hero.stats.get_mut(stat);
    let delta = (*value / divisor.max(1)).max(1);
    *value += delta;
    Some(TerrainBuff { tile, stat, delta })
}

/// Outgoing damage multiplier for an attacker standing on `tile`.
pub fn attack_multiplier(tile: TileKind, attacker: Side, balance: &BalanceConfig) -> f64 {
    match (tile, attacker) {
        (TileKind::Koulou, _) | (TileKind::Bush, Side::Heroes) => {
            balance.terrain_attack_multiplier
        }
        _ => 1.0,
    }
}

/// Incoming damage multiplier for a hero standing on `tile`.
pub fn defense_multiplier(tile: TileKind, balance: &BalanceConfig) -> f64 {
    match tile {
        TileKind::Bush | TileKind::Cave => balance.terrain_defense_multiplier,
        _ => 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{HeroClass, HeroProfile};

    fn hero() -> Hero {
        let profile = HeroProfile {
            name: "Muamman_Duathall".into(),
            class: HeroClass::Warrior,
            mana: 300,
            strength: 900,
            agility: 500,
            dexterity: 750,
            gold: 2546,
            experience: 0,
        };
        Hero::from_profile(&profile, &BalanceConfig::default())
    }

    #[test]
    fn buff_switches_cleanly_between_tiles() {
        let mut hero = hero();
        let base = hero.stats;

        let bush = reapply(&mut hero, None, TileKind::Bush, 10);
        assert_eq!(
            bush,
            Some(TerrainBuff {
                tile: TileKind::Bush,
                stat: Stat::Dexterity,
                delta: 75
            })
        );
        assert_eq!(hero.stats.dexterity, base.dexterity + 75);

        let cave = reapply(&mut hero, bush, TileKind::Cave, 10);
        assert_eq!(hero.stats.dexterity, base.dexterity);
        assert_eq!(hero.stats.agility, base.agility + 55);
        assert_eq!(cave.map(|b| b.stat), Some(Stat::Agility));

        let plain = reapply(&mut hero, cave, TileKind::Plain, 10);
        assert_eq!(plain, None);
        assert_eq!(hero.stats, base);
    }

    #[test]
    fn tiny_stats_still_gain_one() {
        let mut hero = hero();
        hero.stats.strength = 3;
        let buff = reapply(&mut hero, None, TileKind::Koulou, 10);
        assert_eq!(buff.map(|b| b.delta), Some(1));
        assert_eq!(hero.stats.strength, 4);
    }

    #[test]
    fn multipliers_by_side() {
        let balance = BalanceConfig::default();
        assert_eq!(attack_multiplier(TileKind::Bush, Side::Heroes, &balance), 1.1);
        assert_eq!(attack_multiplier(TileKind::Bush, Side::Monsters, &balance), 1.0);
        assert_eq!(attack_multiplier(TileKind::Koulou, Side::Monsters, &balance), 1.1);
        assert_eq!(defense_multiplier(TileKind::Cave, &balance), 0.9);
        assert_eq!(defense_multiplier(TileKind::Plain, &balance), 1.0);
    }
}
