//! Authoritative battle state.
//!
//! [`BattleState`] owns the board, both rosters, the occupancy tables, terrain
//! buffs and round bookkeeping. Positions change only through the methods
//! here, and every hero relocation re-applies the terrain buff of the
//! destination tile, so "the active buff matches the current tile" holds
//! after every call.
mod hero;
mod inventory;
mod items;
mod monster;
mod occupancy;
mod round;

pub use hero::{Hero, HeroClass, HeroProfile, HeroStats, Stat};
pub use inventory::{BagIndex, Inventory, ItemHolder};
pub use items::{Armor, Item, ItemKind, Potion, PotionStat, Spell, SpellElement, Weapon};
pub use monster::Monster;
pub use occupancy::Occupancy;
pub use round::{BattleEvent, GameOutcome, OutcomeReason, RoundLog, RoundState, Side};

use core::fmt;
use std::collections::BTreeMap;

use crate::board::{Board, LaneId, Position};
use crate::env::{Dice, RngOracle, RollContext, RollCounter};
use crate::error::InvariantViolation;
use crate::terrain::{self, TerrainBuff};

/// Party slot of a hero. Party order is turn order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeroId(pub u8);

/// Monster identifier, allocated in spawn order and never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonsterId(pub u32);

/// Either side's combatant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Combatant {
    Hero(HeroId),
    Monster(MonsterId),
}

impl fmt::Display for HeroId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "H{}", self.0 + 1)
    }
}

impl fmt::Display for MonsterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "M{}", self.0)
    }
}

impl fmt::Display for Combatant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Combatant::Hero(id) => write!(f, "hero {id}"),
            Combatant::Monster(id) => write!(f, "monster {id}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleState {
    pub board: Board,
    heroes: Vec<Hero>,
    monsters: BTreeMap<MonsterId, Monster>,
    occupancy: Occupancy,
    buffs: BTreeMap<HeroId, TerrainBuff>,
    spawns: BTreeMap<HeroId, Position>,
    /// Highest hero level per lane, refreshed at setup and on every kill.
    lane_levels: BTreeMap<LaneId, u32>,
    /// Remaining monster attacks each hero ignores.
    immunity: BTreeMap<HeroId, u32>,
    pub round: RoundState,
    pub rolls: RollCounter,
    next_monster_id: u32,
}

impl BattleState {
    pub fn new(board: Board, seed: u64) -> Self {
        Self {
            board,
            heroes: Vec::new(),
            monsters: BTreeMap::new(),
            occupancy: Occupancy::default(),
            buffs: BTreeMap::new(),
            spawns: BTreeMap::new(),
            lane_levels: BTreeMap::new(),
            immunity: BTreeMap::new(),
            round: RoundState::new(),
            rolls: RollCounter::new(seed),
            next_monster_id: 1,
        }
    }

    // ===== rosters =====

    pub fn add_hero(&mut self, hero: Hero) -> HeroId {
        let id = HeroId(self.heroes.len() as u8);
        self.heroes.push(hero);
        id
    }

    pub fn hero(&self, id: HeroId) -> Option<&Hero> {
        self.heroes.get(id.0 as usize)
    }

    pub fn hero_mut(&mut self, id: HeroId) -> Option<&mut Hero> {
        self.heroes.get_mut(id.0 as usize)
    }

    pub fn require_hero(&self, id: HeroId) -> Result<&Hero, InvariantViolation> {
        self.hero(id).ok_or(InvariantViolation::UnknownCombatant {
            actor: Combatant::Hero(id),
        })
    }

    pub fn require_hero_mut(&mut self, id: HeroId) -> Result<&mut Hero, InvariantViolation> {
        self.heroes
            .get_mut(id.0 as usize)
            .ok_or(InvariantViolation::UnknownCombatant {
                actor: Combatant::Hero(id),
            })
    }

    /// A hero together with a roll handle, for free actions that need both
    /// (the market restocks with the match dice).
    pub fn hero_with_dice<'a>(
        &'a mut self,
        id: HeroId,
        rng: &'a dyn RngOracle,
        context: RollContext,
    ) -> Result<(&'a mut Hero, Dice<'a>), InvariantViolation> {
        let hero = self
            .heroes
            .get_mut(id.0 as usize)
            .ok_or(InvariantViolation::UnknownCombatant {
                actor: Combatant::Hero(id),
            })?;
        Ok((hero, Dice::new(rng, &mut self.rolls, context)))
    }

    /// Heroes in party order.
    pub fn heroes(&self) -> impl Iterator<Item = (HeroId, &Hero)> + '_ {
        self.heroes
            .iter()
            .enumerate()
            .map(|(i, h)| (HeroId(i as u8), h))
    }

    pub fn hero_ids(&self) -> Vec<HeroId> {
        (0..self.heroes.len()).map(|i| HeroId(i as u8)).collect()
    }

    pub fn monster(&self, id: MonsterId) -> Option<&Monster> {
        self.monsters.get(&id)
    }

    pub fn monster_mut(&mut self, id: MonsterId) -> Option<&mut Monster> {
        self.monsters.get_mut(&id)
    }

    pub fn require_monster_mut(&mut self, id: MonsterId) -> Result<&mut Monster, InvariantViolation> {
        self.monsters
            .get_mut(&id)
            .ok_or(InvariantViolation::UnknownCombatant {
                actor: Combatant::Monster(id),
            })
    }

    /// Monsters in spawn order.
    pub fn monsters(&self) -> impl Iterator<Item = (MonsterId, &Monster)> + '_ {
        self.monsters.iter().map(|(id, m)| (*id, m))
    }

    pub fn monster_ids(&self) -> Vec<MonsterId> {
        self.monsters.keys().copied().collect()
    }

    // ===== positions =====

    pub fn occupancy(&self) -> &Occupancy {
        &self.occupancy
    }

    pub fn hero_position(&self, id: HeroId) -> Option<Position> {
        self.occupancy.hero_position(id)
    }

    pub fn monster_position(&self, id: MonsterId) -> Option<Position> {
        self.occupancy.monster_position(id)
    }

    /// Position of a hero that is expected to be on the board.
    pub fn require_hero_position(&self, id: HeroId) -> Result<Position, InvariantViolation> {
        self.hero_position(id)
            .ok_or(InvariantViolation::MissingPosition {
                actor: Combatant::Hero(id),
            })
    }

    pub fn require_monster_position(&self, id: MonsterId) -> Result<Position, InvariantViolation> {
        self.monster_position(id)
            .ok_or(InvariantViolation::MissingPosition {
                actor: Combatant::Monster(id),
            })
    }

    /// Any hero on the tile, fainted or not.
    pub fn hero_at(&self, position: Position) -> Option<HeroId> {
        self.occupancy.hero_at(position)
    }

    pub fn monster_at(&self, position: Position) -> Option<MonsterId> {
        self.occupancy.monster_at(position)
    }

    /// Living heroes with a board position, in party order.
    pub fn living_heroes(&self) -> impl Iterator<Item = (HeroId, Position)> + '_ {
        self.heroes().filter_map(|(id, hero)| {
            if hero.is_fainted() {
                return None;
            }
            self.hero_position(id).map(|p| (id, p))
        })
    }

    /// Living monsters with a board position, in spawn order.
    pub fn living_monsters(&self) -> impl Iterator<Item = (MonsterId, Position)> + '_ {
        self.monsters().filter_map(|(id, monster)| {
            if monster.is_fainted() {
                return None;
            }
            self.monster_position(id).map(|p| (id, p))
        })
    }

    /// Moves (or first places) a hero and re-applies the destination's terrain buff.
    pub fn place_hero(
        &mut self,
        id: HeroId,
        position: Position,
        buff_divisor: u32,
    ) -> Result<Option<TerrainBuff>, InvariantViolation> {
        let tile = self
            .board
            .tile(position)
            .ok_or(InvariantViolation::MissingPosition {
                actor: Combatant::Hero(id),
            })?;
        let hero = self
            .heroes
            .get_mut(id.0 as usize)
            .ok_or(InvariantViolation::UnknownCombatant {
                actor: Combatant::Hero(id),
            })?;
        self.occupancy
            .set_hero(id, position)
            .map_err(|other| InvariantViolation::DoubleOccupancy {
                position,
                occupant: Combatant::Hero(other),
            })?;

        let previous = self.buffs.remove(&id);
        let buff = terrain::reapply(hero, previous, tile, buff_divisor);
        if let Some(buff) = buff {
            self.buffs.insert(id, buff);
        }
        Ok(buff)
    }

    /// [`Self::place_hero`], logging any buff the destination grants.
    pub fn relocate_hero(
        &mut self,
        id: HeroId,
        position: Position,
        buff_divisor: u32,
    ) -> Result<(), InvariantViolation> {
        if let Some(buff) = self.place_hero(id, position, buff_divisor)? {
            let hero = self.require_hero(id)?.name.clone();
            self.log(BattleEvent::TerrainBuff {
                hero,
                tile: buff.tile,
                stat: buff.stat,
                delta: buff.delta,
            });
        }
        Ok(())
    }

    /// Fails unless the hero's active buff matches the tile it stands on.
    pub fn check_buff(&self, id: HeroId) -> Result<(), InvariantViolation> {
        let position = self.require_hero_position(id)?;
        let expected = self
            .board
            .tile(position)
            .filter(|tile| terrain::buffed_stat(*tile).is_some());
        if self.buff(id).map(|b| b.tile) == expected {
            Ok(())
        } else {
            Err(InvariantViolation::StaleBuff {
                actor: Combatant::Hero(id),
                position,
            })
        }
    }

    pub fn buff(&self, id: HeroId) -> Option<TerrainBuff> {
        self.buffs.get(&id).copied()
    }

    pub fn spawn_monster(
        &mut self,
        monster: Monster,
        position: Position,
    ) -> Result<MonsterId, InvariantViolation> {
        let id = MonsterId(self.next_monster_id);
        self.occupancy
            .set_monster(id, position)
            .map_err(|other| InvariantViolation::DoubleOccupancy {
                position,
                occupant: Combatant::Monster(other),
            })?;
        self.next_monster_id += 1;
        self.monsters.insert(id, monster);
        Ok(id)
    }

    pub fn move_monster(&mut self, id: MonsterId, position: Position) -> Result<(), InvariantViolation> {
        if !self.monsters.contains_key(&id) {
            return Err(InvariantViolation::UnknownCombatant {
                actor: Combatant::Monster(id),
            });
        }
        self.occupancy
            .set_monster(id, position)
            .map_err(|other| InvariantViolation::DoubleOccupancy {
                position,
                occupant: Combatant::Monster(other),
            })
    }

    /// Drops fainted monsters from the roster and the occupancy table.
    pub fn remove_fainted_monsters(&mut self) -> Vec<(MonsterId, Monster)> {
        let fainted: Vec<MonsterId> = self
            .monsters
            .iter()
            .filter(|(_, m)| m.is_fainted())
            .map(|(id, _)| *id)
            .collect();
        fainted
            .into_iter()
            .filter_map(|id| {
                self.occupancy.remove_monster(id);
                self.monsters.remove(&id).map(|m| (id, m))
            })
            .collect()
    }

    // ===== spawn points and lanes =====

    pub fn set_spawn(&mut self, id: HeroId, position: Position) {
        self.spawns.insert(id, position);
    }

    pub fn spawn_of(&self, id: HeroId) -> Option<Position> {
        self.spawns.get(&id).copied()
    }

    /// The lane a hero belongs to: the lane of their spawn point.
    pub fn home_lane(&self, id: HeroId) -> Option<LaneId> {
        self.spawn_of(id).and_then(|p| self.board.lane_of(p))
    }

    /// Recomputes the highest hero level of each lane from home lanes.
    pub fn refresh_lane_levels(&mut self) {
        let mut levels = BTreeMap::new();
        for (id, hero) in self.heroes() {
            if let Some(lane) = self.home_lane(id) {
                let entry = levels.entry(lane).or_insert(0);
                *entry = (*entry).max(hero.level);
            }
        }
        self.lane_levels = levels;
    }

    /// Highest hero level recorded for a lane; 1 when none.
    pub fn lane_level(&self, lane: LaneId) -> u32 {
        self.lane_levels.get(&lane).copied().unwrap_or(1).max(1)
    }

    /// Highest level among all heroes; at least 1.
    pub fn max_hero_level(&self) -> u32 {
        self.heroes.iter().map(|h| h.level).max().unwrap_or(1).max(1)
    }

    // ===== immunity =====

    pub fn grant_immunity(&mut self, id: HeroId, attacks: u32) {
        if attacks > 0 {
            self.immunity.insert(id, attacks);
        }
    }

    pub fn immunity(&self, id: HeroId) -> u32 {
        self.immunity.get(&id).copied().unwrap_or(0)
    }

    /// Spends one unit of immunity. Returns true if the hero was immune.
    pub fn absorb_attack(&mut self, id: HeroId) -> bool {
        match self.immunity.get_mut(&id) {
            Some(remaining) if *remaining > 0 => {
                *remaining -= 1;
                if *remaining == 0 {
                    self.immunity.remove(&id);
                }
                true
            }
            _ => false,
        }
    }

    /// Called once after each monster phase: immunity never outlives it.
    pub fn expire_immunity(&mut self) {
        self.immunity.clear();
    }

    // ===== round =====

    pub fn log(&mut self, event: BattleEvent) {
        tracing::debug!(round = self.round.number, "{event}");
        self.round.log.push(event);
    }

    pub fn is_over(&self) -> bool {
        self.round.is_over()
    }
}
