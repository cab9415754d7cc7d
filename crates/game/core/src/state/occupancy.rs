use std::collections::BTreeMap;

use crate::board::Position;

use super::{HeroId, MonsterId};

/// Position tables for both sides.
///
/// Within one side a tile holds at most one combatant; a hero and a monster
/// may share a tile. Only [`super::BattleState`] mutates these tables.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Occupancy {
    heroes: BTreeMap<HeroId, Position>,
    monsters: BTreeMap<MonsterId, Position>,
}

impl Occupancy {
    pub fn hero_position(&self, id: HeroId) -> Option<Position> {
        self.heroes.get(&id).copied()
    }

    pub fn monster_position(&self, id: MonsterId) -> Option<Position> {
        self.monsters.get(&id).copied()
    }

    pub fn hero_at(&self, position: Position) -> Option<HeroId> {
        self.heroes
            .iter()
            .find(|(_, p)| **p == position)
            .map(|(id, _)| *id)
    }

    pub fn monster_at(&self, position: Position) -> Option<MonsterId> {
        self.monsters
            .iter()
            .find(|(_, p)| **p == position)
            .map(|(id, _)| *id)
    }

    pub fn heroes(&self) -> impl Iterator<Item = (HeroId, Position)> + '_ {
        self.heroes.iter().map(|(id, p)| (*id, *p))
    }

    pub fn monsters(&self) -> impl Iterator<Item = (MonsterId, Position)> + '_ {
        self.monsters.iter().map(|(id, p)| (*id, *p))
    }

    /// Returns the hero already standing on `position`, if it is not `id`.
    pub(super) fn set_hero(&mut self, id: HeroId, position: Position) -> Result<(), HeroId> {
        match self.hero_at(position) {
            Some(other) if other != id => Err(other),
            _ => {
                self.heroes.insert(id, position);
                Ok(())
            }
        }
    }

    pub(super) fn set_monster(
        &mut self,
        id: MonsterId,
        position: Position,
    ) -> Result<(), MonsterId> {
        match self.monster_at(position) {
            Some(other) if other != id => Err(other),
            _ => {
                self.monsters.insert(id, position);
                Ok(())
            }
        }
    }

    pub(super) fn remove_monster(&mut self, id: MonsterId) -> Option<Position> {
        self.monsters.remove(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_side_cannot_share_a_tile() {
        let mut occ = Occupancy::default();
        let p = Position::new(3, 0);
        assert!(occ.set_hero(HeroId(0), p).is_ok());
        assert_eq!(occ.set_hero(HeroId(1), p), Err(HeroId(0)));
        assert!(occ.set_hero(HeroId(0), p).is_ok());
        assert!(occ.set_monster(MonsterId(7), p).is_ok());
        assert_eq!(occ.hero_at(p), Some(HeroId(0)));
        assert_eq!(occ.monster_at(p), Some(MonsterId(7)));
    }

    #[test]
    fn removing_monster_frees_tile() {
        let mut occ = Occupancy::default();
        let p = Position::new(0, 0);
        occ.set_monster(MonsterId(1), p).unwrap();
        assert_eq!(occ.remove_monster(MonsterId(1)), Some(p));
        assert!(occ.set_monster(MonsterId(2), p).is_ok());
    }
}
