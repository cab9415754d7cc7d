//! Lane rules shared by hero actions and the monster AI.
//!
//! Everything here is a read-only query over [`BattleState`]. Heroes advance
//! toward row 0 and monsters toward the last row; neither side may end a move
//! beyond the foremost opponent in its lane.

use arrayvec::ArrayVec;

use crate::board::{Direction, LaneId, Position};
use crate::state::{BattleState, HeroId, MonsterId};

/// Same tile or one of the eight neighbours, and in the same lane.
pub fn in_range(state: &BattleState, a: Position, b: Position) -> bool {
    a.is_adjacent_or_same(b) && state.board.same_lane(a, b)
}

/// First living monster, in spawn order, that is in range of the hero.
pub fn engaged_monster(state: &BattleState, hero: HeroId) -> Option<MonsterId> {
    if state.hero(hero).is_none_or(|h| h.is_fainted()) {
        return None;
    }
    let at = state.hero_position(hero)?;
    state
        .living_monsters()
        .find(|(_, p)| in_range(state, at, *p))
        .map(|(id, _)| id)
}

/// Living monsters within range of `at`, in spawn order.
pub fn monsters_in_range(state: &BattleState, at: Position) -> Vec<MonsterId> {
    state
        .living_monsters()
        .filter(|(_, p)| in_range(state, at, *p))
        .map(|(id, _)| id)
        .collect()
}

/// First living hero, in party order, within range of `at`.
pub fn hero_in_range(state: &BattleState, at: Position) -> Option<HeroId> {
    state
        .living_heroes()
        .find(|(_, p)| in_range(state, at, *p))
        .map(|(id, _)| id)
}

/// A forward hero move ending on a row above any living monster of the lane.
pub fn hero_passes_monster(state: &BattleState, from: Position, to: Position) -> bool {
    if to.row >= from.row || !state.board.same_lane(from, to) {
        return false;
    }
    state
        .living_monsters()
        .any(|(_, p)| state.board.same_lane(from, p) && to.row < p.row)
}

/// A forward monster move ending on a row below any living hero of the lane.
pub fn monster_passes_hero(state: &BattleState, from: Position, to: Position) -> bool {
    if to.row <= from.row || !state.board.same_lane(from, to) {
        return false;
    }
    state
        .living_heroes()
        .any(|(_, p)| state.board.same_lane(from, p) && to.row > p.row)
}

/// A tile holding a hero. Fainted heroes keep their tile until they respawn.
pub fn hero_occupied(state: &BattleState, at: Position) -> bool {
    state.hero_at(at).is_some()
}

/// Whether `monster` standing on `from` may step onto `to`.
pub fn monster_can_move_to(
    state: &BattleState,
    monster: MonsterId,
    from: Position,
    to: Position,
) -> bool {
    state.board.is_accessible(to)
        && state.monster_at(to).is_none_or(|other| other == monster)
        && !monster_passes_hero(state, from, to)
        && !hero_occupied(state, to)
}

/// Why a hero cannot step from `from` to `to`, if it cannot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepBlock {
    OutOfBounds,
    Inaccessible,
    HeroOccupied,
    PastMonster,
}

/// Checks an ordinary one-tile hero move.
pub fn check_hero_step(
    state: &BattleState,
    hero: HeroId,
    from: Position,
    direction: Direction,
) -> Result<Position, StepBlock> {
    let to = from.step(direction);
    if !state.board.is_inside(to) {
        return Err(StepBlock::OutOfBounds);
    }
    if !state.board.is_accessible(to) {
        return Err(StepBlock::Inaccessible);
    }
    if state.hero_at(to).is_some_and(|other| other != hero) {
        return Err(StepBlock::HeroOccupied);
    }
    if hero_passes_monster(state, from, to) {
        return Err(StepBlock::PastMonster);
    }
    Ok(to)
}

/// The hero's spawn slot if free, else the other free Hero Nexus slot of the
/// spawn lane.
pub fn recall_destination(state: &BattleState, hero: HeroId) -> Option<Position> {
    let spawn = state.spawn_of(hero)?;
    let free = |p: Position| state.hero_at(p).is_none_or(|other| other == hero);
    if free(spawn) {
        return Some(spawn);
    }
    let lane = state.board.lane_of(spawn)?;
    free_hero_nexus_slot(state, lane, Some(hero))
}

/// First Hero Nexus slot in `lane` without another hero on it.
pub fn free_hero_nexus_slot(
    state: &BattleState,
    lane: LaneId,
    ignore: Option<HeroId>,
) -> Option<Position> {
    state
        .board
        .hero_nexus_slots(lane)
        .into_iter()
        .find(|p| state.hero_at(*p).is_none_or(|other| Some(other) == ignore))
}

/// Tiles next to `target` that `hero` may teleport onto.
///
/// Candidates are the target's four neighbours that are accessible, outside
/// the caller's lane, not ahead of the target, free of other heroes and not
/// ahead of any living monster in that lane.
pub fn teleport_destinations(
    state: &BattleState,
    hero: HeroId,
    target: HeroId,
) -> ArrayVec<Position, 4> {
    let mut out = ArrayVec::new();
    let (Some(from), Some(anchor)) = (state.hero_position(hero), state.hero_position(target))
    else {
        return out;
    };

    for direction in [Direction::Up, Direction::Down, Direction::Left, Direction::Right] {
        let dest = anchor.step(direction);
        if !state.board.is_accessible(dest) || state.board.same_lane(from, dest) {
            continue;
        }
        if dest.row < anchor.row {
            continue;
        }
        if state.hero_at(dest).is_some_and(|other| other != hero) {
            continue;
        }
        let ahead_of_monster = state
            .living_monsters()
            .any(|(_, p)| state.board.same_lane(dest, p) && dest.row < p.row);
        if ahead_of_monster {
            continue;
        }
        out.push(dest);
    }
    out
}
