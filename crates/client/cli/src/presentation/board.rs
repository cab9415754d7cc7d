//! Board snapshot used by the renderer.

use game_core::state::BattleState;
use game_core::{HeroId, MonsterId, Position, TileKind};

/// What one tile shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub tile: TileKind,
    pub hero: Option<HeroId>,
    pub monster: Option<MonsterId>,
}

/// Rows of cells, top (Monster Nexus) first. Fainted heroes and monsters
/// are not shown.
pub fn cells(state: &BattleState) -> Vec<Vec<Cell>> {
    let size = state.board.size();
    let hero_at = |p: Position| {
        state
            .hero_at(p)
            .filter(|id| state.hero(*id).is_some_and(|h| !h.is_fainted()))
    };
    let monster_at = |p: Position| {
        state
            .monster_at(p)
            .filter(|id| state.monster(*id).is_some_and(|m| !m.is_fainted()))
    };
    (0..size)
        .map(|row| {
            (0..size)
                .map(|col| {
                    let p = Position::new(row, col);
                    Cell {
                        tile: state.board.tile(p).unwrap_or(TileKind::Wall),
                        hero: hero_at(p),
                        monster: monster_at(p),
                    }
                })
                .collect()
        })
        .collect()
}
