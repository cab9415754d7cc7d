use tracing::debug;

use super::{Board, TileKind};
use crate::config::GameConfig;
use crate::env::Dice;

/// Terrain that must appear at least once in the interior.
const REQUIRED: [TileKind; 5] = [
    TileKind::Bush,
    TileKind::Cave,
    TileKind::Koulou,
    TileKind::Obstacle,
    TileKind::Plain,
];

/// Weighted pool for the remaining interior tiles (biased toward Plain).
const POOL: [TileKind; 7] = [
    TileKind::Plain,
    TileKind::Plain,
    TileKind::Plain,
    TileKind::Bush,
    TileKind::Cave,
    TileKind::Koulou,
    TileKind::Obstacle,
];

/// Builds a random lane board.
///
/// Interior tiles are shuffled; the first few receive one of each required
/// terrain and the rest are drawn from a Plain-heavy pool. Walls and the
/// Nexus rows come from [`Board::open`] and are never touched.
pub fn generate_layout(config: &GameConfig, dice: &mut Dice<'_>) -> Board {
    let mut board = Board::open(config);
    let mut interior = board.interior_positions();
    dice.shuffle(&mut interior);

    let mut slots = interior.into_iter();
    for kind in REQUIRED {
        let Some(position) = slots.next() else {
            break;
        };
        board.set_interior(position, kind);
    }
    for position in slots {
        let kind = dice.pick(&POOL).copied().unwrap_or(TileKind::Plain);
        board.set_interior(position, kind);
    }

    debug!(size = board.size(), lanes = board.lane_count(), "generated board layout");
    board
}
