//! Lane board geometry.
//!
//! The board is a square grid split into lanes by wall columns. Row 0 holds the
//! Monster Nexus tiles, the last row holds the Hero Nexus tiles. All queries are
//! total: coordinates outside the board answer `false` / `None` rather than
//! panicking.
mod generate;

pub use generate::generate_layout;

use core::fmt;

use crate::config::GameConfig;

/// Grid coordinate. Row 0 is the monster side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    pub fn step(self, direction: Direction) -> Self {
        let (dr, dc) = direction.delta();
        Self::new(self.row + dr, self.col + dc)
    }

    /// Chebyshev adjacency: the same tile or one of the 8 neighbours.
    pub fn is_adjacent_or_same(self, other: Position) -> bool {
        (self.row - other.row).abs() <= 1 && (self.col - other.col).abs() <= 1
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Orthogonal step direction. `Up` moves toward the Monster Nexus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the `(row, col)` offset for this direction.
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

/// Closed set of tile categories.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum TileKind {
    Plain,
    Bush,
    Cave,
    Koulou,
    Obstacle,
    Wall,
    HeroNexus,
    MonsterNexus,
}

impl TileKind {
    pub const fn is_passable(self) -> bool {
        !matches!(self, TileKind::Obstacle | TileKind::Wall)
    }

    pub const fn is_nexus(self) -> bool {
        matches!(self, TileKind::HeroNexus | TileKind::MonsterNexus)
    }

    /// Single-character glyph used by text renderers.
    pub const fn glyph(self) -> char {
        match self {
            TileKind::Plain => '.',
            TileKind::Bush => 'B',
            TileKind::Cave => 'C',
            TileKind::Koulou => 'K',
            TileKind::Obstacle => 'O',
            TileKind::Wall => '#',
            TileKind::HeroNexus => 'H',
            TileKind::MonsterNexus => 'M',
        }
    }
}

/// Index of a lane, counted left to right.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LaneId(pub u8);

impl fmt::Display for LaneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "lane {}", self.0)
    }
}

/// Board tiles plus the fixed lane partition.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Board {
    size: i32,
    tiles: Vec<TileKind>,
    /// `lane_by_col[c]` is `None` for wall columns.
    lane_by_col: Vec<Option<LaneId>>,
    lanes: Vec<Vec<i32>>,
}

impl Board {
    /// Creates a board whose interior is entirely Plain.
    pub fn open(config: &GameConfig) -> Self {
        let size = config.board_size;
        let lanes = config.lane_columns();
        let mut lane_by_col = vec![None; size as usize];
        for (index, cols) in lanes.iter().enumerate() {
            for &col in cols {
                lane_by_col[col as usize] = Some(LaneId(index as u8));
            }
        }

        let mut tiles = Vec::with_capacity((size * size) as usize);
        for row in 0..size {
            for col in 0..size {
                let kind = if lane_by_col[col as usize].is_none() {
                    TileKind::Wall
                } else if row == 0 {
                    TileKind::MonsterNexus
                } else if row == size - 1 {
                    TileKind::HeroNexus
                } else {
                    TileKind::Plain
                };
                tiles.push(kind);
            }
        }

        Self {
            size,
            tiles,
            lane_by_col,
            lanes,
        }
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    pub fn is_inside(&self, position: Position) -> bool {
        position.row >= 0 && position.row < self.size && position.col >= 0 && position.col < self.size
    }

    pub fn tile(&self, position: Position) -> Option<TileKind> {
        self.index(position).map(|i| self.tiles[i])
    }

    /// True when the tile exists and is neither a wall nor an obstacle.
    /// Occupancy is checked separately by the movement rules.
    pub fn is_accessible(&self, position: Position) -> bool {
        self.tile(position).is_some_and(TileKind::is_passable)
    }

    pub fn lane_of_col(&self, col: i32) -> Option<LaneId> {
        if col < 0 || col >= self.size {
            return None;
        }
        self.lane_by_col[col as usize]
    }

    pub fn lane_of(&self, position: Position) -> Option<LaneId> {
        if !self.is_inside(position) {
            return None;
        }
        self.lane_of_col(position.col)
    }

    /// Both positions lie inside the board and in the same lane.
    pub fn same_lane(&self, a: Position, b: Position) -> bool {
        match (self.lane_of(a), self.lane_of(b)) {
            (Some(la), Some(lb)) => la == lb,
            _ => false,
        }
    }

    pub fn lanes(&self) -> impl Iterator<Item = LaneId> + '_ {
        (0..self.lanes.len()).map(|i| LaneId(i as u8))
    }

    pub fn lane_count(&self) -> usize {
        self.lanes.len()
    }

    pub fn lane_columns(&self, lane: LaneId) -> &[i32] {
        self.lanes
            .get(lane.0 as usize)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Hero Nexus tiles of a lane, left to right. The first is the lane spawn.
    pub fn hero_nexus_slots(&self, lane: LaneId) -> Vec<Position> {
        let row = self.size - 1;
        self.lane_columns(lane)
            .iter()
            .map(|&col| Position::new(row, col))
            .collect()
    }

    /// Monster Nexus tiles of a lane, left to right.
    pub fn monster_nexus_slots(&self, lane: LaneId) -> Vec<Position> {
        self.lane_columns(lane)
            .iter()
            .map(|&col| Position::new(0, col))
            .collect()
    }

    /// Converts an Obstacle into Plain. Returns false if the tile was not an obstacle.
    pub fn clear_obstacle(&mut self, position: Position) -> bool {
        match self.index(position) {
            Some(i) if self.tiles[i] == TileKind::Obstacle => {
                self.tiles[i] = TileKind::Plain;
                true
            }
            _ => false,
        }
    }

    /// Overwrites an interior lane tile. Walls and Nexus rows are fixed.
    pub fn set_interior(&mut self, position: Position, kind: TileKind) -> bool {
        if position.row <= 0 || position.row >= self.size - 1 || self.lane_of(position).is_none() {
            return false;
        }
        match self.index(position) {
            Some(i) => {
                self.tiles[i] = kind;
                true
            }
            None => false,
        }
    }

    /// Interior lane positions (between the Nexus rows), row-major.
    pub fn interior_positions(&self) -> Vec<Position> {
        let mut positions = Vec::new();
        for row in 1..self.size - 1 {
            for col in 0..self.size {
                if self.lane_of_col(col).is_some() {
                    positions.push(Position::new(row, col));
                }
            }
        }
        positions
    }

    fn index(&self, position: Position) -> Option<usize> {
        self.is_inside(position)
            .then(|| (position.row * self.size + position.col) as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> Board {
        Board::open(&GameConfig::default())
    }

    #[test]
    fn walls_separate_three_lanes() {
        let board = board();
        assert_eq!(board.lane_count(), 3);
        assert_eq!(board.lane_of_col(0), Some(LaneId(0)));
        assert_eq!(board.lane_of_col(2), None);
        assert_eq!(board.lane_of_col(4), Some(LaneId(1)));
        assert_eq!(board.lane_of_col(7), Some(LaneId(2)));
        for row in 0..8 {
            assert_eq!(board.tile(Position::new(row, 5)), Some(TileKind::Wall));
            assert!(!board.is_accessible(Position::new(row, 2)));
        }
    }

    #[test]
    fn nexus_rows() {
        let board = board();
        assert_eq!(board.tile(Position::new(0, 3)), Some(TileKind::MonsterNexus));
        assert_eq!(board.tile(Position::new(7, 6)), Some(TileKind::HeroNexus));
        assert_eq!(
            board.hero_nexus_slots(LaneId(1)),
            vec![Position::new(7, 3), Position::new(7, 4)]
        );
    }

    #[test]
    fn out_of_range_queries_are_false() {
        let board = board();
        assert!(!board.is_inside(Position::new(-1, 0)));
        assert!(!board.is_accessible(Position::new(8, 0)));
        assert_eq!(board.lane_of(Position::new(0, 8)), None);
        assert!(!board.same_lane(Position::new(0, -1), Position::new(0, 0)));
    }

    #[test]
    fn clear_obstacle_only_touches_obstacles() {
        let mut board = board();
        let pos = Position::new(3, 0);
        assert!(board.set_interior(pos, TileKind::Obstacle));
        assert!(!board.is_accessible(pos));
        assert!(board.clear_obstacle(pos));
        assert_eq!(board.tile(pos), Some(TileKind::Plain));
        assert!(!board.clear_obstacle(pos));
        assert!(!board.set_interior(Position::new(0, 0), TileKind::Bush));
    }
}
