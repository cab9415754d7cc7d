//! Monster decision making.
//!
//! Each monster's turn is a [`TacticChain`]: an ordered list of [`Tactic`]s
//! evaluated left to right until one produces a decision, in the manner of a
//! behavior-tree selector. Tactics only read the state; the engine applies
//! the returned [`MonsterDecision`].
//!
//! The default chain is:
//! 1. [`AttackInRange`]: attack the first living hero in range
//! 2. [`Pathfind`]: one BFS step toward the nearest hero in the lane
//! 3. [`Advance`]: a straight step down
//! 4. [`Sidestep`]: a step left, then right, inside the lane
//!
//! When every tactic declines the monster holds its ground.

mod path;

pub use path::first_step_toward_hero;

use crate::board::{Direction, Position};
use crate::rules;
use crate::state::{BattleState, HeroId, MonsterId};

/// What one monster does this turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MonsterDecision {
    Attack(HeroId),
    Move(Position),
    Hold,
}

/// Read-only view handed to every tactic.
pub struct TacticContext<'a> {
    pub state: &'a BattleState,
    pub monster: MonsterId,
    pub at: Position,
}

impl TacticContext<'_> {
    fn can_move_to(&self, to: Position) -> bool {
        rules::monster_can_move_to(self.state, self.monster, self.at, to)
    }
}

/// One option in a monster's turn.
pub trait Tactic: Send + Sync {
    /// Returns a decision, or `None` to let the next tactic try.
    fn decide(&self, ctx: &TacticContext<'_>) -> Option<MonsterDecision>;
}

pub struct AttackInRange;

impl Tactic for AttackInRange {
    fn decide(&self, ctx: &TacticContext<'_>) -> Option<MonsterDecision> {
        rules::hero_in_range(ctx.state, ctx.at).map(MonsterDecision::Attack)
    }
}

pub struct Pathfind;

impl Tactic for Pathfind {
    fn decide(&self, ctx: &TacticContext<'_>) -> Option<MonsterDecision> {
        first_step_toward_hero(ctx.state, ctx.monster, ctx.at)
            .filter(|step| ctx.can_move_to(*step))
            .map(MonsterDecision::Move)
    }
}

pub struct Advance;

impl Tactic for Advance {
    fn decide(&self, ctx: &TacticContext<'_>) -> Option<MonsterDecision> {
        let down = ctx.at.step(Direction::Down);
        ctx.can_move_to(down).then_some(MonsterDecision::Move(down))
    }
}

pub struct Sidestep;

impl Tactic for Sidestep {
    fn decide(&self, ctx: &TacticContext<'_>) -> Option<MonsterDecision> {
        [Direction::Left, Direction::Right]
            .into_iter()
            .map(|d| ctx.at.step(d))
            .find(|to| ctx.state.board.same_lane(ctx.at, *to) && ctx.can_move_to(*to))
            .map(MonsterDecision::Move)
    }
}

/// Ordered tactics; the first to decide wins.
pub struct TacticChain {
    tactics: Vec<Box<dyn Tactic>>,
}

impl TacticChain {
    pub fn new(tactics: Vec<Box<dyn Tactic>>) -> Self {
        Self { tactics }
    }

    pub fn decide(&self, state: &BattleState, monster: MonsterId, at: Position) -> MonsterDecision {
        let ctx = TacticContext { state, monster, at };
        self.tactics
            .iter()
            .find_map(|tactic| tactic.decide(&ctx))
            .unwrap_or(MonsterDecision::Hold)
    }
}

impl Default for TacticChain {
    fn default() -> Self {
        Self::new(vec![
            Box::new(AttackInRange),
            Box::new(Pathfind),
            Box::new(Advance),
            Box::new(Sidestep),
        ])
    }
}
