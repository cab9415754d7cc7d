//! Positional hero commands: move, recall, teleport, clear obstacle, retreat.
//!
//! Every relocation goes through [`BattleState::relocate_hero`] so the
//! terrain buff always follows the hero.

use crate::board::{Direction, Position, TileKind};
use crate::env::BattleEnv;
use crate::error::{ErrorSeverity, GameError, InvariantViolation};
use crate::rules::{self, StepBlock};
use crate::state::{BattleEvent, BattleState, HeroId, MonsterId};

use super::transition::{ActionTransition, active_hero, confirm_position};

// ============================================================================
// Move
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("cannot move outside the board")]
    OutOfBounds,

    #[error("that tile is not accessible")]
    Inaccessible { destination: Position },

    #[error("another hero is already there")]
    Occupied { destination: Position },

    #[error("you cannot move past a monster in your lane")]
    PastMonster { destination: Position },

    #[error(transparent)]
    Invariant(#[from] InvariantViolation),
}

impl GameError for MoveError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Invariant(inner) => inner.severity(),
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::OutOfBounds => "MOVE_OUT_OF_BOUNDS",
            Self::Inaccessible { .. } => "MOVE_INACCESSIBLE",
            Self::Occupied { .. } => "MOVE_OCCUPIED",
            Self::PastMonster { .. } => "MOVE_PAST_MONSTER",
            Self::Invariant(inner) => inner.error_code(),
        }
    }
}

/// One-tile cardinal step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveAction {
    pub hero: HeroId,
    pub direction: Direction,
}

impl MoveAction {
    pub fn new(hero: HeroId, direction: Direction) -> Self {
        Self { hero, direction }
    }

    fn destination(&self, state: &BattleState) -> Result<Position, MoveError> {
        let (_, from) = active_hero(state, self.hero)?;
        let to = from.step(self.direction);
        rules::check_hero_step(state, self.hero, from, self.direction).map_err(|block| match block {
            StepBlock::OutOfBounds => MoveError::OutOfBounds,
            StepBlock::Inaccessible => MoveError::Inaccessible { destination: to },
            StepBlock::HeroOccupied => MoveError::Occupied { destination: to },
            StepBlock::PastMonster => MoveError::PastMonster { destination: to },
        })
    }
}

impl ActionTransition for MoveAction {
    type Error = MoveError;
    type Result = Position;

    fn actor(&self) -> HeroId {
        self.hero
    }

    fn pre_validate(&self, state: &BattleState, _env: &BattleEnv<'_>) -> Result<(), Self::Error> {
        self.destination(state).map(|_| ())
    }

    fn apply(&self, state: &mut BattleState, env: &BattleEnv<'_>) -> Result<Position, Self::Error> {
        let to = self.destination(state)?;
        state.relocate_hero(self.hero, to, env.config().balance.terrain_buff_divisor)?;
        let hero = state.require_hero(self.hero)?.name.clone();
        state.log(BattleEvent::HeroMoved { hero, to });
        Ok(to)
    }

    fn post_validate(&self, state: &BattleState, _env: &BattleEnv<'_>) -> Result<(), Self::Error> {
        state.check_buff(self.hero)?;
        Ok(())
    }
}

// ============================================================================
// Recall
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RecallError {
    #[error("your lane nexus is fully occupied; recall failed")]
    NexusOccupied,

    #[error(transparent)]
    Invariant(#[from] InvariantViolation),
}

impl GameError for RecallError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NexusOccupied => ErrorSeverity::Recoverable,
            Self::Invariant(inner) => inner.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NexusOccupied => "RECALL_NEXUS_OCCUPIED",
            Self::Invariant(inner) => inner.error_code(),
        }
    }
}

/// Return to the spawn slot, or the other Hero Nexus slot of the spawn lane.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecallAction {
    pub hero: HeroId,
}

impl RecallAction {
    pub fn new(hero: HeroId) -> Self {
        Self { hero }
    }

    fn destination(&self, state: &BattleState) -> Result<Position, RecallError> {
        active_hero(state, self.hero)?;
        rules::recall_destination(state, self.hero).ok_or(RecallError::NexusOccupied)
    }
}

impl ActionTransition for RecallAction {
    type Error = RecallError;
    type Result = Position;

    fn actor(&self) -> HeroId {
        self.hero
    }

    fn pre_validate(&self, state: &BattleState, _env: &BattleEnv<'_>) -> Result<(), Self::Error> {
        self.destination(state).map(|_| ())
    }

    fn apply(&self, state: &mut BattleState, env: &BattleEnv<'_>) -> Result<Position, Self::Error> {
        let to = self.destination(state)?;
        state.relocate_hero(self.hero, to, env.config().balance.terrain_buff_divisor)?;
        let hero = state.require_hero(self.hero)?.name.clone();
        state.log(BattleEvent::Recalled { hero, to });
        Ok(to)
    }

    fn post_validate(&self, state: &BattleState, _env: &BattleEnv<'_>) -> Result<(), Self::Error> {
        state.check_buff(self.hero)?;
        Ok(())
    }
}

// ============================================================================
// Teleport
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TeleportError {
    #[error("cannot teleport to yourself")]
    SelfTarget,

    #[error("{target} cannot be teleported to")]
    InvalidTarget { target: HeroId },

    #[error("must teleport to a different lane")]
    SameLane,

    #[error("{destination} is not a valid teleport destination")]
    InvalidDestination { destination: Position },

    #[error(transparent)]
    Invariant(#[from] InvariantViolation),
}

impl GameError for TeleportError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Invariant(inner) => inner.severity(),
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::SelfTarget => "TELEPORT_SELF_TARGET",
            Self::InvalidTarget { .. } => "TELEPORT_INVALID_TARGET",
            Self::SameLane => "TELEPORT_SAME_LANE",
            Self::InvalidDestination { .. } => "TELEPORT_INVALID_DESTINATION",
            Self::Invariant(inner) => inner.error_code(),
        }
    }
}

/// Jump next to an ally in another lane.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TeleportAction {
    pub hero: HeroId,
    pub target: HeroId,
    pub destination: Position,
}

impl TeleportAction {
    pub fn new(hero: HeroId, target: HeroId, destination: Position) -> Self {
        Self {
            hero,
            target,
            destination,
        }
    }
}

impl ActionTransition for TeleportAction {
    type Error = TeleportError;
    type Result = Position;

    fn actor(&self) -> HeroId {
        self.hero
    }

    fn pre_validate(&self, state: &BattleState, _env: &BattleEnv<'_>) -> Result<(), Self::Error> {
        let (_, from) = active_hero(state, self.hero)?;
        if self.target == self.hero {
            return Err(TeleportError::SelfTarget);
        }
        let target_alive = state.hero(self.target).is_some_and(|h| !h.is_fainted());
        let Some(anchor) = state.hero_position(self.target).filter(|_| target_alive) else {
            return Err(TeleportError::InvalidTarget {
                target: self.target,
            });
        };
        if state.board.same_lane(from, anchor) {
            return Err(TeleportError::SameLane);
        }
        if !rules::teleport_destinations(state, self.hero, self.target).contains(&self.destination) {
            return Err(TeleportError::InvalidDestination {
                destination: self.destination,
            });
        }
        Ok(())
    }

    fn apply(&self, state: &mut BattleState, env: &BattleEnv<'_>) -> Result<Position, Self::Error> {
        let to = self.destination;
        state.relocate_hero(self.hero, to, env.config().balance.terrain_buff_divisor)?;
        let hero = state.require_hero(self.hero)?.name.clone();
        state.log(BattleEvent::Teleported { hero, to });
        Ok(to)
    }

    fn post_validate(&self, state: &BattleState, _env: &BattleEnv<'_>) -> Result<(), Self::Error> {
        confirm_position(state, self.hero, self.destination)?;
        state.check_buff(self.hero)?;
        Ok(())
    }
}

// ============================================================================
// Clear obstacle
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ClearObstacleError {
    #[error("no obstacle in front (out of board)")]
    OutOfBounds,

    #[error("front tile is not an obstacle")]
    NotAnObstacle { at: Position },

    #[error(transparent)]
    Invariant(#[from] InvariantViolation),
}

impl GameError for ClearObstacleError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Invariant(inner) => inner.severity(),
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::OutOfBounds => "CLEAR_OUT_OF_BOUNDS",
            Self::NotAnObstacle { .. } => "CLEAR_NOT_AN_OBSTACLE",
            Self::Invariant(inner) => inner.error_code(),
        }
    }
}

/// Turn the Obstacle directly ahead (one row toward the Monster Nexus) into Plain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClearObstacleAction {
    pub hero: HeroId,
}

impl ClearObstacleAction {
    pub fn new(hero: HeroId) -> Self {
        Self { hero }
    }

    fn target(&self, state: &BattleState) -> Result<Position, ClearObstacleError> {
        let (_, at) = active_hero(state, self.hero)?;
        let ahead = at.step(Direction::Up);
        match state.board.tile(ahead) {
            None => Err(ClearObstacleError::OutOfBounds),
            Some(TileKind::Obstacle) => Ok(ahead),
            Some(_) => Err(ClearObstacleError::NotAnObstacle { at: ahead }),
        }
    }
}

impl ActionTransition for ClearObstacleAction {
    type Error = ClearObstacleError;
    type Result = Position;

    fn actor(&self) -> HeroId {
        self.hero
    }

    fn pre_validate(&self, state: &BattleState, _env: &BattleEnv<'_>) -> Result<(), Self::Error> {
        self.target(state).map(|_| ())
    }

    fn apply(&self, state: &mut BattleState, _env: &BattleEnv<'_>) -> Result<Position, Self::Error> {
        let at = self.target(state)?;
        state.board.clear_obstacle(at);
        let hero = state.require_hero(self.hero)?.name.clone();
        state.log(BattleEvent::ObstacleCleared { hero, at });
        Ok(at)
    }
}

// ============================================================================
// Retreat
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RetreatError {
    #[error("you can only retreat while engaged in combat")]
    NotEngaged,

    #[error("cannot retreat outside the board")]
    OutOfBounds,

    #[error("that tile is not accessible")]
    Inaccessible { destination: Position },

    #[error("another hero is already there")]
    Occupied { destination: Position },

    #[error("a monster blocks the retreat path")]
    MonsterBlocks { destination: Position },

    #[error(transparent)]
    Invariant(#[from] InvariantViolation),
}

impl GameError for RetreatError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Invariant(inner) => inner.severity(),
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotEngaged => "RETREAT_NOT_ENGAGED",
            Self::OutOfBounds => "RETREAT_OUT_OF_BOUNDS",
            Self::Inaccessible { .. } => "RETREAT_INACCESSIBLE",
            Self::Occupied { .. } => "RETREAT_OCCUPIED",
            Self::MonsterBlocks { .. } => "RETREAT_MONSTER_BLOCKS",
            Self::Invariant(inner) => inner.error_code(),
        }
    }
}

/// What a retreat did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetreatOutcome {
    pub to: Position,
    pub healed: u32,
    /// The engaged monster's new tile, if it could advance.
    pub monster_advanced: Option<Position>,
}

/// Step back toward the Hero Nexus while engaged, pulling the engaged monster
/// one row forward, healing and gaining immunity to the next monster attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetreatAction {
    pub hero: HeroId,
}

impl RetreatAction {
    pub fn new(hero: HeroId) -> Self {
        Self { hero }
    }

    fn plan(&self, state: &BattleState) -> Result<(Position, MonsterId), RetreatError> {
        let (_, at) = active_hero(state, self.hero)?;
        let engaged = rules::engaged_monster(state, self.hero).ok_or(RetreatError::NotEngaged)?;
        let to = at.step(Direction::Down);
        if !state.board.is_inside(to) {
            return Err(RetreatError::OutOfBounds);
        }
        if !state.board.is_accessible(to) {
            return Err(RetreatError::Inaccessible { destination: to });
        }
        if state.hero_at(to).is_some_and(|other| other != self.hero) {
            return Err(RetreatError::Occupied { destination: to });
        }
        if state.monster_at(to).is_some() {
            return Err(RetreatError::MonsterBlocks { destination: to });
        }
        Ok((to, engaged))
    }
}

impl ActionTransition for RetreatAction {
    type Error = RetreatError;
    type Result = RetreatOutcome;

    fn actor(&self) -> HeroId {
        self.hero
    }

    fn pre_validate(&self, state: &BattleState, _env: &BattleEnv<'_>) -> Result<(), Self::Error> {
        self.plan(state).map(|_| ())
    }

    fn apply(&self, state: &mut BattleState, env: &BattleEnv<'_>) -> Result<RetreatOutcome, Self::Error> {
        let balance = &env.config().balance;
        let (to, engaged) = self.plan(state)?;
        state.relocate_hero(self.hero, to, balance.terrain_buff_divisor)?;

        let monster_from = state.require_monster_position(engaged)?;
        let monster_to = monster_from.step(Direction::Down);
        let monster_advanced = (state.board.same_lane(to, monster_from)
            && rules::monster_can_move_to(state, engaged, monster_from, monster_to))
        .then_some(monster_to);
        if let Some(dest) = monster_advanced {
            state.move_monster(engaged, dest)?;
        }

        let hero = state.require_hero_mut(self.hero)?;
        let amount = (f64::from(hero.max_hp) * balance.retreat_heal_fraction).ceil() as u32;
        let healed = hero.heal(amount);
        let name = hero.name.clone();
        state.grant_immunity(self.hero, balance.retreat_immunity);

        state.log(BattleEvent::Retreated {
            hero: name,
            to,
            healed,
        });
        if let Some(dest) = monster_advanced {
            let monster = state
                .monster(engaged)
                .map(|m| m.name.clone())
                .unwrap_or_default();
            state.log(BattleEvent::MonsterAdvanced { monster, to: dest });
        }

        Ok(RetreatOutcome {
            to,
            healed,
            monster_advanced,
        })
    }

    fn post_validate(&self, state: &BattleState, _env: &BattleEnv<'_>) -> Result<(), Self::Error> {
        state.check_buff(self.hero)?;
        Ok(())
    }
}
