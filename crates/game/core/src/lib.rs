//! Deterministic rules engine for Legends of Valor lane battles.
//!
//! `game-core` defines the canonical rules (board, terrain, combat, monster
//! AI, hero actions and the round state machine) and exposes pure APIs that
//! front ends drive through the [`session`] loop or directly through
//! [`engine::GameEngine`]. Nothing here performs I/O; rendering, input and
//! the market are reached through the traits in [`frontend`].
pub mod action;
pub mod ai;
pub mod board;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod frontend;
pub mod rules;
pub mod session;
pub mod state;
pub mod terrain;

pub use action::{ActionResult, ActionTransition, HeroAction};
pub use board::{Board, Direction, LaneId, Position, TileKind};
pub use config::{BalanceConfig, ConfigError, GameConfig};
pub use engine::{ExecuteError, GameEngine, RoundError, TransitionPhase, new_battle};
pub use env::{BattleEnv, MonsterOracle, MonsterRoster, MonsterTemplate, PcgRng, RngOracle};
pub use error::{ErrorSeverity, GameError, InvariantViolation};
pub use frontend::{InputError, InputSource, Presenter, Shop, ShopVisit};
pub use session::{Session, SessionError};
pub use state::{
    BattleEvent, BattleState, GameOutcome, Hero, HeroClass, HeroId, HeroProfile, Item, Monster,
    MonsterId, Side,
};
