//! Error types for the action pipeline and the round phases.

use crate::action::{
    ActionTransition, AttackAction, CastAction, ClearObstacleAction, EquipArmorAction,
    EquipWeaponAction, MoveAction, RecallAction, RetreatAction, SkipAction, TeleportAction,
    UsePotionAction,
};
use crate::env::OracleError;
use crate::error::{ErrorSeverity, GameError, InvariantViolation};
use crate::state::HeroId;

/// Identifies which stage of the transition pipeline produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionPhase {
    PreValidate,
    Apply,
    PostValidate,
}

impl TransitionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPhase::PreValidate => "pre_validate",
            TransitionPhase::Apply => "apply",
            TransitionPhase::PostValidate => "post_validate",
        }
    }
}

/// Associates a transition phase with the underlying error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionPhaseError<E> {
    pub phase: TransitionPhase,
    pub error: E,
}

impl<E> TransitionPhaseError<E> {
    pub fn new(phase: TransitionPhase, error: E) -> Self {
        Self { phase, error }
    }
}

impl<E: std::fmt::Display> std::fmt::Display for TransitionPhaseError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failed: {}", self.phase.as_str(), self.error)
    }
}

impl<E: std::fmt::Display + std::fmt::Debug> std::error::Error for TransitionPhaseError<E> {}

type PhaseError<T> = TransitionPhaseError<<T as ActionTransition>::Error>;

/// Errors surfaced while executing a hero command through the engine.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ExecuteError {
    #[error("move failed: {0}")]
    Move(PhaseError<MoveAction>),

    #[error("attack failed: {0}")]
    Attack(PhaseError<AttackAction>),

    #[error("cast failed: {0}")]
    Cast(PhaseError<CastAction>),

    #[error("equip weapon failed: {0}")]
    EquipWeapon(PhaseError<EquipWeaponAction>),

    #[error("equip armor failed: {0}")]
    EquipArmor(PhaseError<EquipArmorAction>),

    #[error("use potion failed: {0}")]
    UsePotion(PhaseError<UsePotionAction>),

    #[error("recall failed: {0}")]
    Recall(PhaseError<RecallAction>),

    #[error("teleport failed: {0}")]
    Teleport(PhaseError<TeleportAction>),

    #[error("remove obstacle failed: {0}")]
    ClearObstacle(PhaseError<ClearObstacleAction>),

    #[error("retreat failed: {0}")]
    Retreat(PhaseError<RetreatAction>),

    #[error("skip failed: {0}")]
    Skip(PhaseError<SkipAction>),

    #[error("the match is already over")]
    GameOver,
}

impl ExecuteError {
    /// The pipeline stage that failed, for transition errors.
    pub fn phase(&self) -> Option<TransitionPhase> {
        match self {
            Self::Move(e) => Some(e.phase),
            Self::Attack(e) => Some(e.phase),
            Self::Cast(e) => Some(e.phase),
            Self::EquipWeapon(e) => Some(e.phase),
            Self::EquipArmor(e) => Some(e.phase),
            Self::UsePotion(e) => Some(e.phase),
            Self::Recall(e) => Some(e.phase),
            Self::Teleport(e) => Some(e.phase),
            Self::ClearObstacle(e) => Some(e.phase),
            Self::Retreat(e) => Some(e.phase),
            Self::Skip(e) => Some(e.phase),
            Self::GameOver => None,
        }
    }

    /// The underlying reason without the pipeline framing, for players.
    pub fn reason(&self) -> String {
        self.inner()
            .map_or_else(|| self.to_string(), |inner| inner.to_string())
    }

    fn inner(&self) -> Option<&dyn GameError> {
        match self {
            Self::Move(e) => Some(&e.error),
            Self::Attack(e) => Some(&e.error),
            Self::Cast(e) => Some(&e.error),
            Self::EquipWeapon(e) => Some(&e.error),
            Self::EquipArmor(e) => Some(&e.error),
            Self::UsePotion(e) => Some(&e.error),
            Self::Recall(e) => Some(&e.error),
            Self::Teleport(e) => Some(&e.error),
            Self::ClearObstacle(e) => Some(&e.error),
            Self::Retreat(e) => Some(&e.error),
            Self::Skip(e) => Some(&e.error),
            Self::GameOver => None,
        }
    }
}

impl GameError for ExecuteError {
    /// A failure after `pre_validate` passed means the state moved under the
    /// command, so it is never reported as a player mistake.
    fn severity(&self) -> ErrorSeverity {
        match (self.phase(), self.inner()) {
            (Some(TransitionPhase::PreValidate), Some(inner)) => inner.severity(),
            (Some(_), Some(inner)) if inner.severity().is_internal() => inner.severity(),
            (Some(_), _) => ErrorSeverity::Internal,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self.inner() {
            Some(inner) => inner.error_code(),
            None => "ENGINE_GAME_OVER",
        }
    }
}

/// Failures of the non-interactive round phases.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RoundError {
    #[error(transparent)]
    Invariant(#[from] InvariantViolation),

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error("party is empty")]
    EmptyParty,

    #[error("no free Hero Nexus slot for {hero}")]
    NoSpawnSlot { hero: HeroId },
}

impl GameError for RoundError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Invariant(inner) => inner.severity(),
            Self::Oracle(inner) => inner.severity(),
            Self::EmptyParty | Self::NoSpawnSlot { .. } => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Invariant(inner) => inner.error_code(),
            Self::Oracle(inner) => inner.error_code(),
            Self::EmptyParty => "ROUND_EMPTY_PARTY",
            Self::NoSpawnSlot { .. } => "ROUND_NO_SPAWN_SLOT",
        }
    }
}
