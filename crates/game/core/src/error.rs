//! Common error infrastructure for game-core.
//!
//! Domain-specific errors (e.g. `MoveError`, `TeleportError`) live next to the
//! actions they validate. This module holds the shared classification used by
//! the session loop to decide whether an error is re-prompted or propagated.

use crate::board::Position;
use crate::state::Combatant;

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the same decision point may be retried with another command
/// - **Validation**: the command itself was malformed or targets nothing
/// - **Internal**: bookkeeping disagreed with itself; indicates a bug
/// - **Fatal**: the match cannot continue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Examples: destination blocked, no monster in range.
    Recoverable,

    /// Examples: unknown hero id, item slot out of range.
    Validation,

    /// Examples: a living combatant with no board position.
    Internal,

    /// Examples: invalid configuration, missing monster provider.
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable | Self::Validation)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all game-core errors.
///
/// - All error enums implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable identifier for this error variant, used in logs and tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Bookkeeping fault: the engine's own tables disagree.
///
/// Never caused by player input. Surfaced as a logic fault instead of a
/// game message.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InvariantViolation {
    #[error("living {actor} has no board position")]
    MissingPosition { actor: Combatant },

    #[error("{actor} does not exist")]
    UnknownCombatant { actor: Combatant },

    #[error("fainted {actor} was asked to act")]
    FaintedActor { actor: Combatant },

    #[error("terrain buff of {actor} does not match the tile at {position}")]
    StaleBuff {
        actor: Combatant,
        position: Position,
    },

    #[error("tile {position} already holds {occupant}")]
    DoubleOccupancy {
        position: Position,
        occupant: Combatant,
    },
}

impl GameError for InvariantViolation {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingPosition { .. } => "INVARIANT_MISSING_POSITION",
            Self::UnknownCombatant { .. } => "INVARIANT_UNKNOWN_COMBATANT",
            Self::FaintedActor { .. } => "INVARIANT_FAINTED_ACTOR",
            Self::StaleBuff { .. } => "INVARIANT_STALE_BUFF",
            Self::DoubleOccupancy { .. } => "INVARIANT_DOUBLE_OCCUPANCY",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::HeroId;

    #[test]
    fn missing_position_is_internal() {
        let err = InvariantViolation::MissingPosition {
            actor: Combatant::Hero(HeroId(0)),
        };
        assert!(err.severity().is_internal());
        assert!(!err.severity().is_recoverable());
        assert_eq!(err.error_code(), "INVARIANT_MISSING_POSITION");
    }
}
