//! Oracle access errors.

use crate::error::{ErrorSeverity, GameError};

/// Errors that occur when accessing oracle data.
///
/// A missing oracle is fatal: the engine cannot spawn monsters without a
/// template provider.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    #[error("MonsterOracle not available")]
    MonstersNotAvailable,

    #[error("monster catalog is empty")]
    EmptyMonsterCatalog,
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            OracleError::MonstersNotAvailable => "ORACLE_MONSTERS_NOT_AVAILABLE",
            OracleError::EmptyMonsterCatalog => "ORACLE_EMPTY_MONSTER_CATALOG",
        }
    }
}
