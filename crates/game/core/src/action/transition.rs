use crate::board::Position;
use crate::env::BattleEnv;
use crate::error::InvariantViolation;
use crate::state::{BattleState, Combatant, Hero, HeroId};

/// Defines how a concrete hero command mutates the battle state.
///
/// Implementors can override the validation hooks to surface pre- and
/// post-conditions that must hold around the state mutation. All hooks
/// receive read-only access to the environment and must stay side-effect
/// free; only `apply` touches the state.
pub trait ActionTransition {
    type Error;
    type Result;

    /// The hero issuing the command.
    fn actor(&self) -> HeroId;

    /// Validates pre-conditions using the state **before** mutation.
    fn pre_validate(&self, _state: &BattleState, _env: &BattleEnv<'_>) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies the action. Implementations may assume `pre_validate` passed.
    fn apply(&self, state: &mut BattleState, env: &BattleEnv<'_>) -> Result<Self::Result, Self::Error>;

    /// Validates post-conditions using the state **after** mutation.
    fn post_validate(&self, _state: &BattleState, _env: &BattleEnv<'_>) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// The acting hero and its position. A hero that is missing, fainted or off
/// the board cannot be handed a command, so each case is a bookkeeping fault.
pub(crate) fn active_hero(
    state: &BattleState,
    id: HeroId,
) -> Result<(&Hero, Position), InvariantViolation> {
    let hero = state.require_hero(id)?;
    if hero.is_fainted() {
        return Err(InvariantViolation::FaintedActor {
            actor: Combatant::Hero(id),
        });
    }
    let at = state.require_hero_position(id)?;
    Ok((hero, at))
}

/// Checks that `hero` still stands on `expected` after a relocation.
pub(crate) fn confirm_position(
    state: &BattleState,
    hero: HeroId,
    expected: Position,
) -> Result<(), InvariantViolation> {
    match state.hero_position(hero) {
        Some(at) if at == expected => Ok(()),
        _ => Err(InvariantViolation::MissingPosition {
            actor: Combatant::Hero(hero),
        }),
    }
}
