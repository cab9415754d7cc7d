//! Action transition dispatch and execution logic.

use crate::action::{ActionResult, ActionTransition, HeroAction};
use crate::env::BattleEnv;
use crate::state::BattleState;

use super::errors::{ExecuteError, TransitionPhase, TransitionPhaseError};

/// Executes a transition through the three-phase pipeline and returns the result.
///
/// Phases:
/// 1. `pre_validate` - Check preconditions before mutation
/// 2. `apply` - Mutate the battle state and return result
/// 3. `post_validate` - Verify postconditions after mutation
#[inline]
fn drive_transition<T>(
    transition: &T,
    state: &mut BattleState,
    env: &BattleEnv<'_>,
) -> Result<T::Result, TransitionPhaseError<T::Error>>
where
    T: ActionTransition,
{
    transition
        .pre_validate(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PreValidate, error))?;

    let result = transition
        .apply(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::Apply, error))?;

    transition
        .post_validate(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PostValidate, error))?;

    Ok(result)
}

/// Routes a hero command to its transition and wraps the result.
pub(super) fn execute_transition(
    action: &HeroAction,
    state: &mut BattleState,
    env: &BattleEnv<'_>,
) -> Result<ActionResult, ExecuteError> {
    match action {
        HeroAction::Move(t) => drive_transition(t, state, env)
            .map(ActionResult::Relocated)
            .map_err(ExecuteError::Move),
        HeroAction::Attack(t) => drive_transition(t, state, env)
            .map(ActionResult::Attack)
            .map_err(ExecuteError::Attack),
        HeroAction::Cast(t) => drive_transition(t, state, env)
            .map(ActionResult::Spell)
            .map_err(ExecuteError::Cast),
        HeroAction::EquipWeapon(t) => drive_transition(t, state, env)
            .map(ActionResult::Item)
            .map_err(ExecuteError::EquipWeapon),
        HeroAction::EquipArmor(t) => drive_transition(t, state, env)
            .map(ActionResult::Item)
            .map_err(ExecuteError::EquipArmor),
        HeroAction::UsePotion(t) => drive_transition(t, state, env)
            .map(ActionResult::Item)
            .map_err(ExecuteError::UsePotion),
        HeroAction::Recall(t) => drive_transition(t, state, env)
            .map(ActionResult::Relocated)
            .map_err(ExecuteError::Recall),
        HeroAction::Teleport(t) => drive_transition(t, state, env)
            .map(ActionResult::Relocated)
            .map_err(ExecuteError::Teleport),
        HeroAction::ClearObstacle(t) => drive_transition(t, state, env)
            .map(ActionResult::ObstacleCleared)
            .map_err(ExecuteError::ClearObstacle),
        HeroAction::Retreat(t) => drive_transition(t, state, env)
            .map(ActionResult::Retreat)
            .map_err(ExecuteError::Retreat),
        HeroAction::Skip(t) => drive_transition(t, state, env)
            .map(|()| ActionResult::Skipped)
            .map_err(ExecuteError::Skip),
    }
}
