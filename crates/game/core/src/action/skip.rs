use crate::env::BattleEnv;
use crate::error::InvariantViolation;
use crate::state::{BattleEvent, BattleState, HeroId};

use super::transition::{ActionTransition, active_hero};

/// Ends the hero's turn without doing anything.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SkipAction {
    pub hero: HeroId,
}

impl SkipAction {
    pub fn new(hero: HeroId) -> Self {
        Self { hero }
    }
}

impl ActionTransition for SkipAction {
    type Error = InvariantViolation;
    type Result = ();

    fn actor(&self) -> HeroId {
        self.hero
    }

    fn pre_validate(&self, state: &BattleState, _env: &BattleEnv<'_>) -> Result<(), Self::Error> {
        active_hero(state, self.hero).map(|_| ())
    }

    fn apply(&self, state: &mut BattleState, _env: &BattleEnv<'_>) -> Result<(), Self::Error> {
        let hero = state.require_hero(self.hero)?.name.clone();
        state.log(BattleEvent::Skipped { hero });
        Ok(())
    }
}
