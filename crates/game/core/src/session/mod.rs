//! Match loop.
//!
//! [`Session`] wires a [`GameEngine`] to a [`Presenter`], an [`InputSource`]
//! and a [`Shop`], and plays rounds until the match has an outcome. Illegal
//! commands are reported and re-prompted without consuming the turn; faults
//! (severity `Internal` or `Fatal`) end the session with an error instead of
//! being shown as game messages.

mod menu;

use tracing::{error, info};

use crate::engine::{ExecuteError, GameEngine, RoundError};
use crate::error::{ErrorSeverity, GameError, InvariantViolation};
use crate::frontend::{InputError, InputSource, Presenter, Shop};
use crate::state::{GameOutcome, Hero};

/// Why a session stopped without an outcome.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error("engine fault: {0}")]
    Execute(ExecuteError),

    #[error(transparent)]
    Round(#[from] RoundError),

    #[error(transparent)]
    Invariant(#[from] InvariantViolation),
}

impl GameError for SessionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Input(_) => ErrorSeverity::Fatal,
            Self::Execute(inner) => inner.severity(),
            Self::Round(inner) => inner.severity(),
            Self::Invariant(inner) => inner.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Input(_) => "SESSION_INPUT_CLOSED",
            Self::Execute(inner) => inner.error_code(),
            Self::Round(inner) => inner.error_code(),
            Self::Invariant(inner) => inner.error_code(),
        }
    }
}

/// One match between a party and the monster waves.
pub struct Session<'e, 'io> {
    engine: GameEngine<'e>,
    presenter: &'io mut dyn Presenter,
    input: &'io mut dyn InputSource,
    shop: &'io mut dyn Shop,
}

impl<'e, 'io> Session<'e, 'io> {
    pub fn new(
        engine: GameEngine<'e>,
        presenter: &'io mut dyn Presenter,
        input: &'io mut dyn InputSource,
        shop: &'io mut dyn Shop,
    ) -> Self {
        Self {
            engine,
            presenter,
            input,
            shop,
        }
    }

    pub fn engine(&self) -> &GameEngine<'e> {
        &self.engine
    }

    /// Sets up the party and plays rounds until one side wins.
    pub fn run(mut self, party: Vec<Hero>) -> Result<GameOutcome, SessionError> {
        self.engine.setup(party)?;
        self.flush_log();
        loop {
            if let Some(outcome) = self.play_round()? {
                info!(winner = %outcome.winner, "session finished");
                self.presenter.message(&outcome.to_string());
                return Ok(outcome);
            }
        }
    }

    /// Plays one full round. Returns the outcome if the match ended in it.
    pub fn play_round(&mut self) -> Result<Option<GameOutcome>, SessionError> {
        let round = self.engine.state().round.number;
        info!(round, "hero phase");
        self.presenter.message(&format!("===== Round {round} ====="));

        for hero in self.engine.state().hero_ids() {
            if let Some(outcome) = self.outcome() {
                return Ok(Some(outcome));
            }
            if self.engine.state().require_hero(hero)?.is_fainted() {
                continue;
            }
            self.engine.state().require_hero_position(hero)?;
            self.hero_turn(hero)?;
        }
        if let Some(outcome) = self.outcome() {
            return Ok(Some(outcome));
        }

        self.engine.run_monster_phase()?;
        self.flush_log();
        if let Some(outcome) = self.outcome() {
            return Ok(Some(outcome));
        }

        self.engine.cleanup();
        self.engine.end_of_round()?;
        self.flush_log();
        if let Some(outcome) = self.outcome() {
            return Ok(Some(outcome));
        }
        self.engine.advance_round();
        Ok(None)
    }

    fn outcome(&self) -> Option<GameOutcome> {
        self.engine.state().round.outcome.clone()
    }

    fn flush_log(&mut self) {
        let events = self.engine.take_unseen();
        if !events.is_empty() {
            self.presenter.render_log(&events);
        }
    }

    /// Reports a rejected command, or escalates it if it is a fault.
    fn reject(&mut self, err: ExecuteError) -> Result<(), SessionError> {
        if err.severity().is_internal() {
            error!(code = err.error_code(), %err, "engine fault");
            return Err(SessionError::Execute(err));
        }
        self.presenter.message(&err.reason());
        Ok(())
    }
}
