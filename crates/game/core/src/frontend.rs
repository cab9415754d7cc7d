//! Interfaces to the outside world: rendering, player input and the market.
//!
//! The session loop only talks to these traits. Front ends implement them for
//! a console; tests implement them with scripted inputs and recorded output.

use crate::board::{Direction, LaneId};
use crate::env::Dice;
use crate::state::{BattleEvent, BattleState, Hero};

/// Output sink. Never asks for a reply.
pub trait Presenter {
    fn render_board(&mut self, state: &BattleState);

    /// Per-hero summaries: HP, mana, stats, gold, gear.
    fn render_heroes(&mut self, state: &BattleState);

    fn render_monsters(&mut self, state: &BattleState);

    fn message(&mut self, text: &str);

    fn render_log(&mut self, events: &[BattleEvent]) {
        for event in events {
            self.message(&event.to_string());
        }
    }
}

/// The input stream ended; the match cannot continue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("input closed")]
    Closed,
}

/// Blocking player input.
pub trait InputSource {
    /// A direction, or `None` to go back.
    fn read_direction(&mut self, prompt: &str) -> Result<Option<Direction>, InputError>;

    /// A menu number. The caller validates the range and re-prompts.
    fn read_choice(&mut self, prompt: &str) -> Result<usize, InputError>;

    fn read_yes_no(&mut self, prompt: &str) -> Result<bool, InputError>;
}

/// Everything a market visit may touch.
pub struct ShopVisit<'a> {
    pub hero: &'a mut Hero,
    pub lane: LaneId,
    /// Highest hero level of the lane, used to size the stock.
    pub lane_level: u32,
    pub dice: Dice<'a>,
}

/// Market opened from a Hero Nexus tile. A visit is a free action.
pub trait Shop {
    fn visit(
        &mut self,
        visit: ShopVisit<'_>,
        presenter: &mut dyn Presenter,
        input: &mut dyn InputSource,
    ) -> Result<(), InputError>;
}

/// A market that is always closed.
#[derive(Clone, Copy, Debug, Default)]
pub struct ClosedShop;

impl Shop for ClosedShop {
    fn visit(
        &mut self,
        _visit: ShopVisit<'_>,
        presenter: &mut dyn Presenter,
        _input: &mut dyn InputSource,
    ) -> Result<(), InputError> {
        presenter.message("The market is closed.");
        Ok(())
    }
}
