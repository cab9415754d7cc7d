//! Hero commands.
//!
//! Every state-changing command a hero can issue on their turn is a
//! standalone transition type implementing [`ActionTransition`]. The
//! [`HeroAction`] enum is the closed set the engine accepts; the engine
//! drives each one through `pre_validate`, `apply` and `post_validate`.
//!
//! Free actions (viewing stats, opening the market) never reach the engine
//! and therefore have no transition here.
mod combat;
mod inventory;
mod movement;
mod skip;
mod transition;

pub use combat::{AttackAction, AttackError, CastAction, CastError};
pub use inventory::{EquipArmorAction, EquipWeaponAction, InventoryError, UsePotionAction};
pub use movement::{
    ClearObstacleAction, ClearObstacleError, MoveAction, MoveError, RecallAction, RecallError,
    RetreatAction, RetreatError, RetreatOutcome, TeleportAction, TeleportError,
};
pub use skip::SkipAction;
pub use transition::ActionTransition;

use crate::board::Position;
use crate::combat::{AttackResult, SpellResult};
use crate::state::HeroId;

/// A turn-ending hero command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeroAction {
    Move(MoveAction),
    Attack(AttackAction),
    Cast(CastAction),
    EquipWeapon(EquipWeaponAction),
    EquipArmor(EquipArmorAction),
    UsePotion(UsePotionAction),
    Recall(RecallAction),
    Teleport(TeleportAction),
    ClearObstacle(ClearObstacleAction),
    Retreat(RetreatAction),
    Skip(SkipAction),
}

impl HeroAction {
    pub fn actor(&self) -> HeroId {
        match self {
            HeroAction::Move(a) => a.actor(),
            HeroAction::Attack(a) => a.actor(),
            HeroAction::Cast(a) => a.actor(),
            HeroAction::EquipWeapon(a) => a.actor(),
            HeroAction::EquipArmor(a) => a.actor(),
            HeroAction::UsePotion(a) => a.actor(),
            HeroAction::Recall(a) => a.actor(),
            HeroAction::Teleport(a) => a.actor(),
            HeroAction::ClearObstacle(a) => a.actor(),
            HeroAction::Retreat(a) => a.actor(),
            HeroAction::Skip(a) => a.actor(),
        }
    }

    /// Short lowercase name used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            HeroAction::Move(_) => "move",
            HeroAction::Attack(_) => "attack",
            HeroAction::Cast(_) => "cast",
            HeroAction::EquipWeapon(_) => "equip_weapon",
            HeroAction::EquipArmor(_) => "equip_armor",
            HeroAction::UsePotion(_) => "use_potion",
            HeroAction::Recall(_) => "recall",
            HeroAction::Teleport(_) => "teleport",
            HeroAction::ClearObstacle(_) => "clear_obstacle",
            HeroAction::Retreat(_) => "retreat",
            HeroAction::Skip(_) => "skip",
        }
    }
}

/// What a successful command produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionResult {
    /// The hero now stands at this position.
    Relocated(Position),
    Attack(AttackResult),
    Spell(SpellResult),
    /// Name of the item equipped or consumed.
    Item(String),
    ObstacleCleared(Position),
    Retreat(RetreatOutcome),
    Skipped,
}
