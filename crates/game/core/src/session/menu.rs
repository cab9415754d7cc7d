//! The hero turn menu.
//!
//! Every sub-menu offers `0) Back`, which returns to the main menu without
//! spending the turn. Viewing stats and visiting the market are free.

use tracing::debug;

use crate::action::{
    AttackAction, CastAction, ClearObstacleAction, EquipArmorAction, EquipWeaponAction,
    HeroAction, MoveAction, RecallAction, RetreatAction, SkipAction, TeleportAction,
    UsePotionAction,
};
use crate::board::{Position, TileKind};
use crate::env::RollContext;
use crate::frontend::ShopVisit;
use crate::rules;
use crate::state::{BagIndex, HeroId, ItemHolder, ItemKind, MonsterId};

use super::{Session, SessionError};

const MAIN_MENU: [&str; 11] = [
    "Move",
    "Attack",
    "Cast spell",
    "Inventory",
    "Recall",
    "Shop",
    "Teleport",
    "Remove obstacle",
    "View stats",
    "Skip",
    "Retreat",
];

const INVENTORY_MENU: [&str; 4] = ["Equip weapon", "Equip armor", "Use potion", "View inventory"];

/// What a menu pick led to.
enum Pick {
    Act(HeroAction),
    /// Free action or `Back`: show the main menu again.
    Again,
}

impl Session<'_, '_> {
    /// Prompts `hero` until a turn-ending command succeeds.
    pub(super) fn hero_turn(&mut self, hero: HeroId) -> Result<(), SessionError> {
        self.presenter.render_board(self.engine.state());
        loop {
            let name = self.engine.state().require_hero(hero)?.name.clone();
            let lines: Vec<String> = MAIN_MENU
                .iter()
                .enumerate()
                .map(|(i, label)| format!("{}) {label}", i + 1))
                .collect();
            self.presenter
                .message(&format!("{hero} {name}, choose an action:\n{}", lines.join("\n")));

            let pick = match self.choose("Action", 1, MAIN_MENU.len())? {
                1 => self.pick_move(hero)?,
                2 => self.pick_attack(hero)?,
                3 => self.pick_cast(hero)?,
                4 => self.pick_inventory(hero)?,
                5 => Pick::Act(HeroAction::Recall(RecallAction::new(hero))),
                6 => self.visit_shop(hero)?,
                7 => self.pick_teleport(hero)?,
                8 => Pick::Act(HeroAction::ClearObstacle(ClearObstacleAction::new(hero))),
                9 => {
                    self.presenter.render_heroes(self.engine.state());
                    self.presenter.render_monsters(self.engine.state());
                    Pick::Again
                }
                10 => Pick::Act(HeroAction::Skip(SkipAction::new(hero))),
                _ => Pick::Act(HeroAction::Retreat(RetreatAction::new(hero))),
            };

            let Pick::Act(action) = pick else {
                continue;
            };
            match self.engine.execute(&action) {
                Ok(_) => {
                    debug!(%hero, action = action.as_str(), "turn ended");
                    self.flush_log();
                    return Ok(());
                }
                Err(err) => self.reject(err)?,
            }
        }
    }

    /// Reads a number in `min..=max`, re-prompting on anything else.
    fn choose(&mut self, prompt: &str, min: usize, max: usize) -> Result<usize, SessionError> {
        loop {
            let choice = self.input.read_choice(prompt)?;
            if (min..=max).contains(&choice) {
                return Ok(choice);
            }
            self.presenter
                .message(&format!("Invalid choice. Enter a number from {min} to {max}."));
        }
    }

    /// Lists `labels` under a `0) Back` entry. Returns the zero-based index
    /// picked, or `None` for back.
    fn choose_from(&mut self, title: &str, labels: &[String]) -> Result<Option<usize>, SessionError> {
        let mut text = format!("{title}\n0) Back");
        for (i, label) in labels.iter().enumerate() {
            text.push_str(&format!("\n{}) {label}", i + 1));
        }
        self.presenter.message(&text);
        let choice = self.choose(title, 0, labels.len())?;
        Ok(choice.checked_sub(1))
    }

    fn pick_move(&mut self, hero: HeroId) -> Result<Pick, SessionError> {
        let Some(direction) = self.input.read_direction("Direction (W/A/S/D, 0 to go back)")? else {
            return Ok(Pick::Again);
        };
        Ok(Pick::Act(HeroAction::Move(MoveAction::new(hero, direction))))
    }

    /// Living monsters the hero can reach, with menu labels.
    fn targets(&self, hero: HeroId) -> Result<Vec<(MonsterId, String)>, SessionError> {
        let state = self.engine.state();
        let at = state.require_hero_position(hero)?;
        Ok(rules::monsters_in_range(state, at)
            .into_iter()
            .filter_map(|id| {
                let m = state.monster(id)?;
                Some((id, format!("{id} {} (HP {}/{})", m.name, m.hp, m.max_hp)))
            })
            .collect())
    }

    fn pick_target(&mut self, hero: HeroId) -> Result<Option<MonsterId>, SessionError> {
        let targets = self.targets(hero)?;
        if targets.is_empty() {
            self.presenter.message("No monsters in range.");
            return Ok(None);
        }
        let labels: Vec<String> = targets.iter().map(|(_, l)| l.clone()).collect();
        let picked = self.choose_from("Choose a target:", &labels)?;
        Ok(picked.map(|i| targets[i].0))
    }

    fn pick_attack(&mut self, hero: HeroId) -> Result<Pick, SessionError> {
        Ok(match self.pick_target(hero)? {
            Some(target) => Pick::Act(HeroAction::Attack(AttackAction::new(hero, target))),
            None => Pick::Again,
        })
    }

    /// Bag slots of `kind` with their labels.
    fn bag(&self, hero: HeroId, kind: ItemKind) -> Result<Vec<(BagIndex, String)>, SessionError> {
        let h = self.engine.state().require_hero(hero)?;
        Ok(h.items_of(kind)
            .into_iter()
            .filter_map(|i| h.inventory.items().get(i).map(|item| (i, item.to_string())))
            .collect())
    }

    fn pick_item(&mut self, hero: HeroId, kind: ItemKind, title: &str) -> Result<Option<BagIndex>, SessionError> {
        let items = self.bag(hero, kind)?;
        if items.is_empty() {
            self.presenter.message(&format!("You have no {kind} items."));
            return Ok(None);
        }
        let labels: Vec<String> = items.iter().map(|(_, l)| l.clone()).collect();
        let picked = self.choose_from(title, &labels)?;
        Ok(picked.map(|i| items[i].0))
    }

    fn pick_cast(&mut self, hero: HeroId) -> Result<Pick, SessionError> {
        if self.targets(hero)?.is_empty() {
            self.presenter.message("No monsters in range.");
            return Ok(Pick::Again);
        }
        let Some(spell) = self.pick_item(hero, ItemKind::Spell, "Choose a spell:")? else {
            return Ok(Pick::Again);
        };
        Ok(match self.pick_target(hero)? {
            Some(target) => Pick::Act(HeroAction::Cast(CastAction::new(hero, spell, target))),
            None => Pick::Again,
        })
    }

    fn pick_inventory(&mut self, hero: HeroId) -> Result<Pick, SessionError> {
        let labels: Vec<String> = INVENTORY_MENU.iter().map(|s| s.to_string()).collect();
        let Some(choice) = self.choose_from("Inventory:", &labels)? else {
            return Ok(Pick::Again);
        };
        match choice {
            0 => {
                let Some(index) = self.pick_item(hero, ItemKind::Weapon, "Choose a weapon:")? else {
                    return Ok(Pick::Again);
                };
                let one_handed = self
                    .engine
                    .state()
                    .require_hero(hero)?
                    .weapon_at(index)
                    .is_some_and(|w| !w.is_two_handed());
                let both_hands = one_handed && self.input.read_yes_no("Use both hands?")?;
                Ok(Pick::Act(HeroAction::EquipWeapon(EquipWeaponAction::new(
                    hero, index, both_hands,
                ))))
            }
            1 => Ok(self
                .pick_item(hero, ItemKind::Armor, "Choose armor:")?
                .map_or(Pick::Again, |index| {
                    Pick::Act(HeroAction::EquipArmor(EquipArmorAction::new(hero, index)))
                })),
            2 => Ok(self
                .pick_item(hero, ItemKind::Potion, "Choose a potion:")?
                .map_or(Pick::Again, |index| {
                    Pick::Act(HeroAction::UsePotion(UsePotionAction::new(hero, index)))
                })),
            _ => {
                let h = self.engine.state().require_hero(hero)?;
                let mut text = format!("{}'s inventory:", h.name);
                if h.inventory.is_empty() {
                    text.push_str("\n(empty)");
                }
                for item in h.inventory.items() {
                    text.push_str(&format!("\n- {item}"));
                }
                self.presenter.message(&text);
                Ok(Pick::Again)
            }
        }
    }

    fn visit_shop(&mut self, hero: HeroId) -> Result<Pick, SessionError> {
        let state = self.engine.state();
        let at = state.require_hero_position(hero)?;
        let lane = match (state.board.tile(at), state.board.lane_of(at)) {
            (Some(TileKind::HeroNexus), Some(lane)) => lane,
            _ => {
                self.presenter.message("You must stand on your Hero Nexus to shop.");
                return Ok(Pick::Again);
            }
        };
        let lane_level = state.lane_level(lane);
        let (hero, dice) = self.engine.hero_with_dice(hero, RollContext::Market)?;
        let visit = ShopVisit {
            hero,
            lane,
            lane_level,
            dice,
        };
        self.shop.visit(visit, self.presenter, self.input)?;
        Ok(Pick::Again)
    }

    fn pick_teleport(&mut self, hero: HeroId) -> Result<Pick, SessionError> {
        let state = self.engine.state();
        let from = state.require_hero_position(hero)?;
        let allies: Vec<(HeroId, Position, String)> = state
            .living_heroes()
            .filter(|(id, p)| *id != hero && !state.board.same_lane(from, *p))
            .filter_map(|(id, p)| Some((id, p, state.hero(id)?.name.clone())))
            .collect();
        if allies.is_empty() {
            self.presenter.message("No ally in another lane to teleport to.");
            return Ok(Pick::Again);
        }
        let labels: Vec<String> = allies
            .iter()
            .map(|(id, p, name)| format!("{id} {name} at {p}"))
            .collect();
        let Some(i) = self.choose_from("Teleport next to:", &labels)? else {
            return Ok(Pick::Again);
        };
        let target = allies[i].0;

        let destinations = rules::teleport_destinations(self.engine.state(), hero, target);
        if destinations.is_empty() {
            self.presenter.message("No valid tile next to that ally.");
            return Ok(Pick::Again);
        }
        let labels: Vec<String> = destinations.iter().map(|p| p.to_string()).collect();
        let Some(j) = self.choose_from("Choose a destination:", &labels)? else {
            return Ok(Pick::Again);
        };
        Ok(Pick::Act(HeroAction::Teleport(TeleportAction::new(
            hero,
            target,
            destinations[j],
        ))))
    }
}
