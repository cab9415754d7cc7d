use crate::env::BattleEnv;
use crate::error::{ErrorSeverity, GameError, InvariantViolation};
use crate::state::{BagIndex, BattleEvent, BattleState, HeroId, ItemHolder};

use super::transition::{ActionTransition, active_hero};

/// Errors shared by the equip and potion commands.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InventoryError {
    #[error("bag slot {index} does not hold a weapon")]
    NotAWeapon { index: BagIndex },

    #[error("bag slot {index} does not hold armor")]
    NotArmor { index: BagIndex },

    #[error("bag slot {index} does not hold a potion")]
    NotAPotion { index: BagIndex },

    #[error("requires level {required} (hero is level {level})")]
    LevelTooLow { required: u32, level: u32 },

    #[error(transparent)]
    Invariant(#[from] InvariantViolation),
}

impl GameError for InventoryError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Invariant(inner) => inner.severity(),
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotAWeapon { .. } => "INVENTORY_NOT_A_WEAPON",
            Self::NotArmor { .. } => "INVENTORY_NOT_ARMOR",
            Self::NotAPotion { .. } => "INVENTORY_NOT_A_POTION",
            Self::LevelTooLow { .. } => "INVENTORY_LEVEL_TOO_LOW",
            Self::Invariant(inner) => inner.error_code(),
        }
    }
}

fn check_level(required: u32, level: u32) -> Result<(), InventoryError> {
    if level < required {
        return Err(InventoryError::LevelTooLow { required, level });
    }
    Ok(())
}

/// Moves a weapon from the bag into the weapon slot.
///
/// `both_hands` only matters for one-handed weapons; two-handed weapons are
/// always gripped with both hands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EquipWeaponAction {
    pub hero: HeroId,
    pub index: BagIndex,
    pub both_hands: bool,
}

impl EquipWeaponAction {
    pub fn new(hero: HeroId, index: BagIndex, both_hands: bool) -> Self {
        Self {
            hero,
            index,
            both_hands,
        }
    }
}

impl ActionTransition for EquipWeaponAction {
    type Error = InventoryError;
    type Result = String;

    fn actor(&self) -> HeroId {
        self.hero
    }

    fn pre_validate(&self, state: &BattleState, _env: &BattleEnv<'_>) -> Result<(), Self::Error> {
        let (hero, _) = active_hero(state, self.hero)?;
        let weapon = hero
            .weapon_at(self.index)
            .ok_or(InventoryError::NotAWeapon { index: self.index })?;
        check_level(weapon.required_level, hero.level)
    }

    fn apply(&self, state: &mut BattleState, _env: &BattleEnv<'_>) -> Result<String, Self::Error> {
        let hero = state.require_hero_mut(self.hero)?;
        let weapon = hero
            .equip_weapon(self.index, self.both_hands)
            .ok_or(InventoryError::NotAWeapon { index: self.index })?;
        let event = BattleEvent::WeaponEquipped {
            hero: hero.name.clone(),
            weapon: weapon.clone(),
            both_hands: hero.two_handed_grip,
        };
        state.log(event);
        Ok(weapon)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EquipArmorAction {
    pub hero: HeroId,
    pub index: BagIndex,
}

impl EquipArmorAction {
    pub fn new(hero: HeroId, index: BagIndex) -> Self {
        Self { hero, index }
    }
}

impl ActionTransition for EquipArmorAction {
    type Error = InventoryError;
    type Result = String;

    fn actor(&self) -> HeroId {
        self.hero
    }

    fn pre_validate(&self, state: &BattleState, _env: &BattleEnv<'_>) -> Result<(), Self::Error> {
        let (hero, _) = active_hero(state, self.hero)?;
        let armor = hero
            .armor_at(self.index)
            .ok_or(InventoryError::NotArmor { index: self.index })?;
        check_level(armor.required_level, hero.level)
    }

    fn apply(&self, state: &mut BattleState, _env: &BattleEnv<'_>) -> Result<String, Self::Error> {
        let hero = state.require_hero_mut(self.hero)?;
        let armor = hero
            .equip_armor(self.index)
            .ok_or(InventoryError::NotArmor { index: self.index })?;
        let event = BattleEvent::ArmorEquipped {
            hero: hero.name.clone(),
            armor: armor.clone(),
        };
        state.log(event);
        Ok(armor)
    }
}

/// Drinks the potion at `index`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UsePotionAction {
    pub hero: HeroId,
    pub index: BagIndex,
}

impl UsePotionAction {
    pub fn new(hero: HeroId, index: BagIndex) -> Self {
        Self { hero, index }
    }
}

impl ActionTransition for UsePotionAction {
    type Error = InventoryError;
    type Result = String;

    fn actor(&self) -> HeroId {
        self.hero
    }

    fn pre_validate(&self, state: &BattleState, _env: &BattleEnv<'_>) -> Result<(), Self::Error> {
        let (hero, _) = active_hero(state, self.hero)?;
        let potion = hero
            .potion_at(self.index)
            .ok_or(InventoryError::NotAPotion { index: self.index })?;
        check_level(potion.required_level, hero.level)
    }

    fn apply(&self, state: &mut BattleState, _env: &BattleEnv<'_>) -> Result<String, Self::Error> {
        let hero = state.require_hero_mut(self.hero)?;
        let potion = hero
            .consume_potion(self.index)
            .ok_or(InventoryError::NotAPotion { index: self.index })?;
        let event = BattleEvent::PotionUsed {
            hero: hero.name.clone(),
            potion: potion.name.clone(),
        };
        state.log(event);
        Ok(potion.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, Position};
    use crate::config::GameConfig;
    use crate::env::PcgRng;
    use crate::state::{Armor, Hero, HeroClass, HeroProfile, Item, Potion, PotionStat};

    fn setup(config: &GameConfig) -> (BattleState, HeroId) {
        let mut state = BattleState::new(Board::open(config), 3);
        let profile = HeroProfile {
            name: "Sehanine_Moonbow".into(),
            class: HeroClass::Paladin,
            mana: 300,
            strength: 750,
            agility: 700,
            dexterity: 700,
            gold: 2500,
            experience: 0,
        };
        let hero = state.add_hero(Hero::from_profile(&profile, &config.balance));
        state.place_hero(hero, Position::new(5, 3), 10).unwrap();
        (state, hero)
    }

    #[test]
    fn armor_above_level_is_refused() {
        let config = GameConfig::default();
        let env = BattleEnv::new(&config, &PcgRng, None);
        let (mut state, hero) = setup(&config);
        state.hero_mut(hero).unwrap().inventory.add(Item::Armor(Armor {
            name: "Guardian_Angel".into(),
            price: 1000,
            required_level: 10,
            reduction: 1000,
        }));

        let err = EquipArmorAction::new(hero, 0)
            .pre_validate(&state, &env)
            .unwrap_err();
        assert_eq!(err, InventoryError::LevelTooLow { required: 10, level: 1 });
    }

    #[test]
    fn wrong_slot_kind_is_a_validation_error() {
        let config = GameConfig::default();
        let env = BattleEnv::new(&config, &PcgRng, None);
        let (mut state, hero) = setup(&config);
        state.hero_mut(hero).unwrap().inventory.add(Item::Armor(Armor {
            name: "Platinum_Shield".into(),
            price: 150,
            required_level: 1,
            reduction: 200,
        }));
        let err = UsePotionAction::new(hero, 0)
            .pre_validate(&state, &env)
            .unwrap_err();
        assert_eq!(err.error_code(), "INVENTORY_NOT_A_POTION");
        assert_eq!(err.severity(), ErrorSeverity::Validation);
    }

    #[test]
    fn potion_is_logged_and_consumed() {
        let config = GameConfig::default();
        let env = BattleEnv::new(&config, &PcgRng, None);
        let (mut state, hero) = setup(&config);
        state.hero_mut(hero).unwrap().inventory.add(Item::Potion(Potion {
            name: "Mermaid_Tears".into(),
            price: 850,
            required_level: 1,
            amount: 100,
            stat: PotionStat::Agility,
        }));

        let action = UsePotionAction::new(hero, 0);
        action.pre_validate(&state, &env).unwrap();
        assert_eq!(action.apply(&mut state, &env).unwrap(), "Mermaid_Tears");
        assert!(state.hero(hero).unwrap().inventory.is_empty());
        assert_eq!(
            state.round.log.entries().last(),
            Some(&BattleEvent::PotionUsed {
                hero: "Sehanine_Moonbow".into(),
                potion: "Mermaid_Tears".into(),
            })
        );
    }
}
