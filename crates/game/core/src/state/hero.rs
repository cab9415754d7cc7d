use crate::config::BalanceConfig;

use super::inventory::Inventory;
use super::items::{Armor, Potion, PotionStat, Weapon};

/// Hero archetype. Determines base HP and which stats grow faster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum HeroClass {
    Warrior,
    Sorcerer,
    Paladin,
}

impl HeroClass {
    pub const fn base_hp(self) -> u32 {
        match self {
            HeroClass::Warrior => 400,
            HeroClass::Sorcerer => 300,
            HeroClass::Paladin => 350,
        }
    }

    pub const fn favored(self) -> [Stat; 2] {
        match self {
            HeroClass::Warrior => [Stat::Strength, Stat::Agility],
            HeroClass::Sorcerer => [Stat::Dexterity, Stat::Agility],
            HeroClass::Paladin => [Stat::Strength, Stat::Dexterity],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Stat {
    Strength,
    Dexterity,
    Agility,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeroStats {
    pub strength: u32,
    pub dexterity: u32,
    pub agility: u32,
}

impl HeroStats {
    pub fn get(&self, stat: Stat) -> u32 {
        match stat {
            Stat::Strength => self.strength,
            Stat::Dexterity => self.dexterity,
            Stat::Agility => self.agility,
        }
    }

    pub fn get_mut(&mut self, stat: Stat) -> &mut u32 {
        match stat {
            Stat::Strength => &mut self.strength,
            Stat::Dexterity => &mut self.dexterity,
            Stat::Agility => &mut self.agility,
        }
    }

    fn raise_all(&mut self, amount: u32) {
        self.strength += amount;
        self.dexterity += amount;
        self.agility += amount;
    }
}

/// Roster entry a hero is created from.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeroProfile {
    pub name: String,
    pub class: HeroClass,
    pub mana: u32,
    pub strength: u32,
    pub agility: u32,
    pub dexterity: u32,
    pub gold: u32,
    /// Experience granted at creation; may level the hero immediately.
    #[cfg_attr(feature = "serde", serde(default))]
    pub experience: u64,
}

/// A party member.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hero {
    pub name: String,
    pub class: HeroClass,
    pub level: u32,
    pub hp: u32,
    pub max_hp: u32,
    pub mana: u32,
    pub max_mana: u32,
    /// Current stats, including any active terrain buff.
    pub stats: HeroStats,
    pub experience: u64,
    pub gold: u32,
    pub weapon: Option<Weapon>,
    /// One-handed weapon held with both hands.
    pub two_handed_grip: bool,
    pub armor: Option<Armor>,
    pub inventory: Inventory,
}

impl Hero {
    pub fn from_profile(profile: &HeroProfile, balance: &BalanceConfig) -> Self {
        let mut stats = HeroStats {
            strength: profile.strength,
            dexterity: profile.dexterity,
            agility: profile.agility,
        };
        for stat in profile.class.favored() {
            *stats.get_mut(stat) += balance.initial_favored_bonus;
        }

        let base_hp = profile.class.base_hp();
        let mut hero = Self {
            name: profile.name.clone(),
            class: profile.class,
            level: 1,
            hp: base_hp,
            max_hp: base_hp,
            mana: profile.mana,
            max_mana: profile.mana,
            stats,
            experience: 0,
            gold: profile.gold,
            weapon: None,
            two_handed_grip: false,
            armor: None,
            inventory: Inventory::default(),
        };
        hero.gain_experience(profile.experience, balance);
        hero
    }

    pub fn is_fainted(&self) -> bool {
        self.hp == 0
    }

    /// Restores HP up to the maximum. Returns the amount actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let before = self.hp;
        self.hp = self.hp.saturating_add(amount).min(self.max_hp);
        self.hp - before
    }

    pub fn restore_mana(&mut self, amount: u32) -> u32 {
        let before = self.mana;
        self.mana = self.mana.saturating_add(amount).min(self.max_mana);
        self.mana - before
    }

    pub fn spend_mana(&mut self, amount: u32) -> bool {
        if self.mana < amount {
            return false;
        }
        self.mana -= amount;
        true
    }

    /// Subtracts HP, floored at zero. Returns the HP actually lost.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.hp);
        self.hp -= lost;
        lost
    }

    pub fn restore_fully(&mut self) {
        self.hp = self.max_hp;
        self.mana = self.max_mana;
    }

    pub fn add_gold(&mut self, amount: u32) {
        self.gold = self.gold.saturating_add(amount);
    }

    pub fn spend_gold(&mut self, amount: u32) -> bool {
        if self.gold < amount {
            return false;
        }
        self.gold -= amount;
        true
    }

    pub fn armor_reduction(&self) -> u32 {
        self.armor.as_ref().map_or(0, |a| a.reduction)
    }

    pub fn weapon_damage(&self, balance: &BalanceConfig) -> u32 {
        self.weapon.as_ref().map_or(0, |w| {
            w.effective_damage(self.two_handed_grip, balance.two_hand_multiplier)
        })
    }

    /// Adds experience and applies every level-up it pays for.
    /// Returns the number of levels gained.
    pub fn gain_experience(&mut self, xp: u64, balance: &BalanceConfig) -> u32 {
        self.experience += xp;
        let mut gained = 0;
        while self.experience >= balance.xp_required_for_level(self.level + 1) {
            self.level_up(balance);
            gained += 1;
        }
        gained
    }

    pub fn xp_to_next_level(&self, balance: &BalanceConfig) -> u64 {
        balance
            .xp_required_for_level(self.level + 1)
            .saturating_sub(self.experience)
    }

    fn level_up(&mut self, balance: &BalanceConfig) {
        self.level += 1;
        self.max_hp += balance.level_up_hp_bonus;
        self.max_mana += balance.level_up_mana_bonus;
        self.restore_fully();
        self.stats.raise_all(balance.level_up_stat_bonus);
        for stat in self.class.favored() {
            *self.stats.get_mut(stat) += balance.level_up_favored_bonus;
        }
    }

    pub fn apply_potion(&mut self, potion: &Potion) {
        let amount = potion.amount;
        match potion.stat {
            PotionStat::Hp => {
                self.heal(amount);
            }
            PotionStat::Mana => {
                self.restore_mana(amount);
            }
            PotionStat::Strength => self.stats.strength += amount,
            PotionStat::Dexterity => self.stats.dexterity += amount,
            PotionStat::Agility => self.stats.agility += amount,
            PotionStat::All => {
                self.heal(amount);
                self.restore_mana(amount);
                self.stats.raise_all(amount);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(class: HeroClass, experience: u64) -> HeroProfile {
        HeroProfile {
            name: "Gaerdal_Ironhand".into(),
            class,
            mana: 100,
            strength: 700,
            agility: 500,
            dexterity: 600,
            gold: 1354,
            experience,
        }
    }

    #[test]
    fn favored_bonus_applied_on_creation() {
        let balance = BalanceConfig::default();
        let hero = Hero::from_profile(&profile(HeroClass::Warrior, 0), &balance);
        assert_eq!(hero.max_hp, 400);
        assert_eq!(hero.stats.strength, 750);
        assert_eq!(hero.stats.agility, 550);
        assert_eq!(hero.stats.dexterity, 600);
        assert_eq!(hero.level, 1);
    }

    #[test]
    fn starting_experience_levels_up() {
        let balance = BalanceConfig::default();
        let hero = Hero::from_profile(&profile(HeroClass::Sorcerer, 30), &balance);
        assert_eq!(hero.level, 3);
        assert_eq!(hero.max_hp, 300 + 2 * 50);
        assert_eq!(hero.max_mana, 100 + 2 * 10);
        assert_eq!(hero.hp, hero.max_hp);
        // +50 initial, +5 all and +5 favored per level
        assert_eq!(hero.stats.dexterity, 600 + 50 + 2 * 10);
        assert_eq!(hero.stats.strength, 700 + 2 * 5);
    }

    #[test]
    fn heal_and_damage_are_clamped() {
        let balance = BalanceConfig::default();
        let mut hero = Hero::from_profile(&profile(HeroClass::Paladin, 0), &balance);
        assert_eq!(hero.take_damage(1000), 350);
        assert!(hero.is_fainted());
        assert_eq!(hero.heal(1000), 350);
        assert_eq!(hero.hp, 350);
    }

    #[test]
    fn all_potion_touches_everything() {
        let balance = BalanceConfig::default();
        let mut hero = Hero::from_profile(&profile(HeroClass::Paladin, 0), &balance);
        hero.take_damage(100);
        hero.spend_mana(50);
        let before = hero.stats;
        hero.apply_potion(&Potion {
            name: "Ambrosia".into(),
            price: 1000,
            required_level: 8,
            amount: 150,
            stat: PotionStat::All,
        });
        assert_eq!(hero.hp, hero.max_hp);
        assert_eq!(hero.mana, hero.max_mana);
        assert_eq!(hero.stats.agility, before.agility + 150);
    }
}
