//! Combat result types and attack resolution.

use crate::board::TileKind;
use crate::config::BalanceConfig;
use crate::state::{Hero, Monster, Spell, SpellElement};

use super::damage::{
    dodge_chance, hero_attack_raw, mitigate_hero_damage, monster_attack_raw, spell_debuff,
    spell_raw,
};

/// Outcome of an attack attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackOutcome {
    /// The defender dodged; nothing changed.
    Dodged,
    /// The attack connected.
    Hit,
}

/// Result of a combat resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackResult {
    pub outcome: AttackOutcome,
    /// Damage before the defender's mitigation, for display.
    pub raw: u32,
    /// HP the defender actually lost. Never exceeds its HP before the hit.
    pub damage: u32,
}

impl AttackResult {
    const fn dodged(raw: u32) -> Self {
        Self {
            outcome: AttackOutcome::Dodged,
            raw,
            damage: 0,
        }
    }

    pub fn is_dodged(&self) -> bool {
        self.outcome == AttackOutcome::Dodged
    }
}

/// Result of a spell cast. Spells are never dodged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpellResult {
    pub raw: u32,
    pub damage: u32,
    /// Amount the element's stat was lowered by.
    pub debuff: u32,
}

/// Hero basic attack against `target`.
///
/// `dodge_roll` is a percentile in `0..100`; it is only consulted when
/// `monsters_dodge_attacks` is enabled.
pub fn resolve_hero_attack(
    hero: &Hero,
    target: &mut Monster,
    tile: TileKind,
    dodge_roll: u32,
    balance: &BalanceConfig,
) -> AttackResult {
    let raw = hero_attack_raw(hero, tile, balance);
    if balance.monsters_dodge_attacks && dodge_roll < target.dodge {
        return AttackResult::dodged(raw);
    }
    let damage = target.take_damage(raw);
    AttackResult {
        outcome: AttackOutcome::Hit,
        raw,
        damage,
    }
}

/// Casts `spell` on `target` and applies its elemental debuff.
///
/// Mana is not touched here; the caller pays the cost.
pub fn resolve_spell(
    caster: &Hero,
    spell: &Spell,
    target: &mut Monster,
    balance: &BalanceConfig,
) -> SpellResult {
    let raw = spell_raw(spell, caster, balance);
    let damage = if balance.spell_ignores_defense {
        target.take_true_damage(raw)
    } else {
        target.take_damage(raw)
    };

    let debuff = spell_debuff(spell.element, target, balance);
    match spell.element {
        SpellElement::Fire => target.reduce_defense(debuff),
        SpellElement::Ice => target.reduce_damage(debuff),
        SpellElement::Lightning => target.reduce_dodge(debuff),
    }

    SpellResult { raw, damage, debuff }
}

/// Monster attack against `hero`.
///
/// `attacker_tile` scales the outgoing damage; `defender_tile` scales what
/// gets through the hero's armor. `dodge_roll` is a percentile in `0..100`.
pub fn resolve_monster_attack(
    monster: &Monster,
    hero: &mut Hero,
    attacker_tile: TileKind,
    defender_tile: TileKind,
    dodge_roll: u32,
    balance: &BalanceConfig,
) -> AttackResult {
    let raw = monster_attack_raw(monster, attacker_tile, balance);
    if dodge_roll < dodge_chance(hero, balance) {
        return AttackResult::dodged(raw);
    }
    let mitigated = mitigate_hero_damage(raw, hero.armor_reduction(), defender_tile, balance);
    let damage = hero.take_damage(mitigated);
    AttackResult {
        outcome: AttackOutcome::Hit,
        raw,
        damage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::MonsterTemplate;
    use crate::state::{Armor, HeroClass, HeroProfile};

    fn sorcerer() -> Hero {
        let profile = HeroProfile {
            name: "Rillifane_Rallathil".into(),
            class: HeroClass::Sorcerer,
            mana: 1300,
            strength: 750,
            agility: 450,
            dexterity: 500,
            gold: 2500,
            experience: 0,
        };
        Hero::from_profile(&profile, &BalanceConfig::default())
    }

    fn monster(damage: u32, defense: u32, dodge: u32) -> Monster {
        Monster::from_template(
            &MonsterTemplate::new("Desghidorrah", 3, damage, defense, dodge),
            &BalanceConfig::default(),
        )
    }

    #[test]
    fn hero_damage_is_never_negative() {
        let balance = BalanceConfig::default();
        let hero = sorcerer();
        let mut target = monster(300, 10_000, 0);
        let result = resolve_hero_attack(&hero, &mut target, TileKind::Plain, 0, &balance);
        assert_eq!(result.outcome, AttackOutcome::Hit);
        assert_eq!(result.raw, 375);
        assert_eq!(result.damage, 0);
        assert_eq!(target.hp, target.max_hp);
    }

    #[test]
    fn monsters_only_dodge_when_enabled() {
        let mut balance = BalanceConfig::default();
        let hero = sorcerer();
        let mut target = monster(300, 0, 90);
        assert!(!resolve_hero_attack(&hero, &mut target, TileKind::Plain, 5, &balance).is_dodged());

        balance.monsters_dodge_attacks = true;
        let mut target = monster(300, 0, 90);
        let result = resolve_hero_attack(&hero, &mut target, TileKind::Plain, 5, &balance);
        assert!(result.is_dodged());
        assert_eq!(target.hp, target.max_hp);
    }

    #[test]
    fn fire_spell_hits_then_lowers_defense() {
        let balance = BalanceConfig::default();
        let hero = sorcerer();
        let spell = Spell {
            name: "Flame_Tornado".into(),
            price: 700,
            required_level: 4,
            damage: 150,
            mana_cost: 300,
            element: SpellElement::Fire,
        };
        let mut target = monster(300, 100, 10);
        let result = resolve_spell(&hero, &spell, &mut target, &balance);
        // 150 + 550 / 10
        assert_eq!(result.raw, 205);
        assert_eq!(result.damage, 105);
        assert_eq!(result.debuff, 20);
        assert_eq!(target.defense, 80);
    }

    #[test]
    fn spell_can_ignore_defense() {
        let balance = BalanceConfig {
            spell_ignores_defense: true,
            ..BalanceConfig::default()
        };
        let hero = sorcerer();
        let spell = Spell {
            name: "Frost_Blizzard".into(),
            price: 750,
            required_level: 5,
            damage: 145,
            mana_cost: 350,
            element: SpellElement::Ice,
        };
        let mut target = monster(300, 100, 10);
        let result = resolve_spell(&hero, &spell, &mut target, &balance);
        assert_eq!(result.damage, 200);
        assert_eq!(target.damage, 240);
    }

    #[test]
    fn monster_attack_respects_dodge_and_armor() {
        let balance = BalanceConfig::default();
        let mut hero = sorcerer();
        hero.armor = Some(Armor {
            name: "Platinum_Shield".into(),
            price: 150,
            required_level: 1,
            reduction: 300,
        });
        let monster = monster(500, 0, 0);
        let full = hero.hp;

        // 500 agility -> 50% dodge
        let dodged =
            resolve_monster_attack(&monster, &mut hero, TileKind::Plain, TileKind::Plain, 49, &balance);
        assert!(dodged.is_dodged());
        assert_eq!(hero.hp, full);

        let hit =
            resolve_monster_attack(&monster, &mut hero, TileKind::Koulou, TileKind::Cave, 50, &balance);
        // round(500 * 1.1) = 550, minus 300 armor, times 0.9
        assert_eq!(hit.raw, 550);
        assert_eq!(hit.damage, 225);
        assert_eq!(hero.hp, full - 225);
    }
}
