//! Damage formulas.

use crate::board::TileKind;
use crate::config::BalanceConfig;
use crate::state::{Hero, Monster, Side, Spell, SpellElement};
use crate::terrain;

/// Raw damage of a hero basic attack, before monster defense.
///
/// # Formula
///
/// ```text
/// base = floor(strength * strength_factor) + weapon_damage
/// raw  = round(base * attack_multiplier(tile))
/// ```
///
/// A one-handed weapon held with both hands contributes
/// `round(damage * two_hand_multiplier)`.
pub fn hero_attack_raw(hero: &Hero, tile: TileKind, balance: &BalanceConfig) -> u32 {
    let from_strength = (hero.stats.strength as f64 * balance.hero_strength_factor).floor() as u32;
    let base = from_strength + hero.weapon_damage(balance);
    let multiplier = terrain::attack_multiplier(tile, Side::Heroes, balance);
    (base as f64 * multiplier).round() as u32
}

/// Raw spell damage: `base + dexterity / spell_dex_divisor`.
pub fn spell_raw(spell: &Spell, caster: &Hero, balance: &BalanceConfig) -> u32 {
    spell.damage + caster.stats.dexterity / balance.spell_dex_divisor.max(1)
}

/// Size of the elemental debuff a spell inflicts on `target`.
///
/// # Formula
///
/// `max(1, stat / spell_debuff_divisor)` where `stat` is defense for Fire,
/// damage for Ice and dodge chance for Lightning.
pub fn spell_debuff(element: SpellElement, target: &Monster, balance: &BalanceConfig) -> u32 {
    let stat = match element {
        SpellElement::Fire => target.defense,
        SpellElement::Ice => target.damage,
        SpellElement::Lightning => target.dodge,
    };
    (stat / balance.spell_debuff_divisor.max(1)).max(1)
}

/// Hero dodge chance in percent: `min(100, agility / dodge_agility_divisor)`.
pub fn dodge_chance(hero: &Hero, balance: &BalanceConfig) -> u32 {
    (hero.stats.agility / balance.dodge_agility_divisor.max(1)).min(100)
}

/// Raw damage of a monster attacking from `tile`.
pub fn monster_attack_raw(monster: &Monster, tile: TileKind, balance: &BalanceConfig) -> u32 {
    let multiplier = terrain::attack_multiplier(tile, Side::Monsters, balance);
    (monster.damage as f64 * multiplier).round() as u32
}

/// Damage a hero standing on `tile` actually takes from a hit of `raw`.
///
/// # Formula
///
/// ```text
/// reduced = max(0, raw - armor)
/// final   = round(reduced * defense_multiplier(tile))
/// ```
pub fn mitigate_hero_damage(raw: u32, armor: u32, tile: TileKind, balance: &BalanceConfig) -> u32 {
    let reduced = raw.saturating_sub(armor);
    (reduced as f64 * terrain::defense_multiplier(tile, balance)).round() as u32
}
