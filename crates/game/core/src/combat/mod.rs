//! Combat resolution.
//!
//! `damage` holds the pure formulas; `result` applies them to a concrete
//! attacker and defender and reports the effective HP lost. Randomness enters
//! only as a pre-rolled percentile so every function here is deterministic.
//!
//! # Core Functions
//!
//! - `resolve_hero_attack`: hero basic attack against a monster
//! - `resolve_spell`: spell cast, elemental debuff included
//! - `resolve_monster_attack`: monster attack with dodge, armor and terrain
//! - `grant_kill_reward`: XP and gold for the hero who landed the kill

pub mod damage;
pub mod result;
pub mod rewards;

pub use damage::{
    dodge_chance, hero_attack_raw, mitigate_hero_damage, monster_attack_raw, spell_debuff,
    spell_raw,
};
pub use result::{
    AttackOutcome, AttackResult, SpellResult, resolve_hero_attack, resolve_monster_attack,
    resolve_spell,
};
pub use rewards::{KillReward, grant_kill_reward};
