//! Offensive hero commands: basic attack and spell cast.

use crate::board::TileKind;
use crate::combat::{self, AttackResult, SpellResult};
use crate::config::BalanceConfig;
use crate::env::{BattleEnv, Dice, RollContext};
use crate::error::{ErrorSeverity, GameError, InvariantViolation};
use crate::rules;
use crate::state::{BagIndex, BattleEvent, BattleState, HeroId, MonsterId};

use super::transition::{ActionTransition, active_hero};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AttackError {
    #[error("no monsters in range (same tile or adjacent required)")]
    NothingInRange,

    #[error("{target} is not a living monster in range")]
    InvalidTarget { target: MonsterId },

    #[error(transparent)]
    Invariant(#[from] InvariantViolation),
}

impl GameError for AttackError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Invariant(inner) => inner.severity(),
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NothingInRange => "ATTACK_NOTHING_IN_RANGE",
            Self::InvalidTarget { .. } => "ATTACK_INVALID_TARGET",
            Self::Invariant(inner) => inner.error_code(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CastError {
    #[error("bag slot {index} does not hold a spell")]
    NotASpell { index: BagIndex },

    #[error("not enough mana ({available} of {required})")]
    NotEnoughMana { required: u32, available: u32 },

    #[error("no monsters in range for the spell")]
    NothingInRange,

    #[error("{target} is not a living monster in range")]
    InvalidTarget { target: MonsterId },

    #[error(transparent)]
    Invariant(#[from] InvariantViolation),
}

impl GameError for CastError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Invariant(inner) => inner.severity(),
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotASpell { .. } => "CAST_NOT_A_SPELL",
            Self::NotEnoughMana { .. } => "CAST_NOT_ENOUGH_MANA",
            Self::NothingInRange => "CAST_NOTHING_IN_RANGE",
            Self::InvalidTarget { .. } => "CAST_INVALID_TARGET",
            Self::Invariant(inner) => inner.error_code(),
        }
    }
}

/// Checks that `target` is one of the living monsters in range of `hero`.
fn check_target(
    state: &BattleState,
    hero: HeroId,
    target: MonsterId,
) -> Result<(), TargetError> {
    let (_, at) = active_hero(state, hero)?;
    let candidates = rules::monsters_in_range(state, at);
    if candidates.is_empty() {
        return Err(TargetError::NothingInRange);
    }
    if !candidates.contains(&target) {
        return Err(TargetError::InvalidTarget);
    }
    Ok(())
}

enum TargetError {
    NothingInRange,
    InvalidTarget,
    Invariant(InvariantViolation),
}

impl From<InvariantViolation> for TargetError {
    fn from(value: InvariantViolation) -> Self {
        Self::Invariant(value)
    }
}

/// Logs a defeat and pays the hero if `target` has just fainted.
fn settle_kill(
    state: &mut BattleState,
    hero: HeroId,
    target: MonsterId,
    balance: &BalanceConfig,
) -> Result<(), InvariantViolation> {
    let Some(monster) = state.monster(target).filter(|m| m.is_fainted()).cloned() else {
        return Ok(());
    };
    state.log(BattleEvent::MonsterDefeated {
        monster: monster.name.clone(),
    });

    let winner = state.require_hero_mut(hero)?;
    let reward = combat::grant_kill_reward(winner, &monster, balance);
    let name = winner.name.clone();
    let level = winner.level;
    state.log(BattleEvent::Rewarded {
        hero: name.clone(),
        xp: reward.xp,
        gold: reward.gold,
    });
    if reward.levels > 0 {
        state.log(BattleEvent::LeveledUp { hero: name, level });
        state.refresh_lane_levels();
    }
    Ok(())
}

// ============================================================================
// Attack
// ============================================================================

/// Basic weapon attack on a monster in range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttackAction {
    pub hero: HeroId,
    pub target: MonsterId,
}

impl AttackAction {
    pub fn new(hero: HeroId, target: MonsterId) -> Self {
        Self { hero, target }
    }
}

impl ActionTransition for AttackAction {
    type Error = AttackError;
    type Result = AttackResult;

    fn actor(&self) -> HeroId {
        self.hero
    }

    fn pre_validate(&self, state: &BattleState, _env: &BattleEnv<'_>) -> Result<(), Self::Error> {
        check_target(state, self.hero, self.target).map_err(|e| match e {
            TargetError::NothingInRange => AttackError::NothingInRange,
            TargetError::InvalidTarget => AttackError::InvalidTarget {
                target: self.target,
            },
            TargetError::Invariant(inner) => AttackError::Invariant(inner),
        })
    }

    fn apply(&self, state: &mut BattleState, env: &BattleEnv<'_>) -> Result<AttackResult, Self::Error> {
        let balance = &env.config().balance;
        let at = state.require_hero_position(self.hero)?;
        let tile = state.board.tile(at).unwrap_or(TileKind::Plain);
        let roll = Dice::new(env.rng(), &mut state.rolls, RollContext::Dodge).percent();

        let hero = state.require_hero(self.hero)?.clone();
        let monster = state.require_monster_mut(self.target)?;
        let result = combat::resolve_hero_attack(&hero, monster, tile, roll, balance);
        let monster_name = monster.name.clone();

        if result.is_dodged() {
            state.log(BattleEvent::MonsterDodged {
                hero: hero.name,
                monster: monster_name,
            });
        } else {
            state.log(BattleEvent::HeroAttacked {
                hero: hero.name,
                monster: monster_name,
                damage: result.damage,
            });
            settle_kill(state, self.hero, self.target, balance)?;
        }
        Ok(result)
    }
}

// ============================================================================
// Cast
// ============================================================================

/// Casts the spell at bag slot `spell` on a monster in range. The spell is
/// consumed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CastAction {
    pub hero: HeroId,
    pub spell: BagIndex,
    pub target: MonsterId,
}

impl CastAction {
    pub fn new(hero: HeroId, spell: BagIndex, target: MonsterId) -> Self {
        Self {
            hero,
            spell,
            target,
        }
    }
}

impl ActionTransition for CastAction {
    type Error = CastError;
    type Result = SpellResult;

    fn actor(&self) -> HeroId {
        self.hero
    }

    fn pre_validate(&self, state: &BattleState, _env: &BattleEnv<'_>) -> Result<(), Self::Error> {
        let (hero, _) = active_hero(state, self.hero)?;
        let spell = hero
            .spell_at(self.spell)
            .ok_or(CastError::NotASpell { index: self.spell })?;
        if hero.mana < spell.mana_cost {
            return Err(CastError::NotEnoughMana {
                required: spell.mana_cost,
                available: hero.mana,
            });
        }
        check_target(state, self.hero, self.target).map_err(|e| match e {
            TargetError::NothingInRange => CastError::NothingInRange,
            TargetError::InvalidTarget => CastError::InvalidTarget {
                target: self.target,
            },
            TargetError::Invariant(inner) => CastError::Invariant(inner),
        })
    }

    fn apply(&self, state: &mut BattleState, env: &BattleEnv<'_>) -> Result<SpellResult, Self::Error> {
        let balance = &env.config().balance;
        let caster = state.require_hero_mut(self.hero)?;
        let spell = caster
            .spell_at(self.spell)
            .cloned()
            .ok_or(CastError::NotASpell { index: self.spell })?;
        if !caster.spend_mana(spell.mana_cost) {
            return Err(CastError::NotEnoughMana {
                required: spell.mana_cost,
                available: caster.mana,
            });
        }
        caster.inventory.take(self.spell);
        let caster = caster.clone();

        let monster = state.require_monster_mut(self.target)?;
        let result = combat::resolve_spell(&caster, &spell, monster, balance);
        let monster_name = monster.name.clone();

        state.log(BattleEvent::SpellCast {
            hero: caster.name,
            spell: spell.name,
            monster: monster_name,
            damage: result.damage,
            element: spell.element,
            debuff: result.debuff,
        });
        settle_kill(state, self.hero, self.target, balance)?;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, Position};
    use crate::config::GameConfig;
    use crate::env::{MonsterTemplate, PcgRng};
    use crate::state::{Hero, HeroClass, HeroProfile, Item, Monster, Spell, SpellElement};

    fn setup(config: &GameConfig) -> (BattleState, HeroId, MonsterId) {
        let mut state = BattleState::new(Board::open(config), 5);
        let profile = HeroProfile {
            name: "Reign_Havoc".into(),
            class: HeroClass::Sorcerer,
            mana: 800,
            strength: 800,
            agility: 800,
            dexterity: 800,
            gold: 2500,
            experience: 0,
        };
        let hero = state.add_hero(Hero::from_profile(&profile, &config.balance));
        state.place_hero(hero, Position::new(4, 0), 10).unwrap();
        let template = MonsterTemplate::new("Igneel", 1, 600, 100, 0);
        let monster = state
            .spawn_monster(Monster::from_template(&template, &config.balance), Position::new(3, 1))
            .unwrap();
        (state, hero, monster)
    }

    #[test]
    fn killing_blow_pays_reward() {
        let config = GameConfig::default();
        let env = BattleEnv::new(&config, &PcgRng, None);
        let (mut state, hero, monster) = setup(&config);

        let action = AttackAction::new(hero, monster);
        action.pre_validate(&state, &env).unwrap();
        let result = action.apply(&mut state, &env).unwrap();
        // 400 raw - 100 defense exceeds the 150 HP of a level 1 monster
        assert_eq!(result.damage, 150);
        assert!(state.monster(monster).unwrap().is_fainted());
        assert_eq!(state.hero(hero).unwrap().gold, 3000);
        assert!(
            state
                .round
                .log
                .entries()
                .contains(&BattleEvent::MonsterDefeated {
                    monster: "Igneel".into()
                })
        );
    }

    #[test]
    fn out_of_range_target_is_rejected() {
        let config = GameConfig::default();
        let env = BattleEnv::new(&config, &PcgRng, None);
        let (mut state, hero, monster) = setup(&config);
        state.move_monster(monster, Position::new(1, 1)).unwrap();

        let err = AttackAction::new(hero, monster)
            .pre_validate(&state, &env)
            .unwrap_err();
        assert_eq!(err, AttackError::NothingInRange);
        assert_eq!(err.severity(), ErrorSeverity::Validation);
    }

    #[test]
    fn spell_is_consumed_and_costs_mana() {
        let config = GameConfig::default();
        let env = BattleEnv::new(&config, &PcgRng, None);
        let (mut state, hero, monster) = setup(&config);
        state.hero_mut(hero).unwrap().inventory.add(Item::Spell(Spell {
            name: "Snow_Cannon".into(),
            price: 500,
            required_level: 2,
            damage: 20,
            mana_cost: 250,
            element: SpellElement::Ice,
        }));

        let action = CastAction::new(hero, 0, monster);
        action.pre_validate(&state, &env).unwrap();
        let result = action.apply(&mut state, &env).unwrap();
        // 20 + 850 / 10 - 100 defense
        assert_eq!(result.damage, 5);
        assert_eq!(result.debuff, 120);
        let caster = state.hero(hero).unwrap();
        assert_eq!(caster.mana, 550);
        assert!(caster.inventory.is_empty());
        assert_eq!(state.monster(monster).unwrap().damage, 480);
    }

    #[test]
    fn spell_needs_mana() {
        let config = GameConfig::default();
        let env = BattleEnv::new(&config, &PcgRng, None);
        let (mut state, hero, monster) = setup(&config);
        state.hero_mut(hero).unwrap().inventory.add(Item::Spell(Spell {
            name: "Hell_Storm".into(),
            price: 600,
            required_level: 3,
            damage: 950,
            mana_cost: 900,
            element: SpellElement::Fire,
        }));
        let err = CastAction::new(hero, 0, monster)
            .pre_validate(&state, &env)
            .unwrap_err();
        assert_eq!(
            err,
            CastError::NotEnoughMana {
                required: 900,
                available: 800
            }
        );
    }
}
