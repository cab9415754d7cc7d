//! Round scheduling and the action execution pipeline.
//!
//! The [`GameEngine`] is the authoritative reducer for [`BattleState`]. Hero
//! commands flow through the three-phase transition pipeline; the monster
//! phase, cleanup and end-of-round bookkeeping are engine steps that never
//! fail on player input. The win/lose check runs after every hero command,
//! after every monster turn and at the end of each round.
//!
//! A round is driven from outside in this order:
//!
//! 1. [`GameEngine::execute`] once per living hero
//! 2. [`GameEngine::run_monster_phase`]
//! 3. [`GameEngine::cleanup`]
//! 4. [`GameEngine::end_of_round`]
//! 5. [`GameEngine::advance_round`]
//!
//! Every step is a no-op once the match has an outcome.

mod errors;
mod transition;

pub use errors::{ExecuteError, RoundError, TransitionPhase, TransitionPhaseError};

use tracing::{debug, info, warn};

use crate::action::{ActionResult, HeroAction};
use crate::ai::{MonsterDecision, TacticChain};
use crate::board::{Position, TileKind, generate_layout};
use crate::combat;
use crate::config::GameConfig;
use crate::env::{BattleEnv, Dice, RngOracle, RollContext, RollCounter};
use crate::error::InvariantViolation;
use crate::rules;
use crate::state::{
    BattleEvent, BattleState, Combatant, GameOutcome, Hero, HeroId, Monster, MonsterId,
    OutcomeReason, Side,
};

/// Builds a fresh battle on a randomly generated board.
///
/// The layout consumes rolls from the match seed, so the returned state's
/// roll counter continues where the layout left off.
pub fn new_battle(config: &GameConfig, rng: &dyn RngOracle) -> BattleState {
    let mut rolls = RollCounter::new(config.seed);
    let board = generate_layout(config, &mut Dice::new(rng, &mut rolls, RollContext::Layout));
    let mut state = BattleState::new(board, config.seed);
    state.rolls = rolls;
    state
}

/// Game engine that drives one match.
pub struct GameEngine<'a> {
    state: &'a mut BattleState,
    env: BattleEnv<'a>,
    tactics: TacticChain,
}

impl<'a> GameEngine<'a> {
    pub fn new(state: &'a mut BattleState, env: BattleEnv<'a>) -> Self {
        Self {
            state,
            env,
            tactics: TacticChain::default(),
        }
    }

    /// Replaces the monster decision chain.
    pub fn with_tactics(mut self, tactics: TacticChain) -> Self {
        self.tactics = tactics;
        self
    }

    pub fn state(&self) -> &BattleState {
        self.state
    }

    pub fn env(&self) -> &BattleEnv<'a> {
        &self.env
    }

    /// Log entries added since the previous call, for live display.
    pub fn take_unseen(&mut self) -> Vec<BattleEvent> {
        self.state.round.log.unseen().to_vec()
    }

    /// A hero and a roll handle for free actions such as the market. Free
    /// actions never end the turn and do not go through the pipeline.
    pub fn hero_with_dice(
        &mut self,
        hero: HeroId,
        context: RollContext,
    ) -> Result<(&mut Hero, Dice<'_>), InvariantViolation> {
        self.state.hero_with_dice(hero, self.env.rng(), context)
    }

    /// Places the party and spawns the opening wave.
    ///
    /// Hero `i` is assigned to lane `i % lanes`; its spawn point is the first
    /// free Hero Nexus slot of that lane.
    pub fn setup(&mut self, party: Vec<Hero>) -> Result<Vec<HeroId>, RoundError> {
        if party.is_empty() {
            return Err(RoundError::EmptyParty);
        }
        let lanes: Vec<_> = self.state.board.lanes().collect();
        let divisor = self.env.config().balance.terrain_buff_divisor;

        let mut ids = Vec::with_capacity(party.len());
        for (index, hero) in party.into_iter().enumerate() {
            let id = self.state.add_hero(hero);
            let spawn = lanes
                .get(index % lanes.len().max(1))
                .and_then(|lane| rules::free_hero_nexus_slot(self.state, *lane, None))
                .ok_or(RoundError::NoSpawnSlot { hero: id })?;
            self.state.set_spawn(id, spawn);
            self.state.relocate_hero(id, spawn, divisor)?;
            debug!(hero = %id, at = %spawn, "hero placed");
            ids.push(id);
        }
        self.state.refresh_lane_levels();

        let spawned = self.spawn_wave()?;
        info!(heroes = ids.len(), monsters = spawned, "battle set up");
        Ok(ids)
    }

    /// Runs one hero command through the transition pipeline, then checks
    /// for a terminal state.
    pub fn execute(&mut self, action: &HeroAction) -> Result<ActionResult, ExecuteError> {
        if self.state.is_over() {
            return Err(ExecuteError::GameOver);
        }
        let result = transition::execute_transition(action, self.state, &self.env)?;
        debug!(actor = %action.actor(), action = action.as_str(), "hero action applied");
        self.check_outcome();
        Ok(result)
    }

    /// Every living monster acts once, in spawn order.
    pub fn run_monster_phase(&mut self) -> Result<(), RoundError> {
        info!(round = self.state.round.number, "monster phase");
        for id in self.state.monster_ids() {
            if self.state.is_over() {
                break;
            }
            if self.state.monster(id).is_none_or(Monster::is_fainted) {
                continue;
            }
            let at = self.state.require_monster_position(id)?;
            match self.tactics.decide(self.state, id, at) {
                MonsterDecision::Attack(hero) => self.monster_attack(id, at, hero)?,
                MonsterDecision::Move(to) => {
                    self.state.move_monster(id, to)?;
                    let monster = self.monster_name(id)?;
                    self.state.log(BattleEvent::MonsterMoved { monster, to });
                }
                MonsterDecision::Hold => {
                    let monster = self.monster_name(id)?;
                    self.state.log(BattleEvent::MonsterHeld { monster });
                }
            }
            self.check_outcome();
        }
        self.state.expire_immunity();
        Ok(())
    }

    fn monster_name(&self, id: MonsterId) -> Result<String, InvariantViolation> {
        self.state
            .monster(id)
            .map(|m| m.name.clone())
            .ok_or(InvariantViolation::UnknownCombatant {
                actor: Combatant::Monster(id),
            })
    }

    fn monster_attack(
        &mut self,
        id: MonsterId,
        at: Position,
        target: HeroId,
    ) -> Result<(), RoundError> {
        let balance = &self.env.config().balance;
        let monster = self
            .state
            .monster(id)
            .cloned()
            .ok_or(InvariantViolation::UnknownCombatant {
                actor: Combatant::Monster(id),
            })?;
        let hero_name = self.state.require_hero(target)?.name.clone();

        if self.state.absorb_attack(target) {
            self.state.log(BattleEvent::HeroImmune {
                hero: hero_name,
                monster: monster.name,
            });
            return Ok(());
        }

        let defender_at = self.state.require_hero_position(target)?;
        let attacker_tile = self.state.board.tile(at).unwrap_or(TileKind::Plain);
        let defender_tile = self.state.board.tile(defender_at).unwrap_or(TileKind::Plain);
        let roll = Dice::new(self.env.rng(), &mut self.state.rolls, RollContext::Dodge).percent();

        let hero = self.state.require_hero_mut(target)?;
        let result = combat::resolve_monster_attack(
            &monster,
            hero,
            attacker_tile,
            defender_tile,
            roll,
            balance,
        );
        let fainted = hero.is_fainted();

        if result.is_dodged() {
            self.state.log(BattleEvent::HeroDodged {
                hero: hero_name,
                monster: monster.name,
            });
            return Ok(());
        }
        self.state.log(BattleEvent::MonsterAttacked {
            monster: monster.name,
            hero: hero_name.clone(),
            damage: result.damage,
        });
        if fainted {
            self.state.log(BattleEvent::HeroFainted { hero: hero_name });
        }
        Ok(())
    }

    /// Removes fainted monsters from the board. Returns how many were removed.
    pub fn cleanup(&mut self) -> usize {
        let removed = self.state.remove_fainted_monsters();
        for (id, monster) in &removed {
            debug!(monster = %id, name = %monster.name, "fainted monster removed");
        }
        removed.len()
    }

    /// Revives fainted heroes, regenerates the others, spawns the periodic
    /// wave and re-checks the outcome.
    pub fn end_of_round(&mut self) -> Result<(), RoundError> {
        if self.state.is_over() {
            return Ok(());
        }
        let regen = self.env.config().balance.regen_fraction;
        for id in self.state.hero_ids() {
            let hero = self.state.require_hero_mut(id)?;
            if hero.is_fainted() {
                self.respawn(id)?;
            } else {
                let hp = (f64::from(hero.max_hp) * regen).floor() as u32;
                let mana = (f64::from(hero.max_mana) * regen).floor() as u32;
                hero.heal(hp);
                hero.restore_mana(mana);
            }
        }

        let round = self.state.round.number;
        if round % self.env.config().wave_period.max(1) == 0 {
            let spawned = self.spawn_wave()?;
            info!(round, monsters = spawned, "wave spawned");
        }
        self.check_outcome();
        Ok(())
    }

    /// Revives a fainted hero at their spawn, or at the other free Nexus
    /// slot of their lane. A hero with nowhere to go stays fainted.
    fn respawn(&mut self, id: HeroId) -> Result<(), RoundError> {
        let Some(at) = rules::recall_destination(self.state, id) else {
            warn!(hero = %id, "no free Hero Nexus slot; hero stays fainted");
            return Ok(());
        };
        let divisor = self.env.config().balance.terrain_buff_divisor;
        let hero = self.state.require_hero_mut(id)?;
        hero.restore_fully();
        let name = hero.name.clone();
        self.state.relocate_hero(id, at, divisor)?;
        self.state.log(BattleEvent::HeroRespawned { hero: name, at });
        Ok(())
    }

    /// Spawns one monster per lane at the hero party's top level.
    ///
    /// Lanes are filled in index order, each at its first Monster Nexus slot
    /// without a monster. Lanes with no free slot are skipped. Returns the
    /// number of monsters placed.
    pub fn spawn_wave(&mut self) -> Result<usize, RoundError> {
        let oracle = self.env.monsters()?;
        let config = self.env.config();
        let level = self.state.max_hero_level();
        let templates = {
            let mut dice = Dice::new(self.env.rng(), &mut self.state.rolls, RollContext::Wave);
            oracle.spawn(config.monsters_per_wave, level, &mut dice)
        };
        if templates.is_empty() && config.monsters_per_wave > 0 {
            return Err(crate::env::OracleError::EmptyMonsterCatalog.into());
        }

        let lanes: Vec<_> = self.state.board.lanes().collect();
        let mut placed = 0;
        for (lane, template) in lanes.iter().zip(templates.iter()) {
            let slot = self
                .state
                .board
                .monster_nexus_slots(*lane)
                .into_iter()
                .find(|p| self.state.monster_at(*p).is_none());
            let Some(at) = slot else {
                warn!(%lane, monster = %template.name, "monster nexus full; lane skipped");
                continue;
            };
            let monster = Monster::from_template(template, &config.balance);
            let name = monster.name.clone();
            self.state.spawn_monster(monster, at)?;
            self.state.log(BattleEvent::WaveSpawned {
                lane: *lane,
                monster: name,
                at,
            });
            placed += 1;
        }
        if placed < lanes.len().min(templates.len()) {
            warn!(placed, requested = templates.len(), "wave partially placed");
        }
        Ok(placed)
    }

    /// Sets the outcome if the board is in a terminal state.
    ///
    /// Heroes win when a living hero stands on a Monster Nexus; monsters win
    /// when a living monster stands on a Hero Nexus or every hero is fainted.
    pub fn check_outcome(&mut self) -> Option<&GameOutcome> {
        if self.state.round.outcome.is_none() {
            if let Some(outcome) = self.evaluate_outcome() {
                info!(winner = %outcome.winner, round = self.state.round.number, "match over");
                self.state.log(BattleEvent::GameOver(outcome.clone()));
                self.state.round.outcome = Some(outcome);
            }
        }
        self.state.round.outcome.as_ref()
    }

    fn evaluate_outcome(&self) -> Option<GameOutcome> {
        let board = &self.state.board;
        for (id, at) in self.state.living_heroes() {
            if board.tile(at) == Some(TileKind::MonsterNexus) {
                let hero = self.state.hero(id)?.name.clone();
                return Some(GameOutcome {
                    winner: Side::Heroes,
                    reason: OutcomeReason::HeroReachedNexus { hero, position: at },
                });
            }
        }
        for (id, at) in self.state.living_monsters() {
            if board.tile(at) == Some(TileKind::HeroNexus) {
                let monster = self.state.monster(id)?.name.clone();
                return Some(GameOutcome {
                    winner: Side::Monsters,
                    reason: OutcomeReason::MonsterReachedNexus {
                        monster,
                        position: at,
                    },
                });
            }
        }
        let mut heroes = self.state.heroes().peekable();
        if heroes.peek().is_some() && heroes.all(|(_, h)| h.is_fainted()) {
            return Some(GameOutcome {
                winner: Side::Monsters,
                reason: OutcomeReason::PartyWiped,
            });
        }
        None
    }

    /// Flushes the round log and moves to the next round.
    pub fn advance_round(&mut self) {
        if self.state.is_over() {
            return;
        }
        self.state.round.log.clear();
        self.state.round.number += 1;
        info!(round = self.state.round.number, "round started");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::env::{MonsterRoster, MonsterTemplate, PcgRng};
    use crate::state::{HeroClass, HeroProfile};

    fn roster() -> MonsterRoster {
        MonsterRoster::new(vec![MonsterTemplate::new("Casper", 1, 100, 100, 0)])
    }

    fn party(config: &GameConfig) -> Vec<Hero> {
        ["Gaerdal_Ironhand", "Sehanine_Monnbow", "Muamman_Duathall"]
            .into_iter()
            .map(|name| {
                let profile = HeroProfile {
                    name: name.into(),
                    class: HeroClass::Warrior,
                    mana: 100,
                    strength: 700,
                    agility: 500,
                    dexterity: 600,
                    gold: 1354,
                    experience: 0,
                };
                Hero::from_profile(&profile, &config.balance)
            })
            .collect()
    }

    #[test]
    fn setup_places_one_hero_and_one_monster_per_lane() {
        let config = GameConfig::default();
        let roster = roster();
        let env = BattleEnv::with_all(&config, &PcgRng, &roster);
        let mut state = BattleState::new(Board::open(&config), config.seed);
        let mut engine = GameEngine::new(&mut state, env);

        let ids = engine.setup(party(&config)).unwrap();
        assert_eq!(ids.len(), 3);
        let state = engine.state();
        assert_eq!(state.hero_position(ids[0]), Some(Position::new(7, 0)));
        assert_eq!(state.hero_position(ids[1]), Some(Position::new(7, 3)));
        assert_eq!(state.hero_position(ids[2]), Some(Position::new(7, 6)));
        let monsters: Vec<_> = state.living_monsters().map(|(_, p)| p).collect();
        assert_eq!(
            monsters,
            vec![Position::new(0, 0), Position::new(0, 3), Position::new(0, 6)]
        );
    }

    #[test]
    fn missing_roster_is_fatal() {
        let config = GameConfig::default();
        let env = BattleEnv::new(&config, &PcgRng, None);
        let mut state = BattleState::new(Board::open(&config), config.seed);
        let mut engine = GameEngine::new(&mut state, env);
        let err = engine.setup(party(&config)).unwrap_err();
        assert_eq!(err, RoundError::Oracle(crate::env::OracleError::MonstersNotAvailable));
    }

    #[test]
    fn new_battle_is_reproducible() {
        let config = GameConfig::default().with_seed(99);
        assert_eq!(new_battle(&config, &PcgRng), new_battle(&config, &PcgRng));
    }
}
