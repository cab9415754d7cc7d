//! Round lifecycle scenarios driven directly through the engine.
mod common;

use common::{open_state, party, roster, warrior};
use game_core::action::{MoveAction, MoveError, RetreatAction, SkipAction};
use game_core::combat::dodge_chance;
use game_core::env::{Dice, RollContext, RollCounter};
use game_core::state::{BattleEvent, OutcomeReason};
use game_core::{
    ActionResult, BattleEnv, BattleState, Direction, ErrorSeverity, ExecuteError, GameConfig,
    GameEngine, GameError, HeroAction, HeroId, Monster, MonsterTemplate, PcgRng, Position, Side,
    TransitionPhase, new_battle,
};

fn wave_count(events: &[BattleEvent]) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, BattleEvent::WaveSpawned { .. }))
        .count()
}

/// Every hero skips, then the monsters act and the round closes. Returns
/// the events logged during the round.
fn idle_round(engine: &mut GameEngine<'_>) -> Vec<BattleEvent> {
    let before = engine.state().round.log.entries().len();
    for id in engine.state().hero_ids() {
        if engine.state().is_over() {
            break;
        }
        if engine.state().hero(id).is_some_and(|h| !h.is_fainted()) {
            engine
                .execute(&HeroAction::Skip(SkipAction::new(id)))
                .unwrap();
        }
    }
    engine.run_monster_phase().unwrap();
    engine.cleanup();
    engine.end_of_round().unwrap();
    let events = engine.state().round.log.entries()[before..].to_vec();
    engine.advance_round();
    events
}

fn assert_board_invariants(state: &BattleState) {
    let heroes: Vec<_> = state.living_heroes().collect();
    let monsters: Vec<_> = state.living_monsters().collect();

    for (i, (_, a)) in heroes.iter().enumerate() {
        assert!(heroes[i + 1..].iter().all(|(_, b)| b != a), "two heroes on {a}");
    }
    for (i, (_, a)) in monsters.iter().enumerate() {
        assert!(monsters[i + 1..].iter().all(|(_, b)| b != a), "two monsters on {a}");
    }
    for (_, m) in &monsters {
        for (_, h) in &heroes {
            if state.board.same_lane(*m, *h) {
                assert!(m.row <= h.row, "monster at {m} is past the hero at {h}");
            }
        }
    }
    for (id, _) in &heroes {
        state.check_buff(*id).unwrap();
        let hero = state.hero(*id).unwrap();
        assert!(hero.hp <= hero.max_hp);
    }
}

#[test]
fn first_scheduled_wave_arrives_on_round_four() {
    let config = GameConfig::default();
    let roster = roster();
    let env = BattleEnv::with_all(&config, &PcgRng, &roster);
    let mut state = open_state(&config);
    let mut engine = GameEngine::new(&mut state, env);
    engine.setup(party(&config)).unwrap();

    for round in 1..=3 {
        let events = idle_round(&mut engine);
        assert_eq!(wave_count(&events), 0, "unexpected wave in round {round}");
        assert_eq!(engine.state().living_monsters().count(), 3);
    }
    let rows: Vec<i32> = engine.state().living_monsters().map(|(_, p)| p.row).collect();
    assert_eq!(rows, vec![3, 3, 3]);

    let events = idle_round(&mut engine);
    assert_eq!(wave_count(&events), 3);
    assert_eq!(engine.state().living_monsters().count(), 6);
    assert_eq!(engine.state().round.number, 5);
}

#[test]
fn board_invariants_hold_through_a_long_idle_match() {
    let config = GameConfig::default().with_seed(7);
    let roster = roster();
    let env = BattleEnv::with_all(&config, &PcgRng, &roster);
    let mut state = new_battle(&config, &PcgRng);
    let mut engine = GameEngine::new(&mut state, env);
    engine.setup(party(&config)).unwrap();
    assert_board_invariants(engine.state());

    for _ in 0..20 {
        if engine.state().is_over() {
            break;
        }
        idle_round(&mut engine);
        assert_board_invariants(engine.state());
    }
}

#[test]
fn hero_on_monster_nexus_wins() {
    let config = GameConfig::default();
    let roster = roster();
    let env = BattleEnv::with_all(&config, &PcgRng, &roster);
    let mut state = open_state(&config);
    GameEngine::new(&mut state, env).setup(party(&config)).unwrap();

    state
        .place_hero(HeroId(0), Position::new(0, 1), config.balance.terrain_buff_divisor)
        .unwrap();
    let mut engine = GameEngine::new(&mut state, env);
    let outcome = engine.check_outcome().cloned().unwrap();
    assert_eq!(outcome.winner, Side::Heroes);
    assert!(matches!(outcome.reason, OutcomeReason::HeroReachedNexus { .. }));

    let err = engine
        .execute(&HeroAction::Skip(SkipAction::new(HeroId(1))))
        .unwrap_err();
    assert_eq!(err, ExecuteError::GameOver);
}

#[test]
fn monster_on_hero_nexus_wins() {
    let config = GameConfig::default();
    let roster = roster();
    let env = BattleEnv::with_all(&config, &PcgRng, &roster);
    let mut state = open_state(&config);
    GameEngine::new(&mut state, env).setup(party(&config)).unwrap();

    let (monster, _) = state.living_monsters().next().unwrap();
    state.move_monster(monster, Position::new(7, 1)).unwrap();
    let mut engine = GameEngine::new(&mut state, env);
    let outcome = engine.check_outcome().cloned().unwrap();
    assert_eq!(outcome.winner, Side::Monsters);
    assert!(matches!(outcome.reason, OutcomeReason::MonsterReachedNexus { .. }));
}

#[test]
fn fainted_party_loses() {
    let config = GameConfig::default();
    let roster = roster();
    let env = BattleEnv::with_all(&config, &PcgRng, &roster);
    let mut state = open_state(&config);
    GameEngine::new(&mut state, env).setup(party(&config)).unwrap();

    for id in state.hero_ids() {
        let hero = state.hero_mut(id).unwrap();
        hero.take_damage(hero.max_hp);
    }
    let mut engine = GameEngine::new(&mut state, env);
    let outcome = engine.check_outcome().cloned().unwrap();
    assert_eq!(outcome.winner, Side::Monsters);
    assert_eq!(outcome.reason, OutcomeReason::PartyWiped);
}

#[test]
fn fainted_hero_is_revived_at_end_of_round() {
    let config = GameConfig::default();
    let roster = roster();
    let env = BattleEnv::with_all(&config, &PcgRng, &roster);
    let mut state = open_state(&config);
    GameEngine::new(&mut state, env).setup(party(&config)).unwrap();

    let divisor = config.balance.terrain_buff_divisor;
    state.place_hero(HeroId(0), Position::new(4, 0), divisor).unwrap();
    let hero = state.hero_mut(HeroId(0)).unwrap();
    hero.take_damage(hero.max_hp);

    let mut engine = GameEngine::new(&mut state, env);
    engine.end_of_round().unwrap();
    let state = engine.state();
    let hero = state.hero(HeroId(0)).unwrap();
    assert_eq!(hero.hp, hero.max_hp);
    assert_eq!(state.hero_position(HeroId(0)), Some(Position::new(7, 0)));
}

#[test]
fn hero_cannot_move_past_the_front_monster() {
    let config = GameConfig::default();
    let mut state = open_state(&config);
    let divisor = config.balance.terrain_buff_divisor;
    let hero = state.add_hero(warrior("Gaerdal_Ironhand", &config));
    state.set_spawn(hero, Position::new(7, 0));
    state.place_hero(hero, Position::new(4, 1), divisor).unwrap();
    let template = MonsterTemplate::new("Casper", 1, 100, 100, 0);
    state
        .spawn_monster(Monster::from_template(&template, &config.balance), Position::new(3, 0))
        .unwrap();

    let env = BattleEnv::new(&config, &PcgRng, None);
    let mut engine = GameEngine::new(&mut state, env);
    let up = HeroAction::Move(MoveAction::new(hero, Direction::Up));

    assert_eq!(
        engine.execute(&up).unwrap(),
        ActionResult::Relocated(Position::new(3, 1))
    );
    let err = engine.execute(&up).unwrap_err();
    assert_eq!(err.phase(), Some(TransitionPhase::PreValidate));
    assert_eq!(err.severity(), ErrorSeverity::Validation);
    assert!(matches!(
        err,
        ExecuteError::Move(ref e) if e.error == MoveError::PastMonster { destination: Position::new(2, 1) }
    ));
    assert_eq!(engine.state().hero_position(hero), Some(Position::new(3, 1)));
}

#[test]
fn retreat_heals_and_the_next_attack_is_absorbed() {
    let config = GameConfig::default();
    let mut state = open_state(&config);
    let divisor = config.balance.terrain_buff_divisor;
    let hero = state.add_hero(warrior("Gaerdal_Ironhand", &config));
    state.set_spawn(hero, Position::new(7, 0));
    state.place_hero(hero, Position::new(5, 0), divisor).unwrap();
    state.hero_mut(hero).unwrap().take_damage(100);
    let template = MonsterTemplate::new("Casper", 1, 100, 100, 0);
    let monster = state
        .spawn_monster(Monster::from_template(&template, &config.balance), Position::new(4, 0))
        .unwrap();

    let env = BattleEnv::new(&config, &PcgRng, None);
    let mut engine = GameEngine::new(&mut state, env);
    let ActionResult::Retreat(outcome) = engine
        .execute(&HeroAction::Retreat(RetreatAction::new(hero)))
        .unwrap()
    else {
        panic!("retreat returned another result");
    };
    assert_eq!(outcome.to, Position::new(6, 0));
    // ceil(0.15 * 400)
    assert_eq!(outcome.healed, 60);
    assert_eq!(outcome.monster_advanced, Some(Position::new(5, 0)));
    assert_eq!(engine.state().immunity(hero), 1);
    assert_eq!(engine.state().monster_position(monster), Some(Position::new(5, 0)));

    engine.run_monster_phase().unwrap();
    let state = engine.state();
    assert_eq!(state.hero(hero).unwrap().hp, 360);
    assert_eq!(state.immunity(hero), 0);
    assert!(
        state
            .round
            .log
            .entries()
            .iter()
            .any(|e| matches!(e, BattleEvent::HeroImmune { .. }))
    );
}

#[test]
fn retreat_needs_an_engaged_monster() {
    let config = GameConfig::default();
    let mut state = open_state(&config);
    let hero = state.add_hero(warrior("Gaerdal_Ironhand", &config));
    state
        .place_hero(hero, Position::new(5, 0), config.balance.terrain_buff_divisor)
        .unwrap();

    let env = BattleEnv::new(&config, &PcgRng, None);
    let mut engine = GameEngine::new(&mut state, env);
    let err = engine
        .execute(&HeroAction::Retreat(RetreatAction::new(hero)))
        .unwrap_err();
    assert_eq!(err.error_code(), "RETREAT_NOT_ENGAGED");
    assert_eq!(err.reason(), "you can only retreat while engaged in combat");
}

#[test]
fn terrain_buffs_never_accumulate() {
    let config = GameConfig::default().with_seed(11);
    let mut state = new_battle(&config, &PcgRng);
    let divisor = config.balance.terrain_buff_divisor;
    let hero = state.add_hero(warrior("Gaerdal_Ironhand", &config));
    state.place_hero(hero, Position::new(7, 0), divisor).unwrap();
    let base = state.hero(hero).unwrap().stats;

    for row in (1..7).rev() {
        for col in [0, 1] {
            let at = Position::new(row, col);
            if !state.board.is_accessible(at) {
                continue;
            }
            state.place_hero(hero, at, divisor).unwrap();
            state.check_buff(hero).unwrap();
        }
    }
    state.place_hero(hero, Position::new(7, 0), divisor).unwrap();
    assert_eq!(state.buff(hero), None);
    assert_eq!(state.hero(hero).unwrap().stats, base);
}

#[test]
fn dodge_rate_converges_to_agility_share() {
    let config = GameConfig::default();
    let hero = warrior("Gaerdal_Ironhand", &config);
    // (500 + 50) / 10
    let chance = dodge_chance(&hero, &config.balance);
    assert_eq!(chance, 55);

    let mut counter = RollCounter::new(config.seed);
    let mut dice = Dice::new(&PcgRng, &mut counter, RollContext::Dodge);
    let trials = 20_000;
    let dodged = (0..trials).filter(|_| dice.percent() < chance).count();
    let rate = dodged as f64 / trials as f64;
    assert!((rate - 0.55).abs() < 0.03, "dodge rate {rate}");
}
