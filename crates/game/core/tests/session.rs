//! Menu-driven play through [`Session`] with scripted input.
mod common;

use common::{Answer, RecordingPresenter, ScriptedInput, open_state, party, roster};
use game_core::frontend::ClosedShop;
use game_core::{
    BattleEnv, Direction, GameConfig, GameEngine, HeroId, InputError, PcgRng, Position, Session,
    SessionError, Side,
};

const MOVE: usize = 1;
const ATTACK: usize = 2;
const SHOP: usize = 6;
const SKIP: usize = 10;

#[test]
fn rejected_and_cancelled_picks_keep_the_turn() {
    let config = GameConfig::default();
    let roster = roster();
    let env = BattleEnv::with_all(&config, &PcgRng, &roster);
    let mut state = open_state(&config);
    let mut presenter = RecordingPresenter::default();
    let mut input = ScriptedInput::new([
        // Gaerdal: out of range, back out of a move, then skip.
        Answer::Choice(42),
        Answer::Choice(MOVE),
        Answer::Direction(None),
        Answer::Choice(SKIP),
        // Sehanine: nothing to attack yet.
        Answer::Choice(ATTACK),
        Answer::Choice(SKIP),
        // Muamman: the market is a free action.
        Answer::Choice(SHOP),
        Answer::Choice(SKIP),
    ]);
    let mut shop = ClosedShop;

    let result = Session::new(
        GameEngine::new(&mut state, env),
        &mut presenter,
        &mut input,
        &mut shop,
    )
    .run(party(&config));

    assert_eq!(result.unwrap_err(), SessionError::Input(InputError::Closed));
    assert_eq!(input.remaining(), 0);
    assert!(presenter.saw("Invalid choice. Enter a number from 1 to 11."));
    assert!(presenter.saw("No monsters in range."));
    assert!(presenter.saw("The market is closed."));
    assert_eq!(presenter.count("skips the turn."), 3);

    assert_eq!(state.round.number, 2);
    assert_eq!(state.hero_position(HeroId(0)), Some(Position::new(7, 0)));
    let rows: Vec<i32> = state.living_monsters().map(|(_, p)| p.row).collect();
    assert_eq!(rows, vec![1, 1, 1]);
}

#[test]
fn illegal_move_is_reported_and_retried() {
    let config = GameConfig::default();
    let roster = roster();
    let env = BattleEnv::with_all(&config, &PcgRng, &roster);
    let mut state = open_state(&config);
    let mut presenter = RecordingPresenter::default();
    let mut input = ScriptedInput::new([
        // Off the bottom edge, then a legal step up.
        Answer::Choice(MOVE),
        Answer::Direction(Some(Direction::Down)),
        Answer::Choice(MOVE),
        Answer::Direction(Some(Direction::Up)),
    ]);
    let mut shop = ClosedShop;

    let result = Session::new(
        GameEngine::new(&mut state, env),
        &mut presenter,
        &mut input,
        &mut shop,
    )
    .run(party(&config));

    assert_eq!(result.unwrap_err(), SessionError::Input(InputError::Closed));
    assert!(presenter.saw("cannot move outside the board"));
    assert_eq!(state.hero_position(HeroId(0)), Some(Position::new(6, 0)));
}

#[test]
fn stepping_onto_the_monster_nexus_ends_the_match() {
    let config = GameConfig::default();
    let roster = roster();
    let env = BattleEnv::with_all(&config, &PcgRng, &roster);
    let mut state = open_state(&config);
    GameEngine::new(&mut state, env).setup(party(&config)).unwrap();
    state
        .place_hero(HeroId(0), Position::new(1, 1), config.balance.terrain_buff_divisor)
        .unwrap();

    let mut presenter = RecordingPresenter::default();
    let mut input = ScriptedInput::new([
        Answer::Choice(MOVE),
        Answer::Direction(Some(Direction::Up)),
    ]);
    let mut shop = ClosedShop;
    let mut session = Session::new(
        GameEngine::new(&mut state, env),
        &mut presenter,
        &mut input,
        &mut shop,
    );

    let outcome = session.play_round().unwrap().unwrap();
    assert_eq!(outcome.winner, Side::Heroes);
    assert_eq!(session.engine().state().round.number, 1);
    drop(session);
    assert!(presenter.saw("Gaerdal_Ironhand has reached the Monster Nexus! Heroes win!"));
}
