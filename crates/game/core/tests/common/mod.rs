//! Shared fixtures for the scenario tests.
#![allow(dead_code)]

use std::collections::VecDeque;

use game_core::state::{BattleEvent, BattleState};
use game_core::{
    Board, Direction, GameConfig, Hero, HeroClass, HeroProfile, InputError, InputSource,
    MonsterRoster, MonsterTemplate, Presenter,
};

pub fn roster() -> MonsterRoster {
    MonsterRoster::new(vec![MonsterTemplate::new("Casper", 1, 100, 100, 0)])
}

pub fn warrior(name: &str, config: &GameConfig) -> Hero {
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
}

pub fn party(config: &GameConfig) -> Vec<Hero> {
    ["Gaerdal_Ironhand", "Sehanine_Monnbow", "Muamman_Duathall"]
        .into_iter()
        .map(|name| warrior(name, config))
        .collect()
}

pub fn open_state(config: &GameConfig) -> BattleState {
    BattleState::new(Board::open(config), config.seed)
}

/// One scripted answer.
#[derive(Clone, Copy, Debug)]
pub enum Answer {
    Choice(usize),
    Direction(Option<Direction>),
    YesNo(bool),
}

/// Replays answers in order; reports `Closed` once they run out.
#[derive(Default)]
pub struct ScriptedInput {
    answers: VecDeque<Answer>,
}

impl ScriptedInput {
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    fn next(&mut self, prompt: &str) -> Result<Answer, InputError> {
        let answer = self.answers.pop_front().ok_or(InputError::Closed)?;
        tracing::trace!(prompt, ?answer, "scripted answer");
        Ok(answer)
    }
}

impl InputSource for ScriptedInput {
    fn read_direction(&mut self, prompt: &str) -> Result<Option<Direction>, InputError> {
        match self.next(prompt)? {
            Answer::Direction(direction) => Ok(direction),
            other => panic!("expected a direction for {prompt:?}, script has {other:?}"),
        }
    }

    fn read_choice(&mut self, prompt: &str) -> Result<usize, InputError> {
        match self.next(prompt)? {
            Answer::Choice(choice) => Ok(choice),
            other => panic!("expected a choice for {prompt:?}, script has {other:?}"),
        }
    }

    fn read_yes_no(&mut self, prompt: &str) -> Result<bool, InputError> {
        match self.next(prompt)? {
            Answer::YesNo(yes) => Ok(yes),
            other => panic!("expected yes/no for {prompt:?}, script has {other:?}"),
        }
    }
}

/// Keeps every message and event line it is shown.
#[derive(Default)]
pub struct RecordingPresenter {
    pub lines: Vec<String>,
    pub boards: usize,
}

impl RecordingPresenter {
    pub fn saw(&self, text: &str) -> bool {
        self.lines.iter().any(|line| line.contains(text))
    }

    pub fn count(&self, text: &str) -> usize {
        self.lines.iter().filter(|line| line.contains(text)).count()
    }
}

impl Presenter for RecordingPresenter {
    fn render_board(&mut self, _state: &BattleState) {
        self.boards += 1;
    }

    fn render_heroes(&mut self, state: &BattleState) {
        for (_, hero) in state.heroes() {
            self.lines.push(format!("{} HP {}/{}", hero.name, hero.hp, hero.max_hp));
        }
    }

    fn render_monsters(&mut self, state: &BattleState) {
        for (_, monster) in state.monsters() {
            self.lines.push(format!("{} HP {}", monster.name, monster.hp));
        }
    }

    fn message(&mut self, text: &str) {
        self.lines.push(text.to_string());
    }

    fn render_log(&mut self, events: &[BattleEvent]) {
        self.lines.extend(events.iter().map(ToString::to_string));
    }
}
