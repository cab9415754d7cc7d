//! Lane-restricted breadth-first search for monster movement.

use std::collections::{BTreeMap, VecDeque};

use crate::board::{Direction, Position};
use crate::state::{BattleState, MonsterId};

/// Monster expansion order. Monsters never step back toward their own Nexus.
const MONSTER_STEPS: [Direction; 3] = [Direction::Down, Direction::Left, Direction::Right];

/// First step of a shortest path from `start` to the nearest living hero in
/// the monster's lane.
///
/// The search stays in the start lane, only crosses accessible tiles, never
/// enters a tile held by another monster and never passes through a hero
/// tile; a hero tile is only ever the goal. Returns `None` when no hero is
/// reachable or when the first step would land on a hero.
pub fn first_step_toward_hero(
    state: &BattleState,
    monster: MonsterId,
    start: Position,
) -> Option<Position> {
    let targets: Vec<Position> = state
        .living_heroes()
        .map(|(_, p)| p)
        .filter(|p| state.board.same_lane(start, *p))
        .collect();
    if targets.is_empty() {
        return None;
    }

    let is_hero_tile = |p: Position| state.hero_at(p).is_some();

    let mut parents: BTreeMap<Position, Position> = BTreeMap::new();
    let mut queue = VecDeque::from([start]);
    let mut goal = None;

    while let Some(current) = queue.pop_front() {
        if targets.contains(&current) {
            goal = Some(current);
            break;
        }
        for direction in MONSTER_STEPS {
            let next = current.step(direction);
            if next == start || parents.contains_key(&next) {
                continue;
            }
            if !state.board.same_lane(start, next) || !state.board.is_accessible(next) {
                continue;
            }
            if state.monster_at(next).is_some_and(|other| other != monster) {
                continue;
            }
            if !targets.contains(&next) && is_hero_tile(next) {
                continue;
            }
            parents.insert(next, current);
            queue.push_back(next);
        }
    }

    let mut step = goal?;
    loop {
        let parent = *parents.get(&step)?;
        if parent == start {
            break;
        }
        step = parent;
    }

    tracing::debug!(%monster, from = %start, to = %step, "bfs step");
    (!is_hero_tile(step)).then_some(step)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, TileKind};
    use crate::config::{BalanceConfig, GameConfig};
    use crate::env::MonsterTemplate;
    use crate::state::{Hero, HeroClass, HeroProfile, Monster};

    fn setup() -> BattleState {
        let config = GameConfig::default();
        let balance = BalanceConfig::default();
        let mut state = BattleState::new(Board::open(&config), 3);
        let profile = HeroProfile {
            name: "Sehanine_Moonbow".into(),
            class: HeroClass::Warrior,
            mana: 600,
            strength: 700,
            agility: 800,
            dexterity: 500,
            gold: 2500,
            experience: 0,
        };
        let hero = state.add_hero(Hero::from_profile(&profile, &balance));
        state.place_hero(hero, Position::new(6, 0), 10).unwrap();
        state
    }

    fn monster() -> Monster {
        Monster::from_template(
            &MonsterTemplate::new("Cyrrollalee", 7, 700, 800, 75),
            &BalanceConfig::default(),
        )
    }

    #[test]
    fn straight_down_when_clear() {
        let mut state = setup();
        let m = state.spawn_monster(monster(), Position::new(0, 0)).unwrap();
        assert_eq!(
            first_step_toward_hero(&state, m, Position::new(0, 0)),
            Some(Position::new(1, 0))
        );
    }

    #[test]
    fn sidesteps_around_an_obstacle() {
        let mut state = setup();
        state.board.set_interior(Position::new(1, 0), TileKind::Obstacle);
        let m = state.spawn_monster(monster(), Position::new(0, 0)).unwrap();
        assert_eq!(
            first_step_toward_hero(&state, m, Position::new(0, 0)),
            Some(Position::new(0, 1))
        );
    }

    #[test]
    fn no_hero_in_lane_means_no_path() {
        let mut state = setup();
        let m = state.spawn_monster(monster(), Position::new(0, 3)).unwrap();
        assert_eq!(first_step_toward_hero(&state, m, Position::new(0, 3)), None);
    }

    #[test]
    fn fully_blocked_row_means_no_path() {
        let mut state = setup();
        state.board.set_interior(Position::new(1, 0), TileKind::Obstacle);
        state.board.set_interior(Position::new(1, 1), TileKind::Obstacle);
        let m = state.spawn_monster(monster(), Position::new(0, 0)).unwrap();
        assert_eq!(first_step_toward_hero(&state, m, Position::new(0, 0)), None);
    }
}
