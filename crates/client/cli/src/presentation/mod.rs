//! Console rendering of the battle.
mod board;

use std::io::Write;

use crossterm::style::{StyledContent, Stylize};
use game_core::state::{BattleEvent, BattleState, ItemHolder, ItemKind, Side};
use game_core::{Presenter, TileKind};

pub use board::{Cell, cells};

/// Writes a styled text rendering to `out`.
///
/// Write failures are dropped: a dead terminal is noticed by the input side,
/// which reports the session as closed.
pub struct ConsolePresenter<W> {
    out: W,
}

impl<W: Write> ConsolePresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: impl std::fmt::Display) {
        let _ = writeln!(self.out, "{text}");
    }
}

fn tile_style(tile: TileKind) -> StyledContent<String> {
    let glyph = tile.glyph().to_string();
    match tile {
        TileKind::Wall => glyph.dark_grey(),
        TileKind::Bush => glyph.green(),
        TileKind::Cave => glyph.magenta(),
        TileKind::Koulou => glyph.yellow(),
        TileKind::Obstacle => glyph.dark_red(),
        TileKind::HeroNexus => glyph.blue().bold(),
        TileKind::MonsterNexus => glyph.red().bold(),
        TileKind::Plain => glyph.white(),
    }
}

fn event_style(event: &BattleEvent) -> StyledContent<String> {
    let text = event.to_string();
    match event {
        BattleEvent::GameOver(outcome) if outcome.winner == Side::Heroes => text.green().bold(),
        BattleEvent::GameOver(_) => text.red().bold(),
        BattleEvent::HeroFainted { .. } | BattleEvent::MonsterAttacked { .. } => text.red(),
        BattleEvent::MonsterDefeated { .. } | BattleEvent::LeveledUp { .. } => text.green(),
        BattleEvent::WaveSpawned { .. } => text.magenta(),
        _ => text.stylize(),
    }
}

impl<W: Write> Presenter for ConsolePresenter<W> {
    fn render_board(&mut self, state: &BattleState) {
        let grid = cells(state);
        let width = grid.first().map_or(0, Vec::len);
        let header: String = (0..width).map(|c| format!("{c:^9}")).collect();
        self.line(format!("   {header}"));
        for (row, cells) in grid.iter().enumerate() {
            let _ = write!(self.out, "{row:>2} ");
            for cell in cells {
                let hero = cell.hero.map(|h| h.to_string()).unwrap_or_default();
                let monster = cell.monster.map(|m| m.to_string()).unwrap_or_default();
                let _ = write!(
                    self.out,
                    "[{} {} {}]",
                    tile_style(cell.tile),
                    format!("{hero:<2}").green().bold(),
                    format!("{monster:<3}").red().bold()
                );
            }
            self.line("");
        }
        self.line(format!(
            "Round {}  |  . Plain  B Bush  C Cave  K Koulou  O Obstacle  # Wall  H/M Nexus",
            state.round.number
        ));
    }

    fn render_heroes(&mut self, state: &BattleState) {
        self.line("--- Heroes ---".bold());
        for (id, hero) in state.heroes() {
            let at = state
                .hero_position(id)
                .map_or_else(|| "-".to_string(), |p| p.to_string());
            self.line(format!(
                "{id} {} ({}) Lv {} | HP {}/{} | MP {}/{} | STR {} DEX {} AGI {} | Gold {} | XP {} | at {at}",
                hero.name,
                hero.class,
                hero.level,
                hero.hp,
                hero.max_hp,
                hero.mana,
                hero.max_mana,
                hero.stats.strength,
                hero.stats.dexterity,
                hero.stats.agility,
                hero.gold,
                hero.experience,
            ));
            let weapon = hero.weapon.as_ref().map_or("none", |w| w.name.as_str());
            let armor = hero.armor.as_ref().map_or("none", |a| a.name.as_str());
            let grip = if hero.two_handed_grip { " (both hands)" } else { "" };
            self.line(format!(
                "    weapon {weapon}{grip} | armor {armor} | potions {} | spells {}",
                hero.items_of(ItemKind::Potion).len(),
                hero.items_of(ItemKind::Spell).len(),
            ));
        }
    }

    fn render_monsters(&mut self, state: &BattleState) {
        self.line("--- Monsters ---".bold());
        for (id, monster) in state.monsters() {
            let at = state
                .monster_position(id)
                .map_or_else(|| "-".to_string(), |p| p.to_string());
            self.line(format!(
                "{id} {} Lv {} | HP {}/{} | DMG {} DEF {} DODGE {}% | at {at}",
                monster.name,
                monster.level,
                monster.hp,
                monster.max_hp,
                monster.damage,
                monster.defense,
                monster.dodge,
            ));
        }
    }

    fn message(&mut self, text: &str) {
        self.line(text);
    }

    fn render_log(&mut self, events: &[BattleEvent]) {
        for event in events {
            self.line(event_style(event));
        }
    }
}
