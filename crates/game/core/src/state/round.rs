use core::fmt;

use crate::board::{LaneId, Position, TileKind};
use crate::state::{Stat, items::SpellElement};

/// Which side ended the match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Heroes,
    Monsters,
}

/// Terminal state of a match.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameOutcome {
    pub winner: Side,
    pub reason: OutcomeReason,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OutcomeReason {
    /// A living hero stands on a Monster Nexus.
    HeroReachedNexus { hero: String, position: Position },
    /// A living monster stands on a Hero Nexus.
    MonsterReachedNexus { monster: String, position: Position },
    /// Every hero is fainted at once.
    PartyWiped,
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reason {
            OutcomeReason::HeroReachedNexus { hero, .. } => {
                write!(f, "{hero} has reached the Monster Nexus! Heroes win!")
            }
            OutcomeReason::MonsterReachedNexus { monster, .. } => {
                write!(f, "{monster} has reached the Hero Nexus! Monsters win!")
            }
            OutcomeReason::PartyWiped => write!(f, "Every hero has fallen. Monsters win!"),
        }
    }
}

/// Something that happened during a round, in the order it happened.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleEvent {
    HeroMoved { hero: String, to: Position },
    HeroAttacked { hero: String, monster: String, damage: u32 },
    MonsterDodged { hero: String, monster: String },
    SpellCast {
        hero: String,
        spell: String,
        monster: String,
        damage: u32,
        element: SpellElement,
        debuff: u32,
    },
    MonsterDefeated { monster: String },
    Rewarded { hero: String, xp: u64, gold: u32 },
    LeveledUp { hero: String, level: u32 },
    WeaponEquipped { hero: String, weapon: String, both_hands: bool },
    ArmorEquipped { hero: String, armor: String },
    PotionUsed { hero: String, potion: String },
    Recalled { hero: String, to: Position },
    Teleported { hero: String, to: Position },
    ObstacleCleared { hero: String, at: Position },
    Retreated { hero: String, to: Position, healed: u32 },
    MonsterAdvanced { monster: String, to: Position },
    Skipped { hero: String },
    TerrainBuff { hero: String, tile: TileKind, stat: Stat, delta: u32 },
    MonsterAttacked { monster: String, hero: String, damage: u32 },
    HeroDodged { hero: String, monster: String },
    HeroImmune { hero: String, monster: String },
    HeroFainted { hero: String },
    MonsterMoved { monster: String, to: Position },
    MonsterHeld { monster: String },
    HeroRespawned { hero: String, at: Position },
    WaveSpawned { lane: LaneId, monster: String, at: Position },
    GameOver(GameOutcome),
}

impl fmt::Display for BattleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use BattleEvent::*;
        match self {
            HeroMoved { hero, to } => write!(f, "{hero} moved to {to}."),
            HeroAttacked {
                hero,
                monster,
                damage,
            } => write!(f, "{hero} attacked {monster} for {damage} damage."),
            MonsterDodged { hero, monster } => {
                write!(f, "{monster} dodged the attack from {hero}!")
            }
            SpellCast {
                hero,
                spell,
                monster,
                damage,
                element,
                debuff,
            } => {
                let effect = match element {
                    SpellElement::Fire => "defense",
                    SpellElement::Ice => "damage",
                    SpellElement::Lightning => "dodge chance",
                };
                write!(
                    f,
                    "{hero} casts {spell} on {monster} for {damage} damage; {monster}'s {effect} drops by {debuff}."
                )
            }
            MonsterDefeated { monster } => write!(f, "{monster} has been defeated!"),
            Rewarded { hero, xp, gold } => write!(f, "{hero} gains {xp} XP and {gold} gold."),
            LeveledUp { hero, level } => write!(f, "{hero} reached level {level}!"),
            WeaponEquipped {
                hero,
                weapon,
                both_hands,
            } => {
                if *both_hands {
                    write!(f, "{hero} equipped {weapon} (using both hands).")
                } else {
                    write!(f, "{hero} equipped {weapon}.")
                }
            }
            ArmorEquipped { hero, armor } => write!(f, "{hero} equipped {armor}."),
            PotionUsed { hero, potion } => write!(f, "{hero} used {potion}."),
            Recalled { hero, to } => write!(f, "{hero} recalls to their Hero Nexus at {to}."),
            Teleported { hero, to } => write!(f, "{hero} teleported to {to}."),
            ObstacleCleared { hero, at } => write!(f, "{hero} cleared the obstacle at {at}."),
            Retreated { hero, to, healed } => write!(
                f,
                "{hero} retreats to {to}, recovers {healed} HP and is immune to the next monster attack."
            ),
            MonsterAdvanced { monster, to } => write!(f, "{monster} advances to {to}."),
            Skipped { hero } => write!(f, "{hero} skips the turn."),
            TerrainBuff {
                hero,
                tile,
                stat,
                delta,
            } => write!(f, "{hero} gains +{delta} {stat} from the {tile}."),
            MonsterAttacked {
                monster,
                hero,
                damage,
            } => write!(f, "{monster} attacked {hero} for {damage} damage."),
            HeroDodged { hero, monster } => {
                write!(f, "{hero} dodged the attack from {monster}!")
            }
            HeroImmune { hero, monster } => write!(
                f,
                "{hero} is protected by their retreat; {monster}'s attack has no effect."
            ),
            HeroFainted { hero } => write!(f, "{hero} has fainted!"),
            MonsterMoved { monster, to } => write!(f, "{monster} moved to {to}."),
            MonsterHeld { monster } => write!(f, "{monster} holds its ground."),
            HeroRespawned { hero, at } => write!(f, "{hero} is revived at their Hero Nexus {at}."),
            WaveSpawned { lane, monster, at } => {
                write!(f, "{monster} emerges from the Monster Nexus of {lane} at {at}.")
            }
            GameOver(outcome) => write!(f, "{outcome}"),
        }
    }
}

/// Transient per-round action log.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundLog {
    entries: Vec<BattleEvent>,
    /// Entries before this index have already been shown live.
    shown: usize,
}

impl RoundLog {
    pub fn push(&mut self, event: BattleEvent) {
        self.entries.push(event);
    }

    pub fn entries(&self) -> &[BattleEvent] {
        &self.entries
    }

    /// Events pushed since the previous call.
    pub fn unseen(&mut self) -> &[BattleEvent] {
        let start = self.shown;
        self.shown = self.entries.len();
        &self.entries[start..]
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.shown = 0;
    }
}

/// Round counter, terminal flag and the round's log.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundState {
    /// Current round, starting at 1. Only ever increases.
    pub number: u32,
    pub outcome: Option<GameOutcome>,
    pub log: RoundLog,
}

impl RoundState {
    pub fn new() -> Self {
        Self {
            number: 1,
            outcome: None,
            log: RoundLog::default(),
        }
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }
}

impl Default for RoundState {
    fn default() -> Self {
        Self::new()
    }
}
