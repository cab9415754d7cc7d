//! Item catalog with level-banded random picks.

use game_core::env::Dice;
use game_core::state::{Armor, Item, ItemKind, Potion, Spell, Weapon};

/// Every item that can appear in a market, grouped by kind.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ItemCatalog {
    pub weapons: Vec<Weapon>,
    pub armors: Vec<Armor>,
    pub potions: Vec<Potion>,
    pub spells: Vec<Spell>,
}

impl ItemCatalog {
    pub fn len(&self) -> usize {
        self.weapons.len() + self.armors.len() + self.potions.len() + self.spells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A random item of `kind` suited to `level`.
    ///
    /// Candidates are the items with `required_level <= level + 1`; when no
    /// item qualifies every item of the kind is a candidate. Returns `None`
    /// only if the catalog has no item of that kind.
    pub fn random_for_level(&self, kind: ItemKind, level: u32, dice: &mut Dice<'_>) -> Option<Item> {
        match kind {
            ItemKind::Weapon => {
                pick_for_level(&self.weapons, level, |w| w.required_level, dice).map(Item::Weapon)
            }
            ItemKind::Armor => {
                pick_for_level(&self.armors, level, |a| a.required_level, dice).map(Item::Armor)
            }
            ItemKind::Potion => {
                pick_for_level(&self.potions, level, |p| p.required_level, dice).map(Item::Potion)
            }
            ItemKind::Spell => {
                pick_for_level(&self.spells, level, |s| s.required_level, dice).map(Item::Spell)
            }
        }
    }
}

fn pick_for_level<T: Clone>(
    items: &[T],
    level: u32,
    required_level: impl Fn(&T) -> u32,
    dice: &mut Dice<'_>,
) -> Option<T> {
    let candidates: Vec<&T> = items
        .iter()
        .filter(|item| required_level(item) <= level.saturating_add(1))
        .collect();
    if candidates.is_empty() {
        return dice.pick(items).cloned();
    }
    dice.pick(&candidates).map(|item| (*item).clone())
}
