//! Held items and the capability interface the engine uses to touch them.

use super::hero::Hero;
use super::items::{Armor, Item, ItemKind, Potion, Spell, Weapon};

/// Ordered bag of carried items. Equipped gear is not part of the bag.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Inventory {
    items: Vec<Item>,
}

impl Inventory {
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn add(&mut self, item: Item) {
        self.items.push(item);
    }

    /// Removes and returns the item at `index` in bag order.
    pub fn take(&mut self, index: usize) -> Option<Item> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }
}

/// Index into a hero's bag, as returned by [`ItemHolder::items_of`].
pub type BagIndex = usize;

/// The operations the engine needs on a hero's items.
pub trait ItemHolder {
    fn has(&self, kind: ItemKind) -> bool;

    /// Bag indices of every item of `kind`, in bag order.
    fn items_of(&self, kind: ItemKind) -> Vec<BagIndex>;

    /// Moves the weapon at `index` into the weapon slot. Any previously
    /// equipped weapon goes back into the bag. Returns the equipped weapon's
    /// name, or `None` if `index` is not a weapon.
    fn equip_weapon(&mut self, index: BagIndex, both_hands: bool) -> Option<String>;

    fn equip_armor(&mut self, index: BagIndex) -> Option<String>;

    /// Removes the potion at `index` and applies it. Returns the potion.
    fn consume_potion(&mut self, index: BagIndex) -> Option<Potion>;

    /// Removes and returns any item.
    fn remove(&mut self, index: BagIndex) -> Option<Item>;
}

impl Hero {
    pub fn weapon_at(&self, index: BagIndex) -> Option<&Weapon> {
        match self.inventory.items().get(index) {
            Some(Item::Weapon(w)) => Some(w),
            _ => None,
        }
    }

    pub fn armor_at(&self, index: BagIndex) -> Option<&Armor> {
        match self.inventory.items().get(index) {
            Some(Item::Armor(a)) => Some(a),
            _ => None,
        }
    }

    pub fn potion_at(&self, index: BagIndex) -> Option<&Potion> {
        match self.inventory.items().get(index) {
            Some(Item::Potion(p)) => Some(p),
            _ => None,
        }
    }

    pub fn spell_at(&self, index: BagIndex) -> Option<&Spell> {
        match self.inventory.items().get(index) {
            Some(Item::Spell(s)) => Some(s),
            _ => None,
        }
    }
}

impl ItemHolder for Hero {
    fn has(&self, kind: ItemKind) -> bool {
        self.inventory.items().iter().any(|i| i.kind() == kind)
    }

    fn items_of(&self, kind: ItemKind) -> Vec<BagIndex> {
        self.inventory
            .items()
            .iter()
            .enumerate()
            .filter(|(_, item)| item.kind() == kind)
            .map(|(i, _)| i)
            .collect()
    }

    fn equip_weapon(&mut self, index: BagIndex, both_hands: bool) -> Option<String> {
        self.weapon_at(index)?;
        let Some(Item::Weapon(weapon)) = self.inventory.take(index) else {
            return None;
        };
        let name = weapon.name.clone();
        self.two_handed_grip = weapon.is_two_handed() || both_hands;
        if let Some(previous) = self.weapon.replace(weapon) {
            self.inventory.add(Item::Weapon(previous));
        }
        Some(name)
    }

    fn equip_armor(&mut self, index: BagIndex) -> Option<String> {
        self.armor_at(index)?;
        let Some(Item::Armor(armor)) = self.inventory.take(index) else {
            return None;
        };
        let name = armor.name.clone();
        if let Some(previous) = self.armor.replace(armor) {
            self.inventory.add(Item::Armor(previous));
        }
        Some(name)
    }

    fn consume_potion(&mut self, index: BagIndex) -> Option<Potion> {
        self.potion_at(index)?;
        let Some(Item::Potion(potion)) = self.inventory.take(index) else {
            return None;
        };
        self.apply_potion(&potion);
        Some(potion)
    }

    fn remove(&mut self, index: BagIndex) -> Option<Item> {
        self.inventory.take(index)
    }
}
