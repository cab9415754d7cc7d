use core::fmt;

/// Hand-held weapon. Two-handed weapons always use both hands.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Weapon {
    pub name: String,
    pub price: u32,
    pub required_level: u32,
    pub damage: u32,
    pub hands: u8,
}

impl Weapon {
    pub fn is_two_handed(&self) -> bool {
        self.hands >= 2
    }

    /// Damage contributed to a basic attack.
    ///
    /// # Formula
    ///
    /// - two-handed weapon: `damage`
    /// - one-handed weapon held with both hands: `round(damage * two_hand_multiplier)`
    /// - otherwise: `damage`
    pub fn effective_damage(&self, both_hands: bool, two_hand_multiplier: f64) -> u32 {
        if self.is_two_handed() || !both_hands {
            return self.damage;
        }
        (f64::from(self.damage) * two_hand_multiplier).round() as u32
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Armor {
    pub name: String,
    pub price: u32,
    pub required_level: u32,
    /// Flat damage subtracted from every monster hit.
    pub reduction: u32,
}

/// Attribute restored or raised by a potion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum PotionStat {
    Hp,
    Mana,
    Strength,
    Dexterity,
    Agility,
    All,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Potion {
    pub name: String,
    pub price: u32,
    pub required_level: u32,
    pub amount: u32,
    pub stat: PotionStat,
}

/// Element of a spell; each applies one permanent debuff to its target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SpellElement {
    /// Lowers defense.
    Fire,
    /// Lowers damage.
    Ice,
    /// Lowers dodge chance.
    Lightning,
}

/// Single-use spell scroll.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Spell {
    pub name: String,
    pub price: u32,
    pub required_level: u32,
    pub damage: u32,
    pub mana_cost: u32,
    pub element: SpellElement,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum ItemKind {
    Weapon,
    Armor,
    Potion,
    Spell,
}

/// Anything a hero can carry, buy or sell.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Item {
    Weapon(Weapon),
    Armor(Armor),
    Potion(Potion),
    Spell(Spell),
}

impl Item {
    pub fn kind(&self) -> ItemKind {
        match self {
            Item::Weapon(_) => ItemKind::Weapon,
            Item::Armor(_) => ItemKind::Armor,
            Item::Potion(_) => ItemKind::Potion,
            Item::Spell(_) => ItemKind::Spell,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Item::Weapon(w) => &w.name,
            Item::Armor(a) => &a.name,
            Item::Potion(p) => &p.name,
            Item::Spell(s) => &s.name,
        }
    }

    pub fn price(&self) -> u32 {
        match self {
            Item::Weapon(w) => w.price,
            Item::Armor(a) => a.price,
            Item::Potion(p) => p.price,
            Item::Spell(s) => s.price,
        }
    }

    pub fn required_level(&self) -> u32 {
        match self {
            Item::Weapon(w) => w.required_level,
            Item::Armor(a) => a.required_level,
            Item::Potion(p) => p.required_level,
            Item::Spell(s) => s.required_level,
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Item::Weapon(w) => write!(
                f,
                "[Weapon] {} (dmg {}, {}H, lv {}, {}g)",
                w.name, w.damage, w.hands, w.required_level, w.price
            ),
            Item::Armor(a) => write!(
                f,
                "[Armor] {} (-{} dmg, lv {}, {}g)",
                a.name, a.reduction, a.required_level, a.price
            ),
            Item::Potion(p) => write!(
                f,
                "[Potion] {} (+{} {}, lv {}, {}g)",
                p.name, p.amount, p.stat, p.required_level, p.price
            ),
            Item::Spell(s) => write!(
                f,
                "[Spell] {} ({} dmg {}, {} MP, lv {}, {}g)",
                s.name, s.damage, s.element, s.mana_cost, s.required_level, s.price
            ),
        }
    }
}
