//! Lane market stock model.
//!
//! Every lane owns one [`Market`], created the first time a hero of that lane
//! shops and restocked whenever the lane's top hero level has risen above the
//! level the stock was drawn for. Purchases do not deplete the stock.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use game_core::env::Dice;
use game_core::state::{BagIndex, Hero, Item, ItemHolder, ItemKind};
use game_core::{BalanceConfig, ErrorSeverity, GameError, LaneId};
use tracing::debug;

use crate::catalog::ItemCatalog;

const STOCK_KINDS: [ItemKind; 4] = [
    ItemKind::Weapon,
    ItemKind::Armor,
    ItemKind::Potion,
    ItemKind::Spell,
];

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MarketError {
    #[error("no item #{index} for sale")]
    NoSuchItem { index: usize },

    #[error("hero level too low (requires {required}, hero is {level})")]
    LevelTooLow { required: u32, level: u32 },

    #[error("not enough gold ({price} needed, {gold} held)")]
    NotEnoughGold { price: u32, gold: u32 },

    #[error("nothing to sell in bag slot {index}")]
    NothingToSell { index: BagIndex },
}

impl GameError for MarketError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoSuchItem { .. } => "MARKET_NO_SUCH_ITEM",
            Self::LevelTooLow { .. } => "MARKET_LEVEL_TOO_LOW",
            Self::NotEnoughGold { .. } => "MARKET_NOT_ENOUGH_GOLD",
            Self::NothingToSell { .. } => "MARKET_NOTHING_TO_SELL",
        }
    }
}

/// Level an individual stock slot is drawn for.
///
/// - roll `0..60`: `level`
/// - roll `60..90`: `max(1, level - 1)`
/// - roll `90..100`: `level + 2`
fn slot_level(roll: u32, level: u32) -> u32 {
    match roll {
        0..60 => level,
        60..90 => level.saturating_sub(1).max(1),
        _ => level + 2,
    }
}

/// One lane's goods.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Market {
    stock: Vec<Item>,
    base_level: u32,
}

impl Market {
    pub fn stocked(catalog: &ItemCatalog, level: u32, size: usize, dice: &mut Dice<'_>) -> Self {
        let mut market = Self {
            stock: Vec::with_capacity(size),
            base_level: level,
        };
        market.restock(catalog, level, size, dice);
        market
    }

    /// Replaces the whole stock with `size` fresh draws around `level`.
    pub fn restock(&mut self, catalog: &ItemCatalog, level: u32, size: usize, dice: &mut Dice<'_>) {
        self.base_level = level;
        self.stock.clear();
        for _ in 0..size {
            let target = slot_level(dice.percent(), level);
            let kind = STOCK_KINDS[dice.below(STOCK_KINDS.len() as u32) as usize];
            if let Some(item) = catalog.random_for_level(kind, target, dice) {
                self.stock.push(item);
            }
        }
        debug!(level, items = self.stock.len(), "market stocked");
    }

    pub fn stock(&self) -> &[Item] {
        &self.stock
    }

    pub fn base_level(&self) -> u32 {
        self.base_level
    }

    /// Sells a copy of stock item `index` to `hero`.
    pub fn buy(&self, hero: &mut Hero, index: usize) -> Result<Item, MarketError> {
        let item = self.stock.get(index).ok_or(MarketError::NoSuchItem { index })?;
        if hero.level < item.required_level() {
            return Err(MarketError::LevelTooLow {
                required: item.required_level(),
                level: hero.level,
            });
        }
        let price = item.price();
        if !hero.spend_gold(price) {
            return Err(MarketError::NotEnoughGold {
                price,
                gold: hero.gold,
            });
        }
        hero.inventory.add(item.clone());
        Ok(item.clone())
    }
}

/// Gold paid for `item`: `price * sell_percent / 100`, rounded down and
/// capped at `u32::MAX`.
pub fn sell_price(item: &Item, sell_percent: u32) -> u32 {
    u32::try_from(u64::from(item.price()) * u64::from(sell_percent) / 100).unwrap_or(u32::MAX)
}

/// Removes bag item `index` from `hero` and pays them for it.
pub fn sell(hero: &mut Hero, index: BagIndex, sell_percent: u32) -> Result<(Item, u32), MarketError> {
    let item = hero.remove(index).ok_or(MarketError::NothingToSell { index })?;
    let gold = sell_price(&item, sell_percent);
    hero.add_gold(gold);
    Ok((item, gold))
}

/// The markets of every lane, backed by one catalog.
#[derive(Clone, Debug)]
pub struct LaneMarkets {
    catalog: ItemCatalog,
    markets: HashMap<LaneId, Market>,
    stock_size: usize,
    sell_percent: u32,
}

impl LaneMarkets {
    pub fn new(catalog: ItemCatalog, balance: &BalanceConfig) -> Self {
        Self {
            catalog,
            markets: HashMap::new(),
            stock_size: balance.market_stock_size,
            sell_percent: balance.sell_price_percent,
        }
    }

    pub fn sell_percent(&self) -> u32 {
        self.sell_percent
    }

    pub fn market(&self, lane: LaneId) -> Option<&Market> {
        self.markets.get(&lane)
    }

    /// Opens `lane`'s market for a lane whose top hero is `lane_level`.
    ///
    /// Returns the market and whether it was restocked for a higher level.
    /// A market opened for the first time is never reported as restocked.
    pub fn open(&mut self, lane: LaneId, lane_level: u32, dice: &mut Dice<'_>) -> (&Market, bool) {
        match self.markets.entry(lane) {
            Entry::Occupied(entry) => {
                let market = entry.into_mut();
                let restock = lane_level > market.base_level;
                if restock {
                    market.restock(&self.catalog, lane_level, self.stock_size, dice);
                }
                (&*market, restock)
            }
            Entry::Vacant(entry) => {
                let market = Market::stocked(&self.catalog, lane_level, self.stock_size, dice);
                (&*entry.insert(market), false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use game_core::env::{RollContext, RollCounter};
    use game_core::state::{Armor, Potion, PotionStat, Spell, SpellElement, Weapon};
    use game_core::{HeroClass, HeroProfile, PcgRng};

    use super::*;

    fn catalog() -> ItemCatalog {
        ItemCatalog {
            weapons: vec![Weapon {
                name: "Sword".into(),
                price: 500,
                required_level: 1,
                damage: 800,
                hands: 1,
            }],
            armors: vec![Armor {
                name: "Breastplate".into(),
                price: 350,
                required_level: 3,
                reduction: 600,
            }],
            potions: vec![Potion {
                name: "Healing_Potion".into(),
                price: 250,
                required_level: 1,
                amount: 100,
                stat: PotionStat::Hp,
            }],
            spells: vec![Spell {
                name: "Ice_Blade".into(),
                price: 250,
                required_level: 1,
                damage: 450,
                mana_cost: 100,
                element: SpellElement::Ice,
            }],
        }
    }

    fn hero(gold: u32) -> Hero {
        let profile = HeroProfile {
            name: "Gaerdal_Ironhand".into(),
            class: HeroClass::Warrior,
            mana: 100,
            strength: 700,
            agility: 500,
            dexterity: 600,
            gold,
            experience: 0,
        };
        Hero::from_profile(&profile, &BalanceConfig::default())
    }

    fn market(items: Vec<Item>) -> Market {
        Market {
            stock: items,
            base_level: 1,
        }
    }

    #[test]
    fn slot_levels_follow_the_60_30_10_split() {
        assert_eq!(slot_level(0, 3), 3);
        assert_eq!(slot_level(59, 3), 3);
        assert_eq!(slot_level(60, 3), 2);
        assert_eq!(slot_level(89, 1), 1);
        assert_eq!(slot_level(90, 3), 5);
    }

    #[test]
    fn buying_checks_level_then_gold() {
        let catalog = catalog();
        let market = market(vec![
            Item::Armor(catalog.armors[0].clone()),
            Item::Weapon(catalog.weapons[0].clone()),
        ]);
        let mut rich = hero(5000);
        assert_eq!(
            market.buy(&mut rich, 0),
            Err(MarketError::LevelTooLow {
                required: 3,
                level: 1
            })
        );

        let mut poor = hero(100);
        assert_eq!(
            market.buy(&mut poor, 1),
            Err(MarketError::NotEnoughGold {
                price: 500,
                gold: 100
            })
        );
        assert!(poor.inventory.is_empty());

        market.buy(&mut rich, 1).unwrap();
        assert_eq!(rich.gold, 4500);
        assert_eq!(rich.inventory.len(), 1);
        assert_eq!(market.stock().len(), 2);
        assert_eq!(market.buy(&mut rich, 7), Err(MarketError::NoSuchItem { index: 7 }));
    }

    #[test]
    fn selling_pays_eighty_percent() {
        let mut hero = hero(0);
        hero.inventory.add(Item::Potion(catalog().potions[0].clone()));
        let (item, gold) = sell(&mut hero, 0, 80).unwrap();
        assert_eq!(item.name(), "Healing_Potion");
        assert_eq!(gold, 200);
        assert_eq!(hero.gold, 200);
        assert!(hero.inventory.is_empty());
        assert_eq!(sell(&mut hero, 0, 80), Err(MarketError::NothingToSell { index: 0 }));
    }

    #[test]
    fn sell_price_saturates_instead_of_wrapping() {
        let item = Item::Weapon(Weapon {
            name: "Excalibur".into(),
            price: u32::MAX,
            required_level: 1,
            damage: 1000,
            hands: 1,
        });
        assert_eq!(sell_price(&item, 80), (u64::from(u32::MAX) * 80 / 100) as u32);
        assert_eq!(sell_price(&item, 200), u32::MAX);
    }

    #[test]
    fn market_restocks_only_when_lane_level_rises() {
        let balance = BalanceConfig::default();
        let mut markets = LaneMarkets::new(catalog(), &balance);
        let mut counter = RollCounter::new(9);
        let mut dice = Dice::new(&PcgRng, &mut counter, RollContext::Market);
        let lane = LaneId(1);

        let (market, restocked) = markets.open(lane, 1, &mut dice);
        assert!(!restocked);
        assert_eq!(market.stock().len(), balance.market_stock_size);

        let (market, restocked) = markets.open(lane, 1, &mut dice);
        assert!(!restocked);
        assert_eq!(market.base_level(), 1);

        let (market, restocked) = markets.open(lane, 3, &mut dice);
        assert!(restocked);
        assert_eq!(market.base_level(), 3);
        assert!(markets.market(LaneId(0)).is_none());
    }
}
