//! Market menus shown when a hero shops from their Hero Nexus.

use game_content::LaneMarkets;
use game_content::market::{sell, sell_price};
use game_core::frontend::ShopVisit;
use game_core::{InputError, InputSource, Presenter, Shop};
use tracing::info;

/// [`Shop`] backed by the lane markets.
pub struct ConsoleShop {
    markets: LaneMarkets,
}

impl ConsoleShop {
    pub fn new(markets: LaneMarkets) -> Self {
        Self { markets }
    }
}

/// Reads a menu number in `0..=max`, re-asking on anything else.
fn choose(
    presenter: &mut dyn Presenter,
    input: &mut dyn InputSource,
    prompt: &str,
    max: usize,
) -> Result<usize, InputError> {
    loop {
        let choice = input.read_choice(prompt)?;
        if choice <= max {
            return Ok(choice);
        }
        presenter.message(&format!("Invalid choice. Enter a number from 0 to {max}."));
    }
}

impl Shop for ConsoleShop {
    fn visit(
        &mut self,
        visit: ShopVisit<'_>,
        presenter: &mut dyn Presenter,
        input: &mut dyn InputSource,
    ) -> Result<(), InputError> {
        let ShopVisit {
            hero,
            lane,
            lane_level,
            mut dice,
        } = visit;
        let sell_percent = self.markets.sell_percent();
        let (market, restocked) = self.markets.open(lane, lane_level, &mut dice);
        if restocked {
            presenter.message("The market has refreshed its stock for your lane.");
        }

        loop {
            presenter.message(&format!(
                "=== MARKET ({lane}) ===  {} has {} gold\n1) Buy\n2) Sell\n3) Leave",
                hero.name, hero.gold
            ));
            match input.read_choice("Market")? {
                1 => {
                    let mut text = String::from("Items for sale:\n0) Back");
                    for (i, item) in market.stock().iter().enumerate() {
                        text.push_str(&format!("\n{}) {item}", i + 1));
                    }
                    presenter.message(&text);
                    let Some(index) = choose(presenter, input, "Buy", market.stock().len())?.checked_sub(1) else {
                        continue;
                    };
                    match market.buy(hero, index) {
                        Ok(item) => {
                            info!(hero = %hero.name, item = item.name(), "item bought");
                            presenter.message(&format!(
                                "{} bought {} for {} gold.",
                                hero.name,
                                item.name(),
                                item.price()
                            ));
                        }
                        Err(err) => presenter.message(&err.to_string()),
                    }
                }
                2 => {
                    if hero.inventory.is_empty() {
                        presenter.message("This hero has no items.");
                        continue;
                    }
                    let mut text =
                        format!("Choose an item to sell (for {sell_percent}% of price):\n0) Back");
                    for (i, item) in hero.inventory.items().iter().enumerate() {
                        text.push_str(&format!(
                            "\n{}) {item} -> {} gold",
                            i + 1,
                            sell_price(item, sell_percent)
                        ));
                    }
                    presenter.message(&text);
                    let Some(index) = choose(presenter, input, "Sell", hero.inventory.len())?.checked_sub(1) else {
                        continue;
                    };
                    match sell(hero, index, sell_percent) {
                        Ok((item, gold)) => {
                            info!(hero = %hero.name, item = item.name(), gold, "item sold");
                            presenter.message(&format!("{} sold {} for {gold} gold.", hero.name, item.name()));
                        }
                        Err(err) => presenter.message(&err.to_string()),
                    }
                }
                3 => return Ok(()),
                _ => presenter.message("Invalid choice."),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use game_content::ItemCatalog;
    use game_core::env::{Dice, RollContext, RollCounter};
    use game_core::state::{Armor, Potion, PotionStat, Spell, SpellElement, Weapon};
    use game_core::{BalanceConfig, Hero, HeroClass, HeroProfile, LaneId, PcgRng};

    use super::*;
    use crate::input::ConsoleInput;
    use crate::presentation::ConsolePresenter;

    fn catalog() -> ItemCatalog {
        ItemCatalog {
            weapons: vec![Weapon {
                name: "Dagger".into(),
                price: 100,
                required_level: 1,
                damage: 250,
                hands: 1,
            }],
            armors: vec![Armor {
                name: "Platinum_Shield".into(),
                price: 100,
                required_level: 1,
                reduction: 200,
            }],
            potions: vec![Potion {
                name: "Healing_Potion".into(),
                price: 100,
                required_level: 1,
                amount: 100,
                stat: PotionStat::Hp,
            }],
            spells: vec![Spell {
                name: "Ice_Blade".into(),
                price: 100,
                required_level: 1,
                damage: 450,
                mana_cost: 100,
                element: SpellElement::Ice,
            }],
        }
    }

    fn hero() -> Hero {
        let profile = HeroProfile {
            name: "Kalabar".into(),
            class: HeroClass::Sorcerer,
            mana: 800,
            strength: 850,
            agility: 400,
            dexterity: 600,
            gold: 1000,
            experience: 0,
        };
        Hero::from_profile(&profile, &BalanceConfig::default())
    }

    #[test]
    fn buy_then_sell_round_trip() {
        let balance = BalanceConfig::default();
        let mut shop = ConsoleShop::new(LaneMarkets::new(catalog(), &balance));
        let mut hero = hero();
        let mut counter = RollCounter::new(4);
        let visit = ShopVisit {
            hero: &mut hero,
            lane: LaneId(0),
            lane_level: 1,
            dice: Dice::new(&PcgRng, &mut counter, RollContext::Market),
        };
        let mut presenter = ConsolePresenter::new(Vec::new());
        // buy: #99 is refused, then #1; sell #1; leave
        let mut input = ConsoleInput::new(Cursor::new(b"1\n99\n1\n2\n1\n3\n".to_vec()), Vec::new());

        shop.visit(visit, &mut presenter, &mut input).unwrap();

        assert_eq!(hero.gold, 1000 - 100 + 80);
        assert!(hero.inventory.is_empty());
        let text = String::from_utf8(presenter.into_inner()).unwrap();
        assert!(text.contains("Kalabar bought"));
        assert!(text.contains("Invalid choice. Enter a number from 0 to 10."));
        assert!(text.contains("for 80 gold."));
    }

    #[test]
    fn closed_input_leaves_the_market() {
        let balance = BalanceConfig::default();
        let mut shop = ConsoleShop::new(LaneMarkets::new(catalog(), &balance));
        let mut hero = hero();
        let mut counter = RollCounter::new(4);
        let visit = ShopVisit {
            hero: &mut hero,
            lane: LaneId(2),
            lane_level: 1,
            dice: Dice::new(&PcgRng, &mut counter, RollContext::Market),
        };
        let mut presenter = ConsolePresenter::new(Vec::new());
        let mut input = ConsoleInput::new(Cursor::new(Vec::new()), Vec::new());
        assert_eq!(shop.visit(visit, &mut presenter, &mut input), Err(InputError::Closed));
        assert_eq!(hero.gold, 1000);
    }
}
