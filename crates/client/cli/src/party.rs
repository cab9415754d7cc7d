//! Party selection from the loaded roster.

use game_core::{BalanceConfig, Hero, HeroProfile, InputError, InputSource, Presenter};

pub const PARTY_SIZE: usize = 3;

/// Asks for [`PARTY_SIZE`] distinct roster entries and builds the heroes in
/// pick order.
pub fn choose_party(
    roster: &[HeroProfile],
    balance: &BalanceConfig,
    presenter: &mut dyn Presenter,
    input: &mut dyn InputSource,
) -> Result<Vec<Hero>, InputError> {
    let mut listing = String::from("Choose your heroes:");
    for (i, p) in roster.iter().enumerate() {
        listing.push_str(&format!(
            "\n{:>2}) {:<20} {:<8} MP {:>4} STR {:>4} AGI {:>4} DEX {:>4} Gold {:>5} XP {}",
            i + 1,
            p.name,
            p.class,
            p.mana,
            p.strength,
            p.agility,
            p.dexterity,
            p.gold,
            p.experience
        ));
    }
    presenter.message(&listing);

    let mut picked: Vec<usize> = Vec::with_capacity(PARTY_SIZE);
    while picked.len() < PARTY_SIZE {
        let choice = input.read_choice(&format!("Hero {} of {PARTY_SIZE}", picked.len() + 1))?;
        let Some(index) = choice.checked_sub(1).filter(|i| *i < roster.len()) else {
            presenter.message(&format!("Enter a number from 1 to {}.", roster.len()));
            continue;
        };
        if picked.contains(&index) {
            presenter.message(&format!("{} is already in the party.", roster[index].name));
            continue;
        }
        presenter.message(&format!("{} joins the party.", roster[index].name));
        picked.push(index);
    }

    Ok(picked
        .into_iter()
        .map(|i| Hero::from_profile(&roster[i], balance))
        .collect())
}
