//! Data-driven content definitions and loaders.
//!
//! This crate houses the static content of a match and the loaders that read
//! it from RON/TOML data files:
//! - Hero roster (`heroes.ron`)
//! - Monster catalog (`monsters.ron`), served through [`game_core::MonsterRoster`]
//! - Item catalog (`items.ron`)
//! - Match configuration (`config.toml`)
//!
//! It also owns the lane market stock model. Content is consumed by the
//! engine's oracles and the front end; it never appears in battle state.

pub mod catalog;
pub mod market;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use catalog::ItemCatalog;
pub use market::{LaneMarkets, Market, MarketError};

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, HeroLoader, ItemLoader, LoadResult, MonsterLoader};
