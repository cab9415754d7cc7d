//! Wires content, engine and console front end into one match.

use std::io::{self, BufReader};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use game_content::{ContentFactory, LaneMarkets};
use game_core::{
    BattleEnv, GameEngine, GameError, PcgRng, Presenter, Session, SessionError, new_battle,
};
use tracing::{error, info};

use crate::config::CliConfig;
use crate::input::ConsoleInput;
use crate::party::choose_party;
use crate::presentation::ConsolePresenter;
use crate::shop::ConsoleShop;

pub struct CliApp {
    config: CliConfig,
}

impl CliApp {
    pub fn new(config: CliConfig) -> Self {
        Self { config }
    }

    pub fn run(self) -> Result<()> {
        let factory = ContentFactory::new(self.config.data_dir.clone());
        let mut game_config = factory
            .load_config()
            .with_context(|| format!("loading content from {}", factory.data_dir().display()))?;
        self.config.apply(&mut game_config);
        if self.config.seed.is_none() && !factory.data_dir().join("config.toml").exists() {
            game_config.seed = clock_seed();
        }
        game_config.validate().context("invalid configuration")?;

        let roster = factory.load_heroes()?;
        let monsters = factory.load_monsters()?;
        let items = factory.load_items()?;
        info!(
            heroes = roster.len(),
            monsters = monsters.templates().len(),
            items = items.len(),
            seed = game_config.seed,
            "content loaded"
        );

        let mut presenter = ConsolePresenter::new(io::stdout());
        let mut input = ConsoleInput::new(BufReader::new(io::stdin()), io::stdout());
        let mut shop = ConsoleShop::new(LaneMarkets::new(items, &game_config.balance));

        presenter.message("Welcome to Legends of Valor!");
        let party = match choose_party(&roster, &game_config.balance, &mut presenter, &mut input) {
            Ok(party) => party,
            Err(_) => {
                info!("input closed during party selection");
                return Ok(());
            }
        };

        let mut state = new_battle(&game_config, &PcgRng);
        let env = BattleEnv::with_all(&game_config, &PcgRng, &monsters);
        let engine = GameEngine::new(&mut state, env);
        let session = Session::new(engine, &mut presenter, &mut input, &mut shop);

        match session.run(party) {
            Ok(outcome) => {
                info!(winner = %outcome.winner, "match finished");
                Ok(())
            }
            Err(SessionError::Input(_)) => {
                info!("input closed; leaving the match");
                Ok(())
            }
            Err(err) => {
                error!(code = err.error_code(), severity = err.severity().as_str(), %err, "session aborted");
                Err(err).context("the match stopped on an engine fault")
            }
        }
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}
