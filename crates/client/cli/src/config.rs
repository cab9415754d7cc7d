//! CLI runtime configuration read from the environment.
use std::env;
use std::path::PathBuf;

use game_core::GameConfig;

/// Settings the console client needs before a match starts.
#[derive(Clone, Debug, Default)]
pub struct CliConfig {
    pub data_dir: PathBuf,
    pub seed: Option<u64>,
    pub wave_period: Option<u32>,
    pub board_size: Option<i32>,
    pub log_dir: Option<PathBuf>,
    pub session_id: Option<String>,
}

impl CliConfig {
    pub const DEFAULT_DATA_DIR: &'static str = "data";

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `VALOR_DATA_DIR` - Content directory (default: `data`)
    /// - `VALOR_SEED` - Match seed (default: from `config.toml`, else the clock)
    /// - `VALOR_WAVE_PERIOD` - Rounds between monster waves
    /// - `VALOR_BOARD_SIZE` - Board side length
    /// - `LOG_DIR` - Log directory (default: platform-specific)
    /// - `VALOR_SESSION_ID` - Session identifier for the log folder (default: auto-generated)
    pub fn from_env() -> Self {
        Self {
            data_dir: env::var_os("VALOR_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(Self::DEFAULT_DATA_DIR)),
            seed: read_env::<u64>("VALOR_SEED"),
            wave_period: read_env::<u32>("VALOR_WAVE_PERIOD"),
            board_size: read_env::<i32>("VALOR_BOARD_SIZE"),
            log_dir: env::var_os("LOG_DIR").map(PathBuf::from),
            session_id: env::var("VALOR_SESSION_ID").ok(),
        }
    }

    /// Applies the environment overrides on top of the file configuration.
    pub fn apply(&self, config: &mut GameConfig) {
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(period) = self.wave_period {
            config.wave_period = period;
        }
        if let Some(size) = self.board_size {
            config.board_size = size;
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
