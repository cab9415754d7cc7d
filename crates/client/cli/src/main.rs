//! Console client entry point.
mod app;
mod config;
mod input;
mod logging;
mod party;
mod presentation;
mod shop;

use anyhow::Result;
use app::CliApp;
use config::CliConfig;

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = CliConfig::from_env();
    let _guard = logging::setup_logging(&config)?;

    CliApp::new(config).run()
}
