//! Main application entry point (native).
//!
//! Usage: `inkpad [config.json]`

use inkpad_app::{App, AppConfig, AppResult};
use inkpad_core::PadConfig;
use std::path::Path;

fn load_config() -> AppResult<AppConfig> {
    let mut config = AppConfig::default();
    if let Some(path) = std::env::args().nth(1) {
        config.pad = PadConfig::load(Path::new(&path))?;
        log::info!("Loaded config from {}", path);
    }
    Ok(config)
}

fn main() {
    env_logger::init();
    log::info!("Starting Inkpad");

    if let Err(e) = load_config().and_then(App::run) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
