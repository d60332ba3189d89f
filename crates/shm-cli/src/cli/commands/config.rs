//! Config command handlers.

use anyhow::{Context, Result};
use shm_core::config::{self, Config};

pub fn path() {
    println!("{}", config::paths::config_path().display());
}

pub fn init() -> Result<()> {
    let config_path = config::paths::config_path();
    Config::init(&config_path)
        .with_context(|| format!("init config at {}", config_path.display()))?;
    println!("Created config at {}", config_path.display());
    Ok(())
}

/// Prints the configuration as loaded, defaults filled in.
pub fn show() -> Result<()> {
    let config_path = config::paths::config_path();
    let config = Config::load_from(&config_path)?;
    let rendered = toml::to_string_pretty(&config).context("render config")?;
    println!("# {}", config_path.display());
    print!("{rendered}");
    Ok(())
}
