//! CLI command handlers.

pub mod config;
pub mod fields;
pub mod generate;
pub mod highlight;
pub mod session;

use anyhow::{Context, Result};
use shm_core::config::{Config, Layout};

/// Loads the user's config (or defaults with `no_config`) and applies a
/// layout override.
fn load_config(no_config: bool, layout: Option<Layout>) -> Result<Config> {
    let mut config = if no_config {
        Config::default()
    } else {
        Config::load().context("load config")?
    };
    if let Some(layout) = layout {
        config.editor.layout = layout;
    }
    Ok(config)
}
