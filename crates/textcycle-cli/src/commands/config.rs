//! Config file commands.

use std::path::Path;

use anyhow::{Context, Result, bail};
use textcycle_core::Config;

use crate::commands::run::{CycleOverrides, load_config};

/// Write a default config file
pub fn init(config_path: Option<&Path>, force: bool) -> Result<()> {
    let path = match config_path {
        Some(path) => path.to_path_buf(),
        None => Config::default_path().context("Failed to determine config directory")?,
    };

    if path.exists() && !force {
        bail!(
            "Config file already exists at {} (use --force to overwrite)",
            path.display()
        );
    }

    Config::default()
        .save_to_path(&path)
        .context("Failed to write config file")?;
    println!("Config written to {}", path.display());
    Ok(())
}

/// Print the effective configuration as TOML
pub fn show(config_path: Option<&Path>, overrides: &CycleOverrides) -> Result<()> {
    let config = load_config(config_path, overrides)?;
    print!("{}", config.to_toml()?);
    Ok(())
}
