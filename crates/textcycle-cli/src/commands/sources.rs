//! Source listing and creation commands.

use std::path::Path;

use anyhow::{Context, Result};
use textcycle_core::{FileSourceHost, SourceHost};

use crate::commands::run::{CycleOverrides, load_config};

/// List the sources in the overlay directory, marking the configured one
pub fn list(config_path: Option<&Path>, overrides: &CycleOverrides) -> Result<()> {
    let config = load_config(config_path, overrides)?;
    let host = FileSourceHost::new(&config.overlay_dir);

    let dir = host.base_dir().display();

    let sources = host
        .list_sources()
        .with_context(|| format!("Failed to list sources in {}", dir))?;

    if sources.is_empty() {
        println!("No sources found in {}", dir);
        println!("Create one with: textcycle create-source <name>");
        return Ok(());
    }

    println!("Sources in {}:", dir);
    for name in &sources {
        let marker = if *name == config.cycle.source_name { "*" } else { " " };
        println!(" {} {}", marker, name);
    }
    Ok(())
}

/// Create an empty source file
pub fn create(config_path: Option<&Path>, overrides: &CycleOverrides, name: &str) -> Result<()> {
    let config = load_config(config_path, overrides)?;
    let host = FileSourceHost::new(&config.overlay_dir);

    let path = host
        .create_source(name)
        .with_context(|| format!("Failed to create source '{}'", name))?;
    println!("Source '{}' ready at {}", name, path.display());
    println!("Point a text source at this file with \"Read from file\" enabled.");
    Ok(())
}
