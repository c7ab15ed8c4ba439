//! Hotkey binding command.

use anyhow::{Context, Result};
use textcycle_core::{Config, HotkeyBinding, HotkeyStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindMode {
    /// Replace existing bindings
    Replace,
    /// Keep existing bindings and add one
    Add,
}

/// Show, replace, extend, or clear the persisted hotkey bindings
pub fn run(config: &Config, combo: Option<&str>, mode: BindMode, clear: bool) -> Result<()> {
    let path = &config.hotkey.state_file;
    let mut store = HotkeyStore::load_from_path(path);

    if clear {
        store.clear();
        store
            .save_to_path(path)
            .context("Failed to save hotkey bindings")?;
        println!("Hotkey bindings cleared");
        return Ok(());
    }

    let Some(combo) = combo else {
        print_bindings(config, &store);
        return Ok(());
    };

    let binding = HotkeyBinding::parse(combo)?;
    if mode == BindMode::Replace {
        store.clear();
    }
    if !store.add(binding.clone()) {
        println!("{} is already bound", binding);
        return Ok(());
    }

    store
        .save_to_path(path)
        .context("Failed to save hotkey bindings")?;
    println!("Bound next-text hotkey to {}", binding);
    Ok(())
}

fn print_bindings(config: &Config, store: &HotkeyStore) {
    if store.is_empty() {
        match config.hotkey.default_binding.as_deref() {
            Some(default) => println!("No hotkey bound, using default: {}", default),
            None => println!("No hotkey bound"),
        }
        return;
    }

    println!("Next-text hotkey:");
    for binding in store.bindings() {
        println!("  {}", binding);
    }
}
