//! Application configuration.
//!
//! Loaded from TOML. Lookup order: an explicit path, then
//! `<config dir>/textcycle/config.toml`, then built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::Result;
use crate::hotkey::{HotkeyBinding, HotkeyStore};
use crate::settings::CycleSettings;

/// Directory name used under the platform config/data dirs
pub const APP_DIR: &str = "textcycle";
/// Config file name inside the config dir
pub const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the overlay source files
    pub overlay_dir: PathBuf,
    pub cycle: CycleSettings,
    pub hotkey: HotkeyConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            overlay_dir: data_dir().join("overlays"),
            cycle: CycleSettings::default(),
            hotkey: HotkeyConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HotkeyConfig {
    /// Where `textcycle bind` persists bindings
    pub state_file: PathBuf,
    /// Binding used when nothing has been bound yet
    pub default_binding: Option<String>,
}

impl Default for HotkeyConfig {
    fn default() -> Self {
        Self {
            state_file: data_dir().join("hotkeys.json"),
            default_binding: Some("n".to_string()),
        }
    }
}

impl HotkeyConfig {
    /// Persisted bindings, falling back to `default_binding` when none are saved
    pub fn load_bindings(&self) -> HotkeyStore {
        let store = HotkeyStore::load_from_path(&self.state_file);
        if !store.is_empty() {
            return store;
        }

        match self.default_binding.as_deref().map(HotkeyBinding::parse) {
            Some(Ok(binding)) => HotkeyStore::new(vec![binding]),
            Some(Err(e)) => {
                warn!("Ignoring default hotkey: {}", e);
                store
            }
            None => store,
        }
    }
}

impl Config {
    /// Default config file location, if the platform has a config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join(CONFIG_FILE))
    }

    /// The file [`Config::load`] would read, if any
    pub fn resolve_path(explicit: Option<&Path>) -> Option<PathBuf> {
        match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => Self::default_path().filter(|p| p.exists()),
        }
    }

    /// Load configuration with fallback chain.
    ///
    /// An explicit path must load. A broken file at the default location is
    /// reported and replaced by defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from_path(path);
        }

        if let Some(path) = Self::resolve_path(None) {
            match Self::load_from_path(&path) {
                Ok(config) => return Ok(config),
                Err(e) => warn!("Failed to load config from {}: {}", path.display(), e),
            }
        }

        info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)?;
        let config = Self::from_toml(&content)?;
        info!("Loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_toml()?)?;
        info!("Saved config to {}", path.display());
        Ok(())
    }
}

fn data_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from("."))
}
