//! Hotkey bindings for the manual "next text" trigger.
//!
//! Bindings are persisted as a JSON array of key combinations, so a
//! hotkey can carry zero, one, or several bindings:
//!
//! ```json
//! [{ "key": "n", "shift": false, "control": true, "alt": false, "command": false }]
//! ```

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display)]
pub enum Modifier {
    #[strum(to_string = "ctrl", serialize = "control")]
    Control,
    #[strum(to_string = "alt", serialize = "option")]
    Alt,
    #[strum(to_string = "shift")]
    Shift,
    #[strum(to_string = "cmd", serialize = "command", serialize = "super")]
    Command,
}

/// A single key combination.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct HotkeyBinding {
    /// Lowercase key name (`n`, `f5`, `space`, ...)
    pub key: String,
    pub shift: bool,
    pub control: bool,
    pub alt: bool,
    pub command: bool,
}

impl HotkeyBinding {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into().to_ascii_lowercase(),
            ..Default::default()
        }
    }

    pub fn with(mut self, modifier: Modifier) -> Self {
        match modifier {
            Modifier::Control => self.control = true,
            Modifier::Alt => self.alt = true,
            Modifier::Shift => self.shift = true,
            Modifier::Command => self.command = true,
        }
        self
    }

    /// Parse a combination such as `ctrl+shift+n`.
    pub fn parse(input: &str) -> Result<Self> {
        let invalid = |message: &str| Error::InvalidHotkey {
            input: input.to_string(),
            message: message.to_string(),
        };

        let mut key: Option<String> = None;
        let mut binding = HotkeyBinding::default();

        for part in input.split('+') {
            let part = part.trim().to_ascii_lowercase();
            if part.is_empty() {
                return Err(invalid("empty key name"));
            }

            if let Ok(modifier) = Modifier::from_str(&part) {
                binding = binding.with(modifier);
                continue;
            }

            if key.is_some() {
                return Err(invalid("more than one key"));
            }
            key = Some(part);
        }

        binding.key = key.ok_or_else(|| invalid("no key given"))?;
        Ok(binding)
    }

    pub fn modifiers(&self) -> Vec<Modifier> {
        [
            (self.control, Modifier::Control),
            (self.alt, Modifier::Alt),
            (self.shift, Modifier::Shift),
            (self.command, Modifier::Command),
        ]
        .into_iter()
        .filter_map(|(set, m)| set.then_some(m))
        .collect()
    }
}

impl fmt::Display for HotkeyBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for modifier in self.modifiers() {
            write!(f, "{}+", modifier)?;
        }
        f.write_str(&self.key)
    }
}

impl FromStr for HotkeyBinding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Persisted bindings for the trigger hotkey
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HotkeyStore {
    bindings: Vec<HotkeyBinding>,
}

impl HotkeyStore {
    pub fn new(bindings: Vec<HotkeyBinding>) -> Self {
        let mut store = Self::default();
        for binding in bindings {
            store.add(binding);
        }
        store
    }

    /// Load bindings from a file.
    ///
    /// A missing or unreadable file yields an empty store.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();

        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                debug!("Hotkey file not found or unreadable: {}", e);
                return Self::default();
            }
        };

        match serde_json::from_str::<HotkeyStore>(&content) {
            Ok(store) => {
                debug!("Loaded {} hotkey binding(s)", store.bindings.len());
                store
            }
            Err(e) => {
                warn!("Failed to parse hotkey file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        info!("Saved hotkey bindings to {}", path.display());
        Ok(())
    }

    /// Add a binding unless an identical one already exists
    pub fn add(&mut self, binding: HotkeyBinding) -> bool {
        if self.bindings.contains(&binding) {
            return false;
        }
        self.bindings.push(binding);
        true
    }

    pub fn clear(&mut self) {
        self.bindings.clear();
    }

    /// Check whether a key press fires the hotkey
    pub fn matches(&self, pressed: &HotkeyBinding) -> bool {
        self.bindings.iter().any(|b| b == pressed)
    }

    pub fn bindings(&self) -> &[HotkeyBinding] {
        &self.bindings
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
