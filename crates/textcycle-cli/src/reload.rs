//! Config file change detection for the run loop.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use textcycle_core::Config;
use tracing::{info, warn};

/// Polls a config file's modification time and reloads it when it changes.
pub struct ConfigWatcher {
    path: Option<PathBuf>,
    last_modified: Option<SystemTime>,
}

impl ConfigWatcher {
    /// Watch `path`. With `None` there is nothing to watch and `poll` never fires.
    pub fn new(path: Option<PathBuf>) -> Self {
        let last_modified = path.as_deref().and_then(modified_time);
        Self {
            path,
            last_modified,
        }
    }

    /// Return the reloaded config if the file changed since the last call.
    ///
    /// A file that fails to parse is reported and skipped; it is retried on its
    /// next modification.
    pub fn poll(&mut self) -> Option<Config> {
        let path = self.path.as_deref()?;
        let modified = modified_time(path)?;
        if self.last_modified == Some(modified) {
            return None;
        }
        self.last_modified = Some(modified);

        match Config::load_from_path(path) {
            Ok(config) => {
                info!("Config file changed, reloading");
                Some(config)
            }
            Err(e) => {
                warn!("Ignoring config change in {}: {}", path.display(), e);
                None
            }
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

fn modified_time(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|m| m.modified()).ok()
}
