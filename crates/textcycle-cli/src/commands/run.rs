//! Main cycling mode command.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use textcycle_core::{
    Config, Cycler, FileSourceHost, Scheduler, SettingsChange, SharedCycler, SourceHost,
    StopSignal, ThreadScheduler, TickOutcome, lock, schedule,
};
use tracing::{debug, info, warn};

use crate::input::{self, KeyAction};
use crate::reload::ConfigWatcher;

/// How often the run loop checks for config changes and shutdown
const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Command-line overrides for the `[cycle]` settings
#[derive(Debug, Clone, Default, Args)]
pub struct CycleOverrides {
    /// Directory holding the overlay source files
    #[arg(long)]
    pub overlay_dir: Option<PathBuf>,

    /// Source to update
    #[arg(short, long)]
    pub source: Option<String>,

    /// Seconds between updates
    #[arg(short, long)]
    pub interval: Option<u64>,

    /// Read the text list from a file, one entry per line
    #[arg(long)]
    pub items_file: Option<PathBuf>,
}

impl CycleOverrides {
    pub fn apply(&self, config: &mut Config) -> Result<()> {
        if let Some(dir) = &self.overlay_dir {
            config.overlay_dir = dir.clone();
        }
        if let Some(source) = &self.source {
            config.cycle.source_name = source.clone();
        }
        if let Some(interval) = self.interval {
            config.cycle.interval = interval;
        }
        if let Some(path) = &self.items_file {
            config.cycle.text_list = fs::read_to_string(path)
                .with_context(|| format!("Failed to read items file {}", path.display()))?;
        }
        Ok(())
    }
}

/// Load the config and apply command-line overrides
pub fn load_config(config_path: Option<&Path>, overrides: &CycleOverrides) -> Result<Config> {
    let mut config = Config::load(config_path).context("Failed to load configuration")?;
    overrides.apply(&mut config)?;
    Ok(config)
}

/// Run the cycling loop until Ctrl+C, Esc, or q
pub fn run(config_path: Option<&Path>, overrides: &CycleOverrides) -> Result<()> {
    let config = load_config(config_path, overrides)?;
    let host = FileSourceHost::new(&config.overlay_dir);
    let source = config.cycle.source_name.clone();
    let cycler = Cycler::new(host.clone(), config.cycle.clone())?.into_shared();

    // Setup graceful shutdown handler
    let stop = Arc::new(StopSignal::new());
    let stop_ctrlc = Arc::clone(&stop);
    ctrlc::set_handler(move || {
        info!("Received shutdown signal, stopping...");
        stop_ctrlc.trigger();
    })?;

    info!("textcycle {}", env!("CARGO_PKG_VERSION"));

    if !host.has_source(&source)? {
        warn!(
            "Source '{}' not found in {}, updates are skipped until it exists",
            source,
            config.overlay_dir.display()
        );
    }

    if lock(&cycler).rotator().is_empty() {
        warn!("Text list is empty, nothing to show yet");
    }

    // Show the first entry right away instead of after a full interval
    report(lock(&cycler).tick());

    let mut scheduler = ThreadScheduler::new();
    schedule(&cycler, &mut scheduler);

    let hotkeys = config.hotkey.load_bindings();
    let hotkey_hint = hotkeys
        .bindings()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" or ");

    let (tx, rx) = mpsc::channel();
    let _keyboard_handle = input::spawn_keyboard_monitor(hotkeys, tx, Arc::clone(&stop));

    let mut watcher = ConfigWatcher::new(watch_path(config_path));
    if let Some(path) = watcher.path() {
        debug!("Watching {} for changes", path.display());
    }

    if hotkey_hint.is_empty() {
        println!("Cycling '{}'. (Press Esc or q to quit)", source);
    } else {
        println!(
            "Cycling '{}'. (Press {} for next, Esc or q to quit)",
            source, hotkey_hint
        );
    }

    let mut overlay_dir = config.overlay_dir.clone();
    let mut keyboard_alive = true;
    while !stop.is_stopped() {
        if keyboard_alive {
            match rx.recv_timeout(POLL_INTERVAL) {
                Ok(KeyAction::Next) => report(lock(&cycler).trigger()),
                Ok(KeyAction::Quit) => {
                    info!("Quit key pressed, stopping...");
                    stop.trigger();
                    break;
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => {
                    debug!("Keyboard monitor exited");
                    keyboard_alive = false;
                }
            }
        } else if stop.wait(POLL_INTERVAL) {
            break;
        }

        if let Some(reloaded) = watcher.poll() {
            apply_reload(&cycler, &mut scheduler, overrides, reloaded, &mut overlay_dir);
        }
    }

    scheduler.cancel();
    info!("Shutdown complete");
    Ok(())
}

/// Config file to watch for changes.
///
/// Without `--config` the default location is watched even if it does not exist
/// yet, so a config written after startup is still picked up.
fn watch_path(explicit: Option<&Path>) -> Option<PathBuf> {
    explicit.map(Path::to_path_buf).or_else(Config::default_path)
}

/// Apply a reloaded config file to the running cycle.
///
/// Command-line overrides keep precedence over the file. Invalid settings are
/// reported and the current ones stay in effect. A new `overlay_dir` is only
/// reported since the host is fixed at startup. The timer is rescheduled when
/// the interval changed. Returns `None` if the reload was ignored.
fn apply_reload<H, S>(
    cycler: &SharedCycler<H>,
    scheduler: &mut S,
    overrides: &CycleOverrides,
    mut reloaded: Config,
    overlay_dir: &mut PathBuf,
) -> Option<SettingsChange>
where
    H: SourceHost + Send + 'static,
    S: Scheduler + ?Sized,
{
    if let Err(e) = overrides.apply(&mut reloaded) {
        warn!("Ignoring config change: {:#}", e);
        return None;
    }

    let result = lock(cycler).update(reloaded.cycle);
    let change = match result {
        Ok(change) => change,
        Err(e) => {
            warn!("Ignoring config change: {}", e);
            return None;
        }
    };

    if reloaded.overlay_dir != *overlay_dir {
        warn!(
            "overlay_dir changed to {}, restart to apply",
            reloaded.overlay_dir.display()
        );
        *overlay_dir = reloaded.overlay_dir;
    }

    if change.interval_changed {
        schedule(cycler, scheduler);
    }
    Some(change)
}

fn report(outcome: TickOutcome) {
    if let TickOutcome::Applied(text) = outcome {
        info!("Showing: {}", text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::TempDir;
    use textcycle_core::{CycleSettings, ManualScheduler};

    struct Running {
        dir: TempDir,
        cycler: SharedCycler<FileSourceHost>,
        scheduler: ManualScheduler,
        overlay_dir: PathBuf,
    }

    /// A cycle over a, b, c every 5s, scheduled and ticked once
    fn running() -> Running {
        let dir = TempDir::new().unwrap();
        let host = FileSourceHost::new(dir.path());
        host.create_source("ticker").unwrap();

        let settings = CycleSettings::new("ticker", &["a", "b", "c"], 5);
        let cycler = Cycler::new(host, settings).unwrap().into_shared();
        let mut scheduler = ManualScheduler::new();
        schedule(&cycler, &mut scheduler);
        scheduler.fire();

        let overlay_dir = dir.path().to_path_buf();
        Running {
            dir,
            cycler,
            scheduler,
            overlay_dir,
        }
    }

    fn reloaded(run: &Running, items: &[&str], interval: u64) -> Config {
        let mut config = Config::default();
        config.overlay_dir = run.overlay_dir.clone();
        config.cycle = CycleSettings::new("ticker", items, interval);
        config
    }

    fn reload(
        run: &mut Running,
        overrides: &CycleOverrides,
        config: Config,
    ) -> Option<SettingsChange> {
        apply_reload(
            &run.cycler,
            &mut run.scheduler,
            overrides,
            config,
            &mut run.overlay_dir,
        )
    }

    fn source_text(run: &Running) -> String {
        fs::read_to_string(run.dir.path().join("ticker.txt")).unwrap()
    }

    #[test]
    fn test_reload_zero_interval_ignored() {
        let mut run = running();
        let config = reloaded(&run, &["x"], 0);

        assert!(reload(&mut run, &CycleOverrides::default(), config).is_none());
        assert_eq!(run.scheduler.times_scheduled(), 1);
        assert_eq!(run.scheduler.interval(), Some(Duration::from_secs(5)));

        run.scheduler.fire();
        assert_eq!(source_text(&run), "b");
    }

    #[test]
    fn test_reload_keeps_command_line_overrides() {
        let mut run = running();
        let overrides = CycleOverrides {
            interval: Some(5),
            ..Default::default()
        };
        let config = reloaded(&run, &["a", "b", "c"], 30);

        let change = reload(&mut run, &overrides, config).unwrap();
        assert!(change.is_empty());
        assert_eq!(lock(&run.cycler).settings().interval, 5);
        assert_eq!(run.scheduler.times_scheduled(), 1);
    }

    #[test]
    fn test_reload_override_rescues_zero_interval() {
        let mut run = running();
        let overrides = CycleOverrides {
            interval: Some(7),
            ..Default::default()
        };
        let config = reloaded(&run, &["a", "b", "c"], 0);

        let change = reload(&mut run, &overrides, config).unwrap();
        assert!(change.interval_changed);
        assert_eq!(run.scheduler.interval(), Some(Duration::from_secs(7)));
    }

    #[test]
    fn test_reload_interval_change_reschedules() {
        let mut run = running();
        let config = reloaded(&run, &["a", "b", "c"], 2);

        let change = reload(&mut run, &CycleOverrides::default(), config).unwrap();
        assert!(change.interval_changed);
        assert!(!change.items_changed);
        assert_eq!(run.scheduler.times_scheduled(), 2);
        assert_eq!(run.scheduler.interval(), Some(Duration::from_secs(2)));
    }

    #[test]
    fn test_reload_same_list_keeps_position() {
        let mut run = running();
        let config = reloaded(&run, &["a", "b", "c"], 5);

        let change = reload(&mut run, &CycleOverrides::default(), config).unwrap();
        assert!(change.is_empty());
        assert_eq!(run.scheduler.times_scheduled(), 1);

        run.scheduler.fire();
        assert_eq!(source_text(&run), "b");
    }

    #[test]
    fn test_reload_new_list_restarts_rotation() {
        let mut run = running();
        let config = reloaded(&run, &["x", "y"], 5);

        let change = reload(&mut run, &CycleOverrides::default(), config).unwrap();
        assert!(change.items_changed);

        run.scheduler.fire();
        assert_eq!(source_text(&run), "x");
    }

    #[test]
    fn test_reload_overlay_dir_change_is_not_applied() {
        let mut run = running();
        let other = TempDir::new().unwrap();
        let mut config = reloaded(&run, &["a", "b", "c"], 5);
        config.overlay_dir = other.path().to_path_buf();

        assert!(reload(&mut run, &CycleOverrides::default(), config).is_some());
        assert_eq!(run.overlay_dir, other.path());

        // Writes still go to the directory the host started with
        run.scheduler.fire();
        assert_eq!(source_text(&run), "b");
        assert!(!other.path().join("ticker.txt").exists());
    }

    #[test]
    fn test_watch_path_prefers_explicit() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.toml");
        assert_eq!(watch_path(Some(path.as_path())), Some(path.clone()));
    }

    #[test]
    fn test_watch_path_defaults_even_if_missing() {
        assert_eq!(watch_path(None), Config::default_path());
    }

    #[test]
    fn test_overrides_replace_settings() {
        let dir = TempDir::new().unwrap();
        let items = dir.path().join("items.txt");
        fs::write(&items, "one\ntwo\n").unwrap();

        let overrides = CycleOverrides {
            overlay_dir: Some(dir.path().to_path_buf()),
            source: Some("ticker".to_string()),
            interval: Some(7),
            items_file: Some(items),
        };

        let mut config = Config::default();
        overrides.apply(&mut config).unwrap();

        assert_eq!(config.overlay_dir, dir.path());
        assert_eq!(config.cycle.source_name, "ticker");
        assert_eq!(config.cycle.interval, 7);
        assert_eq!(config.cycle.items(), vec!["one", "two"]);
    }

    #[test]
    fn test_empty_overrides_keep_config() {
        let mut config = Config::default();
        config.cycle.source_name = "banner".to_string();
        let before = config.clone();

        CycleOverrides::default().apply(&mut config).unwrap();
        assert_eq!(config, before);
    }

    #[test]
    fn test_missing_items_file_is_error() {
        let dir = TempDir::new().unwrap();
        let overrides = CycleOverrides {
            items_file: Some(dir.path().join("missing.txt")),
            ..Default::default()
        };
        assert!(overrides.apply(&mut Config::default()).is_err());
    }

    #[test]
    fn test_load_config_with_overrides() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[cycle]\nsource_name = \"ticker\"\ninterval = 3\n").unwrap();

        let overrides = CycleOverrides {
            interval: Some(11),
            ..Default::default()
        };
        let config = load_config(Some(path.as_path()), &overrides).unwrap();
        assert_eq!(config.cycle.source_name, "ticker");
        assert_eq!(config.cycle.interval, 11);
    }
}
