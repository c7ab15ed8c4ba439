//! Binds rotation state to a text source.
//!
//! [`Cycler`] owns everything a loaded cycle needs: the current settings, the
//! rotation state, and the host it writes to. Timer ticks and manual triggers
//! both go through [`Cycler::tick`].

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::rotation::Rotator;
use crate::scheduler::Scheduler;
use crate::settings::CycleSettings;
use crate::source::SourceHost;

/// Cycler shared between the timer and manual triggers
pub type SharedCycler<H> = Arc<Mutex<Cycler<H>>>;

/// What a single tick did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// Text was written to the source
    Applied(String),
    /// The list is empty, nothing to show
    Empty,
    /// The configured source does not exist, update skipped
    SourceMissing,
    /// The host failed for another reason, update skipped
    Failed,
}

/// Differences between the old and new settings passed to [`Cycler::update`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SettingsChange {
    pub items_changed: bool,
    pub interval_changed: bool,
    pub source_changed: bool,
}

impl SettingsChange {
    pub fn is_empty(&self) -> bool {
        !(self.items_changed || self.interval_changed || self.source_changed)
    }
}

pub struct Cycler<H> {
    host: H,
    settings: CycleSettings,
    rotator: Rotator,
}

impl<H: SourceHost> Cycler<H> {
    /// Build a cycler for `settings`. Settings with a zero interval are rejected.
    pub fn new(host: H, settings: CycleSettings) -> Result<Self> {
        settings.validate()?;
        let rotator = Rotator::new(settings.items());
        Ok(Self {
            host,
            settings,
            rotator,
        })
    }

    /// Apply new settings.
    ///
    /// A changed item list replaces the rotation and starts again from the first
    /// entry. The caller reschedules the timer when the interval changed.
    /// Invalid settings are rejected and the current ones stay in effect.
    pub fn update(&mut self, settings: CycleSettings) -> Result<SettingsChange> {
        settings.validate()?;
        let items = settings.items();
        let change = SettingsChange {
            items_changed: items != self.rotator.items(),
            interval_changed: settings.interval != self.settings.interval,
            source_changed: settings.source_name != self.settings.source_name,
        };

        if change.items_changed {
            info!("Text list changed ({} entries), restarting rotation", items.len());
            self.rotator.set_items(items);
        }
        if change.source_changed {
            info!(
                "Source changed: '{}' -> '{}'",
                self.settings.source_name, settings.source_name
            );
        }

        self.settings = settings;
        Ok(change)
    }

    /// Advance the rotation and write the text to the source.
    ///
    /// A missing source is logged and skipped; the rotation still moves on.
    pub fn tick(&mut self) -> TickOutcome {
        let Some(text) = self.rotator.advance().map(str::to_string) else {
            debug!("Text list is empty, skipping update");
            return TickOutcome::Empty;
        };

        let source = &self.settings.source_name;
        match self.host.set_text(source, &text) {
            Ok(()) => {
                debug!("Set '{}' to {:?}", source, text);
                TickOutcome::Applied(text)
            }
            Err(Error::SourceNotFound(name)) => {
                warn!("Source '{}' not found, skipping update", name);
                TickOutcome::SourceMissing
            }
            Err(e) => {
                warn!("Failed to update source '{}': {}", source, e);
                TickOutcome::Failed
            }
        }
    }

    /// Manual trigger from a button or hotkey.
    pub fn trigger(&mut self) -> TickOutcome {
        debug!("Manual trigger");
        self.tick()
    }

    pub fn settings(&self) -> &CycleSettings {
        &self.settings
    }

    pub fn rotator(&self) -> &Rotator {
        &self.rotator
    }
}

impl<H: SourceHost + Send + 'static> Cycler<H> {
    pub fn into_shared(self) -> SharedCycler<H> {
        Arc::new(Mutex::new(self))
    }
}

/// Lock a shared cycler, recovering from a poisoned lock.
pub fn lock<H>(cycler: &SharedCycler<H>) -> MutexGuard<'_, Cycler<H>> {
    cycler.lock().unwrap_or_else(|poisoned| {
        warn!("Cycler lock was poisoned, continuing");
        poisoned.into_inner()
    })
}

/// Schedule ticks for `cycler` at its configured interval.
///
/// Replaces whatever `scheduler` was running. Call again after an update that
/// changed the interval. Must not be called while holding the cycler lock.
pub fn schedule<H, S>(cycler: &SharedCycler<H>, scheduler: &mut S)
where
    H: SourceHost + Send + 'static,
    S: Scheduler + ?Sized,
{
    let interval = lock(cycler).settings().interval();
    let shared = Arc::clone(cycler);
    scheduler.every(
        interval,
        Box::new(move || {
            lock(&shared).tick();
        }),
    );
    info!("Cycling every {}s", interval.as_secs());
}
