//! Repeating timers.
//!
//! The cycler never sleeps itself; it is driven by a [`Scheduler`]. Production
//! code uses [`ThreadScheduler`], tests use [`ManualScheduler`] and fire ticks by hand.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, warn};

use crate::signal::StopSignal;

/// Callback run on every timer tick
pub type Task = Box<dyn FnMut() + Send + 'static>;

pub trait Scheduler {
    /// Run `task` every `interval`, replacing any task scheduled earlier.
    fn every(&mut self, interval: Duration, task: Task);

    /// Stop the current task, if any.
    fn cancel(&mut self);

    fn is_active(&self) -> bool;
}

struct ActiveTimer {
    stop: Arc<StopSignal>,
    handle: JoinHandle<()>,
}

/// Runs the scheduled task on a dedicated background thread.
///
/// The first tick fires one full interval after `every` is called. Rescheduling
/// stops and joins the old thread before starting the new one, so two ticks never
/// run at the same time. `cancel` and `every` must not be called from inside the task.
#[derive(Default)]
pub struct ThreadScheduler {
    active: Option<ActiveTimer>,
}

impl ThreadScheduler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Scheduler for ThreadScheduler {
    fn every(&mut self, interval: Duration, mut task: Task) {
        self.cancel();

        let stop = Arc::new(StopSignal::new());
        let thread_stop = Arc::clone(&stop);
        let handle = thread::spawn(move || {
            debug!("Timer started ({:?})", interval);
            while !thread_stop.wait(interval) {
                task();
            }
            debug!("Timer stopped");
        });

        self.active = Some(ActiveTimer { stop, handle });
    }

    fn cancel(&mut self) {
        if let Some(active) = self.active.take() {
            active.stop.trigger();
            if active.handle.join().is_err() {
                warn!("Timer thread panicked");
            }
        }
    }

    fn is_active(&self) -> bool {
        self.active.is_some()
    }
}

impl Drop for ThreadScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Scheduler that only ticks when told to.
#[derive(Default)]
pub struct ManualScheduler {
    interval: Option<Duration>,
    task: Option<Task>,
    scheduled: usize,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the scheduled task once. Returns `false` if nothing is scheduled.
    pub fn fire(&mut self) -> bool {
        match self.task.as_mut() {
            Some(task) => {
                task();
                true
            }
            None => false,
        }
    }

    pub fn interval(&self) -> Option<Duration> {
        self.interval
    }

    /// Number of times `every` has been called
    pub fn times_scheduled(&self) -> usize {
        self.scheduled
    }
}

impl Scheduler for ManualScheduler {
    fn every(&mut self, interval: Duration, task: Task) {
        self.interval = Some(interval);
        self.task = Some(task);
        self.scheduled += 1;
    }

    fn cancel(&mut self) {
        self.interval = None;
        self.task = None;
    }

    fn is_active(&self) -> bool {
        self.task.is_some()
    }
}
