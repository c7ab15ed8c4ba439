use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Condvar, Mutex};
use std::time::Duration;

/// A one-shot stop flag that supports interruptible waits.
///
/// Timer threads and the CLI run loop sleep on this instead of `thread::sleep()`
/// so that cancellation or shutdown wakes them immediately.
#[derive(Debug, Default)]
pub struct StopSignal {
    stopped: AtomicBool,
    condvar: Condvar,
    mutex: Mutex<()>,
}

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the flag and wake every waiter.
    pub fn trigger(&self) {
        // Take the lock so a waiter between its flag check and its wait still sees the notify
        let _guard = self.mutex.lock();
        self.stopped.store(true, Ordering::SeqCst);
        self.condvar.notify_all();
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }

    /// Wait for `duration` or until the signal is triggered.
    ///
    /// Returns `true` if the signal was triggered, `false` if the full duration elapsed.
    pub fn wait(&self, duration: Duration) -> bool {
        if self.is_stopped() {
            return true;
        }

        let Ok(guard) = self.mutex.lock() else {
            // Poisoned mutex, treat as stopped
            return true;
        };

        match self
            .condvar
            .wait_timeout_while(guard, duration, |_| !self.is_stopped())
        {
            Ok((_, timeout)) => !timeout.timed_out(),
            Err(_) => true,
        }
    }
}
