//! Manual-reset event
//!
//! A signal that stays set until explicitly reset. Any number of waiters
//! observe a set event; waits can be bounded or unbounded.

use parking_lot::{Condvar, Mutex};
use tracing::trace;

use super::Timeout;

/// Outcome of waiting on a [`ManualResetEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    /// The event was set before the wait expired.
    Signaled,
    /// The bounded wait elapsed with the event still clear.
    TimedOut,
}

/// A manual-reset signal.
///
/// Once [`set`](Self::set), every current and future waiter is released
/// until [`reset`](Self::reset) clears the signal again.
#[derive(Debug, Default)]
pub struct ManualResetEvent {
    signaled: Mutex<bool>,
    condvar: Condvar,
}

impl ManualResetEvent {
    /// Create a new event in the cleared state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the signal, releasing all waiters.
    pub fn set(&self) {
        let mut signaled = self.signaled.lock();
        *signaled = true;
        self.condvar.notify_all();
    }

    /// Clear the signal back to the initial state.
    pub fn reset(&self) {
        let mut signaled = self.signaled.lock();
        *signaled = false;
    }

    /// Non-blocking check, equivalent to a zero-length wait.
    pub fn poll(&self) -> bool {
        *self.signaled.lock()
    }

    /// Wait for the event to be set.
    ///
    /// A `Timeout::Bounded` wait returns [`WaitOutcome::TimedOut`] if the
    /// event was still clear when the duration elapsed; `Timeout::Forever`
    /// only ever returns [`WaitOutcome::Signaled`].
    pub fn wait(&self, timeout: Timeout) -> WaitOutcome {
        let mut signaled = self.signaled.lock();
        match timeout {
            Timeout::Forever => {
                while !*signaled {
                    self.condvar.wait(&mut signaled);
                }
                WaitOutcome::Signaled
            }
            Timeout::Bounded(duration) => {
                let deadline = std::time::Instant::now() + duration;
                while !*signaled {
                    if self.condvar.wait_until(&mut signaled, deadline).timed_out() {
                        // Re-check: the set may have landed as the wait expired
                        if *signaled {
                            break;
                        }
                        trace!(?duration, "event wait timed out");
                        return WaitOutcome::TimedOut;
                    }
                }
                WaitOutcome::Signaled
            }
        }
    }
}
