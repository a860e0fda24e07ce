//! The coordinator work loop

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tracing::{debug, warn};

use super::handle::CoordinatorHandle;
use crate::sync::{ManualResetEvent, Timeout, WaitOutcome};

/// Shared control block between a [`Coordinator`] and its handles.
#[derive(Debug, Default)]
pub(crate) struct Controls {
    /// True exactly between loop entry and loop exit
    pub(crate) running: AtomicBool,
    /// Set to ask the loop to wind down
    pub(crate) stop: ManualResetEvent,
    /// Set by the loop once it has fully exited
    pub(crate) stopped: ManualResetEvent,
}

/// Drives a repeatable work closure until stopped.
///
/// The closure is invoked with a mutable continuation flag, initially
/// `true`. The loop keeps going only while the closure returns `true`
/// **and** the flag stays `true`. When a stop is signaled the flag is
/// cleared and the closure runs one final time with the flag `false`, so
/// client code gets a chance to observe the shutdown before its last
/// return.
///
/// This coordinator is re-entrant: after a clean stop it can be
/// [`run`](Self::run) again, resetting its signals rather than recreating
/// them.
pub struct Coordinator<W> {
    work: W,
    controls: Arc<Controls>,
}

impl<W> Coordinator<W>
where
    W: FnMut(&mut bool) -> bool,
{
    /// Create a coordinator around a work closure. No thread is started;
    /// the loop runs wherever [`run`](Self::run) is called.
    pub fn new(work: W) -> Self {
        Self {
            work,
            controls: Arc::new(Controls::default()),
        }
    }

    /// Get a cloneable control handle for signaling and awaiting shutdown.
    pub fn handle(&self) -> CoordinatorHandle {
        CoordinatorHandle::new(Arc::clone(&self.controls))
    }

    /// Whether the work loop is currently executing.
    pub fn is_running(&self) -> bool {
        self.controls.running.load(Ordering::Acquire)
    }

    /// Run the work loop on the calling thread until stopped.
    ///
    /// Calling `run` while the loop is already executing elsewhere is a
    /// logged no-op, not an error: the callers of a coordinator span
    /// cooperating components, and a benign double-start does not warrant
    /// tearing anything down.
    pub fn run(&mut self) {
        if self.controls.running.swap(true, Ordering::AcqRel) {
            warn!("coordinator already running, ignoring run()");
            return;
        }

        // Re-entry resets the signals to their initial state
        self.controls.stop.reset();
        self.controls.stopped.reset();

        debug!("coordinator loop starting");
        let mut keep_going = true;
        // Note order of evaluation: the work fn runs once more with the
        // flag cleared before the loop exits
        while (self.work)(&mut keep_going) && keep_going {
            if self.controls.stop.wait(Timeout::Bounded(Duration::ZERO)) == WaitOutcome::Signaled {
                debug!("stop signal observed");
                keep_going = false;
            }
        }

        // A stopped-waiter must never observe running == true, so the flag
        // clears before the stopped signal fires
        self.controls.running.store(false, Ordering::Release);
        self.controls.stopped.set();
        debug!("coordinator loop exited");
    }
}
