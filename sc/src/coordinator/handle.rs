//! CoordinatorHandle - control surface for stopping a running loop

use std::sync::Arc;
use std::sync::atomic::Ordering;

use tracing::debug;

use super::core::Controls;
use crate::sync::Timeout;

/// Handle for signaling and awaiting a coordinator's shutdown.
///
/// Cloneable; any number of handles may observe and stop the same loop.
/// Every operation on an idle coordinator is a harmless, logged no-op -
/// signaling a loop that has already exited is a benign race, not a bug.
#[derive(Clone)]
pub struct CoordinatorHandle {
    controls: Arc<Controls>,
}

impl CoordinatorHandle {
    pub(crate) fn new(controls: Arc<Controls>) -> Self {
        Self { controls }
    }

    /// Ask the work loop to wind down.
    ///
    /// The loop polls the stop signal between work invocations; the work
    /// closure runs one final time with its continuation flag cleared
    /// before the loop exits.
    pub fn signal_stop(&self) {
        if !self.is_running() {
            debug!("signal_stop: coordinator not running, nothing to stop");
            return;
        }
        self.controls.stop.set();
    }

    /// Block until the work loop has fully exited.
    ///
    /// Returns immediately when the loop is not running. Otherwise the stop
    /// signal is re-asserted first - callers that forgot
    /// [`signal_stop`](Self::signal_stop) would otherwise wait forever -
    /// and then the wait blocks without timeout on the stopped signal.
    pub fn wait_for_stop(&self) {
        if !self.is_running() {
            debug!("wait_for_stop: coordinator not running, skipping wait");
            return;
        }
        self.controls.stop.set();
        self.controls.stopped.wait(Timeout::Forever);
    }

    /// Whether the work loop is currently executing.
    pub fn is_running(&self) -> bool {
        self.controls.running.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use crate::coordinator::Coordinator;
    use std::time::Duration;

    #[test]
    fn test_idle_handle_operations_are_noops() {
        let coordinator = Coordinator::new(|_keep_going: &mut bool| true);
        let handle = coordinator.handle();
        assert!(!handle.is_running());
        handle.signal_stop();
        // Must return immediately rather than hang
        handle.wait_for_stop();
    }

    #[test]
    fn test_stop_from_another_thread() {
        let mut coordinator = Coordinator::new(|_keep_going: &mut bool| {
            std::thread::sleep(Duration::from_millis(1));
            true
        });
        let handle = coordinator.handle();

        let loop_thread = std::thread::spawn(move || coordinator.run());

        // Give the loop time to enter
        while !handle.is_running() {
            std::thread::yield_now();
        }

        handle.signal_stop();
        handle.wait_for_stop();
        assert!(!handle.is_running());
        loop_thread.join().unwrap();
    }

    #[test]
    fn test_signal_stop_is_idempotent() {
        let mut coordinator = Coordinator::new(|_keep_going: &mut bool| {
            std::thread::sleep(Duration::from_millis(1));
            true
        });
        let handle = coordinator.handle();
        let loop_thread = std::thread::spawn(move || coordinator.run());

        while !handle.is_running() {
            std::thread::yield_now();
        }

        // Zero extra signals, one, or many: the loop exits exactly once
        handle.signal_stop();
        handle.signal_stop();
        handle.signal_stop();
        handle.wait_for_stop();
        assert!(!handle.is_running());
        loop_thread.join().unwrap();
    }

    #[test]
    fn test_wait_for_stop_alone_stops_the_loop() {
        let mut coordinator = Coordinator::new(|_keep_going: &mut bool| {
            std::thread::sleep(Duration::from_millis(1));
            true
        });
        let handle = coordinator.handle();
        let loop_thread = std::thread::spawn(move || coordinator.run());

        while !handle.is_running() {
            std::thread::yield_now();
        }

        // No signal_stop first: wait_for_stop re-asserts it defensively
        handle.wait_for_stop();
        assert!(!handle.is_running());
        loop_thread.join().unwrap();
    }
}
