//! Worker - a dedicated OS thread running a coordinator loop
//!
//! Owns the thread it spawns: dropping a `Worker` signals its loop to
//! stop, waits for the loop to exit, and joins the thread. There is no
//! detach path, so a worker can never outlive its owner.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;

use thiserror::Error;
use tracing::{debug, warn};

use crate::coordinator::{Coordinator, CoordinatorHandle};

/// Errors from starting a worker.
#[derive(Debug, Error)]
pub enum WorkerError {
    /// The OS could not create the thread.
    #[error("failed to spawn worker thread: {0}")]
    Spawn(#[from] std::io::Error),
}

/// A named OS thread driving a work closure until stopped.
pub struct Worker {
    handle: CoordinatorHandle,
    /// Covers the window before the loop has entered, where the stop
    /// signal cannot be delivered yet
    shutdown: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl Worker {
    /// Spawn a thread running `work` under a [`Coordinator`] loop.
    ///
    /// The closure is invoked repeatedly with a continuation flag, exactly
    /// as described on [`Coordinator::run`]. Spawn failure is fatal to the
    /// operation that needed the worker and is surfaced to the caller.
    pub fn spawn<W>(name: &str, mut work: W) -> Result<Self, WorkerError>
    where
        W: FnMut(&mut bool) -> bool + Send + 'static,
    {
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_probe = Arc::clone(&shutdown);
        let mut coordinator = Coordinator::new(move |keep_going: &mut bool| {
            if shutdown_probe.load(Ordering::Acquire) {
                return false;
            }
            work(keep_going)
        });
        let handle = coordinator.handle();

        let thread = std::thread::Builder::new()
            .name(name.to_string())
            .spawn(move || coordinator.run())?;
        debug!(name, "worker thread spawned");

        Ok(Self {
            handle,
            shutdown,
            thread: Some(thread),
        })
    }

    /// Ask the work loop to wind down without waiting for it.
    pub fn stop(&self) {
        self.handle.signal_stop();
    }

    /// Block until the work loop has exited.
    pub fn wait_for_stop(&self) {
        self.handle.wait_for_stop();
    }

    /// Whether the work loop is currently executing.
    pub fn is_running(&self) -> bool {
        self.handle.is_running()
    }
}

impl Drop for Worker {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::Release);
        self.handle.signal_stop();
        if let Some(thread) = self.thread.take() {
            if std::thread::panicking() {
                // Joining while unwinding risks a deadlock on a wedged loop
                return;
            }
            if thread.join().is_err() {
                warn!("worker thread panicked");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::sync::atomic::AtomicU32;
    use std::time::Duration;

    #[test]
    #[serial]
    fn test_worker_runs_work_repeatedly() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);
        let worker = Worker::spawn("counter", move |_keep_going: &mut bool| {
            counter.fetch_add(1, Ordering::SeqCst);
            std::thread::sleep(Duration::from_millis(1));
            true
        })
        .unwrap();

        while calls.load(Ordering::SeqCst) < 5 {
            std::thread::yield_now();
        }

        worker.stop();
        worker.wait_for_stop();
        assert!(!worker.is_running());
    }

    #[test]
    fn test_is_running_lifecycle() {
        let worker = Worker::spawn("idler", |_keep_going: &mut bool| {
            std::thread::sleep(Duration::from_millis(1));
            true
        })
        .unwrap();

        // The loop may not have entered yet; spin until it has
        while !worker.is_running() {
            std::thread::yield_now();
        }

        worker.stop();
        worker.wait_for_stop();
        assert!(!worker.is_running());
    }

    #[test]
    #[serial]
    fn test_drop_stops_and_joins() {
        let calls = Arc::new(AtomicU32::new(0));
        {
            let counter = Arc::clone(&calls);
            let _worker = Worker::spawn("dropped", move |_keep_going: &mut bool| {
                counter.fetch_add(1, Ordering::SeqCst);
                std::thread::sleep(Duration::from_millis(1));
                true
            })
            .unwrap();
            while calls.load(Ordering::SeqCst) == 0 {
                std::thread::yield_now();
            }
        }
        // Worker dropped: the loop must have stopped, so the count settles
        let settled = calls.load(Ordering::SeqCst);
        std::thread::sleep(Duration::from_millis(20));
        assert_eq!(calls.load(Ordering::SeqCst), settled);
    }

    #[test]
    fn test_work_can_end_itself() {
        let worker = Worker::spawn("one-shot", |keep_going: &mut bool| {
            *keep_going = false;
            true
        })
        .unwrap();
        worker.wait_for_stop();
        assert!(!worker.is_running());
    }
}
