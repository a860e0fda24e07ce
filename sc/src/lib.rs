//! spincoord - cooperatively-stoppable worker threads
//!
//! Provides the building blocks for running repeatable client work on a
//! dedicated OS thread and shutting it down deterministically:
//!
//! - [`sync`] - manual-reset events, bounded-wait locks, RAII guards
//! - [`coordinator`] - the start/stop state machine driving a work closure
//! - [`worker`] - a named OS thread owning a coordinator, joined on drop
//! - [`stopwatch`] - accumulating start/stop timer
//!
//! # Example
//!
//! ```
//! use spincoord::Worker;
//!
//! let worker = Worker::spawn("ticker", |_keep_going: &mut bool| {
//!     // one unit of repeatable work
//!     std::thread::sleep(std::time::Duration::from_millis(5));
//!     true
//! })
//! .expect("spawn worker");
//!
//! worker.stop();
//! worker.wait_for_stop();
//! // drop joins the thread
//! ```

pub mod coordinator;
pub mod stopwatch;
pub mod sync;
pub mod worker;

pub use coordinator::{Coordinator, CoordinatorHandle};
pub use stopwatch::Stopwatch;
pub use sync::{BoundedLock, LockGuard, ManualResetEvent, Timeout, WaitOutcome};
pub use worker::{Worker, WorkerError};
