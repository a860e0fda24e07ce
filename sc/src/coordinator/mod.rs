//! Cooperative thread coordinator
//!
//! A start/stop state machine that drives a repeatable work closure until
//! either the closure or an external caller asks it to stop. The
//! [`Coordinator`] owns the closure and runs the loop; the cloneable
//! [`CoordinatorHandle`] is the control surface other threads use to signal
//! and await shutdown.

mod core;
mod handle;

pub use core::Coordinator;
pub use handle::CoordinatorHandle;
