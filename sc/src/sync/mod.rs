//! Synchronization primitives
//!
//! Blocking, OS-level primitives built on `parking_lot`: a manual-reset
//! event and a mutual-exclusion lock whose acquire can be bounded by a
//! timeout instead of waiting forever.

use std::time::Duration;

mod event;
mod lock;

pub use event::{ManualResetEvent, WaitOutcome};
pub use lock::{BoundedLock, LockGuard};

/// How long a blocking wait is allowed to take.
///
/// "Wait forever" is a distinct variant rather than a sentinel duration, so
/// no finite timeout can be mistaken for an unbounded one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timeout {
    /// Block until the condition holds, however long that takes.
    Forever,
    /// Give up after the given duration. `Duration::ZERO` is a pure poll.
    Bounded(Duration),
}

impl From<Duration> for Timeout {
    fn from(d: Duration) -> Self {
        Timeout::Bounded(d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forever_is_not_a_duration() {
        assert_ne!(Timeout::Forever, Timeout::Bounded(Duration::MAX));
        assert_ne!(Timeout::Forever, Timeout::Bounded(Duration::ZERO));
    }

    #[test]
    fn test_from_duration() {
        let t: Timeout = Duration::from_millis(10).into();
        assert_eq!(t, Timeout::Bounded(Duration::from_millis(10)));
    }
}
