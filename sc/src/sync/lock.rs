//! Bounded-wait lock and its scoped guard
//!
//! A mutual-exclusion lock whose acquire can give up after a timeout
//! instead of blocking forever. Timing out is an expected, recoverable
//! outcome reported as `None`, never an error.

use std::ops::{Deref, DerefMut};
use std::time::Duration;

use parking_lot::{Mutex, MutexGuard};
use tracing::trace;

/// A mutual-exclusion lock with bounded-wait acquisition.
#[derive(Debug, Default)]
pub struct BoundedLock<T> {
    inner: Mutex<T>,
}

impl<T> BoundedLock<T> {
    /// Create a new lock guarding `value`.
    pub fn new(value: T) -> Self {
        Self {
            inner: Mutex::new(value),
        }
    }

    /// Acquire the lock, waiting as long as it takes.
    pub fn acquire(&self) -> LockGuard<'_, T> {
        LockGuard {
            inner: self.inner.lock(),
        }
    }

    /// Acquire the lock, giving up after `timeout`.
    ///
    /// Returns `None` if the lock could not be acquired in time; the caller
    /// decides whether to drop the work or retry.
    pub fn try_acquire_for(&self, timeout: Duration) -> Option<LockGuard<'_, T>> {
        match self.inner.try_lock_for(timeout) {
            Some(guard) => Some(LockGuard { inner: guard }),
            None => {
                trace!(?timeout, "lock acquisition timed out");
                None
            }
        }
    }
}

/// Scoped guard for a [`BoundedLock`].
///
/// Holds the lock for its lifetime and releases unconditionally on drop,
/// keeping critical sections safe across early returns and panics.
#[derive(Debug)]
pub struct LockGuard<'a, T> {
    inner: MutexGuard<'a, T>,
}

impl<T> Deref for LockGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.inner
    }
}

impl<T> DerefMut for LockGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.inner
    }
}
