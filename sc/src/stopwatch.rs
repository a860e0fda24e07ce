//! Accumulating stopwatch
//!
//! Start/stop timer that accumulates elapsed time across segments. Used by
//! callers timing their work loops; carries no thread-safety of its own.

use std::time::{Duration, Instant};

/// A stopwatch accumulating elapsed time across start/stop segments.
#[derive(Debug, Clone, Default)]
pub struct Stopwatch {
    running_since: Option<Instant>,
    stored: Duration,
}

impl Stopwatch {
    /// Create a stopped stopwatch with no accumulated time.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a stopwatch that is already running.
    pub fn started() -> Self {
        Self {
            running_since: Some(Instant::now()),
            stored: Duration::ZERO,
        }
    }

    /// Begin a timing segment. No-op when already running.
    pub fn start(&mut self) {
        if self.running_since.is_none() {
            self.running_since = Some(Instant::now());
        }
    }

    /// End the current segment, folding it into the accumulated total.
    pub fn stop(&mut self) {
        if let Some(since) = self.running_since.take() {
            self.stored += since.elapsed();
        }
    }

    /// Clear accumulated time; a running stopwatch restarts from zero.
    pub fn reset(&mut self) {
        self.stored = Duration::ZERO;
        if self.running_since.is_some() {
            self.running_since = Some(Instant::now());
        }
    }

    /// Accumulated time, including the in-flight segment if running.
    pub fn elapsed(&self) -> Duration {
        match self.running_since {
            Some(since) => self.stored + since.elapsed(),
            None => self.stored,
        }
    }

    /// Whether a segment is currently being timed.
    pub fn is_running(&self) -> bool {
        self.running_since.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_stopped_at_zero() {
        let watch = Stopwatch::new();
        assert!(!watch.is_running());
        assert_eq!(watch.elapsed(), Duration::ZERO);
    }

    #[test]
    fn test_accumulates_across_segments() {
        let mut watch = Stopwatch::started();
        std::thread::sleep(Duration::from_millis(10));
        watch.stop();
        let first = watch.elapsed();
        assert!(first >= Duration::from_millis(10));

        // Stopped: elapsed does not advance
        std::thread::sleep(Duration::from_millis(10));
        assert_eq!(watch.elapsed(), first);

        watch.start();
        std::thread::sleep(Duration::from_millis(10));
        watch.stop();
        assert!(watch.elapsed() >= first + Duration::from_millis(10));
    }

    #[test]
    fn test_reset_clears_accumulated_time() {
        let mut watch = Stopwatch::started();
        std::thread::sleep(Duration::from_millis(5));
        watch.stop();
        watch.reset();
        assert_eq!(watch.elapsed(), Duration::ZERO);
    }
}
