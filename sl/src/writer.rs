//! Core LogWriter implementation

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};

use eyre::{Context, Result};
use parking_lot::Mutex;
use spincoord::{BoundedLock, Worker};
use tracing::{debug, info, trace, warn};

use crate::config::WriterConfig;

// Writer lifecycle states, stored in an atomic so producers can check
// without touching the buffer lock
const STATE_IDLE: u8 = 0;
const STATE_ACTIVE: u8 = 1;
const STATE_CLOSED: u8 = 2;

/// State shared with the background drain thread.
struct Shared {
    /// Text appended by producers and not yet drained. The only mutation
    /// path is under this lock.
    pending: BoundedLock<String>,

    /// The destination sink. Touched only by the drain thread, or by the
    /// owning thread once the drain thread has been joined.
    sink: Mutex<Option<File>>,

    /// Lifecycle state (STATE_*)
    state: AtomicU8,

    /// Appends rejected because the buffer lock could not be acquired in
    /// time
    dropped: AtomicU64,
}

/// Asynchronous buffered log writer.
///
/// Producers call [`append`](Self::append) from any number of threads; a
/// dedicated background thread drains the buffer to the destination file
/// on a fixed period. Shutdown stops the drain thread, force-writes any
/// residual text, and closes the file - no successfully-appended byte is
/// ever discarded.
///
/// Lifecycle: `Idle` until [`activate`](Self::activate), then `Active`
/// until [`shutdown`](Self::shutdown) (or drop), which is terminal.
pub struct LogWriter {
    config: WriterConfig,
    shared: Arc<Shared>,
    drain_worker: Option<Worker>,
}

impl LogWriter {
    /// Create an inert writer: no thread, no open file.
    pub fn new(config: WriterConfig) -> Self {
        Self {
            config,
            shared: Arc::new(Shared {
                pending: BoundedLock::new(String::new()),
                sink: Mutex::new(None),
                state: AtomicU8::new(STATE_IDLE),
                dropped: AtomicU64::new(0),
            }),
            drain_worker: None,
        }
    }

    /// Open (or re-open) the destination file for append and make the
    /// writer active.
    ///
    /// A previously-opened destination is closed and replaced. The
    /// background drain thread starts on the first activation only; later
    /// calls just re-target the sink. Activating a writer that has already
    /// been shut down is a logged no-op.
    pub fn activate(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if self.shared.state.load(Ordering::Acquire) == STATE_CLOSED {
            warn!(?path, "activate called on a closed writer, ignoring");
            return Ok(());
        }

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;

        // Replacing the sink drops (closes) any prior file
        *self.shared.sink.lock() = Some(file);
        debug!(?path, "log sink opened");

        if self.drain_worker.is_none() {
            let shared = Arc::clone(&self.shared);
            let period = self.config.drain_period();
            let worker = Worker::spawn("spinlog-drain", move |keep_going: &mut bool| {
                drain(&shared);
                if *keep_going {
                    std::thread::sleep(period);
                }
                true
            })
            .context("Failed to start log drain thread")?;
            self.drain_worker = Some(worker);
            info!("log drain thread started");
        }

        self.shared.state.store(STATE_ACTIVE, Ordering::Release);
        Ok(())
    }

    /// Append text to the pending buffer.
    ///
    /// Waits at most the configured append timeout for the buffer lock.
    /// Returns `false` - and the text is dropped, not queued - when the
    /// lock could not be acquired in time or the writer is not active. A
    /// contended logger never blocks a producer beyond the bound.
    pub fn append(&self, text: &str) -> bool {
        if self.shared.state.load(Ordering::Acquire) != STATE_ACTIVE {
            trace!("append ignored: writer not active");
            return false;
        }

        match self.shared.pending.try_acquire_for(self.config.append_timeout()) {
            Some(mut pending) => {
                pending.push_str(text);
                true
            }
            None => {
                self.shared.dropped.fetch_add(1, Ordering::Relaxed);
                debug!("append dropped: buffer lock acquisition timed out");
                false
            }
        }
    }

    /// Append an error message framed by banner rows.
    pub fn append_error(&self, msg: &str) -> bool {
        const BANNER: &str = "=================================================";
        self.append(&format!("!{BANNER}\n{msg}\n{BANNER}!\n"))
    }

    /// Number of appends rejected because the buffer lock timed out.
    pub fn dropped_appends(&self) -> u64 {
        self.shared.dropped.load(Ordering::Relaxed)
    }

    /// Whether the writer currently accepts appends.
    pub fn is_active(&self) -> bool {
        self.shared.state.load(Ordering::Acquire) == STATE_ACTIVE
    }

    /// Synchronously drain whatever is pending straight to the sink.
    ///
    /// Requires `&mut self`: this path takes no care against concurrent
    /// appends through other references, so exclusive access is enforced
    /// statically. Normally called by [`shutdown`](Self::shutdown) after
    /// the drain thread has been joined.
    pub fn force_write(&mut self) -> Result<()> {
        let chunk = {
            let mut pending = self.shared.pending.acquire();
            std::mem::take(&mut *pending)
        };
        let mut sink = self.shared.sink.lock();
        if let Some(file) = sink.as_mut() {
            if !chunk.is_empty() {
                file.write_all(chunk.as_bytes()).context("Failed to write log buffer")?;
            }
            file.flush().context("Failed to flush log file")?;
        }
        Ok(())
    }

    /// Stop the drain thread, flush every buffered byte, and close the
    /// destination.
    ///
    /// Idempotent: a writer that was never activated, or was already shut
    /// down, tears down as a no-op.
    pub fn shutdown(&mut self) -> Result<()> {
        if self.shared.state.load(Ordering::Acquire) != STATE_ACTIVE {
            debug!("shutdown: writer not active, nothing to do");
            return Ok(());
        }

        // Refuse further appends before the final drain begins
        self.shared.state.store(STATE_CLOSED, Ordering::Release);

        // Dropping the worker signals stop, runs one final drain cycle in
        // the loop, and joins the thread
        if let Some(worker) = self.drain_worker.take() {
            worker.stop();
            worker.wait_for_stop();
            // drop joins the thread
        }

        // Anything appended after the final drain cycle is still pending
        self.force_write()?;
        *self.shared.sink.lock() = None;
        info!("log writer closed");
        Ok(())
    }
}

impl Drop for LogWriter {
    fn drop(&mut self) {
        if let Err(err) = self.shutdown() {
            warn!(%err, "log writer shutdown failed during drop");
        }
    }
}

/// One background drain cycle: swap the pending buffer out under the lock,
/// then write and flush with no lock held.
fn drain(shared: &Shared) {
    let chunk = {
        let mut pending = shared.pending.acquire();
        if pending.is_empty() {
            return;
        }
        std::mem::take(&mut *pending)
    };

    let mut sink = shared.sink.lock();
    if let Some(file) = sink.as_mut() {
        // The background thread has nowhere to propagate I/O errors; they
        // are logged and the cycle's text is lost
        if let Err(err) = file.write_all(chunk.as_bytes()).and_then(|()| file.flush()) {
            warn!(%err, "log drain write failed");
        }
    }
}
