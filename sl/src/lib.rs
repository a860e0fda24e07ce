//! spinlog - asynchronous buffered log writer
//!
//! Producers append text into a shared buffer under a bounded-wait lock; a
//! dedicated background thread periodically swaps the buffer out and drains
//! it to an append-mode file. No I/O ever happens while the buffer lock is
//! held, so a slow disk never blocks a producer for more than the append
//! timeout.
//!
//! # Architecture
//!
//! ```text
//! producer threads --append (bounded lock)--> pending buffer
//!                                                 |
//!                               drain thread (swap + write + flush)
//!                                                 |
//!                                            append-mode file
//! ```
//!
//! # Example
//!
//! ```no_run
//! use spinlog::{LogWriter, WriterConfig};
//!
//! # fn main() -> eyre::Result<()> {
//! let mut writer = LogWriter::new(WriterConfig::default());
//! writer.activate("out.log")?;
//! writer.append("hello\n");
//! writer.shutdown()?; // stops the drain thread, flushes every byte
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
mod line;
mod writer;

pub use config::{Config, WriterConfig};
pub use line::LineBuffer;
pub use writer::LogWriter;

/// Default bound on a producer's wait for the buffer lock (ms)
pub const DEFAULT_APPEND_TIMEOUT_MS: u64 = 10;

/// Default period between background drain cycles (ms)
pub const DEFAULT_DRAIN_PERIOD_MS: u64 = 25;
