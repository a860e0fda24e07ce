//! Line assembly buffer
//!
//! Separate appends from concurrent producers may interleave in the drained
//! output. A [`LineBuffer`] accumulates the pieces of a message locally -
//! without touching the shared buffer lock - and hands the whole thing to
//! the writer as a single append, keeping it contiguous.

use std::fmt;

use crate::writer::LogWriter;

/// Accumulates message fragments and appends them to a [`LogWriter`] in
/// one piece, on [`flush`](Self::flush) or drop.
pub struct LineBuffer<'a> {
    writer: &'a LogWriter,
    buf: String,
}

impl<'a> LineBuffer<'a> {
    /// Create an empty buffer targeting `writer`.
    pub fn new(writer: &'a LogWriter) -> Self {
        Self {
            writer,
            buf: String::new(),
        }
    }

    /// Append a fragment without touching the writer.
    pub fn push(&mut self, text: &str) -> &mut Self {
        self.buf.push_str(text);
        self
    }

    /// Hand the accumulated text to the writer as a single append.
    ///
    /// Returns `false` if the writer rejected it (inactive or lock
    /// timeout); the accumulated text is cleared either way.
    pub fn flush(&mut self) -> bool {
        if self.buf.is_empty() {
            return true;
        }
        let text = std::mem::take(&mut self.buf);
        self.writer.append(&text)
    }
}

impl fmt::Write for LineBuffer<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.buf.push_str(s);
        Ok(())
    }
}

impl Drop for LineBuffer<'_> {
    fn drop(&mut self) {
        self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WriterConfig;
    use std::fmt::Write as _;

    #[test]
    fn test_flush_appends_accumulated_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("line.log");
        let mut writer = LogWriter::new(WriterConfig::default());
        writer.activate(&path).unwrap();

        {
            let mut line = LineBuffer::new(&writer);
            line.push("part-1 ").push("part-2");
            write!(line, " and {}", 3).unwrap();
            assert!(line.flush());
        }

        writer.shutdown().unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "part-1 part-2 and 3");
    }

    #[test]
    fn test_drop_flushes_remaining_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("drop.log");
        let mut writer = LogWriter::new(WriterConfig::default());
        writer.activate(&path).unwrap();

        {
            let mut line = LineBuffer::new(&writer);
            line.push("flushed-on-drop\n");
        }

        writer.shutdown().unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "flushed-on-drop\n");
    }

    #[test]
    fn test_empty_flush_is_trivially_ok() {
        let writer = LogWriter::new(WriterConfig::default());
        let mut line = LineBuffer::new(&writer);
        assert!(line.flush());
    }
}
