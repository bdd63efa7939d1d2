//! In-memory appender

use crate::core::{Appender, Result};
use parking_lot::Mutex;
use std::sync::Arc;

/// Collects lines in memory.
///
/// Clones share the same buffer, so one handle can be given to a logger and
/// another kept to read what was written.
///
/// # Example
///
/// ```
/// use rust_logfmt_logger::prelude::*;
/// use rust_logfmt_logger::args;
///
/// let out = MemoryAppender::new();
/// let logger = Logger::new(out.clone(), FormatterConfig::default());
/// logger.printw(&args!["user", "alice"]);
/// assert_eq!(out.lines(), vec!["user=alice"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryAppender {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemoryAppender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the lines written so far
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lines.lock().clear();
    }
}

impl Appender for MemoryAppender {
    fn append(&mut self, line: &str) -> Result<()> {
        self.lines.lock().push(line.to_string());
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
