//! Console appender implementation

use crate::core::{Appender, Result};
use std::io::Write;

/// Which standard stream a [`ConsoleAppender`] writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConsoleTarget {
    #[default]
    Stderr,
    Stdout,
}

/// Writes each line to stderr (the default) or stdout
#[derive(Debug, Clone, Default)]
pub struct ConsoleAppender {
    target: ConsoleTarget,
}

impl ConsoleAppender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write to stdout instead of stderr
    ///
    /// # Example
    ///
    /// ```
    /// use rust_logfmt_logger::appenders::{ConsoleAppender, ConsoleTarget};
    ///
    /// let appender = ConsoleAppender::new().with_target(ConsoleTarget::Stdout);
    /// assert_eq!(appender.target(), ConsoleTarget::Stdout);
    /// ```
    #[must_use]
    pub fn with_target(mut self, target: ConsoleTarget) -> Self {
        self.target = target;
        self
    }

    pub fn target(&self) -> ConsoleTarget {
        self.target
    }
}

impl Appender for ConsoleAppender {
    fn append(&mut self, line: &str) -> Result<()> {
        match self.target {
            ConsoleTarget::Stderr => writeln!(std::io::stderr().lock(), "{}", line)?,
            ConsoleTarget::Stdout => writeln!(std::io::stdout().lock(), "{}", line)?,
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        match self.target {
            ConsoleTarget::Stderr => std::io::stderr().flush()?,
            ConsoleTarget::Stdout => std::io::stdout().flush()?,
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
