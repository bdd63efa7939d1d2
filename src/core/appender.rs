//! Appender trait for line-oriented output destinations

use super::error::Result;

/// Writes finished log lines.
///
/// `line` never carries a trailing newline; appenders add their own line
/// terminator.
pub trait Appender: Send {
    fn append(&mut self, line: &str) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}
