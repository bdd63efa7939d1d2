//! Write counters for a [`Logger`](super::Logger)
//!
//! Every `printw` either lands in the appender or is lost to an appender
//! error or panic. Both outcomes are counted here; nothing else is.

use std::sync::atomic::{AtomicU64, Ordering};

/// Outcome counters shared by all threads using one logger
///
/// # Example
///
/// ```
/// use rust_logfmt_logger::prelude::*;
/// use rust_logfmt_logger::printw;
///
/// let logger = Logger::new(MemoryAppender::new(), FormatterConfig::default());
/// printw!(logger, "k", "v");
///
/// assert_eq!(logger.metrics().total_logged(), 1);
/// assert_eq!(logger.metrics().dropped_count(), 0);
/// assert_eq!(logger.metrics().drop_rate(), 0.0);
/// ```
#[derive(Debug, Default)]
pub struct LoggerMetrics {
    dropped_count: AtomicU64,
    total_logged: AtomicU64,
}

impl LoggerMetrics {
    pub const fn new() -> Self {
        Self {
            dropped_count: AtomicU64::new(0),
            total_logged: AtomicU64::new(0),
        }
    }

    /// Lines the appender rejected or panicked on
    #[inline]
    pub fn dropped_count(&self) -> u64 {
        self.dropped_count.load(Ordering::Relaxed)
    }

    /// Lines the appender accepted
    #[inline]
    pub fn total_logged(&self) -> u64 {
        self.total_logged.load(Ordering::Relaxed)
    }

    #[inline]
    pub(crate) fn record_dropped(&self) {
        self.dropped_count.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_logged(&self) {
        self.total_logged.fetch_add(1, Ordering::Relaxed);
    }

    /// Share of attempted lines that were dropped, in percent.
    ///
    /// 0.0 before the first line.
    pub fn drop_rate(&self) -> f64 {
        let dropped = self.dropped_count() as f64;
        let attempted = self.total_logged() as f64 + dropped;
        if attempted == 0.0 {
            0.0
        } else {
            dropped / attempted * 100.0
        }
    }
}
