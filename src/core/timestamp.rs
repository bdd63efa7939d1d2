//! Timestamp layouts for the `time=` header
//!
//! The layout is derived from the date/time/microsecond/UTC flags once, when
//! the header composer is built, and applied to the current instant on every
//! call.

use super::flags::Flags;
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

/// Layout used by the `Marker::Time` marker: `2025-01-08T10:30:45`
pub const MARKER_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Which parts of an instant appear in the `time=` header
///
/// # Examples
///
/// ```
/// use rust_logfmt_logger::core::{Flags, TimestampLayout};
///
/// let layout = TimestampLayout::from_flags(Flags::DATE | Flags::TIME);
/// assert_eq!(layout, Some(TimestampLayout::DateTime { micros: false }));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampLayout {
    /// `2025-01-08`
    Date,
    /// `10:30:45`, or `10:30:45.123456` with micros
    Time { micros: bool },
    /// `2025-01-08T10:30:45`, or `2025-01-08T10:30:45.123456` with micros
    DateTime { micros: bool },
    /// RFC 3339 with offset: `2025-01-08T10:30:45+00:00`
    ///
    /// Used when a time header is requested without date or time parts,
    /// which happens with `Flags::UTC` alone.
    Standard,
}

impl TimestampLayout {
    /// Layout for a flag set, or `None` when no time header is wanted
    pub fn from_flags(flags: Flags) -> Option<Self> {
        if !flags.has_time() {
            return None;
        }
        let micros = flags.contains(Flags::MICROSECONDS);
        let date = flags.contains(Flags::DATE);
        let time = flags.contains(Flags::TIME) || micros;
        Some(match (date, time) {
            (true, true) => TimestampLayout::DateTime { micros },
            (true, false) => TimestampLayout::Date,
            (false, true) => TimestampLayout::Time { micros },
            (false, false) => TimestampLayout::Standard,
        })
    }

    /// strftime pattern for this layout
    pub fn pattern(&self) -> &'static str {
        match self {
            TimestampLayout::Date => "%Y-%m-%d",
            TimestampLayout::Time { micros: false } => "%H:%M:%S",
            TimestampLayout::Time { micros: true } => "%H:%M:%S%.6f",
            TimestampLayout::DateTime { micros: false } => "%Y-%m-%dT%H:%M:%S",
            TimestampLayout::DateTime { micros: true } => "%Y-%m-%dT%H:%M:%S%.6f",
            TimestampLayout::Standard => "%Y-%m-%dT%H:%M:%S%:z",
        }
    }

    /// Render `instant` in UTC or in the local time zone
    #[must_use]
    pub fn format(&self, instant: &DateTime<Utc>, utc: bool) -> String {
        if utc {
            instant.format(self.pattern()).to_string()
        } else {
            instant.with_timezone(&Local).format(self.pattern()).to_string()
        }
    }
}
