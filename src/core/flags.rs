//! Construction-time flag bitmask
//!
//! Flags select which headers a flag-style logger prepends to every line and
//! which severity tag it carries. They combine with `|` and are fixed once the
//! logger is built.

use super::error::LoggerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Flags(u32);

impl Flags {
    /// Local date: `2009-01-23`
    pub const DATE: Flags = Flags(1 << 0);
    /// Local time: `01:23:23`
    pub const TIME: Flags = Flags(1 << 1);
    /// Microsecond resolution: `01:23:23.123123`. Implies `TIME`.
    pub const MICROSECONDS: Flags = Flags(1 << 2);
    /// Caller location with the fully qualified function path
    pub const LONG_CALLER: Flags = Flags(1 << 3);
    /// Caller location with the bare function name; `LONG_CALLER` wins if both are set
    pub const SHORT_CALLER: Flags = Flags(1 << 4);
    /// Render date and time in UTC rather than the local time zone
    pub const UTC: Flags = Flags(1 << 5);
    pub const DEBUG: Flags = Flags(1 << 6);
    pub const INFO: Flags = Flags(1 << 7);
    pub const WARN: Flags = Flags(1 << 8);
    pub const ERROR: Flags = Flags(1 << 9);

    /// Initial values for a standard logger
    pub const STD: Flags = Flags(Self::DATE.0 | Self::TIME.0);

    const NAMED: [(&'static str, Flags); 10] = [
        ("date", Self::DATE),
        ("time", Self::TIME),
        ("microseconds", Self::MICROSECONDS),
        ("longcaller", Self::LONG_CALLER),
        ("shortcaller", Self::SHORT_CALLER),
        ("utc", Self::UTC),
        ("debug", Self::DEBUG),
        ("info", Self::INFO),
        ("warn", Self::WARN),
        ("error", Self::ERROR),
    ];

    pub const fn empty() -> Self {
        Flags(0)
    }

    pub const fn bits(&self) -> u32 {
        self.0
    }

    pub const fn from_bits(bits: u32) -> Self {
        Flags(bits)
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// True when every bit of `other` is set in `self`
    pub const fn contains(&self, other: Flags) -> bool {
        self.0 & other.0 == other.0
    }

    /// True when any bit of `other` is set in `self`
    pub const fn intersects(&self, other: Flags) -> bool {
        self.0 & other.0 != 0
    }

    /// Whether a `time=` header is produced
    pub const fn has_time(&self) -> bool {
        self.intersects(Flags(
            Self::DATE.0 | Self::TIME.0 | Self::MICROSECONDS.0 | Self::UTC.0,
        ))
    }

    /// Whether a `loc=` header is produced
    pub const fn has_caller(&self) -> bool {
        self.intersects(Flags(Self::LONG_CALLER.0 | Self::SHORT_CALLER.0))
    }
}

impl BitOr for Flags {
    type Output = Flags;

    fn bitor(self, rhs: Flags) -> Flags {
        Flags(self.0 | rhs.0)
    }
}

impl BitOrAssign for Flags {
    fn bitor_assign(&mut self, rhs: Flags) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = Self::NAMED
            .iter()
            .filter(|(_, flag)| self.contains(*flag))
            .map(|(name, _)| *name)
            .collect();
        write!(f, "{}", names.join("|"))
    }
}

/// Parses `"date|time|shortcaller"` style strings. Names are case-insensitive;
/// `_` and `-` inside a name are ignored, so `short_caller` also works.
impl FromStr for Flags {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut flags = Flags::empty();
        for raw in s.split('|').map(str::trim).filter(|part| !part.is_empty()) {
            let name: String = raw
                .chars()
                .filter(|c| *c != '_' && *c != '-')
                .collect::<String>()
                .to_lowercase();
            let flag = match name.as_str() {
                "std" => Flags::STD,
                other => Self::NAMED
                    .iter()
                    .find(|(candidate, _)| *candidate == other)
                    .map(|(_, flag)| *flag)
                    .ok_or_else(|| {
                        LoggerError::config("Flags", format!("unknown flag '{}'", raw))
                    })?,
            };
            flags |= flag;
        }
        Ok(flags)
    }
}
