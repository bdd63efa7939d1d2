//! # Rust Logfmt Logger
//!
//! `key=value` line logging on top of a line-oriented appender.
//!
//! ## Features
//!
//! - **Key/value pairs**: alternate keys and values, an odd one out becomes `msg=`
//! - **Call sites**: `dir/file.rs@line:function()` resolved from the live stack
//! - **Headers**: time, caller and a colored level tag chosen by flags or markers
//! - **Thread safe**: configuration is fixed at construction
//!
//! ```
//! use rust_logfmt_logger::prelude::*;
//! use rust_logfmt_logger::printw;
//!
//! let out = MemoryAppender::new();
//! let logger = Logger::builder()
//!     .appender(out.clone())
//!     .flags(Flags::ERROR)
//!     .style(PlainStyle)
//!     .build();
//!
//! printw!(logger, "user", "alice", "request failed");
//! assert_eq!(out.lines(), vec!["level=error user=alice msg=\"request failed\""]);
//! ```

pub mod appenders;
pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, ConsoleTarget, FileAppender, MemoryAppender};
    pub use crate::core::{
        Appender, Arg, ColoredStyle, FieldValue, Flags, FormatterConfig, LineFormatter, Location,
        LogLevel, Logger, LoggerBuilder, LoggerError, LoggerMetrics, Marker, PlainStyle,
        QuoteStyle, Result, Stylize,
    };
}

pub use appenders::{ConsoleAppender, ConsoleTarget, FileAppender, MemoryAppender};
pub use core::{
    Appender, Arg, ColoredStyle, FieldValue, Flags, FormatterConfig, LineFormatter, Location,
    LogLevel, Logger, LoggerBuilder, LoggerError, LoggerMetrics, Marker, PlainStyle, QuoteStyle,
    Result, Stylize,
};
