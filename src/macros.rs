//! Macros for building argument lists and logging them.
//!
//! # Examples
//!
//! ```
//! use rust_logfmt_logger::prelude::*;
//! use rust_logfmt_logger::{args, printw};
//!
//! let out = MemoryAppender::new();
//! let logger = Logger::new(out.clone(), FormatterConfig::default());
//!
//! printw!(logger, "user", "alice", "count", 3);
//! printw!(logger, "server started", "port", 8080);
//!
//! assert_eq!(
//!     out.lines(),
//!     vec!["user=alice count=3", "msg=\"server started\" port=8080"]
//! );
//!
//! let line = args!["k", "v", Marker::App];
//! assert_eq!(line.len(), 3);
//! ```

/// Build a `Vec<Arg>` from heterogeneous values and markers.
///
/// # Examples
///
/// ```
/// use rust_logfmt_logger::{args, Arg, Marker};
///
/// let list: Vec<Arg> = args!["user", "alice", "count", 3, Marker::Caller];
/// assert_eq!(list[4], Arg::Marker(Marker::Caller));
/// assert!(args![].is_empty());
/// ```
#[macro_export]
macro_rules! args {
    () => {
        ::std::vec::Vec::<$crate::Arg>::new()
    };
    ($($arg:expr),+ $(,)?) => {
        ::std::vec![$($crate::Arg::from($arg)),+]
    };
}

/// Write one key/value line through `Logger::printw`.
#[macro_export]
macro_rules! printw {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $logger.printw(&$crate::args![$($arg),*])
    };
}

/// Write one key/value line, then exit the process through `Logger::fatalw`.
#[macro_export]
macro_rules! fatalw {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $logger.fatalw(&$crate::args![$($arg),*])
    };
}

/// Write one key/value line, then panic through `Logger::panicw`.
///
/// # Examples
///
/// ```should_panic
/// # use rust_logfmt_logger::prelude::*;
/// use rust_logfmt_logger::panicw;
/// # let logger = Logger::new(MemoryAppender::new(), FormatterConfig::default());
/// panicw!(logger, "unrecoverable", "code", 500);
/// ```
#[macro_export]
macro_rules! panicw {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $logger.panicw(&$crate::args![$($arg),*])
    };
}
