//! Core logger types and traits

pub mod appender;
pub mod error;
pub mod field;
pub mod flags;
pub mod formatter;
pub mod header;
pub mod location;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod quote;
pub mod style;
pub mod timestamp;

pub use appender::Appender;
pub use error::{LoggerError, Result};
pub use field::{Arg, FieldValue, Marker};
pub use flags::Flags;
pub use formatter::{app_name, FormattedLine, FormatterConfig, LineFormatter, OddArgPolicy};
pub use header::{CallerForm, HeaderComposer};
pub use location::{BacktraceWalker, Frame, Location, StackWalker, NOT_AVAILABLE};
pub use log_level::LogLevel;
pub use logger::{Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use quote::QuoteStyle;
pub use style::{ColoredStyle, PlainStyle, Stylize};
pub use timestamp::{TimestampLayout, MARKER_TIME_FORMAT};
