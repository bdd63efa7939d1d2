//! Main logger implementation

use super::{
    appender::Appender,
    error::{LoggerError, Result},
    field::{Arg, Marker},
    flags::Flags,
    formatter::{FormatterConfig, LineFormatter},
    location::keep_frame,
    metrics::LoggerMetrics,
    style::{ColoredStyle, Stylize},
};
use parking_lot::Mutex;
use std::sync::Arc;

/// Key/value logger on top of a line [`Appender`].
///
/// The formatter configuration and the level prefix are fixed at
/// construction, so a `Logger` can be shared across threads and read without
/// locking; only the appender sits behind a mutex.
pub struct Logger {
    appender: Mutex<Box<dyn Appender>>,
    formatter: LineFormatter,
    /// Persistent `level=` tag for flag-style loggers, empty otherwise
    prefix: String,
    metrics: Arc<LoggerMetrics>,
}

impl Logger {
    /// Create a logger with colored level tags
    #[must_use]
    pub fn new<A: Appender + 'static>(appender: A, config: FormatterConfig) -> Self {
        Self::with_style(Box::new(appender), config, &ColoredStyle)
    }

    /// Create a logger rendering its level tag through `style`
    #[must_use]
    pub fn with_style(
        appender: Box<dyn Appender>,
        config: FormatterConfig,
        style: &dyn Stylize,
    ) -> Self {
        let formatter = LineFormatter::new(config);
        let prefix = formatter
            .composer()
            .map(|composer| composer.level_tag(style))
            .unwrap_or_default();

        Self {
            appender: Mutex::new(appender),
            formatter,
            prefix,
            metrics: Arc::new(LoggerMetrics::new()),
        }
    }

    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use rust_logfmt_logger::prelude::*;
    ///
    /// let logger = Logger::builder()
    ///     .appender(MemoryAppender::new())
    ///     .flags(Flags::STD | Flags::SHORT_CALLER | Flags::WARN)
    ///     .build();
    /// assert!(logger.prefix().contains("level=warn"));
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    pub fn formatter(&self) -> &LineFormatter {
        &self.formatter
    }

    /// The persistent level tag placed between headers and body
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    pub fn dropped_count(&self) -> u64 {
        self.metrics.dropped_count()
    }

    /// Render `args` into the line `printw` would write, without writing it
    #[inline(never)]
    pub fn format(&self, args: &[Arg]) -> String {
        keep_frame(self.render(args, 1))
    }

    /// Write one key/value line
    #[inline(never)]
    pub fn printw(&self, args: &[Arg]) {
        let line = self.render(args, 1);
        self.write_line(&line);
    }

    /// Write one key/value line, flush, then exit the process with status 1
    #[inline(never)]
    pub fn fatalw(&self, args: &[Arg]) -> ! {
        let line = self.render(args, 1);
        self.write_line(&line);
        if let Err(e) = self.flush() {
            eprintln!("[LOGGER ERROR] Failed to flush before exit: {}", e);
        }
        std::process::exit(1);
    }

    /// Write one key/value line, then panic with it
    #[inline(never)]
    pub fn panicw(&self, args: &[Arg]) -> ! {
        let line = self.render(args, 1);
        self.write_line(&line);
        panic!("{}", line);
    }

    pub fn flush(&self) -> Result<()> {
        self.appender.lock().flush()
    }

    /// `skip` counts frames above the caller of `render`
    #[inline(never)]
    fn render(&self, args: &[Arg], skip: usize) -> String {
        let line = keep_frame(self.formatter.format_line(args, skip + 1));
        line.join(&self.prefix)
    }

    /// Hand a finished line to the appender.
    ///
    /// A failing or panicking appender never takes the caller down; the
    /// failure is reported on stderr and counted as a dropped line.
    fn write_line(&self, line: &str) {
        let mut appender = self.appender.lock();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            appender.append(line)
        }));

        match result {
            Ok(Ok(())) => {
                self.metrics.record_logged();
            }
            Ok(Err(e)) => {
                eprintln!("[LOGGER ERROR] Appender '{}' failed: {}", appender.name(), e);
                self.metrics.record_dropped();
            }
            Err(panic_info) => {
                let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                    s.to_string()
                } else if let Some(s) = panic_info.downcast_ref::<String>() {
                    s.clone()
                } else {
                    "Unknown panic".to_string()
                };
                eprintln!(
                    "[LOGGER CRITICAL] Appender '{}' panicked: {}",
                    appender.name(),
                    panic_msg
                );
                self.metrics.record_dropped();
            }
        }
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if let Err(e) = self.appender.get_mut().flush() {
            eprintln!("[LOGGER ERROR] Failed to flush during shutdown: {}", e);
        }
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use rust_logfmt_logger::prelude::*;
///
/// let logger = Logger::builder()
///     .appender(ConsoleAppender::new())
///     .markers([Marker::Time, Marker::Caller])
///     .build();
/// ```
pub struct LoggerBuilder {
    appender: Option<Box<dyn Appender>>,
    config: FormatterConfig,
    style: Box<dyn Stylize>,
}

impl LoggerBuilder {
    /// Create a new builder: no appender, no markers, colored level tags
    pub fn new() -> Self {
        Self {
            appender: None,
            config: FormatterConfig::default(),
            style: Box::new(ColoredStyle),
        }
    }

    /// Set the line writer
    #[must_use = "builder methods return a new value"]
    pub fn appender<A: Appender + 'static>(mut self, appender: A) -> Self {
        self.appender = Some(Box::new(appender));
        self
    }

    /// Set an already boxed line writer, or none at all
    #[must_use = "builder methods return a new value"]
    pub fn boxed_appender(mut self, appender: Option<Box<dyn Appender>>) -> Self {
        self.appender = appender;
        self
    }

    /// Use marker style with these markers appended to every call
    #[must_use = "builder methods return a new value"]
    pub fn markers(mut self, markers: impl IntoIterator<Item = Marker>) -> Self {
        self.config = FormatterConfig::markers(markers);
        self
    }

    /// Use flag style with these flags
    #[must_use = "builder methods return a new value"]
    pub fn flags(mut self, flags: Flags) -> Self {
        self.config = FormatterConfig::Flags(flags);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn config(mut self, config: FormatterConfig) -> Self {
        self.config = config;
        self
    }

    /// Set how the level tag is styled
    #[must_use = "builder methods return a new value"]
    pub fn style<S: Stylize + 'static>(mut self, style: S) -> Self {
        self.style = Box::new(style);
        self
    }

    /// Build the Logger, or [`LoggerError::NilAppender`] without an appender
    pub fn try_build(self) -> Result<Logger> {
        let appender = self.appender.ok_or(LoggerError::NilAppender)?;
        Ok(Logger::with_style(appender, self.config, self.style.as_ref()))
    }

    /// Build the Logger
    ///
    /// # Panics
    ///
    /// Panics with [`LoggerError::NilAppender`] when no appender was set.
    /// A logger without an output is a configuration bug, not a runtime
    /// condition.
    pub fn build(self) -> Logger {
        match self.try_build() {
            Ok(logger) => logger,
            Err(e) => panic!("{}", e),
        }
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
