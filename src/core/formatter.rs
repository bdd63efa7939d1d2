//! Key/value line formatting
//!
//! [`LineFormatter`] turns an ordered argument list into one logfmt line:
//!
//! - Marker style (`FormatterConfig::Markers`):
//!   `[time=..] [app=..] [location=..] [msg=..] [k=v ...]`
//! - Flag style (`FormatterConfig::Flags`):
//!   `[time=..] [loc=..] [k=v ...] [msg=..]`
//!
//! The two styles differ in which element of an odd-length list becomes the
//! message and in how strictly tokens are quoted. See [`OddArgPolicy`] and
//! [`QuoteStyle`].

use super::field::{Arg, FieldValue, Marker};
use super::flags::Flags;
use super::header::HeaderComposer;
use super::location::{keep_frame, Location};
use super::quote::QuoteStyle;
use super::timestamp::MARKER_TIME_FORMAT;
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::sync::OnceLock;

/// Construction-time formatter configuration
///
/// # Examples
///
/// ```
/// use rust_logfmt_logger::core::{Flags, FormatterConfig, Marker};
///
/// let markers = FormatterConfig::markers([Marker::Time, Marker::Caller]);
/// let flags = FormatterConfig::Flags(Flags::STD | Flags::SHORT_CALLER);
/// # let _ = (markers, flags);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormatterConfig {
    /// Markers appended to the arguments of every call
    Markers(Vec<Marker>),
    /// Header and level flags fixed at construction
    Flags(Flags),
}

impl Default for FormatterConfig {
    fn default() -> Self {
        FormatterConfig::Markers(Vec::new())
    }
}

impl FormatterConfig {
    pub fn markers(markers: impl IntoIterator<Item = Marker>) -> Self {
        FormatterConfig::Markers(markers.into_iter().collect())
    }

    pub fn odd_policy(&self) -> OddArgPolicy {
        match self {
            FormatterConfig::Markers(_) => OddArgPolicy::MessageFirst,
            FormatterConfig::Flags(_) => OddArgPolicy::MessageLast,
        }
    }

    pub fn quote_style(&self) -> QuoteStyle {
        match self {
            FormatterConfig::Markers(_) => QuoteStyle::Lenient,
            FormatterConfig::Flags(_) => QuoteStyle::Strict,
        }
    }
}

/// Which element of an odd-length argument list becomes `msg=`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OddArgPolicy {
    /// The first element, rendered before the pairs: `msg=a 1=b`
    MessageFirst,
    /// The last element, rendered after the pairs: `a=1 msg=b`
    MessageLast,
}

/// Base name of the running binary, used by `Marker::App`
pub fn app_name() -> &'static str {
    static APP_NAME: OnceLock<String> = OnceLock::new();
    APP_NAME.get_or_init(|| {
        std::env::args_os()
            .next()
            .and_then(|arg0| {
                Path::new(&arg0)
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
            })
            .unwrap_or_default()
    })
}

/// A formatted line split into its header and key/value body
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormattedLine {
    pub header: String,
    pub body: String,
}

impl FormattedLine {
    /// Join header, `prefix` and body with single spaces, skipping empty parts
    pub fn join(&self, prefix: &str) -> String {
        [self.header.as_str(), prefix, self.body.as_str()]
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for FormattedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.join(""))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineFormatter {
    config: FormatterConfig,
    composer: Option<HeaderComposer>,
}

impl LineFormatter {
    pub fn new(config: FormatterConfig) -> Self {
        let composer = match &config {
            FormatterConfig::Flags(flags) => Some(HeaderComposer::new(*flags)),
            FormatterConfig::Markers(_) => None,
        };
        Self { config, composer }
    }

    pub fn config(&self) -> &FormatterConfig {
        &self.config
    }

    /// Header composer for flag-style formatters
    pub fn composer(&self) -> Option<&HeaderComposer> {
        self.composer.as_ref()
    }

    /// Format `args`, reporting the caller of `format` as the call site
    #[inline(never)]
    pub fn format(&self, args: &[Arg]) -> String {
        keep_frame(self.format_line(args, 1)).to_string()
    }

    /// Format `args`, reporting the call site `skip` frames above the caller
    /// of this function.
    #[inline(never)]
    pub fn format_with_skip(&self, args: &[Arg], skip: usize) -> String {
        keep_frame(self.format_line(args, skip + 1)).to_string()
    }

    /// Format `args` into separate header and body parts so a caller can
    /// place a prefix between them. `skip` counts frames above the caller of
    /// `format_line`.
    #[inline(never)]
    pub fn format_line(&self, args: &[Arg], skip: usize) -> FormattedLine {
        let mut header = Vec::new();
        let mut values: Vec<&FieldValue> = Vec::with_capacity(args.len());

        match (&self.config, &self.composer) {
            (FormatterConfig::Markers(markers), _) => {
                for arg in args {
                    match arg {
                        Arg::Marker(marker) => header.push(Self::render_marker(*marker, skip + 1)),
                        Arg::Value(v) => values.push(v),
                    }
                }
                for marker in markers {
                    header.push(Self::render_marker(*marker, skip + 1));
                }
            }
            (FormatterConfig::Flags(_), composer) => {
                if let Some(composer) = composer {
                    let composed = composer.compose(skip + 1);
                    if !composed.is_empty() {
                        header.push(composed);
                    }
                }
                // flag style owns its headers, inline markers are dropped
                values.extend(args.iter().filter_map(|arg| match arg {
                    Arg::Value(v) => Some(v),
                    Arg::Marker(_) => None,
                }));
            }
        }

        FormattedLine {
            header: header.join(" "),
            body: self.render_body(&values),
        }
    }

    /// Pair up `values` into `msg=`/`key=value` parts
    fn render_body(&self, values: &[&FieldValue]) -> String {
        let mut parts = Vec::with_capacity(values.len() / 2 + 1);
        let quote = self.config.quote_style();
        let mut values = values;
        let mut trailing_msg = None;

        if values.len() % 2 == 1 {
            match self.config.odd_policy() {
                OddArgPolicy::MessageFirst => {
                    if let Some((first, rest)) = values.split_first() {
                        parts.push(format!("msg={}", quote.quote(&first.to_string())));
                        values = rest;
                    }
                }
                OddArgPolicy::MessageLast => {
                    if let Some((last, rest)) = values.split_last() {
                        trailing_msg = Some(format!("msg={}", quote.quote(&last.to_string())));
                        values = rest;
                    }
                }
            }
        }

        for pair in values.chunks_exact(2) {
            if let [key, value] = pair {
                parts.push(format!(
                    "{}={}",
                    self.render_key(key),
                    quote.quote(&value.to_string())
                ));
            }
        }

        parts.extend(trailing_msg);
        parts.join(" ")
    }

    fn render_key(&self, key: &FieldValue) -> String {
        let key = key.to_string();
        match self.config {
            FormatterConfig::Markers(_) => key,
            FormatterConfig::Flags(_) => QuoteStyle::Strict.quote(&key),
        }
    }

    /// `skip` counts frames above the caller of `render_marker`
    #[inline(never)]
    fn render_marker(marker: Marker, skip: usize) -> String {
        match marker {
            Marker::Time => format!("time={}", Local::now().format(MARKER_TIME_FORMAT)),
            Marker::App => format!("app={}", app_name()),
            Marker::Caller => format!("location={}", Location::resolve(skip + 1).short()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;

    fn markers() -> LineFormatter {
        LineFormatter::new(FormatterConfig::default())
    }

    fn flags() -> LineFormatter {
        LineFormatter::new(FormatterConfig::Flags(Flags::empty()))
    }

    #[test]
    fn test_single_message() {
        assert_eq!(markers().format(&args!["hello world"]), "msg=\"hello world\"");
        assert_eq!(flags().format(&args!["hello world"]), "msg=\"hello world\"");
    }

    #[test]
    fn test_even_pairs() {
        let line = args!["user", "alice", "count", 3];
        assert_eq!(markers().format(&line), "user=alice count=3");
        assert_eq!(flags().format(&line), "user=alice count=3");
    }

    #[test]
    fn test_odd_policies() {
        let line = args!["a", 1, "b"];
        assert_eq!(markers().format(&line), "msg=a 1=b");
        assert_eq!(flags().format(&line), "a=1 msg=b");
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(markers().format(&[]), "");
        assert_eq!(flags().format(&[]), "");
        assert_eq!(markers().format(&args!["", ""]), "=");
        assert_eq!(markers().format(&args!["key", ""]), "key=");
    }

    #[test]
    fn test_key_quoting_by_style() {
        let line = args!["user name", "bob smith"];
        assert_eq!(markers().format(&line), "user name=\"bob smith\"");
        assert_eq!(flags().format(&line), "\"user name\"=\"bob smith\"");
    }

    #[test]
    fn test_value_quoting_by_style() {
        let line = args!["q", "say \"hi\" now", "t", "a\tb"];
        assert_eq!(markers().format(&line), "q=\"say __hi__ now\" t=a\tb");
        assert_eq!(
            flags().format(&line),
            "q=\"say \\\"hi\\\" now\" t=\"a\\tb\""
        );
    }

    #[test]
    fn test_app_and_time_markers() {
        let line = markers().format(&args![Marker::App, "k", "v", Marker::Time]);
        let expected_app = format!("app={} ", app_name());
        assert!(line.starts_with(&expected_app), "{}", line);
        assert!(line.ends_with(" k=v"), "{}", line);

        let time = line
            .split(' ')
            .nth(1)
            .and_then(|part| part.strip_prefix("time="))
            .expect("time header");
        assert!(
            chrono::NaiveDateTime::parse_from_str(time, MARKER_TIME_FORMAT).is_ok(),
            "{}",
            time
        );
    }

    #[test]
    fn test_configured_markers_follow_inline_markers() {
        let formatter = LineFormatter::new(FormatterConfig::markers([Marker::App]));
        let line = formatter.format(&args!["odd"]);
        assert_eq!(line, format!("app={} msg=odd", app_name()));
    }

    #[test]
    fn test_flag_style_ignores_inline_markers() {
        assert_eq!(flags().format(&args![Marker::App, "k", "v"]), "k=v");
    }

    #[inline(never)]
    fn caller_marker_here(formatter: &LineFormatter) -> (String, u32) {
        (formatter.format(&args![Marker::Caller, "k", "v"]), line!())
    }

    #[test]
    fn test_caller_marker_reports_call_site() {
        let (line, at) = caller_marker_here(&markers());
        assert_eq!(
            line,
            format!("location=core/formatter.rs@{}:caller_marker_here() k=v", at)
        );
    }

    #[inline(never)]
    fn flag_caller_here(formatter: &LineFormatter) -> (String, u32) {
        (formatter.format(&args!["odd"]), line!())
    }

    #[test]
    fn test_flag_caller_reports_call_site() {
        let formatter = LineFormatter::new(FormatterConfig::Flags(Flags::SHORT_CALLER));
        let (line, at) = flag_caller_here(&formatter);
        assert_eq!(
            line,
            format!("loc=core/formatter.rs@{}:flag_caller_here() msg=odd", at)
        );
    }

    #[inline(never)]
    fn wrapper_caller(formatter: &LineFormatter) -> (String, u32) {
        (logging_wrapper(formatter), line!())
    }

    #[inline(never)]
    fn logging_wrapper(formatter: &LineFormatter) -> String {
        keep_frame(formatter.format_with_skip(&args!["k", "v"], 1))
    }

    #[test]
    fn test_format_with_skip_reports_wrapper_caller() {
        let formatter = LineFormatter::new(FormatterConfig::Flags(Flags::SHORT_CALLER));
        let (line, at) = wrapper_caller(&formatter);
        assert_eq!(
            line,
            format!("loc=core/formatter.rs@{}:wrapper_caller() k=v", at)
        );
    }

    #[test]
    fn test_formatted_line_join() {
        let line = FormattedLine {
            header: "time=2024-01-02".to_string(),
            body: "k=v".to_string(),
        };
        assert_eq!(line.join("level=info"), "time=2024-01-02 level=info k=v");
        assert_eq!(line.to_string(), "time=2024-01-02 k=v");
        assert_eq!(FormattedLine::default().join("level=info"), "level=info");
    }

    #[test]
    fn test_config_serialization() {
        let config = FormatterConfig::markers([Marker::Time, Marker::Caller]);
        let json = serde_json::to_string(&config).expect("serialize");
        assert_eq!(json, r#"{"Markers":["Time","Caller"]}"#);

        let config: FormatterConfig = serde_json::from_str(r#"{"Flags":3}"#).expect("deserialize");
        assert_eq!(config, FormatterConfig::Flags(Flags::STD));
    }
}
