//! Call-site accuracy tests
//!
//! These tests pin the exact `file@line:function()` reported for each public
//! entry point. They must hold in optimized builds as well, where forwarding
//! layers could otherwise be folded into tail calls; run them with
//! `cargo test-optimized` (see `.cargo/config.toml`) in addition to the
//! default profile.

use rust_logfmt_logger::args;
use rust_logfmt_logger::prelude::*;

fn short_caller_logger() -> (Logger, MemoryAppender) {
    let out = MemoryAppender::new();
    let logger = Logger::builder()
        .appender(out.clone())
        .flags(Flags::SHORT_CALLER)
        .style(PlainStyle)
        .build();
    (logger, out)
}

fn caller_marker_logger() -> (Logger, MemoryAppender) {
    let out = MemoryAppender::new();
    let logger = Logger::builder()
        .appender(out.clone())
        .markers([Marker::Caller])
        .build();
    (logger, out)
}

#[inline(never)]
fn printw_site(logger: &Logger) -> u32 {
    logger.printw(&args!["k", "v"]);
    line!() - 1
}

#[inline(never)]
fn format_site(logger: &Logger) -> (String, u32) {
    (logger.format(&args!["k", "v"]), line!())
}

#[inline(never)]
fn resolve_site() -> (Location, u32) {
    (Location::resolve(0), line!())
}

#[inline(never)]
fn outer_site() -> (Location, u32) {
    (inner_wrapper(), line!())
}

#[inline(never)]
fn inner_wrapper() -> Location {
    let location = Location::resolve(1);
    std::hint::black_box(&location);
    location
}

#[inline(never)]
fn wrapped_format_site(formatter: &LineFormatter) -> (String, u32) {
    (format_wrapper(formatter), line!())
}

#[inline(never)]
fn format_wrapper(formatter: &LineFormatter) -> String {
    let line = formatter.format_with_skip(&args!["k", "v"], 1);
    std::hint::black_box(&line);
    line
}

#[test]
fn test_printw_reports_calling_function() {
    let (logger, out) = short_caller_logger();
    let line = printw_site(&logger);
    assert_eq!(
        out.lines(),
        vec![format!(
            "loc=tests/call_site_tests.rs@{}:printw_site() level=info k=v",
            line
        )]
    );
}

#[test]
fn test_printw_caller_marker_reports_calling_function() {
    let (logger, out) = caller_marker_logger();
    let line = printw_site(&logger);
    assert_eq!(
        out.lines(),
        vec![format!(
            "location=tests/call_site_tests.rs@{}:printw_site() k=v",
            line
        )]
    );
}

#[test]
fn test_logger_format_reports_calling_function() {
    let (logger, out) = short_caller_logger();
    let (rendered, line) = format_site(&logger);
    assert_eq!(
        rendered,
        format!("loc=tests/call_site_tests.rs@{}:format_site() level=info k=v", line)
    );
    assert!(out.is_empty());
}

#[test]
fn test_logger_format_caller_marker_in_test_body() {
    let (logger, _out) = caller_marker_logger();
    let (rendered, line) = (logger.format(&args!["k", "v"]), line!());
    assert_eq!(
        rendered,
        format!(
            "location=tests/call_site_tests.rs@{}:test_logger_format_caller_marker_in_test_body() k=v",
            line
        )
    );
}

#[test]
fn test_line_formatter_short_caller_in_test_body() {
    let formatter = LineFormatter::new(FormatterConfig::Flags(Flags::SHORT_CALLER));
    let (rendered, line) = (formatter.format(&args!["k", "v"]), line!());
    assert_eq!(
        rendered,
        format!(
            "loc=tests/call_site_tests.rs@{}:test_line_formatter_short_caller_in_test_body() k=v",
            line
        )
    );
}

#[test]
fn test_resolve_reports_calling_function() {
    let (location, line) = resolve_site();
    assert_eq!(location.file_line(), line);
    assert_eq!(
        location.short(),
        format!("tests/call_site_tests.rs@{}:resolve_site()", line)
    );
}

#[test]
fn test_resolve_skip_reports_outer_function() {
    let (location, line) = outer_site();
    assert_eq!(
        location.short(),
        format!("tests/call_site_tests.rs@{}:outer_site()", line)
    );
}

#[test]
fn test_format_with_skip_reports_outer_function() {
    let formatter = LineFormatter::new(FormatterConfig::Flags(Flags::SHORT_CALLER));
    let (rendered, line) = wrapped_format_site(&formatter);
    assert_eq!(
        rendered,
        format!("loc=tests/call_site_tests.rs@{}:wrapped_format_site() k=v", line)
    );
}
