//! Basic logger usage example
//!
//! Demonstrates marker-style and flag-style loggers writing to the console.
//!
//! Run with: cargo run --example basic_usage

use rust_logfmt_logger::prelude::*;
use rust_logfmt_logger::printw;

fn main() -> Result<()> {
    println!("=== Rust Logfmt Logger - Basic Usage Example ===\n");

    // Marker style: markers are appended to every call
    println!("1. Marker style with time, app and caller:");
    let logger = Logger::builder()
        .appender(ConsoleAppender::new().with_target(ConsoleTarget::Stdout))
        .markers([Marker::Time, Marker::App, Marker::Caller])
        .build();

    printw!(logger, "service started");
    printw!(logger, "user", "alice", "action", "login");
    printw!(logger, "request failed", "status", 503, "retry", true);

    // Inline markers work in marker style too
    let plain = Logger::builder()
        .appender(ConsoleAppender::new().with_target(ConsoleTarget::Stdout))
        .build();
    printw!(plain, "job", "sync", Marker::Time);

    // Flag style: headers and a persistent level fixed at construction
    println!("\n2. Flag style with date, time, short caller and level:");
    let logger = Logger::builder()
        .appender(ConsoleAppender::new().with_target(ConsoleTarget::Stdout))
        .flags(Flags::STD | Flags::SHORT_CALLER | Flags::WARN)
        .build();

    printw!(logger, "disk", "/var", "usage", 0.93, "almost full");
    printw!(logger, "path", "C:\\Program Files\\app", "note", "tab\there");

    println!("\n3. Flags parsed from a configuration string:");
    let flags: Flags = "date|time|microseconds|long_caller|error".parse()?;
    let logger = Logger::builder()
        .appender(ConsoleAppender::new().with_target(ConsoleTarget::Stdout))
        .flags(flags)
        .build();
    printw!(logger, "component", "db", "connection lost");

    logger.flush()?;
    println!("\n=== Example completed successfully! ===");
    Ok(())
}
