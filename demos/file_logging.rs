//! File logging example
//!
//! Demonstrates a flag-style logger writing to a file, with the logger
//! configuration loaded from JSON.
//!
//! Run with: cargo run --example file_logging

use rust_logfmt_logger::prelude::*;
use rust_logfmt_logger::printw;
use std::sync::Arc;
use std::thread;

fn main() -> Result<()> {
    println!("=== Rust Logfmt Logger - File Logging Example ===\n");

    let config: FormatterConfig = serde_json::from_str(r#"{"Flags": 281}"#)
        .map_err(|e| LoggerError::config("FormatterConfig", e.to_string()))?;
    println!("1. Loaded configuration: {:?}", config);

    let logger = Arc::new(
        Logger::builder()
            .appender(FileAppender::new("application.log")?)
            .config(config)
            .style(PlainStyle)
            .build(),
    );

    println!("2. Logging from the main thread:");
    printw!(logger, "application started");
    printw!(logger, "config", "application.log", "loaded", true);

    println!("3. Logging from worker threads:");
    let handles: Vec<_> = (1..=3)
        .map(|worker| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for item in 1..=5 {
                    printw!(logger, "worker", worker, "item", item, "processed");
                }
            })
        })
        .collect();

    for handle in handles {
        if handle.join().is_err() {
            return Err(LoggerError::other("worker thread panicked"));
        }
    }

    printw!(logger, "all operations completed");
    logger.flush()?;

    println!(
        "\nLines written: {}, dropped: {}",
        logger.metrics().total_logged(),
        logger.dropped_count()
    );
    println!("\n=== Example completed successfully! ===");
    println!("Check 'application.log' for the full log output");

    Ok(())
}
