//! Diagnostic ticker example
//!
//! Runs worker threads that log concurrently to a colored console while the
//! ticker reports the live thread count at debug severity.
//!
//! Run with: cargo run --example diagnostic_ticker

use rust_dispatch_logger::prelude::*;
use rust_dispatch_logger::info;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

fn main() -> Result<()> {
    println!("=== Rust Dispatch Logger - Diagnostic Ticker Example ===\n");

    let logger = Logger::builder()
        .processor(ConsoleProcessor::new().with_timestamps(true))
        .enable(Severity::Debug)
        .ticker_interval(Duration::from_millis(100))
        .try_build()?;
    let logger = Arc::new(logger);

    let handles: Vec<_> = (0..4)
        .map(|thread_id| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for i in 0..5 {
                    info!(logger, "Thread {} - Message {}", thread_id, i);
                    thread::sleep(Duration::from_millis(60));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("producer thread");
    }

    logger.close_timeout(Duration::from_secs(5))?;

    println!(
        "\n{} lines delivered, {} diagnostic reports",
        logger.metrics().delivered(),
        logger.metrics().diagnostics_emitted()
    );
    Ok(())
}
