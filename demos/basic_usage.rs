//! Basic logger usage example
//!
//! Demonstrates the default severity mask, the emit methods and macros, and
//! draining on close.
//!
//! Run with: cargo run --example basic_usage

use rust_dispatch_logger::prelude::*;
use rust_dispatch_logger::{error, notice, warning};

fn main() {
    println!("=== Rust Dispatch Logger - Basic Usage Example ===\n");

    let logger = Logger::new(
        |line: &LogLine| {
            let origin = line.origin.as_deref().unwrap_or("-");
            println!("[{}] {} ({})", line.severity, line.message, origin);
        },
        Config::default(),
    );

    println!("1. Logging at every severity (debug is off by default):");
    error!(logger, "x {}", "y");
    logger.info("test test");
    warning!(logger, "{}", "test test");
    notice!(logger, "test {}{}{}{}", "t", "e", "s", "t");
    logger.debug("hidden");

    println!("\n2. Closing drains every accepted line:");
    logger.close();
    println!("   delivered: {}", logger.metrics().delivered());

    println!("\n3. Emits after close are rejected:");
    logger.info("never printed");
    println!("   rejected: {}", logger.metrics().rejected());

    println!("\n=== Example completed successfully! ===");
}
