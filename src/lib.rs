//! # Rust Dispatch Logger
//!
//! Severity-filtered logging with a single background worker.
//!
//! ## Features
//!
//! - **Backpressure**: emits rendezvous with the worker instead of buffering
//! - **Global ordering**: one queue, one consumer, FIFO across all threads
//! - **Graceful shutdown**: `close` drains every accepted line, and is idempotent
//! - **Diagnostics**: optional periodic thread-count reports at debug severity

pub mod core;
pub mod macros;
pub mod processors;

pub mod prelude {
    #[cfg(feature = "console")]
    pub use crate::processors::ConsoleProcessor;
    pub use crate::core::{
        Config, LogLine, Logger, LoggerBuilder, LoggerError, LoggerMetrics, Processor, Result,
        Severity, SeverityMask,
    };
}

#[cfg(feature = "console")]
pub use crate::processors::ConsoleProcessor;
pub use crate::core::{
    Config, LogLine, Logger, LoggerBuilder, LoggerError, LoggerMetrics, Processor, Result,
    Severity, SeverityMask, FORMAT_ERROR_MARKER,
};
