//! Core logger types and traits

pub mod config;
pub mod diagnostics;
mod dispatch;
pub mod error;
pub mod log_line;
pub mod logger;
pub mod metrics;
pub mod processor;
pub mod severity;
mod ticker;
mod worker;

pub use config::Config;
pub use error::{LoggerError, Result};
pub use log_line::{LogLine, FORMAT_ERROR_MARKER};
pub use logger::{Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use processor::Processor;
pub use severity::{Severity, SeverityMask};
pub use ticker::TICKER_THREAD_NAME;
pub use worker::WORKER_THREAD_NAME;
