//! Logger metrics for observability
//!
//! Counters describing what happened to emitted lines after they passed the
//! severity filter.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for logger observability
///
/// # Example
///
/// ```
/// use rust_dispatch_logger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
///
/// metrics.record_delivered();
/// metrics.record_rejected();
///
/// assert_eq!(metrics.delivered(), 1);
/// assert_eq!(metrics.rejected(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Lines the processor handled without panicking
    delivered: AtomicU64,

    /// Lines whose processor call panicked
    processor_panics: AtomicU64,

    /// Lines refused because the logger was closed, the worker was gone,
    /// or the emit came from the worker itself
    rejected: AtomicU64,

    /// Diagnostic lines handed to the queue by the ticker
    diagnostics_emitted: AtomicU64,
}

impl LoggerMetrics {
    pub const fn new() -> Self {
        Self {
            delivered: AtomicU64::new(0),
            processor_panics: AtomicU64::new(0),
            rejected: AtomicU64::new(0),
            diagnostics_emitted: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn delivered(&self) -> u64 {
        self.delivered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn processor_panics(&self) -> u64 {
        self.processor_panics.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn rejected(&self) -> u64 {
        self.rejected.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn diagnostics_emitted(&self) -> u64 {
        self.diagnostics_emitted.load(Ordering::Relaxed)
    }

    /// Returns the previous value
    #[inline]
    pub fn record_delivered(&self) -> u64 {
        self.delivered.fetch_add(1, Ordering::Relaxed)
    }

    /// Returns the previous value
    #[inline]
    pub fn record_processor_panic(&self) -> u64 {
        self.processor_panics.fetch_add(1, Ordering::Relaxed)
    }

    /// Returns the previous value
    #[inline]
    pub fn record_rejected(&self) -> u64 {
        self.rejected.fetch_add(1, Ordering::Relaxed)
    }

    /// Returns the previous value
    #[inline]
    pub fn record_diagnostic(&self) -> u64 {
        self.diagnostics_emitted.fetch_add(1, Ordering::Relaxed)
    }

    /// Total processor invocations, successful or not
    pub fn processed(&self) -> u64 {
        self.delivered() + self.processor_panics()
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LoggerMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            delivered: AtomicU64::new(self.delivered()),
            processor_panics: AtomicU64::new(self.processor_panics()),
            rejected: AtomicU64::new(self.rejected()),
            diagnostics_emitted: AtomicU64::new(self.diagnostics_emitted()),
        }
    }
}
