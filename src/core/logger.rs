//! Main logger implementation

use super::{
    config::Config,
    dispatch::Dispatcher,
    error::{LoggerError, Result},
    log_line::LogLine,
    metrics::LoggerMetrics,
    processor::Processor,
    severity::{Severity, SeverityMask},
    ticker::Ticker,
    worker,
};
use crossbeam_channel::bounded;
use parking_lot::Mutex;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Severity-filtered logger with one background worker.
///
/// Every line that passes the severity filter is handed to the worker through
/// a rendezvous channel, so an emit call returns only after the worker has
/// taken the line. Lines reach the processor in the order their sends
/// completed.
///
/// # Example
///
/// ```
/// use rust_dispatch_logger::{Config, LogLine, Logger};
///
/// let logger = Logger::new(
///     |line: &LogLine| println!("[{}] {}", line.severity, line.message),
///     Config::default(),
/// );
/// logger.info("service started");
/// logger.debug("not dispatched: debug is off by default");
/// logger.close();
/// ```
pub struct Logger {
    dispatcher: Arc<Dispatcher>,
    handles: Mutex<Handles>,
}

struct Handles {
    worker: Option<thread::JoinHandle<()>>,
    ticker: Option<Ticker>,
}

impl Logger {
    /// Start a logger with default severities.
    ///
    /// # Panics
    ///
    /// Panics if the operating system refuses to spawn the worker thread; use
    /// [`LoggerBuilder::try_build`] to handle that case.
    #[must_use]
    pub fn new<P: Processor>(processor: P, config: Config) -> Self {
        Self::builder().processor(processor).config(config).build()
    }

    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    #[inline]
    pub fn is_enabled(&self, severity: Severity) -> bool {
        self.dispatcher.is_enabled(severity)
    }

    pub fn severities(&self) -> SeverityMask {
        self.dispatcher.severities()
    }

    /// `true` once the logger refuses new lines
    pub fn is_closed(&self) -> bool {
        self.dispatcher.is_closed()
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        self.dispatcher.metrics()
    }

    /// Dispatch `message` if `severity` is enabled.
    ///
    /// Blocks until the worker takes the line. After `close` the call is a
    /// no-op; see [`Logger::try_log`] to observe that.
    #[track_caller]
    pub fn log(&self, severity: Severity, message: impl Into<String>) {
        let _ = self.try_log(severity, message);
    }

    /// Like [`Logger::log`] but reports why a line was not dispatched.
    ///
    /// A disabled severity is not an error and returns `Ok(())`.
    #[track_caller]
    pub fn try_log(&self, severity: Severity, message: impl Into<String>) -> Result<()> {
        if !self.is_enabled(severity) {
            return Ok(());
        }

        let line = LogLine::new(severity, message).with_location(Location::caller());
        self.dispatcher.dispatch(line)
    }

    /// Dispatch pre-parsed format arguments. Formatting only happens when
    /// `severity` is enabled.
    #[track_caller]
    pub fn log_fmt(&self, severity: Severity, args: fmt::Arguments<'_>) {
        if !self.is_enabled(severity) {
            return;
        }

        let line = LogLine::from_args(severity, args).with_location(Location::caller());
        let _ = self.dispatcher.dispatch(line);
    }

    #[inline]
    #[track_caller]
    pub fn error(&self, message: impl Into<String>) {
        self.log(Severity::Error, message);
    }

    #[inline]
    #[track_caller]
    pub fn warning(&self, message: impl Into<String>) {
        self.log(Severity::Warning, message);
    }

    #[inline]
    #[track_caller]
    pub fn info(&self, message: impl Into<String>) {
        self.log(Severity::Info, message);
    }

    #[inline]
    #[track_caller]
    pub fn notice(&self, message: impl Into<String>) {
        self.log(Severity::Notice, message);
    }

    #[inline]
    #[track_caller]
    pub fn debug(&self, message: impl Into<String>) {
        self.log(Severity::Debug, message);
    }

    /// Stop accepting lines and wait until the worker has processed every line
    /// already handed to it.
    ///
    /// Calling `close` again is a no-op. Emits racing with `close` either
    /// complete before it closes the queue or are rejected.
    pub fn close(&self) {
        if let Err(e) = self.shutdown(None) {
            eprintln!("[LOGGER ERROR] Failed to close logger: {}", e);
        }
    }

    /// Like [`Logger::close`], but gives up after `timeout`.
    ///
    /// The deadline covers the whole shutdown: stopping the ticker, waiting
    /// for producers parked in a send, and draining the worker. New lines are
    /// refused either way. On timeout the worker keeps draining in the
    /// background and a later `close` finishes the job.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use rust_dispatch_logger::{Config, LogLine, Logger};
    /// use std::time::Duration;
    ///
    /// let logger = Logger::new(|_: &LogLine| {}, Config::default());
    /// logger.info("Important message");
    ///
    /// if logger.close_timeout(Duration::from_secs(10)).is_err() {
    ///     eprintln!("Warning: logger shutdown timed out");
    /// }
    /// ```
    pub fn close_timeout(&self, timeout: Duration) -> Result<()> {
        self.shutdown(Some(timeout))
    }

    fn shutdown(&self, timeout: Option<Duration>) -> Result<()> {
        // Joining the worker from itself would never return.
        if self.dispatcher.is_worker_thread() {
            return Err(LoggerError::ReentrantClose);
        }

        let deadline = timeout.and_then(|timeout| Instant::now().checked_add(timeout));
        match (timeout, deadline) {
            (Some(timeout), Some(deadline)) => self.shutdown_until(timeout, deadline),
            // A timeout too large to represent waits like `close`.
            _ => self.shutdown_blocking(),
        }
    }

    fn shutdown_blocking(&self) -> Result<()> {
        let mut handles = self.handles.lock();

        // Stop the ticker first so it never races the end-of-stream signal.
        if let Some(ticker) = handles.ticker.take() {
            ticker.stop();
        }

        self.dispatcher.close_queue();

        match handles.worker.take() {
            Some(handle) => handle.join().map_err(LoggerError::worker_panicked),
            None => Ok(()),
        }
    }

    fn shutdown_until(&self, timeout: Duration, deadline: Instant) -> Result<()> {
        let expired = || {
            self.dispatcher.mark_closed();
            eprintln!(
                "[LOGGER WARNING] Logger did not shut down within {:?}. \
                 The worker keeps draining in the background.",
                timeout
            );
            LoggerError::ShutdownTimeout { timeout }
        };

        let Some(mut handles) = self.handles.try_lock_until(deadline) else {
            return Err(expired());
        };

        if let Some(ticker) = handles.ticker.take() {
            if let Err(ticker) = ticker.stop_until(deadline) {
                handles.ticker = Some(ticker);
                return Err(expired());
            }
        }

        if self.dispatcher.close_queue_until(deadline).is_none() {
            return Err(expired());
        }

        let Some(handle) = handles.worker.take() else {
            return Ok(());
        };

        if worker::wait_finished(&handle, deadline) {
            handle.join().map_err(LoggerError::worker_panicked)
        } else {
            handles.worker = Some(handle);
            Err(expired())
        }
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if self.dispatcher.is_worker_thread() {
            // Dropped from inside the processor: the worker and a ticker
            // parked in a send can only finish after this call returns.
            self.dispatcher.mark_closed();
            if let Some(ticker) = self.handles.get_mut().ticker.take() {
                ticker.detach();
            }
        } else {
            self.close();
        }

        let rejected = self.metrics().rejected();
        if rejected > 0 {
            eprintln!(
                "[LOGGER WARNING] Logger shut down after rejecting {} log lines",
                rejected
            );
        }
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use rust_dispatch_logger::prelude::*;
/// use std::time::Duration;
///
/// let logger = Logger::builder()
///     .processor(|line: &LogLine| println!("{}", line.message))
///     .enable(Severity::Debug)
///     .ticker_interval(Duration::from_secs(60))
///     .build();
/// logger.close();
/// ```
pub struct LoggerBuilder {
    processor: Option<Box<dyn Processor>>,
    config: Config,
    severities: SeverityMask,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            processor: None,
            config: Config::default(),
            severities: SeverityMask::default(),
        }
    }

    /// Set the processor that receives every dispatched line
    #[must_use = "builder methods return a new value"]
    pub fn processor<P: Processor>(mut self, processor: P) -> Self {
        self.processor = Some(Box::new(processor));
        self
    }

    /// Merge construction options; only positive values override
    #[must_use = "builder methods return a new value"]
    pub fn config(mut self, config: Config) -> Self {
        self.config = self.config.merge(&config);
        self
    }

    /// Enable the diagnostic ticker; zero disables it
    #[must_use = "builder methods return a new value"]
    pub fn ticker_interval(mut self, interval: Duration) -> Self {
        self.config.ticker_interval = interval;
        self
    }

    /// Replace the whole severity mask
    #[must_use = "builder methods return a new value"]
    pub fn severities(mut self, severities: SeverityMask) -> Self {
        self.severities = severities;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn enable(mut self, severity: Severity) -> Self {
        self.severities.set(severity, true);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn disable(mut self, severity: Severity) -> Self {
        self.severities.set(severity, false);
        self
    }

    /// Build the Logger
    ///
    /// # Panics
    ///
    /// Panics where [`LoggerBuilder::try_build`] would return an error.
    pub fn build(self) -> Logger {
        match self.try_build() {
            Ok(logger) => logger,
            Err(e) => panic!("failed to start logger: {}", e),
        }
    }

    /// Build the Logger, starting the worker and, when configured, the
    /// diagnostic ticker
    pub fn try_build(self) -> Result<Logger> {
        let processor = match self.processor {
            Some(processor) => processor,
            None => default_processor()?,
        };

        let (sender, receiver) = bounded(0);
        let metrics = Arc::new(LoggerMetrics::new());
        let worker = worker::spawn(receiver, processor, Arc::clone(&metrics))?;
        let dispatcher = Arc::new(Dispatcher::new(
            self.severities,
            sender,
            worker.thread().id(),
            metrics,
        ));

        // Reports are debug lines; with debug off the ticker could never emit.
        let ticker = if self.config.ticker_enabled()
            && self.severities.is_enabled(Severity::Debug)
        {
            match Ticker::spawn(self.config.ticker_interval, Arc::clone(&dispatcher)) {
                Ok(ticker) => Some(ticker),
                Err(e) => {
                    dispatcher.close_queue();
                    let _ = worker.join();
                    return Err(e);
                }
            }
        } else {
            None
        };

        Ok(Logger {
            dispatcher,
            handles: Mutex::new(Handles {
                worker: Some(worker),
                ticker,
            }),
        })
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "console")]
fn default_processor() -> Result<Box<dyn Processor>> {
    Ok(Box::new(crate::processors::ConsoleProcessor::new()))
}

#[cfg(not(feature = "console"))]
fn default_processor() -> Result<Box<dyn Processor>> {
    Err(LoggerError::config(
        "LoggerBuilder",
        "no processor configured and the console feature is disabled",
    ))
}
