//! Producer side of the dispatch queue
//!
//! The queue is a zero-capacity crossbeam channel: every send is a rendezvous
//! with the worker, which gives producers backpressure and a single global
//! FIFO order.

use super::{
    error::{LoggerError, Result},
    log_line::LogLine,
    metrics::LoggerMetrics,
    severity::{Severity, SeverityMask},
};
use crossbeam_channel::Sender;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, ThreadId};
use std::time::Instant;

pub(crate) struct Dispatcher {
    severities: SeverityMask,
    /// `None` once the logger is closed. Producers hold the read lock for the
    /// whole send, so taking the write lock waits out in-flight sends.
    sender: RwLock<Option<Sender<LogLine>>>,
    /// Set before `sender` is taken. Readable without the lock, which a
    /// pending close would otherwise hold up.
    closed: AtomicBool,
    worker_thread: ThreadId,
    metrics: Arc<LoggerMetrics>,
}

impl Dispatcher {
    pub(crate) fn new(
        severities: SeverityMask,
        sender: Sender<LogLine>,
        worker_thread: ThreadId,
        metrics: Arc<LoggerMetrics>,
    ) -> Self {
        Self {
            severities,
            sender: RwLock::new(Some(sender)),
            closed: AtomicBool::new(false),
            worker_thread,
            metrics,
        }
    }

    #[inline]
    pub(crate) fn is_enabled(&self, severity: Severity) -> bool {
        self.severities.is_enabled(severity)
    }

    pub(crate) fn severities(&self) -> SeverityMask {
        self.severities
    }

    pub(crate) fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    pub(crate) fn is_worker_thread(&self) -> bool {
        thread::current().id() == self.worker_thread
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Block until the worker takes `line`.
    pub(crate) fn dispatch(&self, line: LogLine) -> Result<()> {
        // The worker cannot rendezvous with itself.
        if self.is_worker_thread() {
            return Err(self.reject(LoggerError::ReentrantEmit));
        }
        if self.is_closed() {
            return Err(self.reject(LoggerError::LoggerStopped));
        }

        let sender = self.sender.read();
        match sender.as_ref() {
            Some(sender) => sender
                .send(line)
                .map_err(|_| self.reject(LoggerError::WorkerUnavailable)),
            None => Err(self.reject(LoggerError::LoggerStopped)),
        }
    }

    /// Refuse new lines without waiting for in-flight sends.
    pub(crate) fn mark_closed(&self) {
        self.closed.store(true, Ordering::Release);
    }

    /// Signal end-of-stream. Returns `false` if the queue was already closed.
    pub(crate) fn close_queue(&self) -> bool {
        self.mark_closed();
        self.sender.write().take().is_some()
    }

    /// Like [`Dispatcher::close_queue`], but gives up at `deadline` while
    /// in-flight sends still hold the lock. Returns `None` on expiry; new
    /// lines are refused either way.
    pub(crate) fn close_queue_until(&self, deadline: Instant) -> Option<bool> {
        self.mark_closed();
        let mut sender = self.sender.try_write_until(deadline)?;
        Some(sender.take().is_some())
    }

    fn reject(&self, err: LoggerError) -> LoggerError {
        // Alert once; later rejections are only counted
        if self.metrics.record_rejected() == 0 {
            eprintln!(
                "[LOGGER WARNING] Log line rejected: {}. \
                 Further rejections are counted in metrics only.",
                err
            );
        }
        err
    }
}
