//! The single consumer draining the dispatch queue

use super::{
    error::{panic_message, LoggerError, Result},
    log_line::LogLine,
    metrics::LoggerMetrics,
    processor::Processor,
};
use crossbeam_channel::Receiver;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

pub const WORKER_THREAD_NAME: &str = "dispatch-logger-worker";

/// How often a bounded shutdown checks whether a thread has exited
const SHUTDOWN_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Start the worker thread.
///
/// The thread runs until every sender of `receiver` is dropped and the
/// queue is empty.
pub(crate) fn spawn(
    receiver: Receiver<LogLine>,
    processor: Box<dyn Processor>,
    metrics: Arc<LoggerMetrics>,
) -> Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name(WORKER_THREAD_NAME.into())
        .spawn(move || run(receiver, processor, &metrics))
        .map_err(|e| LoggerError::spawn_failed("worker", e))
}

fn run(receiver: Receiver<LogLine>, mut processor: Box<dyn Processor>, metrics: &LoggerMetrics) {
    for line in receiver.iter() {
        process_line(processor.as_mut(), &line, metrics);
    }
}

/// Poll `handle` until its thread exits or `deadline` passes. Returns `true`
/// if the thread has exited; it is not joined here.
pub(crate) fn wait_finished(handle: &thread::JoinHandle<()>, deadline: Instant) -> bool {
    loop {
        if handle.is_finished() {
            return true;
        }

        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return false;
        }
        thread::sleep(remaining.min(SHUTDOWN_POLL_INTERVAL));
    }
}

/// Hand one line to the processor.
///
/// A panic inside the processor is contained to this line; the worker keeps
/// draining the queue.
fn process_line(processor: &mut dyn Processor, line: &LogLine, metrics: &LoggerMetrics) {
    let result = catch_unwind(AssertUnwindSafe(|| processor.process(line)));

    match result {
        Ok(()) => {
            metrics.record_delivered();
        }
        Err(panic_info) => {
            metrics.record_processor_panic();
            eprintln!(
                "[LOGGER CRITICAL] Processor panicked on {} line: {}. \
                 Worker continues with the next line.",
                line.severity,
                panic_message(panic_info.as_ref())
            );
        }
    }
}
