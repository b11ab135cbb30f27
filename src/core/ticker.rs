//! Diagnostic ticker: periodic thread-count reports at debug severity

use super::{
    diagnostics::thread_count_message,
    dispatch::Dispatcher,
    error::{panic_message, LoggerError, Result},
    log_line::LogLine,
    severity::Severity,
    worker,
};
use crossbeam_channel::{select, tick, Receiver, Sender};
use std::panic::Location;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

pub const TICKER_THREAD_NAME: &str = "dispatch-logger-ticker";

pub(crate) struct Ticker {
    stop: Option<Sender<()>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl Ticker {
    /// Start reporting every `interval`.
    ///
    /// Callers only spawn a ticker for a non-zero interval; a zero interval
    /// never reaches the timer.
    pub(crate) fn spawn(interval: Duration, dispatcher: Arc<Dispatcher>) -> Result<Self> {
        if interval.is_zero() {
            return Err(LoggerError::config(
                "ticker",
                "interval must be positive to start the diagnostic ticker",
            ));
        }

        let (stop, stopped) = crossbeam_channel::bounded::<()>(0);
        let handle = thread::Builder::new()
            .name(TICKER_THREAD_NAME.into())
            .spawn(move || run(interval, &dispatcher, &stopped))
            .map_err(|e| LoggerError::spawn_failed("ticker", e))?;

        Ok(Self {
            stop: Some(stop),
            handle: Some(handle),
        })
    }

    /// Stop the timer and wait for the thread to exit.
    pub(crate) fn stop(mut self) {
        self.shutdown();
    }

    /// Like [`Ticker::stop`], but gives up waiting at `deadline`. On expiry the
    /// ticker is handed back; it exits on its own once any pending report
    /// is taken.
    pub(crate) fn stop_until(mut self, deadline: Instant) -> std::result::Result<(), Self> {
        drop(self.stop.take());

        let finished = self
            .handle
            .as_ref()
            .map_or(true, |handle| worker::wait_finished(handle, deadline));
        if !finished {
            return Err(self);
        }

        self.shutdown();
        Ok(())
    }

    /// Signal the thread to stop without waiting for it.
    pub(crate) fn detach(mut self) {
        drop(self.stop.take());
        drop(self.handle.take());
    }

    fn shutdown(&mut self) {
        // Disconnecting the stop channel wakes the select loop.
        drop(self.stop.take());

        if let Some(handle) = self.handle.take() {
            if let Err(panic_info) = handle.join() {
                eprintln!(
                    "[LOGGER ERROR] Diagnostic ticker panicked: {}",
                    panic_message(panic_info.as_ref())
                );
            }
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run(interval: Duration, dispatcher: &Dispatcher, stopped: &Receiver<()>) {
    // One timer for the ticker's whole life.
    let ticks = tick(interval);

    loop {
        select! {
            recv(ticks) -> _ => emit_report(dispatcher),
            recv(stopped) -> _ => break,
        }
    }
}

fn emit_report(dispatcher: &Dispatcher) {
    if !dispatcher.is_enabled(Severity::Debug) || dispatcher.is_closed() {
        return;
    }

    let line = LogLine::new(Severity::Debug, thread_count_message())
        .with_location(Location::caller());
    if dispatcher.dispatch(line).is_ok() {
        dispatcher.metrics().record_diagnostic();
    }
}
