//! Processor trait: the consumer end of the dispatch queue

use super::log_line::LogLine;

/// Receives every dispatched line, one at a time, on the worker thread.
///
/// Closures taking `&LogLine` implement this trait directly:
///
/// ```
/// use rust_dispatch_logger::{Config, Logger};
///
/// let logger = Logger::new(|line: &rust_dispatch_logger::LogLine| {
///     println!("{}: {}", line.severity, line.message);
/// }, Config::default());
/// logger.info("ready");
/// logger.close();
/// ```
///
/// A processor must not emit through the logger that drives it; such emits
/// are rejected.
pub trait Processor: Send + 'static {
    fn process(&mut self, line: &LogLine);
}

impl<F> Processor for F
where
    F: FnMut(&LogLine) + Send + 'static,
{
    #[inline]
    fn process(&mut self, line: &LogLine) {
        self(line)
    }
}
