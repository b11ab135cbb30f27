//! Logging macros with `format!`-style arguments.
//!
//! The arguments are only formatted when the severity is enabled on the
//! logger, so a suppressed `debug!` costs one mask lookup.
//!
//! # Examples
//!
//! ```
//! use rust_dispatch_logger::prelude::*;
//! use rust_dispatch_logger::{error, notice};
//!
//! let logger = Logger::new(|_: &LogLine| {}, Config::default());
//!
//! let port = 8080;
//! notice!(logger, "Server listening on port {}", port);
//! error!(logger, "x {}", "y");
//! logger.close();
//! ```

/// Log a message at an explicit severity.
///
/// # Examples
///
/// ```
/// # use rust_dispatch_logger::prelude::*;
/// # let logger = Logger::new(|_: &LogLine| {}, Config::default());
/// use rust_dispatch_logger::log;
/// log!(logger, Severity::Info, "Simple message");
/// log!(logger, Severity::Error, "Error code: {}", 500);
/// # logger.close();
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $severity:expr, $($arg:tt)+) => {
        $logger.log_fmt($severity, format_args!($($arg)+))
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Error, $($arg)+)
    };
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # use rust_dispatch_logger::prelude::*;
/// # let logger = Logger::new(|_: &LogLine| {}, Config::default());
/// use rust_dispatch_logger::warning;
/// warning!(logger, "Retry attempt {} of {}", 3, 5);
/// # logger.close();
/// ```
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Warning, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Info, $($arg)+)
    };
}

/// Log a notice-level message.
#[macro_export]
macro_rules! notice {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Notice, $($arg)+)
    };
}

/// Log a debug-level message. Dropped unless the logger enables debug.
///
/// # Examples
///
/// ```
/// # use rust_dispatch_logger::prelude::*;
/// # let logger = Logger::builder().processor(|_: &LogLine| {}).enable(Severity::Debug).build();
/// use rust_dispatch_logger::debug;
/// debug!(logger, "Counter value: {}", 10);
/// # logger.close();
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Debug, $($arg)+)
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{Config, LogLine, Logger, Severity};
    use parking_lot::Mutex;
    use std::fmt;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn collecting_logger() -> (Logger, Arc<Mutex<Vec<String>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = Arc::clone(&seen);
        let logger = Logger::new(
            move |line: &LogLine| seen_clone.lock().push(line.message.clone()),
            Config::default(),
        );
        (logger, seen)
    }

    #[test]
    fn test_severity_macros_interpolate() {
        let (logger, seen) = collecting_logger();

        error!(logger, "x {}", "y");
        info!(logger, "test test");
        warning!(logger, "{}", "test test");
        notice!(logger, "test {}{}{}{}", "t", "e", "s", "t");
        debug!(logger, "hidden");
        logger.close();

        assert_eq!(
            *seen.lock(),
            vec!["x y", "test test", "test test", "test test"]
        );
    }

    #[test]
    fn test_log_macro_with_explicit_severity() {
        let (logger, seen) = collecting_logger();

        log!(logger, Severity::Notice, "code {}", 7);
        logger.close();

        assert_eq!(*seen.lock(), vec!["code 7"]);
    }

    #[test]
    fn test_disabled_macro_skips_formatting() {
        struct Counting<'a>(&'a AtomicUsize);

        impl fmt::Display for Counting<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fetch_add(1, Ordering::Relaxed);
                f.write_str("counted")
            }
        }

        let formatted = AtomicUsize::new(0);
        let (logger, seen) = collecting_logger();

        debug!(logger, "{}", Counting(&formatted));
        info!(logger, "{}", Counting(&formatted));
        logger.close();

        assert_eq!(formatted.load(Ordering::Relaxed), 1);
        assert_eq!(*seen.lock(), vec!["counted"]);
    }
}
