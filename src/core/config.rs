//! Logger construction options

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Options recognized at logger construction.
///
/// # Example
///
/// ```
/// use rust_dispatch_logger::Config;
/// use std::time::Duration;
///
/// let config = Config::default().with_ticker_interval(Duration::from_secs(30));
/// assert!(config.ticker_enabled());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Period of the diagnostic thread-count report; zero disables it
    pub ticker_interval: Duration,
}

impl Config {
    pub const fn new() -> Self {
        Self {
            ticker_interval: Duration::ZERO,
        }
    }

    #[must_use]
    pub fn with_ticker_interval(mut self, interval: Duration) -> Self {
        self.ticker_interval = interval;
        self
    }

    #[inline]
    pub fn ticker_enabled(&self) -> bool {
        !self.ticker_interval.is_zero()
    }

    /// Overlay `changes` on top of `self`.
    ///
    /// Only positive values override; a zero interval in `changes` keeps the
    /// base value.
    #[must_use]
    pub fn merge(mut self, changes: &Config) -> Self {
        if !changes.ticker_interval.is_zero() {
            self.ticker_interval = changes.ticker_interval;
        }
        self
    }
}
