//! Severity definitions and the per-logger enabled mask

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
    Notice,
    Debug,
}

impl Severity {
    /// Every severity, in declaration order
    pub const ALL: [Severity; 5] = [
        Severity::Error,
        Severity::Warning,
        Severity::Info,
        Severity::Notice,
        Severity::Debug,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
            Severity::Notice => "notice",
            Severity::Debug => "debug",
        }
    }

    #[cfg(feature = "console")]
    pub fn color(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            Severity::Error => Red,
            Severity::Warning => Yellow,
            Severity::Info => Green,
            Severity::Notice => Cyan,
            Severity::Debug => Blue,
        }
    }

    const fn index(self) -> usize {
        match self {
            Severity::Error => 0,
            Severity::Warning => 1,
            Severity::Info => 2,
            Severity::Notice => 3,
            Severity::Debug => 4,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "error" => Ok(Severity::Error),
            "warning" | "warn" => Ok(Severity::Warning),
            "info" => Ok(Severity::Info),
            "notice" => Ok(Severity::Notice),
            "debug" => Ok(Severity::Debug),
            _ => Err(format!("Invalid severity: '{}'", s)),
        }
    }
}

/// Which severities a logger dispatches.
///
/// Fixed once the logger is built, so reads need no synchronization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeverityMask {
    enabled: [bool; 5],
}

impl SeverityMask {
    /// Everything except [`Severity::Debug`]
    pub const fn new() -> Self {
        Self {
            enabled: [true, true, true, true, false],
        }
    }

    pub const fn all() -> Self {
        Self { enabled: [true; 5] }
    }

    pub const fn none() -> Self {
        Self { enabled: [false; 5] }
    }

    #[inline]
    pub fn is_enabled(&self, severity: Severity) -> bool {
        self.enabled[severity.index()]
    }

    pub fn set(&mut self, severity: Severity, enabled: bool) {
        self.enabled[severity.index()] = enabled;
    }

    #[must_use]
    pub fn with(mut self, severity: Severity, enabled: bool) -> Self {
        self.set(severity, enabled);
        self
    }
}

impl Default for SeverityMask {
    fn default() -> Self {
        Self::new()
    }
}
