//! Log line record

use super::severity::Severity;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::{self, Write};
use std::panic::Location;

/// Appended to a message whose arguments failed to format
pub const FORMAT_ERROR_MARKER: &str = "<formatting error>";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogLine {
    pub message: String,
    pub severity: Severity,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
}

impl LogLine {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity,
            timestamp: Utc::now(),
            origin: None,
        }
    }

    /// Build a line from format arguments.
    ///
    /// A `Display` impl that returns an error does not abort the caller; the
    /// text produced so far is kept and [`FORMAT_ERROR_MARKER`] is appended.
    pub fn from_args(severity: Severity, args: fmt::Arguments<'_>) -> Self {
        let message = match args.as_str() {
            Some(s) => s.to_string(),
            None => {
                let mut buf = String::new();
                if buf.write_fmt(args).is_err() {
                    buf.push_str(FORMAT_ERROR_MARKER);
                }
                buf
            }
        };
        Self::new(severity, message)
    }

    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    pub fn with_location(self, location: &Location<'_>) -> Self {
        self.with_origin(format!("{}:{}", location.file(), location.line()))
    }
}
