//! Console processor implementation

use crate::core::{LogLine, Processor, Severity};
use colored::Colorize;

/// Prints each line as `[severity] message "origin"`.
///
/// Error lines go to stderr, everything else to stdout.
pub struct ConsoleProcessor {
    use_colors: bool,
    show_timestamp: bool,
}

impl ConsoleProcessor {
    pub fn new() -> Self {
        Self {
            use_colors: true,
            show_timestamp: false,
        }
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self {
            use_colors,
            show_timestamp: false,
        }
    }

    /// Prefix each line with its RFC 3339 timestamp
    ///
    /// # Example
    ///
    /// ```
    /// use rust_dispatch_logger::processors::ConsoleProcessor;
    ///
    /// let processor = ConsoleProcessor::new().with_timestamps(true);
    /// ```
    #[must_use]
    pub fn with_timestamps(mut self, show_timestamp: bool) -> Self {
        self.show_timestamp = show_timestamp;
        self
    }

    pub fn format_line(&self, line: &LogLine) -> String {
        let severity = if self.use_colors {
            line.severity
                .to_str()
                .color(line.severity.color())
                .to_string()
        } else {
            line.severity.to_str().to_string()
        };

        let mut output = String::new();
        if self.show_timestamp {
            output.push_str(&line.timestamp.to_rfc3339());
            output.push(' ');
        }
        output.push_str(&format!("[{}] {}", severity, line.message));
        if let Some(ref origin) = line.origin {
            output.push_str(&format!(" \"{}\"", origin));
        }
        output
    }
}

impl Default for ConsoleProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl Processor for ConsoleProcessor {
    fn process(&mut self, line: &LogLine) {
        let output = self.format_line(line);

        match line.severity {
            Severity::Error => eprintln!("{}", output),
            _ => println!("{}", output),
        }
    }
}
