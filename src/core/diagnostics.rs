//! Live thread count of the process, reported by the diagnostic ticker

use std::fs;

/// Number of live OS threads in this process.
///
/// Read from the `Threads:` field of `/proc/self/status`; `None` where that
/// file does not exist or cannot be parsed.
pub fn live_thread_count() -> Option<usize> {
    let status = fs::read_to_string("/proc/self/status").ok()?;
    parse_thread_count(&status)
}

fn parse_thread_count(status: &str) -> Option<usize> {
    status.lines().find_map(|line| {
        line.strip_prefix("Threads:")?
            .split_whitespace()
            .next()
            .and_then(|raw| raw.parse::<usize>().ok())
    })
}

/// Message carried by each diagnostic line
pub fn thread_count_message() -> String {
    match live_thread_count() {
        Some(count) => format!("Thread count: {}", count),
        None => "Thread count: unavailable".to_string(),
    }
}
