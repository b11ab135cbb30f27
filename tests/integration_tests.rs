//! Integration tests for the dispatch logger
//!
//! These tests verify:
//! - Severity gating with the default mask
//! - printf-style interpolation through the macros
//! - Drain-on-close and idempotent close
//! - Post-close emits and panicking processors
//! - Diagnostic ticker on/off behavior

use parking_lot::Mutex;
use rust_dispatch_logger::prelude::*;
use rust_dispatch_logger::{debug, error, notice, warning};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

fn collecting_processor() -> (impl Processor, Arc<Mutex<Vec<LogLine>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_clone = Arc::clone(&seen);
    let processor = move |line: &LogLine| seen_clone.lock().push(line.clone());
    (processor, seen)
}

#[test]
fn test_default_severities_scenario() {
    let (processor, seen) = collecting_processor();
    let logger = Logger::new(processor, Config::default());

    error!(logger, "x {}", "y");
    logger.info("test test");
    warning!(logger, "{}", "test test");
    notice!(logger, "test {}{}{}{}", "t", "e", "s", "t");
    debug!(logger, "hidden");
    logger.debug("hidden");

    logger.close();

    let seen = seen.lock();
    let messages: Vec<&str> = seen.iter().map(|l| l.message.as_str()).collect();
    assert_eq!(messages, vec!["x y", "test test", "test test", "test test"]);

    let severities: Vec<Severity> = seen.iter().map(|l| l.severity).collect();
    assert_eq!(
        severities,
        vec![
            Severity::Error,
            Severity::Info,
            Severity::Warning,
            Severity::Notice
        ]
    );
    assert!(seen.iter().all(|l| l.message != "hidden"));
}

#[test]
fn test_origin_names_this_file() {
    let (processor, seen) = collecting_processor();
    let logger = Logger::new(processor, Config::default());

    logger.notice("located");
    logger.close();

    let origin = seen.lock()[0].origin.clone().expect("origin captured");
    assert!(
        origin.contains("integration_tests.rs:"),
        "unexpected origin {}",
        origin
    );
}

#[test]
fn test_close_drains_every_accepted_line() {
    let processed = Arc::new(AtomicUsize::new(0));
    let processed_clone = Arc::clone(&processed);

    let logger = Logger::new(
        move |_: &LogLine| {
            // Slow processor: close must still wait for all of them
            thread::sleep(Duration::from_millis(2));
            processed_clone.fetch_add(1, Ordering::SeqCst);
        },
        Config::default(),
    );

    for i in 0..25 {
        logger.info(format!("Message {}", i));
    }
    logger.close();

    assert_eq!(processed.load(Ordering::SeqCst), 25);
    assert_eq!(logger.metrics().delivered(), 25);

    // No processor calls after close returns
    thread::sleep(Duration::from_millis(20));
    assert_eq!(processed.load(Ordering::SeqCst), 25);
}

#[test]
fn test_close_twice_is_noop() {
    let (processor, seen) = collecting_processor();
    let logger = Logger::new(processor, Config::default());

    logger.error("only line");
    logger.close();
    logger.close();

    assert!(logger.is_closed());
    assert_eq!(seen.lock().len(), 1);
}

#[test]
fn test_emit_after_close_is_safe_noop() {
    let (processor, seen) = collecting_processor();
    let logger = Logger::new(processor, Config::default());
    logger.close();

    logger.info("ignored");
    error!(logger, "ignored {}", 1);

    assert!(matches!(
        logger.try_log(Severity::Info, "ignored"),
        Err(LoggerError::LoggerStopped)
    ));
    assert!(seen.lock().is_empty());
    assert_eq!(logger.metrics().rejected(), 3);
}

#[test]
fn test_panicking_processor_does_not_kill_worker() {
    let (inner, seen) = collecting_processor();
    let mut inner = inner;

    let logger = Logger::new(
        move |line: &LogLine| {
            if line.message.contains("poison") {
                panic!("cannot render {}", line.message);
            }
            inner.process(line);
        },
        Config::default(),
    );

    logger.info("first");
    logger.error("poison pill");
    logger.info("second");
    logger.close();

    let messages: Vec<String> = seen.lock().iter().map(|l| l.message.clone()).collect();
    assert_eq!(messages, vec!["first".to_string(), "second".to_string()]);
    assert_eq!(logger.metrics().processor_panics(), 1);
    assert_eq!(logger.metrics().delivered(), 2);
}

#[test]
fn test_custom_severity_mask() {
    let (processor, seen) = collecting_processor();
    let logger = Logger::builder()
        .processor(processor)
        .severities(SeverityMask::none().with(Severity::Debug, true))
        .build();

    logger.error("dropped");
    logger.debug("kept");
    logger.close();

    let seen = seen.lock();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].message, "kept");
}

#[test]
fn test_ticker_disabled_emits_nothing() {
    let (processor, seen) = collecting_processor();
    let logger = Logger::builder()
        .processor(processor)
        .enable(Severity::Debug)
        .ticker_interval(Duration::ZERO)
        .build();

    thread::sleep(Duration::from_millis(100));
    logger.close();

    assert!(seen.lock().is_empty());
    assert_eq!(logger.metrics().diagnostics_emitted(), 0);
}

#[test]
fn test_ticker_reports_periodically() {
    let (processor, seen) = collecting_processor();
    let interval = Duration::from_millis(20);
    let logger = Logger::builder()
        .processor(processor)
        .enable(Severity::Debug)
        .config(Config::default().with_ticker_interval(interval))
        .build();

    // k = 3 reports expected within roughly interval * (k + 1), with slack
    thread::sleep(interval * 4 + Duration::from_millis(200));
    logger.close();

    let seen = seen.lock();
    let reports: Vec<&LogLine> = seen
        .iter()
        .filter(|l| l.message.starts_with("Thread count: "))
        .collect();
    assert!(reports.len() >= 3, "only {} reports", reports.len());
    assert!(reports.iter().all(|l| l.severity == Severity::Debug));
    assert_eq!(logger.metrics().diagnostics_emitted() as usize, reports.len());
}

#[test]
fn test_ticker_respects_debug_gate() {
    let (processor, seen) = collecting_processor();
    let logger = Logger::new(
        processor,
        Config::default().with_ticker_interval(Duration::from_millis(10)),
    );

    thread::sleep(Duration::from_millis(80));
    logger.close();

    assert!(seen.lock().is_empty());
}

#[test]
fn test_no_diagnostics_after_close() {
    let (processor, seen) = collecting_processor();
    let logger = Logger::builder()
        .processor(processor)
        .enable(Severity::Debug)
        .ticker_interval(Duration::from_millis(5))
        .build();

    thread::sleep(Duration::from_millis(30));
    logger.close();
    let count = seen.lock().len();

    thread::sleep(Duration::from_millis(30));
    assert_eq!(seen.lock().len(), count);
}

#[test]
fn test_drop_closes_logger() {
    let (processor, seen) = collecting_processor();
    {
        let logger = Logger::new(processor, Config::default());
        logger.warning("flushed by drop");
    }

    assert_eq!(seen.lock().len(), 1);
}

#[test]
fn test_config_from_json() {
    let config: Config =
        serde_json::from_str(r#"{"ticker_interval":{"secs":2,"nanos":0}}"#).expect("valid json");
    assert_eq!(config.ticker_interval, Duration::from_secs(2));

    let config: Config = serde_json::from_str("{}").expect("defaults apply");
    assert!(!config.ticker_enabled());
}

#[test]
fn test_severity_serializes_lowercase() {
    let json = serde_json::to_string(&Severity::Notice).expect("serialize");
    assert_eq!(json, "\"notice\"");

    let severity: Severity = serde_json::from_str("\"warning\"").expect("deserialize");
    assert_eq!(severity, Severity::Warning);
}

#[test]
fn test_processor_can_serialize_lines() {
    let rendered = Arc::new(Mutex::new(Vec::new()));
    let rendered_clone = Arc::clone(&rendered);
    let logger = Logger::new(
        move |line: &LogLine| {
            if let Ok(json) = serde_json::to_value(line) {
                rendered_clone.lock().push(json);
            }
        },
        Config::default(),
    );

    logger.notice("as json");
    logger.close();

    let rendered = rendered.lock();
    assert_eq!(rendered.len(), 1);
    assert_eq!(rendered[0]["message"], "as json");
    assert_eq!(rendered[0]["severity"], "notice");
    let origin = rendered[0]["origin"].as_str().expect("origin serialized");
    assert!(origin.contains("integration_tests.rs:"), "origin was {}", origin);
}
