//! Integration tests for logger system
//!
//! These tests verify:
//! - Level gating and dispatch
//! - Field merging across chained entries
//! - Hierarchical naming
//! - Structured errors
//! - Trace/stop brackets
//! - Handler failure isolation

use chrono::{TimeZone, Utc};
use rust_structured_logger::prelude::*;
use rust_structured_logger::{DURATION_KEY, ERROR_KEY};
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

fn logger_with_memory(level: LogLevel) -> (Logger, MemoryHandler) {
    let memory = MemoryHandler::new();
    let logger = Logger::builder()
        .min_level(level)
        .handler(memory.clone())
        .build()
        .expect("logger with handler");
    (logger, memory)
}

#[derive(Debug)]
struct QueryError {
    retries: i64,
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "query failed")
    }
}

impl std::error::Error for QueryError {}

impl Fielder for QueryError {
    fn fields(&self) -> Fields {
        Fields::new().with_field("retries", self.retries)
    }
}

#[test]
fn test_threshold_gates_handler_calls() {
    let (logger, memory) = logger_with_memory(LogLevel::Info);

    logger.with_field("user", "a").debug("ignored");
    assert!(memory.is_empty());

    logger.with_field("user", "a").info("hello");
    let entries = memory.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].level, LogLevel::Info);
    assert_eq!(entries[0].message, "hello");
    assert_eq!(entries[0].fields, Fields::new().with_field("user", "a"));
}

#[test]
fn test_every_level_at_or_above_threshold_is_emitted() {
    for threshold in LogLevel::ALL {
        let (logger, memory) = logger_with_memory(threshold);
        let entry = logger.with_field("k", 1);

        for level in LogLevel::ALL.into_iter().filter(|l| *l != LogLevel::Fatal) {
            entry.log(level, level.to_str());
        }

        let expected: Vec<LogLevel> = LogLevel::ALL
            .into_iter()
            .filter(|l| *l != LogLevel::Fatal && *l >= threshold)
            .collect();
        let seen: Vec<LogLevel> = memory.entries().iter().map(|e| e.level).collect();
        assert_eq!(seen, expected, "threshold {}", threshold);
    }
}

#[test]
fn test_hierarchical_names() {
    let (logger, memory) = logger_with_memory(LogLevel::Info);

    logger.named("db").named("pool").info("ok");
    logger.info("root");

    let entries = memory.entries();
    assert_eq!(entries[0].name.as_deref(), Some("db/pool"));
    assert_eq!(entries[1].name, None);
}

#[test]
fn test_structured_error_merges_its_fields() {
    let (logger, memory) = logger_with_memory(LogLevel::Info);
    let err = QueryError { retries: 3 };

    logger.with_structured_error(Some(&err)).error("failed");

    let record = memory.last().unwrap();
    assert_eq!(record.level, LogLevel::Error);
    assert_eq!(record.fields.get("retries"), Some(&FieldValue::Int(3)));
    let error = record.fields.get(ERROR_KEY).and_then(FieldValue::as_error).unwrap();
    assert_eq!(error.message(), "query failed");
}

#[test]
fn test_plain_error_does_not_layer_fields() {
    let (logger, memory) = logger_with_memory(LogLevel::Info);
    let err = QueryError { retries: 3 };

    logger.with_error(Some(&err)).error("failed");

    let record = memory.last().unwrap();
    assert_eq!(record.fields.names(), vec![ERROR_KEY]);
}

#[test]
fn test_with_error_none_keeps_chain_unchanged() {
    let (logger, memory) = logger_with_memory(LogLevel::Info);
    let outcome: std::io::Result<()> = Ok(());

    logger
        .named("io")
        .with_field("path", "/tmp/x")
        .with_error(outcome.as_ref().err())
        .info("wrote");

    let record = memory.last().unwrap();
    assert_eq!(record.name.as_deref(), Some("io"));
    assert_eq!(record.fields.names(), vec!["path"]);
}

#[test]
fn test_shared_parent_entries_do_not_leak_fields() {
    let (logger, memory) = logger_with_memory(LogLevel::Info);
    let request = logger.with_field("request_id", "r-1");

    request.with_field("step", "auth").info("a");
    request.with_field("step", "load").info("b");
    request.info("c");

    let entries = memory.entries();
    assert_eq!(entries[0].fields.get("step"), Some(&FieldValue::from("auth")));
    assert_eq!(entries[1].fields.get("step"), Some(&FieldValue::from("load")));
    assert_eq!(entries[2].fields.names(), vec!["request_id"]);
}

#[test]
fn test_trace_and_stop_bracket() {
    let memory = MemoryHandler::new();
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).unwrap(),
    ));
    let logger = Logger::builder()
        .handler(memory.clone())
        .clock_arc(clock.clone())
        .build()
        .unwrap();

    let trace = logger.with_field("file", "a.txt").trace("upload");
    assert_eq!(memory.len(), 1);
    assert_eq!(memory.last().unwrap().level, LogLevel::Info);
    assert_eq!(memory.last().unwrap().message, "upload");

    clock.advance(Duration::from_millis(42));
    trace.stop(None::<&std::io::Error>);

    let done = memory.last().unwrap();
    assert_eq!(memory.len(), 2);
    assert_eq!(done.level, LogLevel::Info);
    assert_eq!(done.message, "upload");
    assert_eq!(done.fields.get(DURATION_KEY), Some(&FieldValue::Int(42)));
    assert_eq!(done.fields.get("file"), Some(&FieldValue::from("a.txt")));
    assert!(!done.fields.contains_key(ERROR_KEY));

    let failed = logger.trace("download");
    let err = std::io::Error::new(std::io::ErrorKind::TimedOut, "timed out");
    failed.stop(Some(&err));

    let last = memory.last().unwrap();
    assert_eq!(memory.len(), 4);
    assert_eq!(last.level, LogLevel::Error);
    assert!(last.fields.contains_key(DURATION_KEY));
    assert!(last.fields.contains_key(ERROR_KEY));
}

#[test]
fn test_traced_closure_failure() {
    let (logger, memory) = logger_with_memory(LogLevel::Info);

    let result: std::io::Result<()> = logger.traced("flush", || {
        Err(std::io::Error::new(std::io::ErrorKind::Other, "broken pipe"))
    });

    assert!(result.is_err());
    let entries = memory.entries();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[1].level, LogLevel::Error);
    assert_eq!(entries[1].message, "flush");
}

#[test]
fn test_trace_below_threshold_still_stops() {
    let (logger, memory) = logger_with_memory(LogLevel::Error);

    let trace = logger.trace("quiet");
    assert!(memory.is_empty());

    let err = std::io::Error::new(std::io::ErrorKind::Other, "boom");
    trace.stop(Some(&err));
    assert_eq!(memory.len(), 1);
    assert_eq!(memory.last().unwrap().level, LogLevel::Error);
}

#[test]
fn test_handler_failure_never_reaches_caller() {
    let calls = Arc::new(AtomicUsize::new(0));
    let reported = Arc::new(AtomicUsize::new(0));
    let calls_in_handler = Arc::clone(&calls);
    let reported_in_callback = Arc::clone(&reported);

    let logger = Logger::builder()
        .handler(HandlerFn::new(move |_: &LogEntry| {
            calls_in_handler.fetch_add(1, Ordering::SeqCst);
            Err(LoggerError::other("Simulated failure"))
        }))
        .on_handler_error(Arc::new(move |_: &LoggerError| {
            reported_in_callback.fetch_add(1, Ordering::SeqCst);
        }))
        .build()
        .unwrap();

    for _ in 0..5 {
        logger.info("Test message");
    }

    assert_eq!(calls.load(Ordering::SeqCst), 5);
    assert_eq!(reported.load(Ordering::SeqCst), 5);
}

#[test]
fn test_config_built_logger_writes_json() {
    let config = LoggerConfig::from_json(r#"{"level":"warn","format":"json"}"#).unwrap();
    let logger = config.into_logger().unwrap();

    assert_eq!(logger.level(), LogLevel::Warn);
    assert!(!logger.is_enabled(LogLevel::Info));
    logger.with_field("component", "config").warn("loaded");
}

#[test]
fn test_multi_handler_with_json_and_memory() {
    let memory = MemoryHandler::new();
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("multi.jsonl");

    let logger = Logger::new(
        MultiHandler::default()
            .with_handler(JsonHandler::file(&path).unwrap())
            .with_handler(memory.clone()),
    );
    logger.named("svc").with_field("n", 1).info("fanned out");

    assert_eq!(memory.len(), 1);
    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("\"fanned out\""));
    assert!(content.contains("\"svc\""));
}
