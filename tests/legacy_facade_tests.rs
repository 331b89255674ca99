//! `LegacyHandler` against a capturing `log` implementation.
//!
//! Installing a `log` logger is process-global, so this binary holds a
//! single test.

use log::{LevelFilter, Metadata, Record};
use parking_lot::Mutex;
use rust_structured_logger::prelude::*;

struct Capture {
    records: Mutex<Vec<(log::Level, String, String)>>,
}

impl log::Log for Capture {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        self.records.lock().push((
            record.level(),
            record.target().to_string(),
            record.args().to_string(),
        ));
    }

    fn flush(&self) {}
}

static CAPTURE: Capture = Capture {
    records: parking_lot::const_mutex(Vec::new()),
};

#[test]
fn test_records_are_forwarded_to_log_facade() {
    log::set_logger(&CAPTURE).expect("no other logger installed");
    log::set_max_level(LevelFilter::Debug);

    let logger = Logger::builder()
        .min_level(LogLevel::Debug)
        .handler(LegacyHandler::new().with_default_target("app"))
        .build()
        .unwrap();

    logger.named("db").with_field("ms", 120).warn("slow query");
    logger.debug("startup");

    let records = CAPTURE.records.lock().clone();
    assert_eq!(records.len(), 2);

    assert_eq!(records[0].0, log::Level::Warn);
    assert_eq!(records[0].1, "db");
    assert!(records[0].2.starts_with(" WARN slow query"));
    assert!(records[0].2.ends_with(" ms=120"));

    assert_eq!(records[1].0, log::Level::Debug);
    assert_eq!(records[1].1, "app");
}
