//! Criterion benchmarks for rust_structured_logger

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rust_structured_logger::prelude::*;

/// Accepts and drops every record.
struct NullHandler;

impl Handler for NullHandler {
    fn handle_log(&self, entry: &LogEntry) -> Result<()> {
        black_box(entry);
        Ok(())
    }
}

// ============================================================================
// Level Gating Benchmarks
// ============================================================================

fn bench_gating(c: &mut Criterion) {
    let mut group = c.benchmark_group("gating");
    group.throughput(Throughput::Elements(1));

    let logger = Logger::new(NullHandler);

    group.bench_function("filtered_debug", |b| {
        b.iter(|| logger.debug(black_box("Debug message")));
    });

    group.bench_function("filtered_debugf", |b| {
        b.iter(|| logger.debugf(format_args!("value {}", black_box(42))));
    });

    group.bench_function("emitted_info", |b| {
        b.iter(|| logger.info(black_box("Info message")));
    });

    group.finish();
}

// ============================================================================
// Entry Chain Benchmarks
// ============================================================================

fn bench_chains(c: &mut Criterion) {
    let mut group = c.benchmark_group("chains");
    group.throughput(Throughput::Elements(1));

    let logger = Logger::new(NullHandler);

    group.bench_function("with_field_info", |b| {
        b.iter(|| {
            logger
                .with_field("user_id", black_box(12345))
                .with_field("path", "/api/v1/items")
                .info("request");
        });
    });

    let deep = (0..16).fold(logger.named("svc"), |e, i| e.with_field(format!("k{}", i), i));
    group.bench_function("finalize_16_layers", |b| {
        b.iter(|| deep.info(black_box("deep")));
    });

    group.bench_function("trace_stop", |b| {
        b.iter(|| {
            let trace = logger.trace("op");
            trace.stop(None::<&std::io::Error>);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_gating, bench_chains);
criterion_main!(benches);
