//! Criterion benchmarks for fieldlog

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use fieldlog::options::{add_caller, with_stack};
use fieldlog::prelude::*;
use std::sync::Arc;

/// Core that counts nothing and drops everything after the accept
/// decision, isolating pipeline cost from encoding and IO.
struct AcceptingCore;

impl Core for AcceptingCore {
    fn enabled(&self, _level: Level) -> bool {
        true
    }

    fn with(&self, _fields: Vec<Field>) -> Arc<dyn Core> {
        Arc::new(AcceptingCore)
    }

    fn check(&self, _entry: &Entry) -> bool {
        true
    }

    fn write(&self, _entry: &Entry, _fields: &[Field]) -> fieldlog::Result<()> {
        Ok(())
    }

    fn sync(&self) -> fieldlog::Result<()> {
        Ok(())
    }
}

// ============================================================================
// Level Gate Benchmarks
// ============================================================================

fn bench_level_gate(c: &mut Criterion) {
    let mut group = c.benchmark_group("level_gate");
    group.throughput(Throughput::Elements(1));

    let logger = Logger::new(Arc::new(NopCore));

    group.bench_function("disabled_no_args", |b| {
        b.iter(|| {
            logger.info(black_box("filtered out"), vec![]);
        });
    });

    group.bench_function("disabled_with_args", |b| {
        b.iter(|| {
            logger.info(
                black_box("filtered out"),
                vec![Arg::from("user"), Arg::from("alice")],
            );
        });
    });

    let enabled = Logger::new(Arc::new(AcceptingCore));

    group.bench_function("enabled_no_args", |b| {
        b.iter(|| {
            enabled.info(black_box("accepted"), vec![]);
        });
    });

    group.finish();
}

// ============================================================================
// Field Assembly Benchmarks
// ============================================================================

fn bench_field_assembly(c: &mut Criterion) {
    let mut group = c.benchmark_group("field_assembly");
    group.throughput(Throughput::Elements(1));

    let logger = Logger::new(Arc::new(AcceptingCore));

    group.bench_function("two_pairs", |b| {
        b.iter(|| {
            logger.info(
                black_box("login"),
                vec![
                    Arg::from("user"),
                    Arg::from("alice"),
                    Arg::from("attempts"),
                    Arg::from(3i64),
                ],
            );
        });
    });

    group.bench_function("ready_made_fields", |b| {
        b.iter(|| {
            logger.info(
                black_box("login"),
                vec![
                    Arg::from(Field::string("user", "alice")),
                    Arg::from(Field::int("attempts", 3)),
                ],
            );
        });
    });

    group.bench_function("args_to_fields_direct", |b| {
        b.iter(|| {
            let fields = args_to_fields(vec![
                Arg::from("user"),
                Arg::from("alice"),
                Arg::from(42i64),
            ]);
            black_box(fields)
        });
    });

    group.finish();
}

// ============================================================================
// Message Formatting Benchmarks
// ============================================================================

fn bench_message_formatting(c: &mut Criterion) {
    let mut group = c.benchmark_group("message_formatting");
    group.throughput(Throughput::Elements(1));

    let plain = Logger::new(Arc::new(AcceptingCore));
    let formatting = plain.with_format(true);

    group.bench_function("format_disabled", |b| {
        b.iter(|| {
            plain.info(black_box("msg is %s"), vec![Arg::from("test")]);
        });
    });

    group.bench_function("format_substituted", |b| {
        b.iter(|| {
            formatting.info(black_box("msg is %s"), vec![Arg::from("test")]);
        });
    });

    group.bench_function("format_mismatch_passthrough", |b| {
        b.iter(|| {
            formatting.info(
                black_box("msg is %s"),
                vec![Arg::from("test"), Arg::from("extra")],
            );
        });
    });

    group.finish();
}

// ============================================================================
// Stack Capture Benchmarks
// ============================================================================

fn bench_stack_capture(c: &mut Criterion) {
    let mut group = c.benchmark_group("stack_capture");
    group.throughput(Throughput::Elements(1));

    let pools = Pools::new();

    group.bench_function("capture_first", |b| {
        b.iter(|| {
            let stack = pools.capture(0, Depth::First);
            black_box(stack.count())
        });
    });

    group.bench_function("capture_full", |b| {
        b.iter(|| {
            let stack = pools.capture(0, Depth::Full);
            black_box(stack.count())
        });
    });

    group.bench_function("capture_and_render", |b| {
        b.iter(|| {
            let mut stack = pools.capture(0, Depth::Full);
            let mut formatter = pools.formatter();
            formatter.format_stack(&mut stack);
            black_box(formatter.len())
        });
    });

    let caller_logger =
        Logger::new(Arc::new(AcceptingCore)).with_options(vec![add_caller()]);

    group.bench_function("log_with_caller", |b| {
        b.iter(|| {
            caller_logger.info(black_box("where"), vec![]);
        });
    });

    let stack_logger =
        Logger::new(Arc::new(AcceptingCore)).with_options(vec![with_stack(Level::Debug)]);

    group.bench_function("log_with_stack", |b| {
        b.iter(|| {
            stack_logger.info(black_box("deep"), vec![]);
        });
    });

    group.finish();
}

// ============================================================================
// Encoding Benchmarks
// ============================================================================

fn bench_encoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("encoding");
    group.throughput(Throughput::Elements(1));

    let entry = Entry::new("api", Level::Info, "request served");
    let fields = vec![
        Field::string("user", "alice"),
        Field::int("status", 200),
        Field::float("elapsed", 0.042),
    ];

    let json = Encoder::Json(EncoderConfig::default());
    group.bench_function("json", |b| {
        b.iter(|| {
            let line = json.encode(black_box(&entry), black_box(&fields));
            black_box(line)
        });
    });

    let console = Encoder::Console(EncoderConfig::default());
    group.bench_function("console", |b| {
        b.iter(|| {
            let line = console.encode(black_box(&entry), black_box(&fields));
            black_box(line)
        });
    });

    group.finish();
}

// ============================================================================
// Criterion Configuration
// ============================================================================

criterion_group!(
    benches,
    bench_level_gate,
    bench_field_assembly,
    bench_message_formatting,
    bench_stack_capture,
    bench_encoding
);

criterion_main!(benches);
