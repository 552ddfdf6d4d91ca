use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use snapgraph_core::{Record, Sequence, Value};
use snapgraph_engine::deep_clone;

/// Flat record with `fields` primitive entries.
fn wide_record(fields: usize) -> Value {
    let record = Record::new();
    for i in 0..fields {
        record.insert(format!("field_{i}"), Value::Int(i as i64)).unwrap();
    }
    Value::Record(record)
}

/// Linked chain of `depth` single-entry records.
fn deep_chain(depth: usize) -> Value {
    let mut value = Value::Int(0);
    for _ in 0..depth {
        value = Value::Record(Record::of([("next", value)]));
    }
    value
}

/// Sequence of `width` references to one shared record: every element past
/// the first resolves through the registry.
fn shared_fanout(width: usize) -> Value {
    let shared = Record::of([("payload", Value::from("shared"))]);
    let items = (0..width).map(|_| Value::Record(shared.clone()));
    Value::Sequence(Sequence::of(items))
}

fn bench_deep_clone(c: &mut Criterion) {
    snapgraph_observability::init();

    let mut group = c.benchmark_group("deep_clone");
    for size in [16usize, 256, 2048] {
        group.throughput(Throughput::Elements(size as u64));

        let source = wide_record(size);
        group.bench_with_input(BenchmarkId::new("wide_record", size), &source, |b, source| {
            b.iter(|| deep_clone(black_box(source)).unwrap());
        });

        let source = deep_chain(size);
        group.bench_with_input(BenchmarkId::new("deep_chain", size), &source, |b, source| {
            b.iter(|| deep_clone(black_box(source)).unwrap());
        });

        let source = shared_fanout(size);
        group.bench_with_input(
            BenchmarkId::new("shared_fanout", size),
            &source,
            |b, source| {
                b.iter(|| deep_clone(black_box(source)).unwrap());
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_deep_clone);
criterion_main!(benches);
