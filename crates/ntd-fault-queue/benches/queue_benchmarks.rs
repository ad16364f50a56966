//! Benchmarks for fault queue operations.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use ntd_fault_queue::prelude::*;
use ntd_hal::Node;

fn bench_append(c: &mut Criterion) {
    let mut group = c.benchmark_group("append");

    group.bench_function("append_heap", |b| {
        b.iter_batched(
            || FaultQueue::create().ok(),
            |queue| {
                if let Some(mut queue) = queue {
                    for segment in 0..6 {
                        let _ = queue.append(black_box(&FaultRecord::open(segment, Node::ZERO)));
                    }
                }
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.bench_function("append_budget_exhausted", |b| {
        let queue = FaultQueue::create_in(BudgetArena::new(0)).ok();
        if let Some(mut queue) = queue {
            b.iter(|| queue.append(black_box(&FaultRecord::open(0, Node::DecimalPoint))));
        }
    });

    group.finish();
}

fn bench_iterate(c: &mut Criterion) {
    let Ok(mut queue) = FaultQueue::create() else {
        return;
    };
    for i in 0..1024u16 {
        let segment = u8::try_from(i % 6).unwrap_or(0);
        let _ = queue.append(&FaultRecord::short(segment, Node::Blank, Node::DecimalPoint));
    }
    c.bench_function("iterate_1024", |b| {
        b.iter(|| queue.iter().filter(|r| r.kind == FaultKind::Short).count());
    });
}

criterion_group!(benches, bench_append, bench_iterate);
criterion_main!(benches);
