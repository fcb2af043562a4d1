//! # Frame Scheduler Benchmark
//!
//! A busy board cascades a few hundred animations at once (a full column
//! collapse on a 16x16 grid). Scheduling and firing them must stay well
//! under one frame budget.
//!
//! Run with: `cargo bench --package tileboard_core`

// Benchmarks don't need docs
#![allow(missing_docs)]

use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tileboard_core::{FrameScheduler, SlotPool};

/// Benchmark: schedule N tasks with spread deadlines, then drain them in 60 ticks.
fn bench_schedule_and_drain(c: &mut Criterion) {
    let mut group = c.benchmark_group("schedule_and_drain");

    for count in [64_u64, 256, 1024] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter(|| {
                let mut scheduler: FrameScheduler<u64> = FrameScheduler::new();
                let mut fired = 0_u64;
                for i in 0..count {
                    scheduler.delay(Duration::from_millis(i % 1000), |fired, _| {
                        *fired += 1;
                        Ok(())
                    });
                }
                for frame in 0..60_u64 {
                    scheduler.tick(Duration::from_millis(frame * 17), &mut fired, |_, _| {});
                }
                black_box(fired)
            });
        });
    }

    group.finish();
}

/// Benchmark: churn a slot pool the way add/remove cycles do.
fn bench_slot_churn(c: &mut Criterion) {
    c.bench_function("slot_churn_256", |b| {
        b.iter(|| {
            let mut pool: SlotPool<u32> = SlotPool::with_capacity(256);
            let ids: Vec<_> = (0..256).map(|i| pool.insert(i)).collect();
            for id in ids.iter().step_by(2) {
                pool.remove(*id);
            }
            for i in 0..128 {
                pool.insert(i);
            }
            black_box(pool.len())
        });
    });
}

criterion_group!(benches, bench_schedule_and_drain, bench_slot_churn);
criterion_main!(benches);
