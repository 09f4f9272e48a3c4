use core::hint::black_box;
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use snowbank::{Generator, Settings, TimeSource};
use std::time::Instant;

struct FixedMockTime {
    millis: u64,
}

impl TimeSource for FixedMockTime {
    fn current_millis(&self) -> u64 {
        self.millis
    }
}

// Number of IDs generated per benchmark iteration. Matches one full
// time-mode bucket so the hot path never carries mid-iteration.
const TOTAL_IDS: usize = 4096;

fn bench_continuous(c: &mut Criterion) {
    let mut group = c.benchmark_group("generator/continuous");
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));

    group.bench_function(format!("elems/{TOTAL_IDS}"), |b| {
        b.iter_custom(|iters| {
            let start = Instant::now();

            for _ in 0..iters {
                let settings = Settings {
                    continuous: true,
                    ..Settings::default()
                };
                let generator =
                    Generator::from_settings("bench", &settings, FixedMockTime { millis: 1 })
                        .unwrap();
                for _ in 0..TOTAL_IDS {
                    black_box(generator.next_id().unwrap());
                }
            }

            start.elapsed()
        });
    });

    group.finish();
}

fn bench_time_mode(c: &mut Criterion) {
    let mut group = c.benchmark_group("generator/time");
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));

    group.bench_function(format!("elems/{TOTAL_IDS}"), |b| {
        b.iter_custom(|iters| {
            let start = Instant::now();

            for _ in 0..iters {
                let settings = Settings {
                    machine_id: 1,
                    ..Settings::default()
                };
                let generator =
                    Generator::from_settings("bench", &settings, FixedMockTime { millis: 1 })
                        .unwrap();
                for _ in 0..TOTAL_IDS {
                    black_box(generator.next_id().unwrap());
                }
            }

            start.elapsed()
        });
    });

    group.finish();
}

criterion_group!(benches, bench_continuous, bench_time_mode);
criterion_main!(benches);
