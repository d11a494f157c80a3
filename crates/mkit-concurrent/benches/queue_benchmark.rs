use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use crossbeam_queue::SegQueue;
use mkit_concurrent::ConcurrentLinkedQueue;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::hint::black_box;
use std::thread;
use std::time::Duration;

const OPS: usize = 10_000;

fn bench_single_thread(c: &mut Criterion) {
    let mut group = c.benchmark_group("queue_single_thread");
    group.throughput(Throughput::Elements(OPS as u64));

    group.bench_function("linked_queue", |b| {
        let q = ConcurrentLinkedQueue::new();
        b.iter(|| {
            for i in 0..OPS {
                q.enqueue(black_box(i)).unwrap();
            }
            for _ in 0..OPS {
                black_box(q.dequeue().unwrap());
            }
        });
    });

    group.bench_function("seg_queue", |b| {
        let q = SegQueue::new();
        b.iter(|| {
            for i in 0..OPS {
                q.push(black_box(i));
            }
            for _ in 0..OPS {
                black_box(q.pop().unwrap());
            }
        });
    });

    group.finish();
}

/// `threads` producers and `threads` consumers moving `OPS` values each way.
fn run_mpmc<Q, E, D>(queue: &Q, threads: usize, enqueue: E, dequeue: D)
where
    Q: Sync,
    E: Fn(&Q, usize) + Sync,
    D: Fn(&Q) -> Option<usize> + Sync,
{
    let per_thread = OPS / threads;
    let total = per_thread * threads;
    let taken = AtomicUsize::new(0);

    thread::scope(|s| {
        for p in 0..threads {
            let enqueue = &enqueue;
            s.spawn(move || {
                for i in 0..per_thread {
                    enqueue(queue, p * per_thread + i);
                }
            });
        }
        for _ in 0..threads {
            let (dequeue, taken) = (&dequeue, &taken);
            s.spawn(move || {
                while taken.load(Ordering::Relaxed) < total {
                    if dequeue(queue).is_some() {
                        taken.fetch_add(1, Ordering::Relaxed);
                    } else {
                        std::hint::spin_loop();
                    }
                }
            });
        }
    });
}

fn bench_mpmc(c: &mut Criterion) {
    let mut group = c.benchmark_group("queue_mpmc");
    group.measurement_time(Duration::from_secs(10));
    group.throughput(Throughput::Elements(OPS as u64));

    for threads in [1usize, 2, 4, 8] {
        group.bench_with_input(
            BenchmarkId::new("linked_queue", threads),
            &threads,
            |b, &threads| {
                let q = ConcurrentLinkedQueue::new();
                b.iter(|| {
                    run_mpmc(
                        &q,
                        threads,
                        |q, v| q.enqueue(v).unwrap(),
                        |q| q.dequeue().ok(),
                    )
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("seg_queue", threads),
            &threads,
            |b, &threads| {
                let q = SegQueue::new();
                b.iter(|| run_mpmc(&q, threads, |q, v| q.push(v), |q| q.pop()));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_single_thread, bench_mpmc);
criterion_main!(benches);
