//! Multi-producer/multi-consumer harness for [`ConcurrentLinkedQueue`].
//!
//! Every producer enqueues a disjoint range of integers, consumers drain until
//! all of them are collected, and the run is then checked for loss,
//! duplication, per-producer order and quiescent emptiness.

use crate::linked_queue::{ConcurrentLinkedQueue, QueueError};
use crossbeam_utils::Backoff;
use mkit_core::StressConfig;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Error)]
pub enum StressError {
    #[error("timed out after {elapsed:?}: collected {collected} of {expected} values")]
    Timeout {
        collected: usize,
        expected: usize,
        elapsed: Duration,
    },
    #[error("value {0} was dequeued more than once")]
    Duplicate(usize),
    #[error("value {0} was never enqueued")]
    Unexpected(usize),
    #[error("{count} enqueued values were never dequeued")]
    Missing { count: usize },
    #[error("producer {producer} order violated: sequence {later} dequeued after {earlier}")]
    OrderViolation {
        producer: usize,
        earlier: usize,
        later: usize,
    },
    #[error("queue still holds values after every value was collected")]
    NotQuiescent,
    #[error("producer failed: {0}")]
    Enqueue(#[from] QueueError),
    #[error("worker thread panicked")]
    WorkerPanicked,
    #[error("{producers} producers x {per_producer} values overflows usize")]
    TotalOverflow {
        producers: usize,
        per_producer: usize,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct StressReport {
    pub producers: usize,
    pub consumers: usize,
    pub produced: usize,
    pub consumed: usize,
    /// `dequeue` calls that came back empty across all consumers
    pub empty_polls: u64,
    pub elapsed_ms: u64,
    /// Values moved through the queue per second
    pub throughput: f64,
}

/// Workers consult the clock once per this many operations while making progress.
const DEADLINE_CHECK_INTERVAL: usize = 1024;

/// What one consumer saw, in dequeue order.
struct ConsumerLog {
    values: Vec<usize>,
    empty_polls: u64,
}

pub struct StressRunner {
    config: StressConfig,
}

impl StressRunner {
    pub fn new(config: StressConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StressConfig {
        &self.config
    }

    /// Run against a fresh queue.
    pub fn run(&self) -> Result<StressReport, StressError> {
        let queue = ConcurrentLinkedQueue::new();
        self.run_on(&queue)
    }

    /// Run against `queue`, which must start out empty.
    #[instrument(
        skip(self, queue),
        fields(
            producers = self.config.producers,
            consumers = self.config.consumers,
            per_producer = self.config.per_producer
        )
    )]
    pub fn run_on(&self, queue: &ConcurrentLinkedQueue<usize>) -> Result<StressReport, StressError> {
        let StressConfig {
            producers,
            consumers,
            per_producer,
            timeout_ms,
        } = self.config;
        let expected = self.config.total().ok_or(StressError::TotalOverflow {
            producers,
            per_producer,
        })?;

        let started = Instant::now();
        let deadline = started + Duration::from_millis(timeout_ms);
        let collected = AtomicUsize::new(0);
        let stop = AtomicBool::new(false);

        info!(expected, "starting stress run");

        let (produced, consumed) = thread::scope(|s| {
            let producer_handles: Vec<_> = (0..producers)
                .map(|p| {
                    let stop = &stop;
                    s.spawn(move || {
                        produce(p, per_producer, deadline, stop, |value| queue.enqueue(value))
                    })
                })
                .collect();

            let consumer_handles: Vec<_> = (0..consumers)
                .map(|c| {
                    let (collected, stop) = (&collected, &stop);
                    s.spawn(move || {
                        let mut log = ConsumerLog {
                            values: Vec::with_capacity(expected / consumers.max(1) + 1),
                            empty_polls: 0,
                        };
                        let backoff = Backoff::new();

                        while collected.load(Ordering::Acquire) < expected
                            && !stop.load(Ordering::Relaxed)
                        {
                            match queue.dequeue() {
                                Ok(value) => {
                                    collected.fetch_add(1, Ordering::AcqRel);
                                    log.values.push(value);
                                    backoff.reset();
                                    if log.values.len() % DEADLINE_CHECK_INTERVAL == 0
                                        && Instant::now() >= deadline
                                    {
                                        stop.store(true, Ordering::Relaxed);
                                        break;
                                    }
                                }
                                Err(_) => {
                                    log.empty_polls += 1;
                                    if Instant::now() >= deadline {
                                        stop.store(true, Ordering::Relaxed);
                                        break;
                                    }
                                    backoff.snooze();
                                }
                            }
                        }
                        debug!(consumer = c, taken = log.values.len(), "consumer finished");
                        log
                    })
                })
                .collect();

            let produced: Vec<_> = producer_handles.into_iter().map(|h| h.join()).collect();
            let consumed: Vec<_> = consumer_handles.into_iter().map(|h| h.join()).collect();
            (produced, consumed)
        });

        for result in produced {
            result.map_err(|_| StressError::WorkerPanicked)??;
        }
        let logs = consumed
            .into_iter()
            .map(|log| log.map_err(|_| StressError::WorkerPanicked))
            .collect::<Result<Vec<_>, _>>()?;

        let elapsed = started.elapsed();
        let collected = collected.load(Ordering::Acquire);
        if collected < expected {
            warn!(collected, expected, ?elapsed, "stress run timed out");
            return Err(StressError::Timeout {
                collected,
                expected,
                elapsed,
            });
        }

        verify(&logs, per_producer, expected)?;
        if !queue.is_empty() {
            return Err(StressError::NotQuiescent);
        }

        let report = StressReport {
            producers,
            consumers,
            produced: expected,
            consumed: collected,
            empty_polls: logs.iter().map(|log| log.empty_polls).sum(),
            elapsed_ms: elapsed.as_millis() as u64,
            throughput: collected as f64 / elapsed.as_secs_f64().max(f64::EPSILON),
        };
        info!(
            elapsed_ms = report.elapsed_ms,
            empty_polls = report.empty_polls,
            "stress run passed"
        );
        Ok(report)
    }
}

/// Enqueue producer `p`'s values through `push`.
///
/// Returns early once `stop` is raised or `deadline` passes. Raises `stop` itself
/// on a deadline or a failed push, so consumers quit instead of polling on.
fn produce<F>(
    p: usize,
    per_producer: usize,
    deadline: Instant,
    stop: &AtomicBool,
    mut push: F,
) -> Result<(), QueueError>
where
    F: FnMut(usize) -> Result<(), QueueError>,
{
    for seq in 0..per_producer {
        if stop.load(Ordering::Relaxed)
            || (seq % DEADLINE_CHECK_INTERVAL == 0 && Instant::now() >= deadline)
        {
            stop.store(true, Ordering::Relaxed);
            debug!(producer = p, seq, "producer stopped early");
            return Ok(());
        }
        if let Err(e) = push(p * per_producer + seq) {
            stop.store(true, Ordering::Relaxed);
            warn!(producer = p, seq, error = %e, "producer failed");
            return Err(e);
        }
    }
    debug!(producer = p, "producer finished");
    Ok(())
}

/// Check the consumer logs against the values `0..expected` that were produced.
fn verify(logs: &[ConsumerLog], per_producer: usize, expected: usize) -> Result<(), StressError> {
    let mut seen = vec![false; expected];
    let producers = if per_producer == 0 { 0 } else { expected / per_producer };

    for log in logs {
        let mut last_seq: Vec<Option<usize>> = vec![None; producers];

        for &value in &log.values {
            match seen.get_mut(value) {
                Some(slot) if *slot => return Err(StressError::Duplicate(value)),
                Some(slot) => *slot = true,
                None => return Err(StressError::Unexpected(value)),
            }

            let (producer, seq) = (value / per_producer, value % per_producer);
            if let Some(earlier) = last_seq[producer] {
                if earlier > seq {
                    return Err(StressError::OrderViolation {
                        producer,
                        earlier,
                        later: seq,
                    });
                }
            }
            last_seq[producer] = Some(seq);
        }
    }

    let missing = seen.iter().filter(|&&hit| !hit).count();
    if missing > 0 {
        return Err(StressError::Missing { count: missing });
    }
    Ok(())
}
