//! Concurrent-update stress workload.
//!
//! Every worker increments the same range of integer keys, each in its own
//! shuffled order, for a number of passes. When all workers are done every key
//! must hold exactly `threads * passes`.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::HashMap;
use std::ops::Range;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::storage::map::Map;

/// Counter map the workload runs against.
pub type CounterMap = Map<i64, i64>;

/// Workload parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Params {
    pub threads: usize,
    pub keys: usize,
    pub passes: usize,
    pub seed: u64,
}

impl Params {
    /// Value every key must hold after a complete run.
    /// Saturates at `i64::MAX`; `Config::parse` rejects configs that would get there.
    pub fn expected_value(&self) -> i64 {
        i64::try_from(self.threads.saturating_mul(self.passes)).unwrap_or(i64::MAX)
    }
}

impl Default for Params {
    fn default() -> Self {
        Self {
            threads: 3,
            keys: 50_000,
            passes: 2,
            seed: 0,
        }
    }
}

/// Outcome of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub shards: usize,
    pub elapsed: Duration,
    pub entries: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorkloadError {
    #[error("snapshot holds {actual} keys, expected {expected}")]
    MissingKeys { expected: usize, actual: usize },
    #[error("key {key} is missing from the snapshot")]
    MissingKey { key: i64 },
    #[error("key {key} holds {actual}, expected {expected}")]
    WrongValue { key: i64, expected: i64, actual: i64 },
}

/// Workload keys: `-keys/2 .. keys - keys/2`.
pub fn key_range(keys: usize) -> Range<i64> {
    let first = -((keys / 2) as i64);
    first..first + keys as i64
}

/// [`key_range`], shuffled with `seed`.
pub fn shuffled_keys(keys: usize, seed: u64) -> Vec<i64> {
    let mut updates: Vec<i64> = key_range(keys).collect();
    updates.shuffle(&mut StdRng::seed_from_u64(seed));
    updates
}

/// Runs the update workers against `map` and blocks until all of them finish.
pub fn run_concurrent_updates(map: &CounterMap, params: &Params) {
    thread::scope(|s| {
        for worker in 0..params.threads {
            let updates = shuffled_keys(params.keys, params.seed.wrapping_add(worker as u64));
            s.spawn(move || {
                for _ in 0..params.passes {
                    for &key in &updates {
                        *map.write_access(key) += 1;
                    }
                }
                debug!(
                    component = "workload",
                    event = "worker_done",
                    worker = worker,
                    "update worker finished"
                );
            });
        }
    });
}

/// Checks that `snapshot` holds every workload key with the expected count.
pub fn verify(snapshot: &HashMap<i64, i64>, params: &Params) -> Result<(), WorkloadError> {
    if snapshot.len() != params.keys {
        return Err(WorkloadError::MissingKeys {
            expected: params.keys,
            actual: snapshot.len(),
        });
    }

    let expected = params.expected_value();
    for key in key_range(params.keys) {
        let actual = match snapshot.get(&key) {
            Some(&actual) => actual,
            None => return Err(WorkloadError::MissingKey { key }),
        };
        if actual != expected {
            return Err(WorkloadError::WrongValue {
                key,
                expected,
                actual,
            });
        }
    }

    Ok(())
}

/// Builds a map with `shards` shards, runs the workload, verifies the snapshot.
pub fn run(shards: usize, params: &Params) -> Result<Report, WorkloadError> {
    let map = CounterMap::new(shards);

    let started = Instant::now();
    run_concurrent_updates(&map, params);
    let elapsed = started.elapsed();

    let snapshot = map.snapshot();
    verify(&snapshot, params)?;

    info!(
        component = "workload",
        event = "run_done",
        shards = shards,
        threads = params.threads,
        keys = params.keys,
        passes = params.passes,
        elapsed = %humantime::format_duration(elapsed),
        "concurrent updates finished"
    );

    Ok(Report {
        shards,
        elapsed,
        entries: snapshot.len(),
    })
}
