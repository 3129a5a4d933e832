// Common test utilities.

use std::collections::HashMap;
use std::hash::Hash;
use std::thread;

use crate::storage::map::{Map, MapError};

/// Asserts that a result is Ok.
pub fn assert_ok<T, E: std::fmt::Display>(result: Result<T, E>) -> T {
    result.unwrap_or_else(|e| panic!("unexpected error: {}", e))
}

/// Asserts that two values are equal.
pub fn assert_equal<T: PartialEq + std::fmt::Debug>(want: T, got: T) {
    if want != got {
        panic!("want={:?} got={:?}", want, got);
    }
}

/// Builds a map with `shards` shards from `entries`, single-threaded.
pub fn filled_map<K, V>(shards: usize, entries: &HashMap<K, V>) -> Map<K, V>
where
    K: Hash + Eq + Clone,
    V: Default + Clone,
{
    let map = Map::new(shards);
    for (k, v) in entries {
        *map.write_access(k.clone()) = v.clone();
    }
    map
}

/// Reads `keys` through read accessors; missing keys read as `V::default()`.
pub fn read_all<V>(map: &Map<usize, V>, keys: std::ops::Range<usize>) -> Vec<V>
where
    V: Default + Clone,
{
    keys.map(|key| match map.read_access(&key) {
        Ok(value) => (*value).clone(),
        Err(MapError::KeyNotFound) => V::default(),
        Err(e) => panic!("unexpected error: {}", e),
    })
    .collect()
}

/// Runs `f(worker)` on `workers` scoped threads and collects the results in worker order.
pub fn run_workers<T, F>(workers: usize, f: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize) -> T + Sync,
{
    let f = &f;
    thread::scope(|s| {
        let handles: Vec<_> = (0..workers).map(|w| s.spawn(move || f(w))).collect();
        handles
            .into_iter()
            .map(|h| h.join().expect("worker panicked"))
            .collect()
    })
}
