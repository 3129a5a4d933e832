// Scenario tests mixing writers and readers on the same map.

use std::collections::HashMap;

use crate::storage::map::{Map, MapError};
use crate::support::{assert_equal, filled_map, init_test_logging, read_all, run_workers};

const KEYS: usize = 50_000;

/// Two writers append to every value while two readers scan: readers only ever
/// see whole intermediate states.
#[test]
fn test_read_and_write() {
    init_test_logging();

    let cm: Map<usize, String> = Map::new(5);

    let results = run_workers(4, |w| {
        if w % 2 == 0 {
            for i in 0..KEYS {
                cm.write_access(i).push('a');
            }
            None
        } else {
            Some(read_all(&cm, 0..KEYS))
        }
    });

    for result in results.into_iter().flatten() {
        assert_equal(KEYS, result.len());
        assert!(result.iter().all(|s| s.is_empty() || s == "a" || s == "aa"));
    }

    let final_values = cm.snapshot();
    assert_equal(KEYS, final_values.len());
    assert!(final_values.values().all(|s| s == "aa"));
}

/// Writers on disjoint halves: a reader sees either nothing or the single append.
#[test]
fn test_disjoint_writers_with_readers() {
    let cm: Map<usize, String> = Map::new(5);
    let half = KEYS / 2;

    let results = run_workers(4, |w| match w {
        0 => {
            (0..half).for_each(|i| cm.write_access(i).push('a'));
            None
        }
        1 => {
            (half..KEYS).for_each(|i| cm.write_access(i).push('b'));
            None
        }
        _ => Some(read_all(&cm, 0..KEYS)),
    });

    for result in results.into_iter().flatten() {
        for (i, s) in result.iter().enumerate() {
            let full = if i < half { "a" } else { "b" };
            assert!(s.is_empty() || s == full, "key {} read {:?}", i, s);
        }
    }
    assert_equal(KEYS, cm.len());
}

/// A pre-filled map shared read-only by many threads is left untouched,
/// including by lookups of keys it does not hold.
#[test]
fn test_const_access() {
    let expected: HashMap<i32, String> = [
        (1, "one"),
        (2, "two"),
        (3, "three"),
        (31, "thirty one"),
        (127, "one hundred and twenty seven"),
        (1598, "fifteen hundred and ninety eight"),
    ]
    .into_iter()
    .map(|(k, v)| (k, v.to_string()))
    .collect();

    let cm = filled_map(3, &expected);
    let shared: &Map<i32, String> = &cm;

    let read = run_workers(10, |i| match shared.read_access(&(i as i32)) {
        Ok(value) => (*value).clone(),
        Err(MapError::KeyNotFound) => String::new(),
        Err(e) => panic!("unexpected error: {}", e),
    });

    assert_equal("one", read[1].as_str());
    assert_equal("three", read[3].as_str());
    assert!(read[0].is_empty());
    assert_equal(expected, shared.snapshot());
}

#[test]
fn test_string_keys() {
    let expected: HashMap<String, String> = ["one", "two", "three", "thirty one"]
        .into_iter()
        .map(|k| (k.to_string(), k.to_uppercase()))
        .collect();

    let cm = filled_map(2, &expected);
    assert_equal(expected, cm.snapshot());
    assert_equal(
        "THIRTY ONE",
        cm.read_access(&"thirty one".to_string()).unwrap().as_str(),
    );
}

#[test]
fn test_has() {
    let cm: Map<i32, i32> = Map::new(2);
    *cm.write_access(1) = 100;
    *cm.write_access(2) = 200;

    let const_map: &Map<i32, i32> = &cm;
    assert!(const_map.has(&1));
    assert!(const_map.has(&2));
    assert!(!const_map.has(&3));
}

/// Missing keys stay missing no matter how often they are probed concurrently.
#[test]
fn test_failed_reads_never_create() {
    let cm: Map<usize, u8> = Map::new(4);
    *cm.write_access(0) = 1;

    run_workers(4, |_| {
        for key in 1..1_000 {
            assert!(!cm.has(&key));
            assert_eq!(cm.read_access(&key).unwrap_err(), MapError::KeyNotFound);
        }
    });

    assert_equal(1, cm.len());
    assert_equal(vec![(0, 1)], cm.snapshot().into_iter().collect::<Vec<_>>());
}
