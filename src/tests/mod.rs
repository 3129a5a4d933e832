//! Scenario tests for the sharded map.
//!
//! These run real OS threads against one map and check the invariants that
//! per-shard locking must uphold under contention.

mod cases_read_write_test;

pub mod support;
