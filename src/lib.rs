//! Lock-striped concurrent map.
//!
//! Keys are routed to a fixed number of mutex-guarded shards; callers work on
//! one value at a time through scoped accessors that hold the owning shard's
//! lock. See [`storage::map::Map`].

#[cfg(test)]
mod tests;

#[cfg(test)]
pub use tests::support;

pub mod config;
pub mod storage;
pub mod workload;

pub use storage::map::{Accessor, KeyHasher, Map, MapError, ReadAccessor};
