//! Lock-striped concurrent map: a fixed set of mutex-guarded shards with
//! scoped accessors bound to the held lock.
//!
//! Shards and routing are internal; only the hashing strategy is pluggable.
//!
//! ```compile_fail
//! use stripemap::storage::map::Router;
//! ```
//!
//! ```compile_fail
//! use stripemap::storage::map::Shard;
//! ```

pub mod access;
pub mod error;
pub mod map;
pub(crate) mod router;
pub(crate) mod shard;


// Re-export main types
pub use access::{Accessor, ReadAccessor};
pub use error::MapError;
pub use map::{Map, DEFAULT_NUM_OF_SHARDS};
pub use router::{KeyHasher, Xxh3KeyHasher};
