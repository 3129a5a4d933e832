// Errors returned by the sharded map.

/// Map operation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MapError {
    /// `read_access` on a key that was never written.
    #[error("key not found")]
    KeyNotFound,
    /// A map needs at least one shard.
    #[error("shard count must be at least 1")]
    ZeroShards,
}
