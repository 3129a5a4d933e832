// Package sharded implements a lock-striped concurrent map: keys are spread over
// a fixed set of shards, each guarded by its own mutex.

use std::collections::HashMap;
use std::hash::Hash;
use tracing::{debug, trace};

use super::access::{Accessor, ReadAccessor};
use super::error::MapError;
use super::router::{KeyHasher, Router, Xxh3KeyHasher};
use super::shard::Shard;

/// Default number of shards for [`Map::default`].
pub const DEFAULT_NUM_OF_SHARDS: usize = 16;

/// Map is a sharded concurrent map.
///
/// Every operation takes `&self`; synchronization lives in the shards. No
/// operation ever holds more than one shard lock, so operations on the map
/// cannot deadlock each other. Operations on different shards are not ordered
/// relative to one another.
///
/// ```rust
/// use stripemap::storage::map::Map;
///
/// let map: Map<&str, u32> = Map::new(4);
/// *map.write_access("hits") += 1;
/// assert_eq!(*map.read_access(&"hits").unwrap(), 1);
/// assert!(!map.has(&"misses"));
/// ```
pub struct Map<K, V> {
    router: Router<K>,
    shards: Vec<Shard<K, V>>,
}

impl<K, V> Map<K, V>
where
    K: Hash + Eq,
{
    /// Creates a map with `shard_count` shards and the default xxh3 key hasher.
    ///
    /// # Panics
    ///
    /// Panics if `shard_count` is zero. See [`Map::try_new`].
    pub fn new(shard_count: usize) -> Self {
        Self::with_hasher(shard_count, Xxh3KeyHasher)
    }

    /// Creates a map with a custom key hashing strategy.
    ///
    /// # Panics
    ///
    /// Panics if `shard_count` is zero. See [`Map::try_with_hasher`].
    pub fn with_hasher<H>(shard_count: usize, hasher: H) -> Self
    where
        H: KeyHasher<K> + 'static,
    {
        match Self::try_with_hasher(shard_count, hasher) {
            Ok(map) => map,
            Err(e) => panic!("{}", e),
        }
    }

    /// Fallible form of [`Map::new`].
    pub fn try_new(shard_count: usize) -> Result<Self, MapError> {
        Self::try_with_hasher(shard_count, Xxh3KeyHasher)
    }

    /// Fallible form of [`Map::with_hasher`].
    pub fn try_with_hasher<H>(shard_count: usize, hasher: H) -> Result<Self, MapError>
    where
        H: KeyHasher<K> + 'static,
    {
        if shard_count == 0 {
            return Err(MapError::ZeroShards);
        }

        let mut shards = Vec::with_capacity(shard_count);
        for id in 0..shard_count {
            shards.push(Shard::new(id));
        }

        debug!(
            component = "map",
            event = "created",
            shards = shard_count,
            "sharded map created"
        );

        Ok(Self {
            router: Router::new(shard_count, Box::new(hasher)),
            shards,
        })
    }
}

impl<K, V> Map<K, V>
where
    K: Hash + Eq,
{
    /// Locks the owning shard and returns a mutable accessor to the value under `key`,
    /// inserting `V::default()` first if the key is absent.
    ///
    /// The shard stays locked until the accessor is dropped: requesting another
    /// accessor on the same shard from the same thread meanwhile deadlocks.
    pub fn write_access(&self, key: K) -> Accessor<'_, V>
    where
        V: Default,
    {
        self.shard(&key).get_or_create(key)
    }

    /// Locks the owning shard and returns a read accessor to an existing value.
    /// Never creates an entry.
    pub fn read_access(&self, key: &K) -> Result<ReadAccessor<'_, V>, MapError> {
        self.shard(key).try_get(key).ok_or(MapError::KeyNotFound)
    }

    /// Reports whether `key` has an entry. Never creates one.
    pub fn has(&self, key: &K) -> bool {
        self.shard(key).contains(key)
    }

    /// Copies every shard, one at a time under its own lock, into one ordinary map.
    ///
    /// Each shard's contribution is consistent with itself, but shards are
    /// visited at different instants: with writers active on several shards the
    /// result is not a single point-in-time image of the whole map.
    pub fn snapshot(&self) -> HashMap<K, V>
    where
        K: Clone,
        V: Clone,
    {
        let mut result = HashMap::new();
        for shard in &self.shards {
            result.extend(shard.copy_all());
        }
        trace!(
            component = "map",
            event = "snapshot",
            shards = self.shards.len(),
            entries = result.len(),
            "shards merged"
        );
        result
    }

    /// Gets the number of entries, summed shard by shard (same consistency as [`Map::snapshot`]).
    pub fn len(&self) -> usize {
        self.shards.iter().map(Shard::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.shards.iter().all(Shard::is_empty)
    }

    /// Gets the number of shards, fixed at construction.
    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    /// Gets the index of the shard owning `key`.
    pub fn shard_index(&self, key: &K) -> usize {
        self.router.index(key)
    }

    /// Gets the shard for a given key.
    fn shard(&self, key: &K) -> &Shard<K, V> {
        &self.shards[self.router.index(key)]
    }
}

impl<K, V> Default for Map<K, V>
where
    K: Hash + Eq,
{
    fn default() -> Self {
        Self::new(DEFAULT_NUM_OF_SHARDS)
    }
}

impl<K, V> std::fmt::Debug for Map<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Map")
            .field("shards", &self.shards.len())
            .finish_non_exhaustive()
    }
}
