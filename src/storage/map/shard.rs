// Shard: one lock-protected partition of the key space.

use parking_lot::{Mutex, MutexGuard};
use std::collections::HashMap;
use std::hash::Hash;

use super::access::{Accessor, ReadAccessor};

/// Shard is an independent, lock-protected segment of the sharded map.
/// Its items are only ever touched while `items` is locked.
pub struct Shard<K, V> {
    items: Mutex<HashMap<K, V>>,
    id: usize,
}

impl<K, V> Shard<K, V>
where
    K: Hash + Eq,
{
    /// Creates a new empty shard.
    pub fn new(id: usize) -> Self {
        Self {
            items: Mutex::new(HashMap::new()),
            id,
        }
    }

    /// Gets the shard ID (its position in the map).
    #[allow(dead_code)]
    pub fn id(&self) -> usize {
        self.id
    }

    /// Locks the shard and binds an accessor to `key`, inserting `V::default()` first if absent.
    pub fn get_or_create(&self, key: K) -> Accessor<'_, V>
    where
        V: Default,
    {
        let items = self.items.lock();
        Accessor::new(MutexGuard::map(items, |items| items.entry(key).or_default()))
    }

    /// Locks the shard and binds a read accessor to an existing `key`.
    /// Returns `None` (with the lock already released) when the key is absent.
    pub fn try_get(&self, key: &K) -> Option<ReadAccessor<'_, V>> {
        let items = self.items.lock();
        MutexGuard::try_map(items, |items| items.get_mut(key))
            .ok()
            .map(ReadAccessor::new)
    }

    /// Membership test under lock.
    pub fn contains(&self, key: &K) -> bool {
        self.items.lock().contains_key(key)
    }

    /// Copies the whole shard. The lock is held only while cloning.
    pub fn copy_all(&self) -> HashMap<K, V>
    where
        K: Clone,
        V: Clone,
    {
        self.items.lock().clone()
    }

    /// Gets the number of items.
    pub fn len(&self) -> usize {
        self.items.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K, V> std::fmt::Debug for Shard<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Shard").field("id", &self.id).finish_non_exhaustive()
    }
}
