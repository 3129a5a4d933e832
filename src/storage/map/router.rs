// Key-to-shard routing.

use std::hash::Hash;
use xxhash_rust::xxh3::Xxh3;

/// Hashing strategy used to spread keys over shards.
/// Must be deterministic: the same key always hashes to the same value.
pub trait KeyHasher<K: ?Sized>: Send + Sync {
    fn hash_key(&self, key: &K) -> u64;
}

impl<K, F> KeyHasher<K> for F
where
    K: ?Sized,
    F: Fn(&K) -> u64 + Send + Sync,
{
    fn hash_key(&self, key: &K) -> u64 {
        self(key)
    }
}

/// Default strategy: feeds the key's `Hash` impl into xxh3.
#[derive(Debug, Clone, Copy, Default)]
pub struct Xxh3KeyHasher;

impl<K: Hash + ?Sized> KeyHasher<K> for Xxh3KeyHasher {
    fn hash_key(&self, key: &K) -> u64 {
        let mut hasher = Xxh3::new();
        key.hash(&mut hasher);
        hasher.digest()
    }
}

/// Router maps a key to the index of its owning shard.
pub struct Router<K: ?Sized> {
    hasher: Box<dyn KeyHasher<K>>,
    shard_count: usize,
}

impl<K: ?Sized> Router<K> {
    /// Creates a router over `shard_count` shards.
    ///
    /// # Panics
    ///
    /// Panics if `shard_count` is zero.
    pub fn new(shard_count: usize, hasher: Box<dyn KeyHasher<K>>) -> Self {
        assert!(shard_count > 0, "router needs at least one shard");
        Self { hasher, shard_count }
    }

    /// Returns `hash(key) mod shard_count`.
    #[inline]
    pub fn index(&self, key: &K) -> usize {
        (self.hasher.hash_key(key) % self.shard_count as u64) as usize
    }
}

impl<K: ?Sized> std::fmt::Debug for Router<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("shard_count", &self.shard_count)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_is_stable() {
        let router: Router<u64> = Router::new(7, Box::new(Xxh3KeyHasher));
        for key in 0..1_000u64 {
            let first = router.index(&key);
            assert!(first < 7);
            assert_eq!(first, router.index(&key), "key {} moved between shards", key);
        }
    }

    #[test]
    fn test_single_shard_routes_everything_to_zero() {
        let router: Router<String> = Router::new(1, Box::new(Xxh3KeyHasher));
        for key in ["", "a", "thirty one", "fifteen hundred"] {
            assert_eq!(router.index(&key.to_string()), 0);
        }
    }

    #[test]
    fn test_closure_strategy() {
        let router: Router<u64> = Router::new(10, Box::new(|k: &u64| *k));
        assert_eq!(router.index(&3), 3);
        assert_eq!(router.index(&13), 3);
        assert_eq!(router.index(&20), 0);
    }

    #[test]
    #[should_panic(expected = "at least one shard")]
    fn test_zero_shards_panics() {
        let _router: Router<u64> = Router::new(0, Box::new(Xxh3KeyHasher));
    }

    #[test]
    fn test_xxh3_spreads_keys() {
        let router: Router<u64> = Router::new(16, Box::new(Xxh3KeyHasher));
        let mut seen = [false; 16];
        for key in 0..10_000u64 {
            seen[router.index(&key)] = true;
        }
        assert!(seen.iter().all(|s| *s), "every shard should receive keys");
    }
}
