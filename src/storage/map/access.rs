// Scoped accessors binding a held shard lock to one value.

use parking_lot::MappedMutexGuard;
use std::fmt;
use std::ops::{Deref, DerefMut};

/// Exclusive, mutable access to one value of a shard.
///
/// The shard lock is held for as long as the accessor lives and is released
/// when it is dropped, including during unwinding. Every other access to the
/// same shard blocks until then.
#[must_use = "the shard stays locked until the accessor is dropped"]
pub struct Accessor<'a, V> {
    value: MappedMutexGuard<'a, V>,
}

impl<'a, V> Accessor<'a, V> {
    pub(crate) fn new(value: MappedMutexGuard<'a, V>) -> Self {
        Self { value }
    }
}

impl<V> Deref for Accessor<'_, V> {
    type Target = V;

    fn deref(&self) -> &V {
        &self.value
    }
}

impl<V> DerefMut for Accessor<'_, V> {
    fn deref_mut(&mut self) -> &mut V {
        &mut self.value
    }
}

impl<V: fmt::Debug> fmt::Debug for Accessor<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Accessor").field(&*self.value).finish()
    }
}

/// Shared-looking but still exclusive access to one existing value.
///
/// Holds the same shard lock as [`Accessor`]; it only narrows the handle to
/// immutable use.
#[must_use = "the shard stays locked until the accessor is dropped"]
pub struct ReadAccessor<'a, V> {
    value: MappedMutexGuard<'a, V>,
}

impl<'a, V> ReadAccessor<'a, V> {
    pub(crate) fn new(value: MappedMutexGuard<'a, V>) -> Self {
        Self { value }
    }
}

impl<V> Deref for ReadAccessor<'_, V> {
    type Target = V;

    fn deref(&self) -> &V {
        &self.value
    }
}

impl<V: fmt::Debug> fmt::Debug for ReadAccessor<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ReadAccessor").field(&*self.value).finish()
    }
}
