//! Cache of singleton instances

use super::ArcService;
use crate::{
    error::Error,
    key::{BuildTypeIdHasher, TypeKey}
};
use dashmap::DashMap;
use once_cell::sync::OnceCell;
use std::{
    sync::Arc,
    thread::{self, ThreadId}
};

type InstanceCell = Arc<OnceCell<ArcService>>;

/// Append-only map of singleton instances.
///
/// Each type gets its own compute-once cell, so a singleton constructor runs
/// at most once even when several threads resolve it for the first time.
/// A failed construction leaves the cell empty.
///
/// The cache also keeps a wait-for graph: which thread builds which singleton
/// and which singleton each thread is about to wait for. A thread that would
/// wait, directly or through other threads, for a singleton it builds itself
/// fails with [`Error::CircularDependency`] instead of blocking.
#[derive(Debug)]
pub(crate) struct InstanceCache {
    cells: DashMap<TypeKey, InstanceCell, BuildTypeIdHasher>,
    builders: DashMap<TypeKey, ThreadId, BuildTypeIdHasher>,
    waiting: DashMap<ThreadId, TypeKey>,
}

impl InstanceCache {
    #[inline]
    pub(crate) fn new() -> Self {
        Self {
            cells: DashMap::with_hasher(BuildTypeIdHasher::default()),
            builders: DashMap::with_hasher(BuildTypeIdHasher::default()),
            waiting: DashMap::new(),
        }
    }

    /// Returns the cached instance, if there is one
    #[inline]
    pub(crate) fn get(&self, key: &TypeKey) -> Option<ArcService> {
        self.cells
            .get(key)
            .and_then(|cell| cell.get().cloned())
    }

    /// Returns the cached instance or runs `init` to produce and cache it.
    ///
    /// The map guard is released before `init` runs, since `init` resolves
    /// other types through this very cache.
    pub(crate) fn get_or_try_init<F>(&self, key: TypeKey, init: F) -> Result<ArcService, Error>
    where
        F: FnOnce() -> Result<ArcService, Error>
    {
        let cell = self.cells
            .entry(key)
            .or_default()
            .value()
            .clone();
        if let Some(instance) = cell.get() {
            return Ok(instance.clone());
        }

        let current = thread::current().id();

        // Published before the graph is walked, so of two threads closing
        // a cycle at the same time at least one sees the other.
        let _waiting = WaitGuard::new(&self.waiting, current, key);
        self.check_deadlock(current, key)?;

        cell.get_or_try_init(|| {
            self.waiting.remove_if(&current, |_, waited| *waited == key);
            let _building = BuildGuard::new(&self.builders, key, current);
            init()
        })
        .cloned()
    }

    /// Follows the chain "`key` is built by a thread that waits for a type
    /// built by a thread that waits for..." and fails if it ends at `current`
    fn check_deadlock(&self, current: ThreadId, key: TypeKey) -> Result<(), Error> {
        let mut path = vec![key];
        let mut next = key;

        // Each step visits another waiting thread, so the chain is at most that long
        for _ in 0..=self.waiting.len() {
            let Some(owner) = self.builders.get(&next).map(|entry| *entry.value()) else {
                return Ok(());
            };

            if owner == current {
                let path = std::iter::once(next)
                    .chain(path)
                    .map(|key| key.name())
                    .collect::<Vec<_>>()
                    .join(" -> ");

                #[cfg(feature = "tracing")]
                tracing::debug!("circular dependency detected across threads: {path}");

                return Err(Error::CircularDependency(path));
            }

            let Some(waited) = self.waiting.get(&owner).map(|entry| *entry.value()) else {
                return Ok(());
            };

            path.push(waited);
            next = waited;
        }

        Ok(())
    }

    /// Returns `true` if an instance for the key has been produced
    #[inline]
    pub(crate) fn contains(&self, key: &TypeKey) -> bool {
        self.get(key).is_some()
    }

    /// Returns the number of produced instances
    pub(crate) fn len(&self) -> usize {
        self.cells
            .iter()
            .filter(|cell| cell.get().is_some())
            .count()
    }
}

/// Marks the current thread as waiting for `key` until dropped
struct WaitGuard<'a> {
    waiting: &'a DashMap<ThreadId, TypeKey>,
    thread: ThreadId,
    key: TypeKey,
}

impl<'a> WaitGuard<'a> {
    #[inline]
    fn new(waiting: &'a DashMap<ThreadId, TypeKey>, thread: ThreadId, key: TypeKey) -> Self {
        waiting.insert(thread, key);
        Self { waiting, thread, key }
    }
}

impl Drop for WaitGuard<'_> {
    #[inline]
    fn drop(&mut self) {
        self.waiting.remove_if(&self.thread, |_, waited| *waited == self.key);
    }
}

/// Marks the current thread as the builder of `key` until dropped
struct BuildGuard<'a> {
    builders: &'a DashMap<TypeKey, ThreadId, BuildTypeIdHasher>,
    key: TypeKey,
}

impl<'a> BuildGuard<'a> {
    #[inline]
    fn new(builders: &'a DashMap<TypeKey, ThreadId, BuildTypeIdHasher>, key: TypeKey, thread: ThreadId) -> Self {
        builders.insert(key, thread);
        Self { builders, key }
    }
}

impl Drop for BuildGuard<'_> {
    #[inline]
    fn drop(&mut self) {
        self.builders.remove(&self.key);
    }
}
