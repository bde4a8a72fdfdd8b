//! Registry of service providers

use super::{ArcService, Container};
use crate::{
    error::Error,
    key::{BuildTypeIdHasher, TypeKey},
    options::DuplicatePolicy
};
use dashmap::{DashMap, mapref::entry::Entry};
use std::{
    fmt::{Debug, Formatter},
    sync::Arc
};

/// Caching policy of a registered provider
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Scope {
    /// The constructor runs on every resolution
    #[default]
    Transient,
    /// The constructor runs at most once, the produced instance is cached
    /// for the lifetime of the container
    Singleton,
}

/// Type-erased constructor that pulls its arguments from the container
pub(crate) type ConstructorFn = Arc<
    dyn Fn(&Container) -> Result<ArcService, Error>
    + Send
    + Sync
>;

/// Describes how a single type is produced
#[derive(Clone)]
pub(crate) struct ProviderSpec {
    pub(crate) key: TypeKey,
    pub(crate) scope: Scope,
    pub(crate) constructor: ConstructorFn,
}

impl Debug for ProviderSpec {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderSpec")
            .field("key", &self.key)
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}

impl ProviderSpec {
    #[inline]
    pub(crate) fn new(key: TypeKey, scope: Scope, constructor: ConstructorFn) -> Self {
        Self { key, scope, constructor }
    }

    /// Runs the constructor against the container
    #[inline]
    pub(crate) fn construct(&self, container: &Container) -> Result<ArcService, Error> {
        (self.constructor)(container)
    }
}

/// Maps produced types to their providers. At most one provider per type.
#[derive(Debug)]
pub(crate) struct ProviderRegistry {
    providers: DashMap<TypeKey, ProviderSpec, BuildTypeIdHasher>,
    duplicates: DuplicatePolicy,
}

impl ProviderRegistry {
    #[inline]
    pub(crate) fn new(duplicates: DuplicatePolicy) -> Self {
        Self {
            providers: DashMap::with_hasher(BuildTypeIdHasher::default()),
            duplicates
        }
    }

    /// Stores the provider according to the duplicate policy
    pub(crate) fn insert(&self, spec: ProviderSpec) -> Result<(), Error> {
        match self.providers.entry(spec.key) {
            Entry::Vacant(entry) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(service = spec.key.name(), scope = ?spec.scope, "provider registered");
                entry.insert(spec);
                Ok(())
            },
            Entry::Occupied(_) if self.duplicates == DuplicatePolicy::Reject => {
                #[cfg(feature = "tracing")]
                tracing::warn!(service = spec.key.name(), "duplicate provider rejected");
                Err(Error::AlreadyRegistered(spec.key.name()))
            },
            Entry::Occupied(mut entry) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(service = spec.key.name(), scope = ?spec.scope, "provider replaced");
                entry.insert(spec);
                Ok(())
            }
        }
    }

    /// Returns a copy of the provider, so no map guard outlives the call
    #[inline]
    pub(crate) fn get(&self, key: &TypeKey) -> Option<ProviderSpec> {
        self.providers
            .get(key)
            .map(|spec| spec.value().clone())
    }

    #[inline]
    pub(crate) fn contains(&self, key: &TypeKey) -> bool {
        self.providers.contains_key(key)
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.providers.len()
    }
}
