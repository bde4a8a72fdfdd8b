//! Shared handle to a resolved service

use crate::{Container, FromContainer, error::Error};
use http::Extensions;
use std::{
    ops::{Deref, DerefMut},
    sync::Arc
};

/// `Dc` stands for Dependency Container.
///
/// This struct wraps a resolved service `T` that is **shared** through an [`Arc`].
/// For a singleton every `Dc<T>` points to the same instance.
///
/// # Example
/// ```
/// use trellis_di::{Container, Dc};
/// use std::sync::Mutex;
///
/// #[derive(Default)]
/// struct Counter {
///     hits: Mutex<i32>
/// }
///
/// let container = Container::new();
/// container.register_singleton_default::<Counter>().unwrap();
///
/// for _ in 0..3 {
///     container.invoke(|counter: Dc<Counter>| *counter.hits.lock().unwrap() += 1).unwrap();
/// }
///
/// let hits = container.invoke(|counter: Dc<Counter>| *counter.hits.lock().unwrap()).unwrap();
/// assert_eq!(hits, 3);
/// ```
#[derive(Debug)]
pub struct Dc<T: Send + Sync>(Arc<T>);

impl<T: Send + Sync> Clone for Dc<T> {
    #[inline]
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T: Send + Sync> Deref for Dc<T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: Clone + Send + Sync> DerefMut for Dc<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut T {
        Arc::make_mut(&mut self.0)
    }
}

impl<T: Send + Sync> From<Arc<T>> for Dc<T> {
    #[inline]
    fn from(inner: Arc<T>) -> Self {
        Self(inner)
    }
}

impl<T: Send + Sync> Dc<T> {
    /// Unwraps the inner [`Arc`]
    #[inline]
    pub fn into_inner(self) -> Arc<T> {
        self.0
    }

    /// Returns `true` if both handles point to the same instance
    #[inline]
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        Arc::ptr_eq(&this.0, &other.0)
    }
}

impl<T: Send + Sync + Clone> Dc<T> {
    /// Clones and returns the inner `T`.
    ///
    /// Equivalent to calling [`Clone::clone`] on the inner `T`.
    #[inline]
    pub fn cloned(&self) -> T {
        self.0.as_ref().clone()
    }
}

impl<T: Send + Sync + 'static> FromContainer for Dc<T> {
    #[inline]
    fn from_container(container: &Container) -> Result<Self, Error> {
        container
            .resolve_shared::<T>()
            .map(Dc)
    }
}

impl<T: Send + Sync + 'static> TryFrom<&Extensions> for Dc<T> {
    type Error = Error;

    #[inline]
    fn try_from(extensions: &Extensions) -> Result<Self, Self::Error> {
        let container: &Container = extensions.try_into()?;
        Self::from_container(container)
    }
}
