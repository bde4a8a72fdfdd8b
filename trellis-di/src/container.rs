//! Dependency Injection container and tools

use self::{
    cache::InstanceCache,
    factory::{make_constructor_fn, make_fallible_constructor_fn},
    guard::ResolutionGuard,
    registry::{ConstructorFn, ProviderRegistry, ProviderSpec}
};
use crate::{
    error::Error,
    key::TypeKey,
    options::ContainerOptions
};
use http::{Extensions, request::Parts};
use std::{
    any::{Any, type_name},
    error::Error as StdError,
    fmt::{Debug, Formatter},
    sync::Arc
};

pub use self::{
    factory::GenericFactory,
    from_container::FromContainer,
    registry::Scope,
};

pub mod factory;
pub mod from_container;
mod cache;
mod guard;
mod registry;

/// A type-erased shared pointer to a resolved service
pub type ArcService = Arc<
    dyn Any
    + Send
    + Sync
>;

/// Represents a DI container builder,
/// that configures the container before it's created.
#[derive(Debug, Default)]
pub struct ContainerBuilder {
    options: ContainerOptions
}

impl ContainerBuilder {
    /// Creates a new DI container builder with default options
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the container options
    #[inline]
    pub fn with_options(mut self, options: ContainerOptions) -> Self {
        self.options = options;
        self
    }

    /// Configures the container options
    ///
    /// # Example
    /// ```
    /// use trellis_di::{ContainerBuilder, DuplicatePolicy};
    ///
    /// let container = ContainerBuilder::new()
    ///     .configure(|options| options.with_duplicates(DuplicatePolicy::Reject))
    ///     .build();
    /// ```
    #[inline]
    pub fn configure<F>(mut self, config: F) -> Self
    where
        F: FnOnce(ContainerOptions) -> ContainerOptions
    {
        self.options = config(self.options);
        self
    }

    /// Makes the container fail on duplicate registrations
    #[inline]
    pub fn reject_duplicates(self) -> Self {
        self.configure(ContainerOptions::reject_duplicates)
    }

    /// Build a DI container
    #[inline]
    pub fn build(self) -> Container {
        Container {
            inner: Arc::new(Inner {
                providers: ProviderRegistry::new(self.options.duplicates()),
                instances: InstanceCache::new(),
                options: self.options,
            })
        }
    }
}

#[derive(Debug)]
struct Inner {
    providers: ProviderRegistry,
    instances: InstanceCache,
    options: ContainerOptions,
}

/// Represents a DI container, that is able to register and resolve generic dependencies.
///
/// The container is cheap to clone, all clones share the same providers and instances.
///
/// # Example
/// ```
/// use trellis_di::Container;
///
/// #[derive(Clone)]
/// struct Config {
///     url: String
/// }
///
/// let container = Container::new();
/// container.register_singleton_factory(|| Config { url: "sqlite://test.db".into() }).unwrap();
///
/// let config: Config = container.resolve().unwrap();
/// assert_eq!(config.url, "sqlite://test.db");
/// ```
#[derive(Clone)]
pub struct Container {
    inner: Arc<Inner>
}

impl Debug for Container {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Container")
            .field("providers", &self.inner.providers.len())
            .field("instances", &self.inner.instances.len())
            .field("options", &self.inner.options)
            .finish()
    }
}

impl Default for Container {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

/// Registration
impl Container {
    /// Creates an empty DI container with default options
    #[inline]
    pub fn new() -> Self {
        ContainerBuilder::new().build()
    }

    /// Creates a DI container builder
    #[inline]
    pub fn builder() -> ContainerBuilder {
        ContainerBuilder::new()
    }

    /// Registers a factory that produces `T` with the given scope.
    ///
    /// Each factory argument is resolved from the container when `T` is resolved.
    pub fn register<T, F, Args>(&self, scope: Scope, factory: F) -> Result<(), Error>
    where
        T: Send + Sync + 'static,
        F: GenericFactory<Args, Output = T>,
        Args: FromContainer
    {
        self.insert::<T>(scope, make_constructor_fn(factory))
    }

    /// Registers a fallible factory that produces `T` with the given scope.
    ///
    /// An error returned by the factory fails the resolution and nothing is cached.
    pub fn try_register<T, E, F, Args>(&self, scope: Scope, factory: F) -> Result<(), Error>
    where
        T: Send + Sync + 'static,
        E: StdError + Send + Sync + 'static,
        F: GenericFactory<Args, Output = Result<T, E>>,
        Args: FromContainer
    {
        self.insert::<T>(scope, make_fallible_constructor_fn(factory))
    }

    /// Registers an already created singleton instance
    pub fn register_singleton<T: Send + Sync + 'static>(&self, instance: T) -> Result<(), Error> {
        let instance: ArcService = Arc::new(instance);
        let constructor = move |_: &Container| -> Result<ArcService, Error> {
            Ok(instance.clone())
        };
        self.insert::<T>(Scope::Singleton, Arc::new(constructor))
    }

    /// Registers a singleton service factory
    #[inline]
    pub fn register_singleton_factory<T, F, Args>(&self, factory: F) -> Result<(), Error>
    where
        T: Send + Sync + 'static,
        F: GenericFactory<Args, Output = T>,
        Args: FromContainer
    {
        self.register(Scope::Singleton, factory)
    }

    /// Registers a fallible singleton service factory
    #[inline]
    pub fn try_register_singleton_factory<T, E, F, Args>(&self, factory: F) -> Result<(), Error>
    where
        T: Send + Sync + 'static,
        E: StdError + Send + Sync + 'static,
        F: GenericFactory<Args, Output = Result<T, E>>,
        Args: FromContainer
    {
        self.try_register(Scope::Singleton, factory)
    }

    /// Registers a singleton service that is created with [`Default`]
    #[inline]
    pub fn register_singleton_default<T>(&self) -> Result<(), Error>
    where
        T: Default + Send + Sync + 'static
    {
        self.register_singleton_factory(T::default)
    }

    /// Registers a transient service factory
    #[inline]
    pub fn register_transient_factory<T, F, Args>(&self, factory: F) -> Result<(), Error>
    where
        T: Send + Sync + 'static,
        F: GenericFactory<Args, Output = T>,
        Args: FromContainer
    {
        self.register(Scope::Transient, factory)
    }

    /// Registers a fallible transient service factory
    #[inline]
    pub fn try_register_transient_factory<T, E, F, Args>(&self, factory: F) -> Result<(), Error>
    where
        T: Send + Sync + 'static,
        E: StdError + Send + Sync + 'static,
        F: GenericFactory<Args, Output = Result<T, E>>,
        Args: FromContainer
    {
        self.try_register(Scope::Transient, factory)
    }

    /// Registers a transient service that is created with [`Default`]
    #[inline]
    pub fn register_transient_default<T>(&self) -> Result<(), Error>
    where
        T: Default + Send + Sync + 'static
    {
        self.register_transient_factory(T::default)
    }

    /// Returns `true` if a provider for `T` is registered
    #[inline]
    pub fn is_registered<T: Send + Sync + 'static>(&self) -> bool {
        self.inner.providers.contains(&TypeKey::of::<T>())
    }

    /// Returns `true` if a singleton instance of `T` has already been produced
    #[inline]
    pub fn is_cached<T: Send + Sync + 'static>(&self) -> bool {
        self.inner.instances.contains(&TypeKey::of::<T>())
    }

    /// Returns the scope `T` is registered with
    #[inline]
    pub fn scope_of<T: Send + Sync + 'static>(&self) -> Option<Scope> {
        self.inner.providers
            .get(&TypeKey::of::<T>())
            .map(|spec| spec.scope)
    }

    /// Returns the number of registered providers
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.providers.len()
    }

    /// Returns `true` if no providers are registered
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the options the container was built with
    #[inline]
    pub fn options(&self) -> &ContainerOptions {
        &self.inner.options
    }

    #[inline]
    fn insert<T: Send + Sync + 'static>(&self, scope: Scope, constructor: ConstructorFn) -> Result<(), Error> {
        let spec = ProviderSpec::new(TypeKey::of::<T>(), scope, constructor);
        self.inner.providers.insert(spec)
    }
}

/// Resolution
impl Container {
    /// Resolves a service and returns a cloned instance.
    /// `T` must implement [`Clone`] otherwise use [`resolve_shared`](Self::resolve_shared) method
    /// that returns a shared pointer.
    #[inline]
    pub fn resolve<T: Send + Sync + Clone + 'static>(&self) -> Result<T, Error> {
        self.resolve_shared::<T>()
            .map(|s| s.as_ref().clone())
    }

    /// Resolves a service and returns a shared pointer.
    ///
    /// Resolving a singleton always returns the same pointer.
    #[inline]
    pub fn resolve_shared<T: Send + Sync + 'static>(&self) -> Result<Arc<T>, Error> {
        self.resolve_any(TypeKey::of::<T>())
            .and_then(Self::downcast::<T>)
    }

    /// Resolves the service registered under `key`.
    ///
    /// 1. A cached singleton instance is returned as is.
    /// 2. Otherwise the provider's arguments are resolved in declaration order,
    ///    the first failure is returned unchanged.
    /// 3. The provider runs; a singleton result is cached before it's returned,
    ///    a transient one never is.
    ///
    /// Requesting a type that is still being resolved on this thread fails with
    /// [`Error::CircularDependency`]. So does waiting for a singleton that
    /// another thread builds while that thread waits, directly or through
    /// others, for a singleton this thread builds.
    pub fn resolve_any(&self, key: TypeKey) -> Result<ArcService, Error> {
        if let Some(instance) = self.inner.instances.get(&key) {
            #[cfg(feature = "tracing")]
            tracing::trace!(service = key.name(), "resolved from cache");
            return Ok(instance);
        }

        let provider = self.inner.providers
            .get(&key)
            .ok_or(Error::NotRegistered(key.name()))?;

        let _guard = ResolutionGuard::enter(self.id(), key)?;

        match provider.scope {
            Scope::Transient => {
                #[cfg(feature = "tracing")]
                tracing::trace!(service = key.name(), "constructing transient service");
                provider.construct(self)
            },
            Scope::Singleton => self.inner.instances.get_or_try_init(key, || {
                #[cfg(feature = "tracing")]
                tracing::debug!(service = key.name(), "constructing singleton service");
                provider.construct(self)
            }),
        }
    }

    /// Fails with [`Error::ResolveFailed`] if `instance` is not a `T`
    #[inline]
    fn downcast<T: Send + Sync + 'static>(instance: ArcService) -> Result<Arc<T>, Error> {
        instance
            .downcast::<T>()
            .map_err(|_| Error::ResolveFailed(type_name::<T>()))
    }

    /// Identifies this container and its clones on a resolution path
    #[inline]
    fn id(&self) -> usize {
        Arc::as_ptr(&self.inner) as usize
    }
}

impl<'a> TryFrom<&'a Extensions> for &'a Container {
    type Error = Error;

    #[inline]
    fn try_from(extensions: &'a Extensions) -> Result<Self, Self::Error> {
        extensions.get::<Container>()
            .ok_or(Error::ContainerMissing)
    }
}

impl TryFrom<&Extensions> for Container {
    type Error = Error;

    #[inline]
    fn try_from(extensions: &Extensions) -> Result<Self, Self::Error> {
        let res: Result<&Container, Error> = extensions.try_into();
        res.cloned()
    }
}

impl TryFrom<&Parts> for Container {
    type Error = Error;

    #[inline]
    fn try_from(parts: &Parts) -> Result<Self, Self::Error> {
        Container::try_from(&parts.extensions)
    }
}
