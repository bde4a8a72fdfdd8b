//! Named configuration on top of the DI container

use dashmap::DashMap;
use std::{error::Error as StdError, sync::Arc};
use trellis_di::{
    ArcService,
    Container,
    FromContainer,
    GenericFactory,
    TypeKey,
    error::Error
};

/// A set of named values, each of them produced once by a singleton provider.
///
/// Keys only point to the produced type, the value itself lives in the wrapped
/// [`Container`]. Two keys configured with constructors of the same type share
/// a provider, so the last one registered wins for both.
///
/// # Example
/// ```
/// use trellis::config::Configuration;
///
/// struct Database {
///     url: String
/// }
///
/// let config = Configuration::new();
/// config.configure("db", || Database { url: "sqlite://test.db".into() }).unwrap();
///
/// let db = config.get_as::<Database>("db").unwrap();
/// assert_eq!(db.url, "sqlite://test.db");
/// assert!(config.get("cache").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Configuration {
    container: Container,
    keys: Arc<DashMap<String, TypeKey>>
}

impl From<Container> for Configuration {
    #[inline]
    fn from(container: Container) -> Self {
        Self {
            container,
            keys: Default::default()
        }
    }
}

impl Configuration {
    /// Creates an empty configuration with its own container
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the container that holds the configured values
    #[inline]
    pub fn container(&self) -> &Container {
        &self.container
    }

    /// Registers `factory` as a singleton provider and binds `key` to the type it produces.
    ///
    /// Configuring an existing key rebinds it to the new type.
    pub fn configure<T, F, Args>(&self, key: impl Into<String>, factory: F) -> Result<(), Error>
    where
        T: Send + Sync + 'static,
        F: GenericFactory<Args, Output = T>,
        Args: FromContainer
    {
        self.container.register_singleton_factory(factory)?;
        self.remember::<T>(key.into());
        Ok(())
    }

    /// Same as [`Configuration::configure`] for a constructor that may fail
    pub fn try_configure<T, E, F, Args>(&self, key: impl Into<String>, factory: F) -> Result<(), Error>
    where
        T: Send + Sync + 'static,
        E: StdError + Send + Sync + 'static,
        F: GenericFactory<Args, Output = Result<T, E>>,
        Args: FromContainer
    {
        self.container.try_register_singleton_factory(factory)?;
        self.remember::<T>(key.into());
        Ok(())
    }

    /// Returns the value configured under `key`.
    ///
    /// Returns `None` if the key is unknown or the value could not be constructed.
    pub fn get(&self, key: &str) -> Option<ArcService> {
        let type_key = self.type_of(key)?;
        self.container
            .resolve_any(type_key)
            .inspect_err(|_err| {
                #[cfg(feature = "tracing")]
                tracing::debug!(key, "unable to get configured value: {_err}");
            })
            .ok()
    }

    /// Returns the value configured under `key` as `T`.
    ///
    /// Returns `None` if the key is unknown, the value could not be constructed,
    /// or it is not a `T`.
    pub fn get_as<T: Send + Sync + 'static>(&self, key: &str) -> Option<Arc<T>> {
        self.get(key)?.downcast::<T>().ok()
    }

    /// Returns the type bound to `key`
    #[inline]
    pub fn type_of(&self, key: &str) -> Option<TypeKey> {
        self.keys.get(key).map(|entry| *entry.value())
    }

    /// Returns `true` if `key` has been configured
    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.keys.contains_key(key)
    }

    /// Returns all configured keys in alphabetical order
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.keys
            .iter()
            .map(|entry| entry.key().clone())
            .collect();
        keys.sort_unstable();
        keys
    }

    fn remember<T: Send + Sync + 'static>(&self, key: String) {
        let type_key = TypeKey::of::<T>();
        #[cfg(feature = "tracing")]
        tracing::debug!(key = key.as_str(), service = type_key.name(), "configured");
        self.keys.insert(key, type_key);
    }
}
