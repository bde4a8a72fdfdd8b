//! Carrying the container and configuration in request-scoped [`Extensions`]

use crate::config::Configuration;
use http::Extensions;
use std::sync::Arc;
use trellis_di::{ArcService, error::Error};

impl<'a> TryFrom<&'a Extensions> for &'a Configuration {
    type Error = Error;

    #[inline]
    fn try_from(extensions: &'a Extensions) -> Result<Self, Self::Error> {
        extensions
            .get::<Configuration>()
            .ok_or(Error::ContainerMissing)
    }
}

impl TryFrom<&Extensions> for Configuration {
    type Error = Error;

    #[inline]
    fn try_from(extensions: &Extensions) -> Result<Self, Self::Error> {
        let config: &Configuration = extensions.try_into()?;
        Ok(config.clone())
    }
}

/// Stores `config` and its container in `extensions`,
/// replacing the ones that were there before.
///
/// # Example
/// ```
/// use http::Extensions;
/// use trellis::{Container, config::Configuration, context};
///
/// let config = Configuration::new();
/// config.configure("greeting", || "Hello").unwrap();
///
/// let mut extensions = Extensions::new();
/// context::attach(&mut extensions, config);
///
/// let greeting = context::get_as::<&'static str>(&extensions, "greeting").unwrap();
/// assert_eq!(*greeting, "Hello");
/// assert!(Container::try_from(&extensions).is_ok());
/// ```
pub fn attach(extensions: &mut Extensions, config: Configuration) {
    extensions.insert(config.container().clone());
    extensions.insert(config);
}

/// Returns the value configured under `key` in the [`Configuration`] stored in `extensions`.
///
/// Returns `None` if there is no configuration in `extensions`
/// or [`Configuration::get`] returns `None`.
pub fn get(extensions: &Extensions, key: &str) -> Option<ArcService> {
    let config: &Configuration = extensions.try_into().ok()?;
    config.get(key)
}

/// Same as [`get`] but downcasts the value to `T`
pub fn get_as<T: Send + Sync + 'static>(extensions: &Extensions, key: &str) -> Option<Arc<T>> {
    let config: &Configuration = extensions.try_into().ok()?;
    config.get_as::<T>(key)
}

#[cfg(test)]
mod tests {
    use super::{attach, get, get_as};
    use crate::{Container, Dc, config::Configuration, error::Error};
    use http::Extensions;

    struct Database {
        url: &'static str
    }

    #[test]
    fn it_gets_configured_value_from_extensions() {
        let config = Configuration::new();
        config.configure("db", || Database { url: "sqlite://test.db" }).unwrap();

        let mut extensions = Extensions::new();
        attach(&mut extensions, config);

        let db = get_as::<Database>(&extensions, "db").unwrap();

        assert_eq!(db.url, "sqlite://test.db");
        assert!(get(&extensions, "cache").is_none());
    }

    #[test]
    fn it_returns_none_without_configuration() {
        let extensions = Extensions::new();

        assert!(get(&extensions, "db").is_none());
        assert!(get_as::<Database>(&extensions, "db").is_none());
    }

    #[test]
    fn it_fails_to_extract_configuration_from_empty_extensions() {
        let extensions = Extensions::new();

        let result = Configuration::try_from(&extensions);

        assert!(matches!(result, Err(Error::ContainerMissing)));
    }

    #[test]
    fn it_shares_container_with_configuration() {
        let config = Configuration::new();
        config.configure("db", || Database { url: "sqlite://test.db" }).unwrap();

        let mut extensions = Extensions::new();
        attach(&mut extensions, config);

        let from_config = Configuration::try_from(&extensions)
            .unwrap()
            .container()
            .resolve_shared::<Database>()
            .unwrap();
        let from_container = Dc::<Database>::try_from(&extensions).unwrap();

        assert!(std::sync::Arc::ptr_eq(&from_config, &from_container.into_inner()));
    }

    #[test]
    fn it_replaces_previous_configuration() {
        let first = Configuration::new();
        first.configure("db", || Database { url: "sqlite://first.db" }).unwrap();
        let second = Configuration::new();
        second.configure("db", || Database { url: "sqlite://second.db" }).unwrap();

        let mut extensions = Extensions::new();
        extensions.insert(Container::new());
        attach(&mut extensions, first);
        attach(&mut extensions, second);

        let db = get_as::<Database>(&extensions, "db").unwrap();

        assert_eq!(db.url, "sqlite://second.db");
        assert!(Container::try_from(&extensions).unwrap().is_registered::<Database>());
    }
}
