//! Describes dependency injection errors

use std::{
    error::Error as StdError,
    fmt::{Display, Formatter},
    sync::Arc
};

/// A type-erased error produced by a service constructor
pub type BoxError = Arc<dyn StdError + Send + Sync>;

/// Errors raised while registering, resolving, invoking or binding services
#[derive(Debug, Clone)]
pub enum Error {
    /// The DI container was not found in the request context
    ContainerMissing,
    /// A provider for the type is already registered and duplicates are rejected
    AlreadyRegistered(&'static str),
    /// There is no provider for the requested type
    NotRegistered(&'static str),
    /// The resolved instance can not be represented as the requested type.
    ///
    /// Typed resolution never produces it for registered providers, since an
    /// instance is stored under the key of its own type. It is returned when
    /// an instance obtained for one key is downcast to another type.
    ResolveFailed(&'static str),
    /// The type was requested again while it was still being resolved.
    ///
    /// Holds the resolution path, e.g. `A -> B -> A`
    CircularDependency(String),
    /// A service constructor returned an error
    ConstructionFailed {
        /// Type name of the service that failed to construct
        service: &'static str,
        /// The error returned by the constructor
        source: BoxError
    },
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::ContainerMissing => write!(f, "Services Error: DI container is missing"),
            Error::AlreadyRegistered(type_name) => write!(f, "Services Error: service already registered: {type_name}"),
            Error::NotRegistered(type_name) => write!(f, "Services Error: no provider for type: {type_name}"),
            Error::ResolveFailed(type_name) => write!(f, "Services Error: unable to resolve the service: {type_name}"),
            Error::CircularDependency(path) => write!(f, "Services Error: circular dependency detected: {path}"),
            Error::ConstructionFailed { service, source } => write!(f, "Services Error: unable to construct {service}: {source}"),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::ConstructionFailed { source, .. } => Some(source.as_ref()),
            _ => None
        }
    }
}

impl Error {
    /// Wraps an error returned by the constructor of `service`.
    ///
    /// Container errors (e.g. a failed nested resolution) are passed through unchanged.
    pub(crate) fn construction<E>(service: &'static str, err: E) -> Self
    where
        E: StdError + Send + Sync + 'static
    {
        let err: Box<dyn StdError + Send + Sync> = Box::new(err);
        match err.downcast::<Error>() {
            Ok(err) => *err,
            Err(source) => Error::ConstructionFailed { service, source: Arc::from(source) }
        }
    }

    /// Returns `true` if the error reports a missing provider
    #[inline]
    pub fn is_not_registered(&self) -> bool {
        matches!(self, Error::NotRegistered(_))
    }

    /// Returns the error returned by a service constructor downcast to `E`
    pub fn construction_error<E: StdError + 'static>(&self) -> Option<&E> {
        match self {
            Error::ConstructionFailed { source, .. } => source.downcast_ref::<E>(),
            _ => None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Error;
    use std::error::Error as _;
    use std::fmt::{Display, Formatter};

    #[derive(Debug)]
    struct ConnectError;

    impl Display for ConnectError {
        fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            f.write_str("connection refused")
        }
    }

    impl std::error::Error for ConnectError {}

    #[test]
    fn it_formats_not_registered() {
        let err = Error::NotRegistered("app::Logger");

        assert_eq!(err.to_string(), "Services Error: no provider for type: app::Logger");
    }

    #[test]
    fn it_wraps_foreign_construction_error() {
        let err = Error::construction("app::Db", ConnectError);

        assert!(matches!(err, Error::ConstructionFailed { service: "app::Db", .. }));
        assert_eq!(err.to_string(), "Services Error: unable to construct app::Db: connection refused");
        assert!(err.construction_error::<ConnectError>().is_some());
        assert!(err.source().is_some());
    }

    #[test]
    fn it_passes_container_errors_through() {
        let err = Error::construction("app::Db", Error::NotRegistered("app::Config"));

        assert!(matches!(err, Error::NotRegistered("app::Config")));
        assert!(err.source().is_none());
    }
}
