//! Utilities to opt types into injection

/// An `injectable!` macro that implements the [`FromContainer`](crate::FromContainer)
/// trait for one or more types by resolving them from the container.
///
/// # Macro Syntax
/// ```ignore
/// injectable! {
///     Type1
///     Type2
///     …
///     TypeN
/// };
/// ```
/// Each `Type` must be `Clone + Send + Sync + 'static`. Once declared, it can be used
/// as a factory argument, an [`invoke`](crate::Container::invoke) argument or a
/// [`Bind`](crate::Bind) field. Use [`Dc<T>`](crate::Dc) instead to receive a shared pointer.
///
/// # Example
/// ```
/// use trellis_di::{Container, injectable};
///
/// #[derive(Clone)]
/// struct Config {
///     url: String
/// }
///
/// #[derive(Clone)]
/// struct DbService {
///     config: Config
/// }
///
/// injectable! {
///     Config
///     DbService
/// };
///
/// let container = Container::new();
/// container.register_singleton(Config { url: "sqlite://test.db".into() }).unwrap();
/// container.register_transient_factory(|config: Config| DbService { config }).unwrap();
///
/// let url = container.invoke(|db: DbService| db.config.url).unwrap();
/// assert_eq!(url, "sqlite://test.db");
/// ```
#[macro_export]
macro_rules! injectable {
    ($($name:ident)*) => {
        $(impl $crate::FromContainer for $name {
            #[inline]
            fn from_container(container: &$crate::Container) -> Result<Self, $crate::error::Error> {
                container.resolve::<$name>()
            }
        })*
    };
}

#[cfg(test)]
mod tests {
    use crate::{Container, FromContainer, error::Error};

    #[derive(Default, Clone)]
    struct SimpleService {
        value: i32,
    }

    #[derive(Clone)]
    struct ServiceWithDependency {
        service: SimpleService,
        multiplier: i32,
    }

    injectable! {
        SimpleService
        ServiceWithDependency
    }

    #[test]
    fn it_injects_registered_service() {
        let container = Container::new();
        container.register_singleton(SimpleService { value: 100 }).unwrap();

        let service = SimpleService::from_container(&container).unwrap();

        assert_eq!(service.value, 100);
    }

    #[test]
    fn it_injects_service_with_dependencies() {
        let container = Container::new();
        container.register_transient_default::<SimpleService>().unwrap();
        container.register_transient_factory(|service: SimpleService| ServiceWithDependency {
            service,
            multiplier: 2
        }).unwrap();

        let service = ServiceWithDependency::from_container(&container).unwrap();

        assert_eq!(service.service.value, 0);
        assert_eq!(service.multiplier, 2);
    }

    #[test]
    fn it_fails_when_dependency_not_registered() {
        let container = Container::new();

        let result = ServiceWithDependency::from_container(&container);

        assert!(matches!(result, Err(Error::NotRegistered(_))));
    }

    #[test]
    fn it_tests_send_sync_requirements() {
        fn assert_send_sync<T: Send + Sync>() {}

        assert_send_sync::<SimpleService>();
        assert_send_sync::<ServiceWithDependency>();
        assert_send_sync::<Container>();
    }
}
