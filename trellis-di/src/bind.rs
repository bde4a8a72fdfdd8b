//! Injection of dependencies into struct fields

use crate::{Container, FromContainer, error::Error};

/// A struct whose fields can be populated from the DI container.
///
/// Every bindable field is an `Option<T>` where `T` implements [`FromContainer`],
/// and the implementation passes each of them to [`Binder::field`] in declaration order.
/// The `Bind` derive macro of the `trellis` crate generates exactly this.
///
/// # Example
/// ```
/// use trellis_di::{Bind, Binder, Container, Dc, error::Error};
///
/// struct Config {
///     url: &'static str
/// }
///
/// #[derive(Default)]
/// struct Handlers {
///     config: Option<Dc<Config>>,
///     requests: u64,
/// }
///
/// impl Bind for Handlers {
///     fn bind_fields(&mut self, binder: &mut Binder<'_>) -> Result<(), Error> {
///         binder.field("config", &mut self.config)
///     }
/// }
///
/// let container = Container::new();
/// container.register_singleton(Config { url: "sqlite://test.db" }).unwrap();
///
/// let mut handlers = Handlers::default();
/// container.bind(&mut handlers).unwrap();
///
/// assert_eq!(handlers.config.unwrap().url, "sqlite://test.db");
/// ```
pub trait Bind {
    /// Resolves and assigns each bindable field, stopping at the first failure
    fn bind_fields(&mut self, binder: &mut Binder<'_>) -> Result<(), Error>;
}

/// Assigns resolved values to the fields of a [`Bind`] target
#[derive(Debug)]
pub struct Binder<'a> {
    container: &'a Container,
    bound: usize,
}

impl<'a> Binder<'a> {
    #[inline]
    fn new(container: &'a Container) -> Self {
        Self { container, bound: 0 }
    }

    /// Resolves `T` and stores it in `slot`.
    ///
    /// On failure the slot is left as it was and the resolution error is returned.
    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    pub fn field<T: FromContainer>(&mut self, name: &'static str, slot: &mut Option<T>) -> Result<(), Error> {
        match T::from_container(self.container) {
            Ok(value) => {
                *slot = Some(value);
                self.bound += 1;
                Ok(())
            },
            Err(err) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(field = name, "unable to bind field: {err}");
                Err(err)
            }
        }
    }

    /// Returns the number of fields bound so far
    #[inline]
    pub fn bound(&self) -> usize {
        self.bound
    }

    /// Returns the container the values are resolved from
    #[inline]
    pub fn container(&self) -> &'a Container {
        self.container
    }
}

impl Container {
    /// Populates the bindable fields of `target` from the container.
    ///
    /// Fields are bound in declaration order. If a field fails to resolve,
    /// the fields before it remain set, the fields after it remain untouched,
    /// and the resolution error is returned.
    pub fn bind<B: Bind + ?Sized>(&self, target: &mut B) -> Result<(), Error> {
        let mut binder = Binder::new(self);
        let result = target.bind_fields(&mut binder);

        #[cfg(feature = "tracing")]
        tracing::trace!(service = std::any::type_name::<B>(), fields = binder.bound(), "bound fields");

        result
    }
}

#[cfg(test)]
mod tests {
    use super::{Bind, Binder};
    use crate::{Container, Dc, error::Error, injectable};

    #[derive(Clone)]
    struct Config {
        url: &'static str
    }

    #[derive(Debug)]
    struct Logger;

    struct Metrics;

    injectable! { Config }

    #[derive(Default)]
    struct ToBind {
        config: Option<Config>,
        logger: Option<Dc<Logger>>,
        metrics: Option<Dc<Metrics>>,
        name: &'static str,
    }

    impl Bind for ToBind {
        fn bind_fields(&mut self, binder: &mut Binder<'_>) -> Result<(), Error> {
            binder.field("config", &mut self.config)?;
            binder.field("logger", &mut self.logger)?;
            binder.field("metrics", &mut self.metrics)?;
            Ok(())
        }
    }

    #[test]
    fn it_binds_all_fields() {
        let container = Container::new();
        container.register_singleton(Config { url: "sqlite://test.db" }).unwrap();
        container.register_singleton_factory(|| Logger).unwrap();
        container.register_transient_factory(|| Metrics).unwrap();

        let mut target = ToBind { name: "bound", ..Default::default() };
        container.bind(&mut target).unwrap();

        assert_eq!(target.config.unwrap().url, "sqlite://test.db");
        assert!(target.logger.is_some());
        assert!(target.metrics.is_some());
        assert_eq!(target.name, "bound");
    }

    #[test]
    fn it_stops_at_first_unresolved_field() {
        let container = Container::new();
        container.register_singleton(Config { url: "sqlite://test.db" }).unwrap();
        container.register_transient_factory(|| Metrics).unwrap();

        let mut target = ToBind::default();
        let err = container.bind(&mut target).unwrap_err();

        let expected = container.resolve_shared::<Logger>().unwrap_err();
        assert_eq!(err.to_string(), expected.to_string());
        assert!(target.config.is_some());
        assert!(target.logger.is_none());
        assert!(target.metrics.is_none());
    }

    #[test]
    fn it_shares_singletons_between_targets() {
        let container = Container::new();
        container.register_singleton(Config { url: "sqlite://test.db" }).unwrap();
        container.register_singleton_factory(|| Logger).unwrap();
        container.register_singleton_factory(|| Metrics).unwrap();

        let mut first = ToBind::default();
        let mut second = ToBind::default();
        container.bind(&mut first).unwrap();
        container.bind(&mut second).unwrap();

        assert!(Dc::ptr_eq(first.logger.as_ref().unwrap(), second.logger.as_ref().unwrap()));
    }

    #[test]
    fn it_counts_bound_fields() {
        let container = Container::new();
        container.register_singleton(Config { url: "sqlite://test.db" }).unwrap();

        let mut binder = Binder::new(&container);
        let mut config: Option<Config> = None;
        let mut logger: Option<Dc<Logger>> = None;

        binder.field("config", &mut config).unwrap();
        assert!(binder.field("logger", &mut logger).is_err());

        assert_eq!(binder.bound(), 1);
        assert_eq!(config.map(|c| c.url), Some("sqlite://test.db"));
    }
}
