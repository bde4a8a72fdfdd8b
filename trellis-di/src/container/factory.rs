//! Generic factory for resolving types

use super::{ArcService, ConstructorFn, Container, FromContainer};
use crate::error::Error;
use std::{any::type_name, error::Error as StdError, sync::Arc};

/// A trait that describes a generic factory function
/// that can produce objects registered in DI container.
///
/// Implemented for every `Fn` of up to five arguments. Each argument is
/// extracted from the container with [`FromContainer`].
pub trait GenericFactory<Args>: Send + Sync + 'static {
    /// A type of object that the factory returns
    type Output;

    /// Calls a generic function with already resolved arguments
    fn call(&self, args: Args) -> Self::Output;
}

impl<F, R> GenericFactory<()> for F
where
    F: Fn() -> R + Send + Sync + 'static
{
    type Output = R;

    #[inline]
    fn call(&self, _: ()) -> Self::Output {
        self()
    }
}

macro_rules! define_generic_factory ({ $($param:ident)* } => {
    impl<F, R, $($param,)*> GenericFactory<($($param,)*)> for F
    where
        F: Fn($($param),*) -> R + Send + Sync + 'static,
    {
        type Output = R;

        #[inline]
        #[allow(non_snake_case)]
        fn call(&self, ($($param,)*): ($($param,)*)) -> Self::Output {
            (self)($($param,)*)
        }
    }
});

define_generic_factory! { T1 }
define_generic_factory! { T1 T2 }
define_generic_factory! { T1 T2 T3 }
define_generic_factory! { T1 T2 T3 T4 }
define_generic_factory! { T1 T2 T3 T4 T5 }

/// Erases a factory that returns `T`
#[inline]
pub(super) fn make_constructor_fn<T, F, Args>(factory: F) -> ConstructorFn
where
    T: Send + Sync + 'static,
    F: GenericFactory<Args, Output = T>,
    Args: FromContainer
{
    Arc::new(move |c: &Container| -> Result<ArcService, Error> {
        let args = Args::from_container(c)?;
        Ok(Arc::new(factory.call(args)))
    })
}

/// Erases a factory that returns `Result<T, E>`
#[inline]
pub(super) fn make_fallible_constructor_fn<T, E, F, Args>(factory: F) -> ConstructorFn
where
    T: Send + Sync + 'static,
    E: StdError + Send + Sync + 'static,
    F: GenericFactory<Args, Output = Result<T, E>>,
    Args: FromContainer
{
    Arc::new(move |c: &Container| -> Result<ArcService, Error> {
        let args = Args::from_container(c)?;
        factory
            .call(args)
            .map(|service| Arc::new(service) as ArcService)
            .map_err(|err| Error::construction(type_name::<T>(), err))
    })
}

#[cfg(test)]
mod tests {
    use crate::{Container, Dc, injectable};
    use super::*;

    #[derive(Debug, Clone, Copy)]
    struct X(i32);

    #[derive(Debug, Clone, Copy)]
    struct Y(i32);

    #[derive(Debug, Clone, Copy)]
    struct Point(X, Y);

    injectable! { X Y }

    #[test]
    fn it_calls_factory_with_arguments() {
        let factory = |x: X, y: Y| Point(x, y);

        let point = GenericFactory::call(&factory, (X(1), Y(2)));

        assert_eq!(point.0.0, 1);
        assert_eq!(point.1.0, 2);
    }

    #[test]
    fn it_resolves_by_injection() {
        let container = Container::new();
        container.register_transient_factory(|| X(1)).unwrap();
        container.register_transient_factory(|| Y(2)).unwrap();
        container.register_transient_factory(|x: X, y: Y| Point(x, y)).unwrap();

        let point = container.resolve::<Point>().unwrap();

        assert_eq!(point.0.0, 1);
        assert_eq!(point.1.0, 2);
    }

    #[test]
    fn it_resolves_shared_arguments() {
        let container = Container::new();
        container.register_singleton(X(1)).unwrap();
        container.register_transient_factory(|x: Dc<X>| Point(*x, Y(3))).unwrap();

        let point = container.resolve::<Point>().unwrap();

        assert_eq!(point.0.0, 1);
        assert_eq!(point.1.0, 3);
    }

    #[test]
    fn it_resolves_from_container() {
        let container = Container::new();
        container.register_transient_factory(|| X(1)).unwrap();
        container.register_transient_factory(|| Y(2)).unwrap();
        container.try_register_transient_factory(|c: Container| -> Result<Point, Error> {
            let x: X = c.resolve()?;
            let y: Y = c.resolve()?;
            Ok(Point(x, y))
        }).unwrap();

        let point = container.resolve::<Point>().unwrap();

        assert_eq!(point.0.0, 1);
        assert_eq!(point.1.0, 2);
    }
}
