//! Extractors for fetching data from DI container

use super::{Error, Container};

/// A trait that defines how to extract the `Self` from DI container
///
/// Constructor arguments, [`invoke`](Container::invoke) arguments and
/// [`Bind`](crate::Bind) fields are all extracted with this trait.
pub trait FromContainer: Sized + Send + Sync {
    /// Extracts `Self` from DI container
    fn from_container(container: &Container) -> Result<Self, Error>;
}

impl FromContainer for Container {
    #[inline]
    fn from_container(container: &Container) -> Result<Self, Error> {
        Ok(container.clone())
    }
}

impl FromContainer for () {
    #[inline]
    fn from_container(_: &Container) -> Result<Self, Error> {
        Ok(())
    }
}

macro_rules! define_generic_from_container {
    ($($T: ident),*) => {
        impl<$($T: FromContainer),+> FromContainer for ($($T,)+) {
            #[inline]
            #[allow(non_snake_case)]
            fn from_container(container: &Container) -> Result<Self, Error>{
                let tuple = (
                    $(
                    $T::from_container(container)?,
                    )*
                );
                Ok(tuple)
            }
        }
    }
}

define_generic_from_container! { T1 }
define_generic_from_container! { T1, T2 }
define_generic_from_container! { T1, T2, T3 }
define_generic_from_container! { T1, T2, T3, T4 }
define_generic_from_container! { T1, T2, T3, T4, T5 }
