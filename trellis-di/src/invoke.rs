//! Calling functions with injected arguments

use crate::{Container, FromContainer, error::Error};

/// A function whose arguments can all be extracted from the DI container.
///
/// Implemented for every `FnOnce` of up to five arguments where each argument
/// implements [`FromContainer`].
pub trait Invocable<Args> {
    /// A type of the value the function returns
    type Output;

    /// Calls the function with already resolved arguments
    fn invoke(self, args: Args) -> Self::Output;
}

impl<F, R> Invocable<()> for F
where
    F: FnOnce() -> R
{
    type Output = R;

    #[inline]
    fn invoke(self, _: ()) -> Self::Output {
        self()
    }
}

macro_rules! define_invocable ({ $($param:ident)* } => {
    impl<F, R, $($param,)*> Invocable<($($param,)*)> for F
    where
        F: FnOnce($($param),*) -> R,
    {
        type Output = R;

        #[inline]
        #[allow(non_snake_case)]
        fn invoke(self, ($($param,)*): ($($param,)*)) -> Self::Output {
            (self)($($param,)*)
        }
    }
});

define_invocable! { T1 }
define_invocable! { T1 T2 }
define_invocable! { T1 T2 T3 }
define_invocable! { T1 T2 T3 T4 }
define_invocable! { T1 T2 T3 T4 T5 }

impl Container {
    /// Calls `func`, injecting its arguments from the container.
    ///
    /// All arguments are resolved in declaration order before `func` runs.
    /// If any of them fails to resolve, `func` is never called and the
    /// resolution error is returned. Otherwise the value returned by `func`
    /// is passed back to the caller as is, including a `Result`.
    ///
    /// # Example
    /// ```
    /// use trellis_di::{Container, Dc};
    ///
    /// struct Greeter;
    ///
    /// impl Greeter {
    ///     fn greet(&self, name: &str) -> String {
    ///         format!("Hello, {name}!")
    ///     }
    /// }
    ///
    /// let container = Container::new();
    /// container.register_transient_factory(|| Greeter).unwrap();
    ///
    /// let greeting = container
    ///     .invoke(|greeter: Dc<Greeter>| greeter.greet("world"))
    ///     .unwrap();
    ///
    /// assert_eq!(greeting, "Hello, world!");
    /// ```
    pub fn invoke<F, Args>(&self, func: F) -> Result<F::Output, Error>
    where
        F: Invocable<Args>,
        Args: FromContainer
    {
        let args = Args::from_container(self)?;
        Ok(func.invoke(args))
    }
}
