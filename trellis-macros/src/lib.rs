//! Proc-Macros implementations for Trellis
//!

use proc_macro::TokenStream;
use syn::parse_macro_input;

mod bind;

/// Implements the `Bind` trait for a struct with named fields,
/// so that [`Container::bind`] can populate it.
///
/// Every field must be an `Option<T>` where `T` implements `FromContainer`,
/// unless it is marked with `#[bind(skip)]`. Fields are bound in declaration order.
///
/// # Example
/// ```ignore
/// use trellis::{Bind, Dc};
///
/// #[derive(Default, Bind)]
/// struct Handlers {
///     config: Option<Dc<Config>>,
///     logger: Option<Dc<Logger>>,
///     #[bind(skip)]
///     requests: u64,
/// }
///
/// // This expands to:
/// // impl Bind for Handlers {
/// //     fn bind_fields(&mut self, binder: &mut Binder<'_>) -> Result<(), Error> {
/// //         binder.field("config", &mut self.config)?;
/// //         binder.field("logger", &mut self.logger)?;
/// //         Ok(())
/// //     }
/// // }
/// ```
///
/// [`Container::bind`]: https://docs.rs/trellis-di/latest/trellis_di/struct.Container.html#method.bind
#[proc_macro_derive(Bind, attributes(bind))]
pub fn derive_bind(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as syn::DeriveInput);
    bind::expand_bind(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
