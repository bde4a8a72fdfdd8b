//! Tools for dependency injection
//!
//! Providers are registered against the type they produce, with either a
//! [`Scope::Singleton`] or a [`Scope::Transient`] lifetime, and are resolved
//! together with their dependencies on demand.
//!
//! # Example
//! ```
//! use trellis_di::{Container, Dc};
//!
//! struct Config {
//!     url: &'static str
//! }
//!
//! struct DbService {
//!     config: Dc<Config>
//! }
//!
//! let container = Container::new();
//! container.register_singleton(Config { url: "sqlite://test.db" }).unwrap();
//! container.register_transient_factory(|config: Dc<Config>| DbService { config }).unwrap();
//!
//! let url = container.invoke(|db: Dc<DbService>| db.config.url).unwrap();
//! assert_eq!(url, "sqlite://test.db");
//! ```

pub use crate::{
    bind::{Bind, Binder},
    container::{
        ArcService,
        Container,
        ContainerBuilder,
        FromContainer,
        GenericFactory,
        Scope
    },
    dc::Dc,
    invoke::Invocable,
    key::TypeKey,
    options::{ContainerOptions, DuplicatePolicy},
};

pub mod error;
pub mod container;
pub mod key;
pub mod options;
pub mod inject;
pub mod invoke;
pub mod bind;
pub mod dc;
