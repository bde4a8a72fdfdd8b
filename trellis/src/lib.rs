//! # Trellis
//!
//! > Small dependency injection container for Rust: typed providers, singleton and
//! > transient scopes, and injection into functions and structs.
//!
//! ## Features
//! * Providers registered and resolved by type, no runtime reflection
//! * Singleton and transient scopes
//! * Thread-safe, singletons are constructed at most once
//! * Fail-fast detection of circular dependencies
//! * Injection into function arguments and struct fields
//! * Named configuration values
//! * Lookup from `http::Extensions`
//!
//! ## Example
//! ```
//! use trellis::{Container, Dc};
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! static CREATED: AtomicUsize = AtomicUsize::new(0);
//!
//! struct Config {
//!     url: String
//! }
//!
//! struct DbService {
//!     config: Dc<Config>
//! }
//!
//! let container = Container::new();
//! container.register_singleton_factory(|| {
//!     CREATED.fetch_add(1, Ordering::SeqCst);
//!     Config { url: "sqlite://test.db".into() }
//! }).unwrap();
//! container.register_transient_factory(|config: Dc<Config>| DbService { config }).unwrap();
//!
//! for _ in 0..2 {
//!     let url = container.invoke(|db: Dc<DbService>| db.config.url.clone()).unwrap();
//!     assert_eq!(url, "sqlite://test.db");
//! }
//!
//! assert_eq!(CREATED.load(Ordering::SeqCst), 1);
//! ```

pub use trellis_di::{
    ArcService,
    Bind,
    Binder,
    Container,
    ContainerBuilder,
    ContainerOptions,
    Dc,
    DuplicatePolicy,
    FromContainer,
    GenericFactory,
    Invocable,
    Scope,
    TypeKey,
    injectable,
};

#[cfg(feature = "macros")]
pub use trellis_macros::Bind;

pub mod config;
pub mod context;

pub mod error {
    //! Errors of dependency resolution
    pub use trellis_di::error::{BoxError, Error};
}
