//! Runtime configuration of a DI container

/// Describes what happens when a provider is registered for a type
/// that already has one
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// The later registration replaces the earlier one
    #[default]
    Replace,
    /// The later registration fails with [`Error::AlreadyRegistered`](crate::error::Error::AlreadyRegistered)
    /// and the earlier one is kept
    Reject,
}

/// Represents a DI container configuration
#[derive(Debug, Clone, Copy, Default)]
pub struct ContainerOptions {
    /// Specifies how duplicate registrations are handled
    ///
    /// Default: [`DuplicatePolicy::Replace`]
    duplicates: DuplicatePolicy,
}

impl ContainerOptions {
    /// Creates a default container configuration
    ///
    /// Defaults:
    /// - duplicates: [`DuplicatePolicy::Replace`]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures how duplicate registrations are handled
    pub fn with_duplicates(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicates = policy;
        self
    }

    /// Configures the container to fail on duplicate registrations
    pub fn reject_duplicates(self) -> Self {
        self.with_duplicates(DuplicatePolicy::Reject)
    }

    /// Returns the configured duplicate registration policy
    #[inline]
    pub fn duplicates(&self) -> DuplicatePolicy {
        self.duplicates
    }
}
