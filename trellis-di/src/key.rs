//! Type identity used as the registry and cache key

use std::{
    any::{Any, TypeId, type_name},
    fmt::{Display, Formatter},
    hash::{BuildHasherDefault, Hash, Hasher}
};

/// Identifies a type that can be produced by the container.
///
/// Two keys are equal if and only if they describe the same Rust type.
/// The type name is carried along for diagnostics only.
#[derive(Debug, Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str
}

impl TypeKey {
    /// Creates a key for `T`
    #[inline]
    pub fn of<T: ?Sized + Any>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>()
        }
    }

    /// Returns the [`TypeId`] of the described type
    #[inline]
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Returns the fully qualified name of the described type
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns `true` if this key describes `T`
    #[inline]
    pub fn is<T: ?Sized + Any>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for TypeKey {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Display for TypeKey {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name)
    }
}

/// Hasher for maps keyed by [`TypeKey`].
///
/// A [`TypeId`] is already a hash, so it is passed through as is.
#[derive(Default)]
pub(crate) struct TypeIdHasher(u64);

impl Hasher for TypeIdHasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.0
    }

    #[cold]
    fn write(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.0 = self.0.rotate_left(8) ^ u64::from(byte);
        }
    }

    #[inline]
    fn write_u64(&mut self, id: u64) {
        self.0 = id;
    }
}

pub(crate) type BuildTypeIdHasher = BuildHasherDefault<TypeIdHasher>;

#[cfg(test)]
mod tests {
    use super::TypeKey;
    use std::collections::HashSet;
    use std::sync::Arc;

    struct Logger;
    struct Config;

    #[test]
    fn it_compares_by_type_identity() {
        assert_eq!(TypeKey::of::<Logger>(), TypeKey::of::<Logger>());
        assert_ne!(TypeKey::of::<Logger>(), TypeKey::of::<Config>());
        assert_ne!(TypeKey::of::<Logger>(), TypeKey::of::<Arc<Logger>>());
    }

    #[test]
    fn it_displays_type_name() {
        let key = TypeKey::of::<Logger>();

        assert!(key.to_string().ends_with("Logger"));
        assert_eq!(key.name(), std::any::type_name::<Logger>());
    }

    #[test]
    fn it_works_as_hash_key() {
        let mut set = HashSet::new();
        set.insert(TypeKey::of::<Logger>());
        set.insert(TypeKey::of::<Logger>());
        set.insert(TypeKey::of::<Config>());

        assert_eq!(set.len(), 2);
        assert!(set.contains(&TypeKey::of::<Config>()));
    }

    #[test]
    fn it_checks_described_type() {
        let key = TypeKey::of::<dyn Send + Sync>();

        assert!(key.is::<dyn Send + Sync>());
        assert!(!key.is::<Logger>());
    }
}
