//! Detection of circular dependencies

use crate::{error::Error, key::TypeKey};
use std::cell::RefCell;

thread_local! {
    /// Types being resolved on this thread, outermost first,
    /// tagged with the address of the container that resolves them
    static RESOLVING: RefCell<Vec<(usize, TypeKey)>> = const { RefCell::new(Vec::new()) };
}

/// Marks a type as being resolved until dropped.
///
/// Nested resolutions run on the same thread and drop their guards in
/// reverse order, so the stack always mirrors the current resolution path.
#[derive(Debug)]
pub(crate) struct ResolutionGuard(());

impl ResolutionGuard {
    /// Pushes `key` onto the resolution path of `container`, or fails
    /// if the key is already on it
    pub(crate) fn enter(container: usize, key: TypeKey) -> Result<Self, Error> {
        RESOLVING.with(|stack| {
            let mut stack = stack.borrow_mut();
            let start = stack
                .iter()
                .position(|entry| *entry == (container, key));

            if let Some(start) = start {
                let path = stack[start..]
                    .iter()
                    .filter(|(owner, _)| *owner == container)
                    .map(|(_, key)| key.name())
                    .chain(std::iter::once(key.name()))
                    .collect::<Vec<_>>()
                    .join(" -> ");

                #[cfg(feature = "tracing")]
                tracing::debug!("circular dependency detected: {path}");

                return Err(Error::CircularDependency(path));
            }

            stack.push((container, key));
            Ok(Self(()))
        })
    }
}

impl Drop for ResolutionGuard {
    #[inline]
    fn drop(&mut self) {
        let _ = RESOLVING.try_with(|stack| stack.borrow_mut().pop());
    }
}
