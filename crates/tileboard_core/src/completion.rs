//! Completion handles for animated operations.

use std::cell::Cell;
use std::rc::Rc;

/// Resolves once the delayed task backing an animation has fired.
///
/// Clones share state. The handle is `!Send` and lives on the frame-loop
/// thread.
#[derive(Clone, Debug, Default)]
pub struct Completion {
    resolved: Rc<Cell<bool>>,
}

impl Completion {
    /// Creates an unresolved handle.
    #[must_use]
    pub fn pending() -> Self {
        Self::default()
    }

    /// Creates a handle that is already resolved.
    #[must_use]
    pub fn resolved() -> Self {
        let completion = Self::default();
        completion.resolve();
        completion
    }

    /// Marks the operation as finished. Resolving twice is harmless.
    pub fn resolve(&self) {
        self.resolved.set(true);
    }

    /// Returns true once the operation has finished.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.resolved.get()
    }
}
