use std::{cell::Cell, rc::Rc};

/// Shared cancellation flag tying a timeline to the lifetime of its owner.
///
/// Clones observe the same flag. Disposal is one-way and idempotent.
#[derive(Clone, Debug, Default)]
pub struct DisposeToken {
    disposed: Rc<Cell<bool>>,
}

impl DisposeToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the token disposed. Returns `true` only for the call that flipped it.
    pub fn dispose(&self) -> bool {
        !self.disposed.replace(true)
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.get()
    }
}
