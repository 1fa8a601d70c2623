//! Lazily computed, computed-once node properties.

use std::fmt;

use once_cell::sync::OnceCell;

use super::error::AdapterResult;

/// A property value computed at most once per node.
///
/// Concurrent first callers block on the running computation and then see
/// its value. A failed computation leaves the cell empty so the next access
/// retries.
pub struct Memo<T> {
    cell: OnceCell<T>,
}

impl<T> Memo<T> {
    pub const fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    pub fn get_or_try_init(&self, compute: impl FnOnce() -> AdapterResult<T>) -> AdapterResult<&T> {
        self.cell.get_or_try_init(compute)
    }

    /// The value, if it has already been computed.
    pub fn get(&self) -> Option<&T> {
        self.cell.get()
    }

    pub fn is_computed(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl<T> Default for Memo<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Memo<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.cell.get() {
            Some(value) => f.debug_tuple("Memo").field(value).finish(),
            None => f.write_str("Memo(<pending>)"),
        }
    }
}
