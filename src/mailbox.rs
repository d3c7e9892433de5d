//! A single-slot mailbox holding the most recent value.

use std::sync::{Arc, Mutex};

/// A slot that holds only the latest posted value.
///
/// One thread posts values, another reads them. Posting replaces whatever was in the slot, so a
/// slow reader skips values instead of letting them pile up. Values are handed out as [`Arc`]s, so
/// a reader never sees a value that is still being built.
pub struct Latest<T> {
    slot: Mutex<Option<Arc<T>>>,
}

impl<T> Default for Latest<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Latest<T> {
    /// Creates an empty slot.
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }

    /// Stores `value` in the slot, returning the value it replaced.
    pub fn post(&self, value: T) -> Option<Arc<T>> {
        let value = Arc::new(value);
        self.slot.lock().unwrap().replace(value)
    }

    /// Returns the latest value without removing it.
    pub fn get(&self) -> Option<Arc<T>> {
        self.slot.lock().unwrap().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.slot.lock().unwrap().is_none()
    }
}
