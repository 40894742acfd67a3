//! In-memory slot store for tests and ephemeral sessions.

use crate::store::{SlotStore, StoreResult};
use std::cell::RefCell;
use std::collections::HashMap;

/// `HashMap`-backed slots. Single-threaded (`RefCell`), like the UI thread it
/// stands in for.
#[derive(Debug, Default)]
pub struct MemorySlotStore {
    slots: RefCell<HashMap<String, String>>,
}

impl MemorySlotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seeds one slot with raw text (for example a corrupt document).
    pub fn with_slot(key: impl Into<String>, value: impl Into<String>) -> Self {
        let store = Self::new();
        store.slots.borrow_mut().insert(key.into(), value.into());
        store
    }

    /// Returns the raw text of a slot, bypassing decoding.
    pub fn raw_slot(&self, key: &str) -> Option<String> {
        self.slots.borrow().get(key).cloned()
    }
}

impl SlotStore for MemorySlotStore {
    fn get_slot(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.raw_slot(key))
    }

    fn set_slot(&self, key: &str, value: &str) -> StoreResult<()> {
        self.slots
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_slot(&self, key: &str) -> StoreResult<()> {
        self.slots.borrow_mut().remove(key);
        Ok(())
    }
}
