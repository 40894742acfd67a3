//! Generic record repository.
//!
//! # Responsibility
//! - List/get/add/update/delete records of one collection.
//!
//! # Invariants
//! - `add` does not check id uniqueness; generating unique ids is the caller's
//!   contract.
//! - `update` merges over the first record with the id and reports whether
//!   one was found; nothing is written when it was not.
//! - `delete` removes every record with the id and always persists.

use crate::model::record::Record;
use crate::repo::RepoResult;
use crate::store::document_store::DocumentStore;
use crate::store::SlotStore;
use log::{debug, info};
use std::marker::PhantomData;

/// Collection-scoped repository for record type `T`.
pub struct RecordRepository<'store, S: SlotStore, T: Record> {
    store: &'store DocumentStore<S>,
    _record: PhantomData<fn() -> T>,
}

impl<'store, S: SlotStore, T: Record> RecordRepository<'store, S, T> {
    pub fn new(store: &'store DocumentStore<S>) -> Self {
        Self {
            store,
            _record: PhantomData,
        }
    }

    /// Returns the current collection in stored order.
    pub fn list(&self) -> RepoResult<Vec<T>> {
        let document = self.store.load()?;
        Ok(T::collection(&document).to_vec())
    }

    /// Returns the first record with `id`.
    pub fn get(&self, id: &str) -> RepoResult<Option<T>> {
        let document = self.store.load()?;
        Ok(T::collection(&document)
            .iter()
            .find(|record| record.id() == id)
            .cloned())
    }

    /// Appends `record` and persists the document.
    pub fn add(&self, record: T) -> RepoResult<()> {
        let id = record.id().to_string();
        self.store
            .modify(|document| T::collection_mut(document).push(record))?;
        info!(
            "event=record_add module=repo status=ok collection={} id={id}",
            T::COLLECTION
        );
        Ok(())
    }

    /// Merges `patch` over the record with `id`.
    ///
    /// Returns `false` (and writes nothing) when no record has that id.
    pub fn update(&self, id: &str, patch: T::Patch) -> RepoResult<bool> {
        let mut document = self.store.load()?;
        let Some(record) = T::collection_mut(&mut document)
            .iter_mut()
            .find(|record| record.id() == id)
        else {
            debug!(
                "event=record_update module=repo status=not_found collection={} id={id}",
                T::COLLECTION
            );
            return Ok(false);
        };

        record.apply_patch(patch);
        self.store.save(&document)?;
        info!(
            "event=record_update module=repo status=ok collection={} id={id}",
            T::COLLECTION
        );
        Ok(true)
    }

    /// Removes all records with `id` and persists, matched or not.
    pub fn delete(&self, id: &str) -> RepoResult<()> {
        let removed = self.store.modify(|document| {
            let records = T::collection_mut(document);
            let before = records.len();
            records.retain(|record| record.id() != id);
            before - records.len()
        })?;
        info!(
            "event=record_delete module=repo status=ok collection={} id={id} removed_count={removed}",
            T::COLLECTION
        );
        Ok(())
    }
}
