//! Generic list-detail CRUD controller.
//!
//! # Responsibility
//! - Turn form drafts into creates (new id) or merge-updates (existing id).
//! - Validate records before they reach the repository.
//! - Serve searchable, ordered listings for each record page.
//!
//! # Invariants
//! - Creates always get a freshly generated id.
//! - Edits never change `id`; task completion survives edits because task
//!   drafts do not carry it.
//! - Search is a case-insensitive substring match over `Record::search_text`.

use crate::model::record::{generate_id, Record};
use crate::model::sale::Sale;
use crate::model::task::{Task, TaskPatch};
use crate::repo::record_repo::RecordRepository;
use crate::repo::{RepoError, RepoResult};
use crate::store::document_store::DocumentStore;
use crate::store::SlotStore;
use std::cmp::Ordering;

/// Listing options shared by every record page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordListQuery {
    /// Case-insensitive substring filter; blank means no filter.
    pub search: Option<String>,
}

impl RecordListQuery {
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search: Some(term.into()),
        }
    }

    fn matches<T: Record>(&self, record: &T) -> bool {
        match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(term) => record
                .search_text()
                .to_lowercase()
                .contains(&term.to_lowercase()),
        }
    }
}

/// CRUD controller for one record type.
pub struct RecordService<'store, S: SlotStore, T: Record> {
    repo: RecordRepository<'store, S, T>,
}

impl<'store, S: SlotStore, T: Record> RecordService<'store, S, T> {
    pub fn new(store: &'store DocumentStore<S>) -> Self {
        Self {
            repo: RecordRepository::new(store),
        }
    }

    /// Records in stored order, filtered by `query`.
    pub fn list(&self, query: &RecordListQuery) -> RepoResult<Vec<T>> {
        Ok(self
            .repo
            .list()?
            .into_iter()
            .filter(|record| query.matches(record))
            .collect())
    }

    pub fn get(&self, id: &str) -> RepoResult<Option<T>> {
        self.repo.get(id)
    }

    /// Creates a record from `draft`.
    ///
    /// # Errors
    /// - `RepoError::Validation` when required fields are missing.
    pub fn create(&self, draft: T::Draft) -> RepoResult<T> {
        let record = T::from_draft(generate_id(), draft);
        record.validate()?;
        self.repo.add(record.clone())?;
        Ok(record)
    }

    /// Merges `draft` over the record with `id` and returns the stored result.
    ///
    /// # Errors
    /// - `RepoError::NotFound` when no record has `id`.
    /// - `RepoError::Validation` when the merged record is invalid; nothing is
    ///   written in that case.
    pub fn edit(&self, id: &str, draft: T::Draft) -> RepoResult<T> {
        self.apply(id, T::Patch::from(draft))
    }

    /// Form submit: edit when `id` is set, create otherwise.
    pub fn save(&self, id: Option<&str>, draft: T::Draft) -> RepoResult<T> {
        match id.filter(|id| !id.is_empty()) {
            Some(id) => self.edit(id, draft),
            None => self.create(draft),
        }
    }

    pub fn delete(&self, id: &str) -> RepoResult<()> {
        self.repo.delete(id)
    }

    fn apply(&self, id: &str, patch: T::Patch) -> RepoResult<T> {
        let mut merged = self.repo.get(id)?.ok_or_else(|| not_found::<T>(id))?;
        merged.apply_patch(patch.clone());
        merged.validate()?;

        if !self.repo.update(id, patch)? {
            return Err(not_found::<T>(id));
        }
        Ok(merged)
    }
}

impl<S: SlotStore> RecordService<'_, S, Task> {
    /// Flips `completed` on the task and returns the updated task.
    pub fn toggle_completed(&self, id: &str) -> RepoResult<Task> {
        let task = self.repo.get(id)?.ok_or_else(|| not_found::<Task>(id))?;
        self.apply(
            id,
            TaskPatch {
                completed: Some(!task.completed),
                ..Default::default()
            },
        )
    }

    /// Tasks by due date ascending; undated tasks keep their order at the end.
    pub fn list_by_due_date(&self, query: &RecordListQuery) -> RepoResult<Vec<Task>> {
        let mut tasks = self.list(query)?;
        tasks.sort_by(|left, right| match (left.due_day(), right.due_day()) {
            (Some(left), Some(right)) => left.cmp(&right),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });
        Ok(tasks)
    }
}

impl<S: SlotStore> RecordService<'_, S, Sale> {
    /// Sales newest first (reverse of insertion order).
    pub fn list_recent_first(&self, query: &RecordListQuery) -> RepoResult<Vec<Sale>> {
        let mut sales = self.list(query)?;
        sales.reverse();
        Ok(sales)
    }
}

fn not_found<T: Record>(id: &str) -> RepoError {
    RepoError::NotFound {
        collection: T::COLLECTION,
        id: id.to_string(),
    }
}
