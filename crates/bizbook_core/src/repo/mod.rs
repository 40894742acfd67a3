//! Repository layer over the document store.
//!
//! # Responsibility
//! - Expose per-collection CRUD and settings access to services/callers.
//! - Keep the read-modify-write document cycle out of callers.
//!
//! # Invariants
//! - Every mutation persists the full document through `DocumentStore::modify`.
//! - "Not found" on update is a value (`false`), not an error; delete of a
//!   missing id is a silent no-op.

use crate::model::record::{Collection, RecordId, RecordValidationError};
use crate::store::StoreError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod record_repo;
pub mod settings_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Error for repository and record-service operations.
#[derive(Debug)]
pub enum RepoError {
    Store(StoreError),
    Validation(RecordValidationError),
    NotFound {
        collection: Collection,
        id: RecordId,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound { collection, id } => write!(f, "{collection} record not found: {id}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Validation(err) => Some(err),
            Self::NotFound { .. } => None,
        }
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<RecordValidationError> for RepoError {
    fn from(value: RecordValidationError) -> Self {
        Self::Validation(value)
    }
}
