//! Slot storage and the document store built on it.
//!
//! # Responsibility
//! - Define the key/value slot contract the document is persisted through.
//! - Provide in-memory and SQLite-backed slot implementations.
//! - Own the single serialized root document (`DocumentStore`).
//!
//! # Invariants
//! - A slot write replaces the whole value; there are no partial writes.
//! - Store-level errors are semantic (`CorruptStore`) or transport (`Db`).

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod document_store;
pub mod memory;
pub mod sqlite;

pub type StoreResult<T> = Result<T, StoreError>;

/// Error raised by slot backends and the document store.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    /// Connection was not migrated or lacks the `slots` table.
    MissingRequiredTable(&'static str),
    /// The stored document exists but cannot be decoded.
    CorruptStore(String),
    /// The document could not be encoded for persistence.
    Encode(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "slot database is missing required table `{table}`")
            }
            Self::CorruptStore(message) => write!(f, "stored document is corrupt: {message}"),
            Self::Encode(err) => write!(f, "failed to encode document: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::MissingRequiredTable(_) | Self::CorruptStore(_) => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Named text slots, the persistence primitive under the document store.
pub trait SlotStore {
    /// Returns the slot value, or `None` when the slot was never written.
    fn get_slot(&self, key: &str) -> StoreResult<Option<String>>;
    /// Writes `value`, replacing any previous value.
    fn set_slot(&self, key: &str, value: &str) -> StoreResult<()>;
    /// Removes the slot. Removing a missing slot is not an error.
    fn remove_slot(&self, key: &str) -> StoreResult<()>;
}

impl<S: SlotStore + ?Sized> SlotStore for &S {
    fn get_slot(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get_slot(key)
    }

    fn set_slot(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set_slot(key, value)
    }

    fn remove_slot(&self, key: &str) -> StoreResult<()> {
        (**self).remove_slot(key)
    }
}
