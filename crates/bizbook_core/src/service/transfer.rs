//! Backup and restore of the whole document.
//!
//! # Responsibility
//! - Export the stored document as pretty-printed JSON.
//! - Validate and restore a document from JSON text.
//!
//! # Invariants
//! - Import decodes into the typed `Document` before anything is written;
//!   on any failure the stored document is untouched.
//! - `import_document(export())` reproduces the stored document exactly.

use crate::model::document::Document;
use crate::store::document_store::DocumentStore;
use crate::store::{SlotStore, StoreError};
use chrono::NaiveDate;
use log::{error, info, warn};
use serde::de::Error as _;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Prefix of exported backup file names.
pub const EXPORT_FILE_PREFIX: &str = "business-data-";

pub type TransferResult<T> = Result<T, TransferError>;

#[derive(Debug)]
pub enum TransferError {
    /// Payload is not JSON, or is JSON that does not describe a document.
    Malformed(serde_json::Error),
    Store(StoreError),
}

impl Display for TransferError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(err) => write!(f, "invalid import data: {err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TransferError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Malformed(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<StoreError> for TransferError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Backup file name for an export taken on `day`.
pub fn export_file_name(day: NaiveDate) -> String {
    format!("{EXPORT_FILE_PREFIX}{}.json", day.format("%Y-%m-%d"))
}

/// Parses export text into a document without touching any store.
///
/// The root must be a JSON object; serde would otherwise accept an array as a
/// positional struct.
pub fn decode_document(text: &str) -> TransferResult<Document> {
    let value: Value = serde_json::from_str(text).map_err(TransferError::Malformed)?;
    if !value.is_object() {
        return Err(TransferError::Malformed(serde_json::Error::custom(
            "expected a JSON object at the document root",
        )));
    }
    serde_json::from_value(value).map_err(TransferError::Malformed)
}

/// Import/export entry points bound to one document store.
pub struct TransferService<'store, S: SlotStore> {
    store: &'store DocumentStore<S>,
}

impl<'store, S: SlotStore> TransferService<'store, S> {
    pub fn new(store: &'store DocumentStore<S>) -> Self {
        Self { store }
    }

    /// Pretty-printed (2-space) JSON of the current document.
    pub fn export(&self) -> TransferResult<String> {
        let document = self.store.load()?;
        let text = serde_json::to_string_pretty(&document)
            .map_err(|err| TransferError::Store(StoreError::Encode(err)))?;
        info!(
            "event=export module=transfer status=ok bytes={}",
            text.len()
        );
        Ok(text)
    }

    /// Replaces the stored document with the one decoded from `text`.
    ///
    /// Returns the document that was stored.
    pub fn import_document(&self, text: &str) -> TransferResult<Document> {
        let document = match decode_document(text) {
            Ok(document) => document,
            Err(err) => {
                warn!(
                    "event=import module=transfer status=rejected error_code=malformed_import error={err}"
                );
                return Err(err);
            }
        };

        self.store.save(&document)?;
        info!(
            "event=import module=transfer status=ok employees={} clients={} inventory={} tasks={} sales={}",
            document.employees.len(),
            document.clients.len(),
            document.inventory.len(),
            document.tasks.len(),
            document.sales.len()
        );
        Ok(document)
    }

    /// `import_document` collapsed to success/failure.
    pub fn import(&self, text: &str) -> bool {
        match self.import_document(text) {
            Ok(_) => true,
            Err(TransferError::Malformed(_)) => false,
            Err(err) => {
                error!("event=import module=transfer status=error error={err}");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::export_file_name;
    use chrono::NaiveDate;

    #[test]
    fn export_file_name_is_date_stamped() {
        let day = NaiveDate::from_ymd_opt(2024, 7, 4).unwrap();
        assert_eq!(export_file_name(day), "business-data-2024-07-04.json");
    }
}
