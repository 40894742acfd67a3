//! Document store: the single serialized root document.
//!
//! # Responsibility
//! - Initialize, load, save and clear the root `Document`.
//! - Repair absent or corrupt state instead of failing the caller.
//! - Fold the legacy standalone sales slot into the document once.
//!
//! # Invariants
//! - Every save writes the whole document in one slot write.
//! - Records that fail to decode are dropped one by one; the rest of the
//!   document survives.
//! - Stored text is copied to a fresh backup slot before any repair rewrites
//!   it. Earlier backups are never overwritten.

use crate::model::document::{Document, Settings};
use crate::model::record::Record;
use crate::model::sale::Sale;
use crate::store::{SlotStore, StoreError, StoreResult};
use log::{info, warn};
use serde::de::Error as _;
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Slot that holds the serialized document.
pub const DOCUMENT_SLOT: &str = "businessData";
/// Standalone sales slot written by older builds.
pub const LEGACY_SALES_SLOT: &str = "sales";
/// First backup slot for undecodable document text. Later backups get a
/// numeric suffix (`businessData.corrupt.1`, ...).
pub const CORRUPT_BACKUP_SLOT: &str = "businessData.corrupt";

/// Owner of the persisted root document.
pub struct DocumentStore<S: SlotStore> {
    slots: S,
}

impl<S: SlotStore> DocumentStore<S> {
    pub fn new(slots: S) -> Self {
        Self { slots }
    }

    /// Writes the default document when none exists. Idempotent.
    ///
    /// Also absorbs the legacy sales slot when present.
    pub fn initialize(&self) -> StoreResult<()> {
        if self.slots.get_slot(DOCUMENT_SLOT)?.is_none() {
            self.save(&Document::default())?;
            info!("event=store_init module=store status=ok slot={DOCUMENT_SLOT}");
        }
        self.absorb_legacy_sales()
    }

    /// Returns the current document, initializing first if absent.
    ///
    /// A stored value that cannot be decoded at all is backed up, replaced
    /// with defaults and logged as a warning; the re-initialized document is
    /// returned.
    pub fn load(&self) -> StoreResult<Document> {
        match self.try_load() {
            Ok(document) => Ok(document),
            Err(StoreError::CorruptStore(message)) => {
                let backup = match self.slots.get_slot(DOCUMENT_SLOT)? {
                    Some(raw) => self.back_up(&raw)?,
                    None => String::from("none"),
                };
                warn!(
                    "event=store_load module=store status=repaired error_code=corrupt_store backup_slot={backup} error={message}"
                );
                self.save(&Document::default())?;
                self.try_load()
            }
            Err(err) => Err(err),
        }
    }

    /// Like `load`, but reports `CorruptStore` instead of resetting.
    ///
    /// Individual records that fail to decode are still dropped here: the
    /// stored text is backed up first and the remaining document is saved.
    pub fn try_load(&self) -> StoreResult<Document> {
        self.initialize()?;
        let Some(raw) = self.slots.get_slot(DOCUMENT_SLOT)? else {
            return Ok(Document::default());
        };
        let (document, dropped) =
            decode_tolerant(&raw).map_err(|err| StoreError::CorruptStore(err.to_string()))?;
        if dropped == 0 {
            return Ok(document);
        }

        let backup = self.back_up(&raw)?;
        self.save(&document)?;
        warn!(
            "event=store_load module=store status=repaired error_code=invalid_records dropped_count={dropped} backup_slot={backup}"
        );
        // Legacy sales were deferred while the stored text had invalid records.
        self.absorb_legacy_sales()?;
        let repaired = self.slots.get_slot(DOCUMENT_SLOT)?.unwrap_or_default();
        serde_json::from_str(&repaired).map_err(|err| StoreError::CorruptStore(err.to_string()))
    }

    /// Persists the full document, replacing any previous value.
    pub fn save(&self, document: &Document) -> StoreResult<()> {
        let encoded = serde_json::to_string(document).map_err(StoreError::Encode)?;
        self.slots.set_slot(DOCUMENT_SLOT, &encoded)
    }

    /// Removes the document and re-initializes it to defaults.
    pub fn clear(&self) -> StoreResult<()> {
        self.slots.remove_slot(DOCUMENT_SLOT)?;
        self.initialize()?;
        info!("event=store_clear module=store status=ok");
        Ok(())
    }

    /// Loads, mutates and saves the document as one read-modify-write cycle.
    pub fn modify<R>(&self, mutate: impl FnOnce(&mut Document) -> R) -> StoreResult<R> {
        let mut document = self.load()?;
        let result = mutate(&mut document);
        self.save(&document)?;
        Ok(result)
    }

    /// Copies `raw` to the first unused backup slot and returns its key.
    fn back_up(&self, raw: &str) -> StoreResult<String> {
        let mut slot = CORRUPT_BACKUP_SLOT.to_string();
        let mut suffix = 0u32;
        while self.slots.get_slot(&slot)?.is_some() {
            suffix += 1;
            slot = format!("{CORRUPT_BACKUP_SLOT}.{suffix}");
        }
        self.slots.set_slot(&slot, raw)?;
        Ok(slot)
    }

    fn absorb_legacy_sales(&self) -> StoreResult<()> {
        let Some(raw) = self.slots.get_slot(LEGACY_SALES_SLOT)? else {
            return Ok(());
        };

        let legacy: Vec<Sale> = match serde_json::from_str::<Option<Vec<Sale>>>(&raw) {
            Ok(sales) => sales.unwrap_or_default(),
            Err(err) => {
                warn!(
                    "event=store_migrate module=store status=skipped slot={LEGACY_SALES_SLOT} error_code=corrupt_legacy_slot error={err}"
                );
                return Ok(());
            }
        };

        let Some(document_raw) = self.slots.get_slot(DOCUMENT_SLOT)? else {
            return Ok(());
        };
        let mut document: Document = match serde_json::from_str(&document_raw) {
            Ok(document) => document,
            // Leave the legacy slot for the next pass once `load` has repaired
            // the document.
            Err(_) => return Ok(()),
        };

        let mut known: HashSet<String> = document
            .sales
            .iter()
            .map(|sale| sale.id().to_string())
            .collect();
        let total = legacy.len();
        let mut merged = 0usize;
        for sale in legacy {
            if known.insert(sale.id().to_string()) {
                document.sales.push(sale);
                merged += 1;
            }
        }

        self.save(&document)?;
        self.slots.remove_slot(LEGACY_SALES_SLOT)?;
        info!(
            "event=store_migrate module=store status=ok slot={LEGACY_SALES_SLOT} legacy_count={total} merged_count={merged}"
        );
        Ok(())
    }
}

/// Decodes stored text collection by collection and record by record.
///
/// Returns the document plus the number of dropped entries. Only text that is
/// not a JSON object fails as a whole.
fn decode_tolerant(raw: &str) -> serde_json::Result<(Document, usize)> {
    let Value::Object(mut root) = serde_json::from_str::<Value>(raw)? else {
        return Err(serde_json::Error::custom("document root must be an object"));
    };

    let mut dropped = 0usize;
    let document = Document {
        employees: decode_records(&mut root, &mut dropped),
        clients: decode_records(&mut root, &mut dropped),
        inventory: decode_records(&mut root, &mut dropped),
        tasks: decode_records(&mut root, &mut dropped),
        sales: decode_records(&mut root, &mut dropped),
        settings: decode_settings(root.remove("settings"), &mut dropped),
    };
    Ok((document, dropped))
}

fn decode_records<T: Record>(root: &mut Map<String, Value>, dropped: &mut usize) -> Vec<T> {
    let collection = T::COLLECTION;
    let items = match root.remove(collection.as_str()) {
        None | Some(Value::Null) => return Vec::new(),
        Some(Value::Array(items)) => items,
        Some(_) => {
            warn!(
                "event=store_decode module=store status=dropped collection={collection} error_code=not_an_array"
            );
            *dropped += 1;
            return Vec::new();
        }
    };

    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value::<T>(item) {
            Ok(record) => Some(record),
            Err(err) => {
                warn!(
                    "event=store_decode module=store status=dropped collection={collection} index={index} error={err}"
                );
                *dropped += 1;
                None
            }
        })
        .collect()
}

fn decode_settings(value: Option<Value>, dropped: &mut usize) -> Settings {
    match value {
        None | Some(Value::Null) => Settings::default(),
        Some(value) => serde_json::from_value(value).unwrap_or_else(|err| {
            warn!("event=store_decode module=store status=dropped field=settings error={err}");
            *dropped += 1;
            Settings::default()
        }),
    }
}
