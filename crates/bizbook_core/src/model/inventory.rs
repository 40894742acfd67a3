//! Inventory item record and derived stock status.
//!
//! # Invariants
//! - `quantity` is a non-negative integer.
//! - Stock status is derived from `quantity` on read, never persisted.

use crate::model::document::Document;
use crate::model::record::{
    overwrite, require_text, Collection, Record, RecordId, RecordValidationError,
};
use serde::{Deserialize, Serialize};

/// Quantities at or below this count as low stock (zero included).
pub const LOW_STOCK_THRESHOLD: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: RecordId,
    pub item_name: String,
    pub category: String,
    pub quantity: u32,
}

/// Stock level bucket shown next to each inventory row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockStatus {
    InStock,
    LowStock,
    OutOfStock,
}

impl StockStatus {
    pub fn for_quantity(quantity: u32) -> Self {
        if quantity == 0 {
            Self::OutOfStock
        } else if quantity <= LOW_STOCK_THRESHOLD {
            Self::LowStock
        } else {
            Self::InStock
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::InStock => "In Stock",
            Self::LowStock => "Low Stock",
            Self::OutOfStock => "Out of Stock",
        }
    }
}

impl InventoryItem {
    pub fn stock_status(&self) -> StockStatus {
        StockStatus::for_quantity(self.quantity)
    }

    /// Low stock in the dashboard sense: `quantity <= 5`, including zero.
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= LOW_STOCK_THRESHOLD
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryItemDraft {
    pub item_name: String,
    pub category: String,
    pub quantity: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryItemPatch {
    pub item_name: Option<String>,
    pub category: Option<String>,
    pub quantity: Option<u32>,
}

impl From<InventoryItemDraft> for InventoryItemPatch {
    fn from(draft: InventoryItemDraft) -> Self {
        Self {
            item_name: Some(draft.item_name),
            category: Some(draft.category),
            quantity: Some(draft.quantity),
        }
    }
}

impl Record for InventoryItem {
    const COLLECTION: Collection = Collection::Inventory;
    type Draft = InventoryItemDraft;
    type Patch = InventoryItemPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_draft(id: RecordId, draft: InventoryItemDraft) -> Self {
        Self {
            id,
            item_name: draft.item_name,
            category: draft.category,
            quantity: draft.quantity,
        }
    }

    fn apply_patch(&mut self, patch: InventoryItemPatch) {
        overwrite(&mut self.item_name, patch.item_name);
        overwrite(&mut self.category, patch.category);
        overwrite(&mut self.quantity, patch.quantity);
    }

    fn validate(&self) -> Result<(), RecordValidationError> {
        require_text(Self::COLLECTION, "itemName", &self.item_name)
    }

    fn search_text(&self) -> String {
        format!(
            "{} {} {} {}",
            self.item_name,
            self.category,
            self.quantity,
            self.stock_status().label()
        )
    }

    fn collection(document: &Document) -> &[Self] {
        &document.inventory
    }

    fn collection_mut(document: &mut Document) -> &mut Vec<Self> {
        &mut document.inventory
    }
}
