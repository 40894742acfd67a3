//! Sale record and lenient price coercion.
//!
//! # Invariants
//! - `price` may be persisted as a JSON number or as numeric text such as
//!   `"1,000"`; rollups always go through `Amount::value`.
//! - Text that is not a number after stripping `,` and whitespace counts as 0.

use crate::model::document::Document;
use crate::model::record::{
    format_calendar_date, overwrite, require_positive, require_text, Collection, Record,
    RecordId, RecordValidationError,
};
use chrono::Local;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

static NUMERIC_TEXT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?$").expect("valid numeric text regex")
});

/// Monetary amount as found in stored or imported documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Number(f64),
    Text(String),
}

impl Amount {
    /// Numeric value used for validation and rollups.
    pub fn value(&self) -> f64 {
        match self {
            Self::Number(value) => *value,
            Self::Text(text) => coerce_amount(text),
        }
    }
}

impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

/// Converts price text to a number: drops thousands separators and
/// surrounding whitespace; empty or non-numeric text yields `0.0`.
pub fn coerce_amount(text: &str) -> f64 {
    let cleaned = text.replace(',', "");
    let cleaned = cleaned.trim();
    if !NUMERIC_TEXT_RE.is_match(cleaned) {
        return 0.0;
    }
    cleaned.parse::<f64>().unwrap_or(0.0)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub id: RecordId,
    pub item: String,
    pub qty: f64,
    pub price: Amount,
    /// Calendar date (`YYYY-MM-DD`), compared verbatim by daily rollups.
    pub date: String,
}

/// Sale form input. A missing date means "today" (local calendar day).
#[derive(Debug, Clone, PartialEq)]
pub struct SaleDraft {
    pub item: String,
    pub qty: f64,
    pub price: Amount,
    pub date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SalePatch {
    pub item: Option<String>,
    pub qty: Option<f64>,
    pub price: Option<Amount>,
    pub date: Option<String>,
}

impl SaleDraft {
    fn resolved_date(date: Option<String>) -> String {
        date.filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| format_calendar_date(Local::now().date_naive()))
    }
}

impl From<SaleDraft> for SalePatch {
    fn from(draft: SaleDraft) -> Self {
        Self {
            item: Some(draft.item.trim().to_string()),
            qty: Some(draft.qty),
            price: Some(draft.price),
            date: Some(SaleDraft::resolved_date(draft.date)),
        }
    }
}

impl Record for Sale {
    const COLLECTION: Collection = Collection::Sales;
    type Draft = SaleDraft;
    type Patch = SalePatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_draft(id: RecordId, draft: SaleDraft) -> Self {
        Self {
            id,
            item: draft.item.trim().to_string(),
            qty: draft.qty,
            price: draft.price,
            date: SaleDraft::resolved_date(draft.date),
        }
    }

    fn apply_patch(&mut self, patch: SalePatch) {
        overwrite(&mut self.item, patch.item);
        overwrite(&mut self.qty, patch.qty);
        overwrite(&mut self.price, patch.price);
        overwrite(&mut self.date, patch.date);
    }

    fn validate(&self) -> Result<(), RecordValidationError> {
        require_text(Self::COLLECTION, "item", &self.item)?;
        require_positive(Self::COLLECTION, "qty", self.qty)?;
        require_positive(Self::COLLECTION, "price", self.price.value())
    }

    fn search_text(&self) -> String {
        format!("{} {} {} {}", self.item, self.qty, self.price, self.date)
    }

    fn collection(document: &Document) -> &[Self] {
        &document.sales
    }

    fn collection_mut(document: &mut Document) -> &mut Vec<Self> {
        &mut document.sales
    }
}
