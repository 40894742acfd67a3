//! Shared record contract, id generation and calendar-date helpers.
//!
//! # Responsibility
//! - Describe how each record type maps onto a `Document` collection.
//! - Describe draft (form input) and patch (merge-update) shapes per type.
//!
//! # Invariants
//! - `Record::id` is assigned once at creation; patches never carry an id.
//! - `apply_patch` only overwrites fields present in the patch.

use crate::model::document::Document;
use chrono::{DateTime, NaiveDate};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use uuid::Uuid;

/// Stable record identifier as stored in the document.
///
/// Kept as plain text because imported documents may carry ids produced by
/// other generators.
pub type RecordId = String;

/// `chrono` format of calendar-date strings (`YYYY-MM-DD`).
pub const CALENDAR_DATE_FORMAT: &str = "%Y-%m-%d";

/// Generates a new record id.
///
/// UUIDv7: a millisecond timestamp prefix followed by random bits, rendered as
/// lowercase hyphenated text. Used for every record type.
pub fn generate_id() -> RecordId {
    Uuid::now_v7().to_string()
}

/// Renders a day as a calendar-date string.
pub fn format_calendar_date(day: NaiveDate) -> String {
    day.format(CALENDAR_DATE_FORMAT).to_string()
}

/// Parses a calendar-date string, accepting a full RFC 3339 timestamp too.
///
/// Returns `None` for anything else; callers treat that as "no date".
pub fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, CALENDAR_DATE_FORMAT)
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(trimmed)
                .ok()
                .map(|timestamp| timestamp.date_naive())
        })
}

/// Named collections of the root document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Employees,
    Clients,
    Inventory,
    Tasks,
    Sales,
}

impl Collection {
    pub const ALL: [Collection; 5] = [
        Collection::Employees,
        Collection::Clients,
        Collection::Inventory,
        Collection::Tasks,
        Collection::Sales,
    ];

    /// Document key of this collection.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Employees => "employees",
            Self::Clients => "clients",
            Self::Inventory => "inventory",
            Self::Tasks => "tasks",
            Self::Sales => "sales",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "employees" => Some(Self::Employees),
            "clients" => Some(Self::Clients),
            "inventory" => Some(Self::Inventory),
            "tasks" => Some(Self::Tasks),
            "sales" => Some(Self::Sales),
            _ => None,
        }
    }
}

impl Display for Collection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field-level validation failure for record drafts.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordValidationError {
    /// Required text field is empty or whitespace.
    BlankField {
        collection: Collection,
        field: &'static str,
    },
    /// Numeric field must be strictly positive.
    NonPositive {
        collection: Collection,
        field: &'static str,
        value: f64,
    },
}

impl Display for RecordValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankField { collection, field } => {
                write!(f, "{collection}.{field} must not be blank")
            }
            Self::NonPositive {
                collection,
                field,
                value,
            } => write!(f, "{collection}.{field} must be positive, got {value}"),
        }
    }
}

impl Error for RecordValidationError {}

/// Contract shared by every record type stored in the document.
pub trait Record: Clone + Debug + Serialize + DeserializeOwned {
    /// Collection that holds this record type.
    const COLLECTION: Collection;

    /// Form input for creating or fully re-entering a record (no id).
    type Draft;

    /// Merge-update shape: `None` fields keep the stored value.
    type Patch: Clone + Default + From<Self::Draft>;

    fn id(&self) -> &str;

    /// Builds a new record from a draft and a freshly generated id.
    fn from_draft(id: RecordId, draft: Self::Draft) -> Self;

    /// Shallow-merges `patch` over this record.
    fn apply_patch(&mut self, patch: Self::Patch);

    /// Checks required fields before a service-level save.
    fn validate(&self) -> Result<(), RecordValidationError>;

    /// Visible text used by list search boxes.
    fn search_text(&self) -> String;

    fn collection(document: &Document) -> &[Self];

    fn collection_mut(document: &mut Document) -> &mut Vec<Self>;
}

pub(crate) fn require_text(
    collection: Collection,
    field: &'static str,
    value: &str,
) -> Result<(), RecordValidationError> {
    if value.trim().is_empty() {
        return Err(RecordValidationError::BlankField { collection, field });
    }
    Ok(())
}

pub(crate) fn require_positive(
    collection: Collection,
    field: &'static str,
    value: f64,
) -> Result<(), RecordValidationError> {
    if !(value.is_finite() && value > 0.0) {
        return Err(RecordValidationError::NonPositive {
            collection,
            field,
            value,
        });
    }
    Ok(())
}

pub(crate) fn overwrite<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}
