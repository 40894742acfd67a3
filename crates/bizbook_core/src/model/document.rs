//! Root document and settings sub-document.
//!
//! # Invariants
//! - All five collections and `settings` are always present after decoding;
//!   missing or `null` members decode to their defaults.
//! - Default document: empty collections, light theme.

use crate::model::client::Client;
use crate::model::employee::Employee;
use crate::model::inventory::InventoryItem;
use crate::model::sale::Sale;
use crate::model::task::Task;
use serde::{Deserialize, Deserializer, Serialize};

/// Single aggregate persisted under one slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default, deserialize_with = "null_as_default")]
    pub employees: Vec<Employee>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub clients: Vec<Client>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub inventory: Vec<InventoryItem>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tasks: Vec<Task>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sales: Vec<Sale>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub settings: Settings,
}

impl Document {
    /// Returns `true` when every collection is empty.
    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
            && self.clients.is_empty()
            && self.inventory.is_empty()
            && self.tasks.is_empty()
            && self.sales.is_empty()
    }
}

/// UI color scheme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    /// The other theme.
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// User preferences stored next to the record collections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub theme: Theme,
}

/// Merge-update shape for `Settings`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SettingsPatch {
    pub theme: Option<Theme>,
}

impl Settings {
    pub fn apply_patch(&mut self, patch: SettingsPatch) {
        if let Some(theme) = patch.theme {
            self.theme = theme;
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
