//! SQLite-backed slot store.
//!
//! # Responsibility
//! - Persist slots as rows of the `slots` table.
//!
//! # Invariants
//! - The borrowed connection must come from `db::open_db*` (migrated).
//! - `set_slot` is a single upsert statement, so a slot is never half-written.

use crate::db::migrations::latest_version;
use crate::store::{SlotStore, StoreError, StoreResult};
use rusqlite::{params, Connection, OptionalExtension};

const SLOTS_TABLE: &str = "slots";

/// Slot store over a migrated SQLite connection.
pub struct SqliteSlotStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSlotStore<'conn> {
    /// Wraps a connection after checking it carries the slot schema.
    ///
    /// # Errors
    /// - `MissingRequiredTable("slots")` when migrations were not applied.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        let version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
        let table_exists: bool = conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1
            );",
            [SLOTS_TABLE],
            |row| row.get(0),
        )?;

        if version < latest_version() || !table_exists {
            return Err(StoreError::MissingRequiredTable(SLOTS_TABLE));
        }

        Ok(Self { conn })
    }
}

impl SlotStore for SqliteSlotStore<'_> {
    fn get_slot(&self, key: &str) -> StoreResult<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM slots WHERE key = ?1;", [key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set_slot(&self, key: &str, value: &str) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO slots (key, value)
             VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove_slot(&self, key: &str) -> StoreResult<()> {
        self.conn.execute("DELETE FROM slots WHERE key = ?1;", [key])?;
        Ok(())
    }
}
