//! Business-record domain model.
//!
//! # Responsibility
//! - Define the root `Document` and the five record types it aggregates.
//! - Provide the `Record` contract that generic repositories/services use.
//!
//! # Invariants
//! - Every record is identified by a string `id` that never changes.
//! - Derived values (stock status, overdue state) are computed, never stored.

pub mod client;
pub mod document;
pub mod employee;
pub mod inventory;
pub mod record;
pub mod sale;
pub mod task;
