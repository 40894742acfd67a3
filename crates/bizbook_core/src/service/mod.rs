//! Use-case services over the repositories.
//!
//! # Responsibility
//! - Derived read models (dashboard metrics, sales rollups).
//! - Backup/restore of the whole document.
//! - Form-level CRUD orchestration shared by every record type.

pub mod aggregation;
pub mod record_service;
pub mod transfer;
