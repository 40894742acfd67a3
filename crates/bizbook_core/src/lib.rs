//! Core data layer for bizbook, a local business-records manager.
//!
//! All state lives in one JSON document persisted through a slot store;
//! repositories mutate it, services derive views from it.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::client::{Client, ClientDraft, ClientPatch};
pub use model::document::{Document, Settings, SettingsPatch, Theme};
pub use model::employee::{Employee, EmployeeDraft, EmployeePatch};
pub use model::inventory::{
    InventoryItem, InventoryItemDraft, InventoryItemPatch, StockStatus, LOW_STOCK_THRESHOLD,
};
pub use model::record::{
    format_calendar_date, generate_id, parse_calendar_date, Collection, Record, RecordId,
    RecordValidationError,
};
pub use model::sale::{coerce_amount, Amount, Sale, SaleDraft, SalePatch};
pub use model::task::{Task, TaskDraft, TaskPatch};
pub use repo::record_repo::RecordRepository;
pub use repo::settings_repo::SettingsStore;
pub use repo::{RepoError, RepoResult};
pub use service::aggregation::{
    daily_sales_totals, local_today, summarize, AggregationService, DailySalesTotal,
    DashboardSummary, SALES_WINDOW_DAYS,
};
pub use service::record_service::{RecordListQuery, RecordService};
pub use service::transfer::{
    decode_document, export_file_name, TransferError, TransferResult, TransferService,
};
pub use store::document_store::DocumentStore;
pub use store::memory::MemorySlotStore;
pub use store::sqlite::SqliteSlotStore;
pub use store::{SlotStore, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
