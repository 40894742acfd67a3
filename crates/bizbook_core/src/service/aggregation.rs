//! Dashboard metrics and daily sales rollups.
//!
//! # Responsibility
//! - Count collections and derive stock/task metrics for the dashboard.
//! - Bucket sale prices into the last seven calendar days.
//!
//! # Invariants
//! - Read-only: nothing here writes the document.
//! - The sales window always has `SALES_WINDOW_DAYS` entries, oldest first,
//!   ending on `today`.
//! - A sale belongs to a day only when its `date` text equals that day's
//!   `YYYY-MM-DD` rendering.

use crate::model::document::Document;
use crate::model::record::format_calendar_date;
use crate::model::sale::Sale;
use crate::repo::RepoResult;
use crate::store::document_store::DocumentStore;
use crate::store::SlotStore;
use chrono::{Days, Local, NaiveDate};

/// Number of days covered by the sales rollup.
pub const SALES_WINDOW_DAYS: u64 = 7;

/// Counts shown on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardSummary {
    pub total_employees: usize,
    pub total_clients: usize,
    pub total_inventory: usize,
    pub total_tasks: usize,
    pub total_sales: usize,
    /// Items with `quantity <= 5`, zero included.
    pub low_stock: usize,
    pub out_of_stock: usize,
    pub completed_tasks: usize,
    pub pending_tasks: usize,
    /// Pending tasks due strictly before today.
    pub overdue_tasks: usize,
}

/// Sum of sale prices for one calendar day.
#[derive(Debug, Clone, PartialEq)]
pub struct DailySalesTotal {
    pub date: NaiveDate,
    pub total: f64,
}

/// The local calendar day.
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Computes dashboard counts for `document` as of `today`.
pub fn summarize(document: &Document, today: NaiveDate) -> DashboardSummary {
    let completed_tasks = document.tasks.iter().filter(|task| task.completed).count();

    DashboardSummary {
        total_employees: document.employees.len(),
        total_clients: document.clients.len(),
        total_inventory: document.inventory.len(),
        total_tasks: document.tasks.len(),
        total_sales: document.sales.len(),
        low_stock: document
            .inventory
            .iter()
            .filter(|item| item.is_low_stock())
            .count(),
        out_of_stock: document
            .inventory
            .iter()
            .filter(|item| item.quantity == 0)
            .count(),
        completed_tasks,
        pending_tasks: document.tasks.len() - completed_tasks,
        overdue_tasks: document
            .tasks
            .iter()
            .filter(|task| task.is_overdue_on(today))
            .count(),
    }
}

/// Sums sale prices per day over the window ending on `today`.
pub fn daily_sales_totals(sales: &[Sale], today: NaiveDate) -> Vec<DailySalesTotal> {
    (0..SALES_WINDOW_DAYS)
        .rev()
        .map(|days_back| {
            let date = today - Days::new(days_back);
            let key = format_calendar_date(date);
            let total = sales
                .iter()
                .filter(|sale| sale.date == key)
                .map(|sale| sale.price.value())
                .sum::<f64>();
            DailySalesTotal { date, total }
        })
        .collect()
}

/// Read-only queries over the stored document.
pub struct AggregationService<'store, S: SlotStore> {
    store: &'store DocumentStore<S>,
}

impl<'store, S: SlotStore> AggregationService<'store, S> {
    pub fn new(store: &'store DocumentStore<S>) -> Self {
        Self { store }
    }

    /// Dashboard counts as of the local calendar day.
    pub fn dashboard_summary(&self) -> RepoResult<DashboardSummary> {
        self.dashboard_summary_on(local_today())
    }

    pub fn dashboard_summary_on(&self, today: NaiveDate) -> RepoResult<DashboardSummary> {
        let document = self.store.load()?;
        Ok(summarize(&document, today))
    }

    /// Seven daily totals ending on the local calendar day.
    pub fn last_7_days_sales_totals(&self) -> RepoResult<Vec<DailySalesTotal>> {
        self.last_7_days_sales_totals_on(local_today())
    }

    pub fn last_7_days_sales_totals_on(
        &self,
        today: NaiveDate,
    ) -> RepoResult<Vec<DailySalesTotal>> {
        let document = self.store.load()?;
        Ok(daily_sales_totals(&document.sales, today))
    }
}
