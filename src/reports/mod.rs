//! Reports module for fintrack
//!
//! Derived views over the finance document: totals, per-category spend,
//! date filtering, the monthly expense trend, budget progress, register
//! ordering and the dashboard. Nothing here is cached; every view is
//! recomputed from the document it is given.

pub mod budget_overview;
pub mod dashboard;
pub mod filter;
pub mod register;
pub mod totals;
pub mod trend;

pub use budget_overview::{progress_percent, BudgetOverviewReport, BudgetProgress};
pub use dashboard::DashboardReport;
pub use filter::{DateRange, TransactionFilter};
pub use register::{SortDirection, SortField, TransactionSort};
pub use totals::{CategorySpend, Totals};
pub use trend::{MonthBucket, MonthlyTrend};
