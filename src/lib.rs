//! fintrack - personal finance tracker
//!
//! This library keeps a single finance document (transactions, category
//! budgets and a profile), persists it as JSON on every change and derives
//! totals, per-category spend, trends and budget progress from it.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (transactions, budgets, profile, document)
//! - `storage`: Key-value persistence with atomic file writes
//! - `store`: The finance store, its mutators and notifications
//! - `reports`: Derived views (totals, trend, budget progress, dashboard)
//! - `audit`: Audit logging system
//! - `cli` / `display`: The command-line shell
//!
//! # Example
//!
//! ```
//! use fintrack::models::Money;
//! use fintrack::storage::MemoryStorage;
//! use fintrack::store::FinanceStore;
//!
//! # fn main() -> fintrack::FinanceResult<()> {
//! let mut store = FinanceStore::open(MemoryStorage::new());
//! store.set_budget("Rent", Money::from_units(8000))?;
//!
//! let totals = store.totals();
//! assert_eq!(totals.total_budget, Money::from_units(26000));
//! assert_eq!(totals.savings, Money::from_units(29800));
//! # Ok(())
//! # }
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod reports;
pub mod storage;
pub mod store;

pub use error::{FinanceError, FinanceResult};
pub use store::FinanceStore;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install the global tracing subscriber once.
///
/// Honors `RUST_LOG`; defaults to `fintrack=warn`. Logs go to stderr.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("fintrack=warn"));

        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    });
}
