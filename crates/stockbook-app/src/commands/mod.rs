//! # Commands
//!
//! Everything the dashboard can ask for or change.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs        ◄─── You are here (exports, shared helpers)
//! ├── product.rs    ◄─── Catalog CRUD, low-stock list
//! ├── sale.rs       ◄─── Record/preview sales, sales lists, chart series
//! ├── expense.rs    ◄─── Record expenses, expense lists
//! └── dashboard.rs  ◄─── Metrics snapshot and formatted view
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  Form submit  { quantity: "2", salePrice: "15,00", productId: "..." }   │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Parse raw strings (validation::parse_money / parse_quantity)           │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  inventory.with_store_mut(|store| store.record_sale(..))  ◄── one lock  │
//! │         │                                                               │
//! │         ├── Ok  ──► info!  ──► DTO                                      │
//! │         └── Err ──► warn!  ──► ApiError { code, message }               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Commands are plain synchronous functions. State is passed in explicitly:
//! ```rust,ignore
//! // Only needs the store
//! fn list_products(inventory: &InventoryState) -> Vec<ProductDto>
//!
//! // Needs settings too
//! fn dashboard(inventory: &InventoryState, config: &AppConfig) -> DashboardView
//! ```

pub mod dashboard;
pub mod expense;
pub mod product;
pub mod sale;

use stockbook_core::Period;
use tracing::warn;

use crate::error::ApiError;

/// Logs a rejected command and converts the cause into an [`ApiError`].
pub(crate) fn rejected(operation: &'static str, err: impl Into<ApiError>) -> ApiError {
    let err = err.into();
    warn!(operation, code = ?err.code, "{}", err.message);
    err
}

/// Parses a period tag sent by the period picker.
pub(crate) fn parse_period(operation: &'static str, raw: &str) -> Result<Period, ApiError> {
    raw.parse::<Period>().map_err(|e| rejected(operation, e))
}
