//! # stockbook-core: Pure Inventory Logic for Stockbook
//!
//! This crate owns the product catalog, sales and expenses of a small shop
//! and derives the dashboard numbers from them. Everything here is
//! synchronous and in-memory: no database, no network, no files.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stockbook Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Dashboard (forms, tables, charts)            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            stockbook-app (commands, config, shared state)       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ stockbook-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   store   │  │  period   │  │  metrics  │  │  series   │  │   │
//! │  │   │ products  │  │ day/week  │  │ stock val │  │ chart     │  │   │
//! │  │   │ sales     │  │ month/yr  │  │ sales     │  │ buckets   │  │   │
//! │  │   │ expenses  │  │ cutoffs   │  │ profit    │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK                            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Sale, Expense, DashboardMetrics)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation and decimal parsing
//! - [`period`] - Period windows (day, week, month, year)
//! - [`metrics`] - Dashboard aggregates
//! - [`series`] - Per-bucket sales figures for charts
//! - [`store`] - The inventory store, single owner of all records
//!
//! ## Example Usage
//!
//! ```rust
//! use stockbook_core::{InventoryStore, Money, NewProduct, NewSale};
//!
//! let mut store = InventoryStore::new();
//! let widget = store
//!     .add_product(NewProduct::new("Widget", "Tools", Money::from_cents(1000), 5))
//!     .unwrap();
//!
//! store
//!     .record_sale(NewSale::new(&widget.id, 2, Money::from_cents(1500)).unwrap())
//!     .unwrap();
//!
//! let metrics = store.metrics();
//! assert_eq!(metrics.total_stock, 3);
//! assert_eq!(metrics.total_sales.cents(), 3000);
//! assert_eq!(metrics.profit.cents(), 1000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod metrics;
pub mod money;
pub mod period;
pub mod series;
pub mod store;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use period::Period;
pub use series::SeriesPoint;
pub use store::InventoryStore;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Stock level below which a product shows up in low-stock alerts.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 10;

/// Period used by the dashboard snapshot for sales and profit.
pub const DASHBOARD_PERIOD: Period = Period::Month;

/// Maximum length of names, categories and descriptions.
pub const MAX_TEXT_LEN: usize = 200;

/// Largest stock level or quantity sold in one sale.
pub const MAX_QUANTITY: i64 = 1_000_000;

/// Largest unit price or expense amount, in cents (100 million in major units).
pub const MAX_AMOUNT_CENTS: i64 = 10_000_000_000;

/// Largest sale total: [`MAX_QUANTITY`] units at [`MAX_AMOUNT_CENTS`] each.
pub const MAX_SALE_TOTAL_CENTS: i64 = MAX_QUANTITY * MAX_AMOUNT_CENTS;
