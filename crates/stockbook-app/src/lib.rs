//! # Stockbook App
//!
//! Host layer around `stockbook-core`: settings, logging, the shared store
//! handle and the commands the dashboard calls.
//!
//! ## Module Organization
//! ```text
//! stockbook_app/
//! ├── lib.rs          ◄─── You are here (startup helpers)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── inventory.rs◄─── Shared store behind one lock
//! │   └── config.rs   ◄─── AppConfig (defaults → TOML → env)
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── product.rs  ◄─── Catalog CRUD
//! │   ├── sale.rs     ◄─── Sales and chart series
//! │   ├── expense.rs  ◄─── Expenses
//! │   └── dashboard.rs◄─── Metrics view
//! ├── demo.rs         ◄─── Demo data
//! └── error.rs        ◄─── ApiError for commands
//! ```
//!
//! ## State Management
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Application State                                    │
//! │                                                                         │
//! │  ┌────────────────────────────┐   ┌────────────────────────────────┐   │
//! │  │    InventoryState          │   │    AppConfig                   │   │
//! │  │                            │   │                                │   │
//! │  │  • Arc<Mutex<Store>>       │   │  • Store name, currency        │   │
//! │  │  • Products, sales,        │   │  • Low-stock threshold         │   │
//! │  │    expenses                │   │  • Log filter                  │   │
//! │  └────────────────────────────┘   └────────────────────────────────┘   │
//! │                                                                         │
//! │  Commands borrow only what they need.                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod demo;
pub mod error;
pub mod state;

use stockbook_core::InventoryStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

use error::ApiError;
use state::{AppConfig, InventoryState};

/// Initializes the tracing subscriber.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=stockbook_core=debug` - Store mutations only
/// - Otherwise `default_filter` (from `AppConfig::log_filter`)
///
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Builds the shared state for a freshly started app.
///
/// ## Startup Sequence
/// ```text
/// 1. Empty store
/// 2. Demo data, if `seed_demo_data` is set
/// 3. Wrap in InventoryState
/// ```
pub fn bootstrap(config: &AppConfig) -> Result<InventoryState, ApiError> {
    let mut store = InventoryStore::new();

    if config.seed_demo_data {
        demo::seed(&mut store)?;
    }

    info!(
        store_name = %config.store_name,
        products = store.products().len(),
        "Inventory ready"
    );
    Ok(InventoryState::from_store(store))
}
