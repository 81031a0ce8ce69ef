//! # Inventory State
//!
//! The one [`InventoryStore`] shared by every command.
//!
//! ## Thread Safety
//! The store sits behind `Arc<Mutex<T>>`. A sale reads the product's stock,
//! checks it, then writes the sale and the new quantity; holding the lock for
//! the whole call keeps two concurrent sales from both passing the check.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Inventory State Operations                           │
//! │                                                                         │
//! │  Command                      Lock        Store call                   │
//! │  ───────                      ────        ──────────                   │
//! │                                                                         │
//! │  add_product() ─────────────► write ───► add_product(input)            │
//! │  update_product() ──────────► write ───► update_product(id, patch)     │
//! │  delete_product() ──────────► write ───► delete_product(id)            │
//! │  record_sale() ─────────────► write ───► check + decrement + append    │
//! │  record_expense() ──────────► write ───► append                        │
//! │                                                                         │
//! │  dashboard() / list_*() ────► read ────► (recomputed, nothing cached)  │
//! │                                                                         │
//! │  NOTE: Reads take the same Mutex but only long enough to copy out      │
//! │        the records or numbers they need.                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use stockbook_core::InventoryStore;

/// Shared, lock-guarded inventory store.
#[derive(Debug, Clone, Default)]
pub struct InventoryState {
    store: Arc<Mutex<InventoryStore>>,
}

impl InventoryState {
    /// Creates state around an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing store (e.g. one pre-loaded with demo data).
    pub fn from_store(store: InventoryStore) -> Self {
        InventoryState {
            store: Arc::new(Mutex::new(store)),
        }
    }

    /// Executes a function with read access to the store.
    pub fn with_store<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&InventoryStore) -> R,
    {
        // Store methods validate before they write, so a panic mid-call
        // cannot leave half an update behind.
        let store = self.store.lock().unwrap_or_else(PoisonError::into_inner);
        f(&store)
    }

    /// Executes a function with write access to the store.
    pub fn with_store_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut InventoryStore) -> R,
    {
        let mut store = self.store.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut store)
    }
}
