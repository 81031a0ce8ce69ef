//! # Application State
//!
//! ```text
//! state/
//! ├── mod.rs        ◄─── You are here (exports)
//! ├── inventory.rs  ◄─── Shared store behind one lock
//! └── config.rs     ◄─── Settings loaded at startup
//! ```
//!
//! Commands take only the state they need: read-only queries take
//! `&InventoryState`, anything that formats money also takes `&AppConfig`.

pub mod config;
pub mod inventory;

pub use config::{AppConfig, ConfigError};
pub use inventory::InventoryState;
