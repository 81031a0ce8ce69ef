//! # Stockbook
//!
//! Loads settings, starts logging, and prints the dashboard as JSON.
//!
//! ```text
//! $ STOCKBOOK_SEED_DEMO_DATA=1 stockbook
//! {
//!   "storeName": "Stockbook",
//!   "period": "month",
//!   "metrics": { "totalStock": 116, ... },
//!   ...
//! }
//! ```

use std::process::ExitCode;

use stockbook_app::commands::dashboard;
use stockbook_app::state::AppConfig;
use stockbook_app::{bootstrap, init_tracing};
use tracing::{error, info};

fn main() -> ExitCode {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            // No subscriber yet: the filter comes from the config.
            init_tracing("info");
            error!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.log_filter);
    info!("Starting Stockbook");

    let inventory = match bootstrap(&config) {
        Ok(inventory) => inventory,
        Err(e) => {
            error!("Startup failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let view = dashboard::dashboard(&inventory, &config);
    match serde_json::to_string_pretty(&view) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Failed to render dashboard: {}", e);
            ExitCode::FAILURE
        }
    }
}
