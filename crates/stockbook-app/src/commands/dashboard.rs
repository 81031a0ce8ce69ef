//! # Dashboard Commands
//!
//! The metrics cards and stock alerts on the home screen.
//!
//! ```text
//! ┌──────────────┬──────────────┬──────────────┬──────────────┐
//! │ Total stock  │ Stock value  │ Sales (month)│ Profit(month)│
//! │     3        │   $30.00     │   $30.00     │   $10.00     │
//! └──────────────┴──────────────┴──────────────┴──────────────┘
//!  ⚠ Widget is running low: 3 left (threshold 10)
//! ```
//!
//! Everything is recomputed on each call. After a mutation the dashboard
//! simply calls again.

use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Serialize};
use stockbook_core::{DashboardMetrics, Money, Period, DASHBOARD_PERIOD};

use crate::state::{AppConfig, InventoryState};

/// Raw metrics snapshot.
pub fn metrics(inventory: &InventoryState) -> DashboardMetrics {
    inventory.with_store(|store| store.metrics())
}

/// One low-stock alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockAlert {
    pub product_id: String,
    pub name: String,
    pub quantity: i64,
    pub threshold: i64,
}

/// Metric amounts rendered with the configured currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedMetrics {
    pub stock_value: String,
    pub total_sales: String,
    pub profit: String,
    pub total_expenses: String,
}

/// Everything the home screen needs in one call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub store_name: String,
    pub period: Period,
    pub metrics: DashboardMetrics,
    /// Expenses over the same window. Shown beside the cards, never folded
    /// into profit.
    pub total_expenses: Money,
    pub formatted: FormattedMetrics,
    pub alerts: Vec<StockAlert>,
}

pub fn dashboard(inventory: &InventoryState, config: &AppConfig) -> DashboardView {
    dashboard_at(inventory, config, &Local::now())
}

/// [`dashboard`] as seen at `now`.
pub fn dashboard_at<Tz: TimeZone>(
    inventory: &InventoryState,
    config: &AppConfig,
    now: &DateTime<Tz>,
) -> DashboardView {
    let (metrics, total_expenses, alerts) = inventory.with_store(|store| {
        let alerts = store
            .low_stock(config.low_stock_threshold)
            .into_iter()
            .map(|p| StockAlert {
                product_id: p.id.clone(),
                name: p.name.clone(),
                quantity: p.quantity,
                threshold: config.low_stock_threshold,
            })
            .collect::<Vec<_>>();

        (
            store.metrics_at(now),
            store.total_expenses_at(DASHBOARD_PERIOD, now),
            alerts,
        )
    });

    DashboardView {
        store_name: config.store_name.clone(),
        period: DASHBOARD_PERIOD,
        formatted: FormattedMetrics {
            stock_value: config.format_currency(metrics.stock_value),
            total_sales: config.format_currency(metrics.total_sales),
            profit: config.format_currency(metrics.profit),
            total_expenses: config.format_currency(total_expenses),
        },
        metrics,
        total_expenses,
        alerts,
    }
}
