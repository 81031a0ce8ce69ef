//! # Metrics Aggregator
//!
//! Dashboard numbers derived from store records. Nothing is cached: every
//! call recomputes from the slices it is given, so the result reflects the
//! latest mutation as long as the caller asks again.
//!
//! ## Profit Cost Basis
//! ```text
//! profit(sale) = (sale.sale_price − product.buy_price) × sale.quantity
//!                                   ▲
//!                                   └── CURRENT buy price, looked up now.
//!                                       Sales of deleted products add 0.
//! ```

use std::collections::HashMap;

use chrono::{DateTime, TimeZone};

use crate::money::Money;
use crate::period::{self, Period};
use crate::types::{DashboardMetrics, Expense, Product, Sale};
use crate::DASHBOARD_PERIOD;

/// Sum of quantity over all products.
pub fn total_stock(products: &[Product]) -> i64 {
    products
        .iter()
        .fold(0_i64, |total, p| total.saturating_add(p.quantity))
}

/// Sum of quantity × buy price over all products.
pub fn stock_value(products: &[Product]) -> Money {
    products.iter().map(Product::stock_value).sum()
}

/// Sum of sale totals inside the period window.
pub fn total_sales<Tz: TimeZone>(sales: &[Sale], period: Period, now: &DateTime<Tz>) -> Money {
    period::within(sales, period, now)
        .map(|sale| sale.total_price)
        .sum()
}

/// Sum of expense amounts inside the period window.
pub fn total_expenses<Tz: TimeZone>(
    expenses: &[Expense],
    period: Period,
    now: &DateTime<Tz>,
) -> Money {
    period::within(expenses, period, now)
        .map(|expense| expense.amount)
        .sum()
}

/// Margin on sales inside the period window, at current buy prices.
pub fn profit<Tz: TimeZone>(
    products: &[Product],
    sales: &[Sale],
    period: Period,
    now: &DateTime<Tz>,
) -> Money {
    let costs = cost_index(products);
    period::within(sales, period, now)
        .map(|sale| sale_profit(&costs, sale))
        .sum()
}

/// Dashboard snapshot. Sales and profit always use the month window.
pub fn dashboard<Tz: TimeZone>(
    products: &[Product],
    sales: &[Sale],
    now: &DateTime<Tz>,
) -> DashboardMetrics {
    DashboardMetrics {
        total_stock: total_stock(products),
        stock_value: stock_value(products),
        total_sales: total_sales(sales, DASHBOARD_PERIOD, now),
        profit: profit(products, sales, DASHBOARD_PERIOD, now),
    }
}

// =============================================================================
// Helpers shared with the series module
// =============================================================================

/// Current buy price per product id.
pub(crate) fn cost_index(products: &[Product]) -> HashMap<&str, Money> {
    products
        .iter()
        .map(|p| (p.id.as_str(), p.buy_price))
        .collect()
}

/// Margin of one sale; zero when its product is gone.
pub(crate) fn sale_profit(costs: &HashMap<&str, Money>, sale: &Sale) -> Money {
    match costs.get(sale.product_id.as_str()) {
        Some(buy_price) => (sale.sale_price - *buy_price).multiply_quantity(sale.quantity),
        None => Money::zero(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
