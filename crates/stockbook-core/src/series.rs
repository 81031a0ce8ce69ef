//! # Sales Series
//!
//! Per-bucket sales figures that feed the dashboard charts. Rendering is the
//! chart component's job; this module only groups and sums.
//!
//! ```text
//! ┌──────────┬────────────┬─────────────────────────────┐
//! │  Period  │  Bucket    │  Label                      │
//! ├──────────┼────────────┼─────────────────────────────┤
//! │  day     │  hour      │  "14:00"                    │
//! │  week    │  weekday   │  "Mon"                      │
//! │  month   │  date      │  "09/05"  (dd/MM)           │
//! │  year    │  date      │  "09/05"  (dd/MM)           │
//! └──────────┴────────────┴─────────────────────────────┘
//! ```
//!
//! Buckets appear in the order their first sale was recorded.

use std::collections::HashMap;

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::metrics::{cost_index, sale_profit};
use crate::money::Money;
use crate::period::{self, Period};
use crate::types::{Product, Sale};

/// One chart point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SeriesPoint {
    pub label: String,
    pub units_sold: i64,
    pub revenue: Money,
    pub profit: Money,
}

impl SeriesPoint {
    fn empty(label: String) -> Self {
        SeriesPoint {
            label,
            units_sold: 0,
            revenue: Money::zero(),
            profit: Money::zero(),
        }
    }
}

fn label_format(period: Period) -> &'static str {
    match period {
        Period::Day => "%H:00",
        Period::Week => "%a",
        Period::Month | Period::Year => "%d/%m",
    }
}

/// Groups the sales inside `period` into chart buckets.
///
/// Labels use `now`'s timezone. Profit follows the same rule as
/// [`crate::metrics::profit`].
pub fn sales_series<Tz: TimeZone>(
    products: &[Product],
    sales: &[Sale],
    period: Period,
    now: &DateTime<Tz>,
) -> Vec<SeriesPoint> {
    let costs = cost_index(products);
    let tz = now.timezone();
    let format = label_format(period);

    let mut points: Vec<SeriesPoint> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for sale in period::within(sales, period, now) {
        let label = sale
            .date
            .with_timezone(&tz)
            .naive_local()
            .format(format)
            .to_string();
        let slot = *index.entry(label.clone()).or_insert_with(|| {
            points.push(SeriesPoint::empty(label));
            points.len() - 1
        });

        let point = &mut points[slot];
        point.units_sold = point.units_sold.saturating_add(sale.quantity);
        point.revenue += sale.total_price;
        point.profit += sale_profit(&costs, sale);
    }

    points
}

// =============================================================================
// Unit Tests
// =============================================================================
