//! # Period Windows
//!
//! Maps a period tag to the instant where its window starts. Sales and
//! expenses are filtered the same way: an item is in the window when its
//! date is at or after the cutoff. There is no upper bound.
//!
//! ```text
//! ┌──────────┬──────────────────────────────────────────────────────────┐
//! │  Period  │  Cutoff (relative to `now`, in `now`'s timezone)         │
//! ├──────────┼──────────────────────────────────────────────────────────┤
//! │  day     │  midnight of the current calendar day                    │
//! │  week    │  now − 7 days (rolling, not calendar week)               │
//! │  month   │  now − 1 month, day clamped (Mar 31 → Feb 28/29)         │
//! │  year    │  now − 1 year, day clamped (Feb 29 → Feb 28)             │
//! └──────────┴──────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, LocalResult, Months, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::types::{Expense, Sale};

// =============================================================================
// Period
// =============================================================================

/// Symbolic time window used by the dashboard and charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Period {
    Day,
    Week,
    Month,
    Year,
}

impl Period {
    pub const ALL: [Period; 4] = [Period::Day, Period::Week, Period::Month, Period::Year];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Period::Day => "day",
            Period::Week => "week",
            Period::Month => "month",
            Period::Year => "year",
        }
    }

    /// Start of the window ending at `now`.
    ///
    /// Calendar steps (midnight, months, years) are taken on `now`'s local
    /// wall clock, so pass `Local::now()` for the shop's own timezone.
    ///
    /// ## Example
    /// ```rust
    /// use chrono::{TimeZone, Utc};
    /// use stockbook_core::Period;
    ///
    /// let now = Utc.with_ymd_and_hms(2024, 3, 31, 15, 0, 0).unwrap();
    /// let cutoff = Period::Month.cutoff(&now);
    /// assert_eq!(cutoff, Utc.with_ymd_and_hms(2024, 2, 29, 15, 0, 0).unwrap());
    /// ```
    pub fn cutoff<Tz: TimeZone>(self, now: &DateTime<Tz>) -> DateTime<Utc> {
        let start = match self {
            Period::Day => start_of_day(now),
            Period::Week => now.clone() - Duration::days(7),
            Period::Month => months_back(now, 1),
            Period::Year => months_back(now, 12),
        };
        start.with_timezone(&Utc)
    }

    /// Whether `date` falls inside the window ending at `now`.
    pub fn contains<Tz: TimeZone>(self, date: DateTime<Utc>, now: &DateTime<Tz>) -> bool {
        date >= self.cutoff(now)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Period::ALL
            .into_iter()
            .find(|p| p.as_str() == wanted)
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "period".to_string(),
                allowed: Period::ALL.iter().map(|p| p.as_str().to_string()).collect(),
            })
    }
}

// =============================================================================
// Calendar helpers
// =============================================================================

fn start_of_day<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Tz> {
    match now.naive_local().date().and_hms_opt(0, 0, 0) {
        Some(midnight) => resolve_local(now, midnight),
        None => now.clone(),
    }
}

fn months_back<Tz: TimeZone>(now: &DateTime<Tz>, months: u32) -> DateTime<Tz> {
    match now.naive_local().checked_sub_months(Months::new(months)) {
        Some(target) => resolve_local(now, target),
        None => now.clone(),
    }
}

/// Pins a wall-clock time to `now`'s timezone.
///
/// Ambiguous times (DST fall-back) take the earlier instant. Times skipped by
/// a DST jump are measured back from `now` on the wall clock instead.
fn resolve_local<Tz: TimeZone>(now: &DateTime<Tz>, target: NaiveDateTime) -> DateTime<Tz> {
    match now.timezone().from_local_datetime(&target) {
        LocalResult::Single(t) => t,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => now.clone() - (now.naive_local() - target),
    }
}

// =============================================================================
// Filtering
// =============================================================================

/// Anything with a creation date that period windows apply to.
pub trait Dated {
    fn date(&self) -> DateTime<Utc>;
}

impl Dated for Sale {
    fn date(&self) -> DateTime<Utc> {
        self.date
    }
}

impl Dated for Expense {
    fn date(&self) -> DateTime<Utc> {
        self.date
    }
}

/// Items dated at or after `cutoff`, in their original order.
pub fn since<T: Dated>(items: &[T], cutoff: DateTime<Utc>) -> impl Iterator<Item = &T> {
    items.iter().filter(move |item| item.date() >= cutoff)
}

/// Items inside `period`'s window ending at `now`.
pub fn within<'a, T: Dated, Tz: TimeZone>(
    items: &'a [T],
    period: Period,
    now: &DateTime<Tz>,
) -> impl Iterator<Item = &'a T> {
    since(items, period.cutoff(now))
}

// =============================================================================
// Unit Tests
// =============================================================================
