//! # Domain Types
//!
//! Records owned by the inventory store, the inputs that create or change
//! them, and the derived dashboard snapshot.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │◄──│      Sale       │   │    Expense      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  name/category  │   │  product_id     │   │  description    │       │
//! │  │  buy_price      │   │  quantity       │   │  amount         │       │
//! │  │  quantity       │   │  sale_price     │   │  category       │       │
//! │  │  timestamps     │   │  total_price    │   │  date           │       │
//! │  └─────────────────┘   │  date           │   └─────────────────┘       │
//! │                        └─────────────────┘                              │
//! │                                                                         │
//! │  Sale.product_id is a reference, not ownership: deleting a product     │
//! │  leaves its historical sales in place.                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A stocked item in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Unique identifier (UUID v4), assigned by the store.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Free-form category label ("Drinks", "Tools", ...).
    pub category: String,

    /// Unit cost. Used for stock value and as profit cost basis.
    pub buy_price: Money,

    /// Units on hand. Never negative.
    pub quantity: i64,

    /// Optional description for product details.
    pub description: Option<String>,

    /// When the product was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the product was last changed (edit or sale).
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Value of the units on hand at the current buy price.
    #[inline]
    pub fn stock_value(&self) -> Money {
        self.buy_price.multiply_quantity(self.quantity)
    }

    /// Whether `quantity` units can be sold right now.
    #[inline]
    pub fn can_sell(&self, quantity: i64) -> bool {
        self.quantity >= quantity
    }

    /// Whether the product is strictly below `threshold` units.
    #[inline]
    pub fn is_low_stock(&self, threshold: i64) -> bool {
        self.quantity < threshold
    }
}

/// Input for [`crate::InventoryStore::add_product`].
///
/// Id and timestamps are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NewProduct {
    pub name: String,
    pub category: String,
    pub buy_price: Money,
    pub quantity: i64,
    #[serde(default)]
    pub description: Option<String>,
}

impl NewProduct {
    /// Builds an input without a description.
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        buy_price: Money,
        quantity: i64,
    ) -> Self {
        NewProduct {
            name: name.into(),
            category: category.into(),
            buy_price,
            quantity,
            description: None,
        }
    }

    /// Attaches a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Partial update for [`crate::InventoryStore::update_product`].
///
/// `None` leaves a field untouched. For `description`, `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub buy_price: Option<Money>,
    #[serde(default)]
    pub quantity: Option<i64>,
    #[serde(default)]
    pub description: Option<Option<String>>,
}

impl ProductUpdate {
    /// True when no field would change.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category.is_none()
            && self.buy_price.is_none()
            && self.quantity.is_none()
            && self.description.is_none()
    }
}

// =============================================================================
// Sale
// =============================================================================

/// A single transaction against one product. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Sale {
    pub id: String,
    /// Product sold. May dangle once the product is deleted.
    pub product_id: String,
    /// Units sold (> 0).
    pub quantity: i64,
    /// Unit price charged.
    pub sale_price: Money,
    /// Caller-computed total, stored as given.
    pub total_price: Money,
    #[ts(as = "String")]
    pub date: DateTime<Utc>,
}

/// Input for [`crate::InventoryStore::record_sale`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NewSale {
    pub product_id: String,
    pub quantity: i64,
    pub sale_price: Money,
    pub total_price: Money,
}

impl NewSale {
    /// Builds a sale input with `total_price = quantity × sale_price`.
    ///
    /// Fails with `InvalidFormat` when the total does not fit in `Money`.
    pub fn new(
        product_id: impl Into<String>,
        quantity: i64,
        sale_price: Money,
    ) -> Result<Self, ValidationError> {
        let total_price = sale_price
            .checked_multiply_quantity(quantity)
            .ok_or_else(|| ValidationError::InvalidFormat {
                field: "total price".to_string(),
                reason: "quantity × sale price is too large".to_string(),
            })?;

        Ok(NewSale {
            product_id: product_id.into(),
            quantity,
            sale_price,
            total_price,
        })
    }
}

// =============================================================================
// Expense
// =============================================================================

/// Fixed set of expense categories offered by the expense form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ExpenseCategory {
    Rent,
    Utilities,
    Supplies,
    Salary,
    Marketing,
    Other,
}

impl ExpenseCategory {
    /// Every category, in form order.
    pub const ALL: [ExpenseCategory; 6] = [
        ExpenseCategory::Rent,
        ExpenseCategory::Utilities,
        ExpenseCategory::Supplies,
        ExpenseCategory::Salary,
        ExpenseCategory::Marketing,
        ExpenseCategory::Other,
    ];

    /// Wire name, as sent by the expense form.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ExpenseCategory::Rent => "rent",
            ExpenseCategory::Utilities => "utilities",
            ExpenseCategory::Supplies => "supplies",
            ExpenseCategory::Salary => "salary",
            ExpenseCategory::Marketing => "marketing",
            ExpenseCategory::Other => "other",
        }
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExpenseCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        ExpenseCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "category".to_string(),
                allowed: ExpenseCategory::ALL
                    .iter()
                    .map(|c| c.as_str().to_string())
                    .collect(),
            })
    }
}

/// A cost not tied to a product. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Expense {
    pub id: String,
    pub description: String,
    pub amount: Money,
    pub category: ExpenseCategory,
    #[ts(as = "String")]
    pub date: DateTime<Utc>,
}

/// Input for [`crate::InventoryStore::record_expense`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NewExpense {
    pub description: String,
    pub amount: Money,
    pub category: ExpenseCategory,
}

impl NewExpense {
    pub fn new(description: impl Into<String>, amount: Money, category: ExpenseCategory) -> Self {
        NewExpense {
            description: description.into(),
            amount,
            category,
        }
    }
}

// =============================================================================
// Dashboard Metrics
// =============================================================================

/// Derived numbers shown on the dashboard cards. Never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DashboardMetrics {
    /// Sum of quantities over all products.
    pub total_stock: i64,
    /// Sum of quantity × buy price over all products.
    pub stock_value: Money,
    /// Sum of sale totals over the dashboard period.
    pub total_sales: Money,
    /// Margin over the dashboard period at current buy prices.
    pub profit: Money,
}

// =============================================================================
// Unit Tests
// =============================================================================
