//! # Inventory Store
//!
//! The single owner of products, sales and expenses. Every mutation goes
//! through `&mut self`, so one store value has exactly one writer at a time;
//! hosts that share it across threads wrap it in a single lock.
//!
//! ## Sale Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  record_sale(NewSale { product_id, quantity: 2, ... })                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate input ──────────────► Err(Validation)        (no change)     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  find product ────────────────► Err(NotFound)          (no change)     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  stock >= quantity? ──── no ──► Err(InsufficientStock) (no change)     │
//! │       │ yes                                                             │
//! │       ▼                                                                 │
//! │  product.quantity -= 2   ┐                                              │
//! │  sales.push(sale)        ┘ both or neither                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All checks run before the first write, so a rejected operation leaves the
//! store exactly as it was.

use chrono::{DateTime, Local, TimeZone, Utc};
use tracing::debug;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::metrics;
use crate::money::Money;
use crate::period::{self, Period};
use crate::series::{self, SeriesPoint};
use crate::types::{
    DashboardMetrics, Expense, NewExpense, NewProduct, NewSale, Product, ProductUpdate, Sale,
};
use crate::validation;

/// Generates a collision-resistant record id.
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

/// In-memory product catalog, sales ledger and expense ledger.
///
/// Collections keep insertion order.
#[derive(Debug, Clone, Default)]
pub struct InventoryStore {
    products: Vec<Product>,
    sales: Vec<Sale>,
    expenses: Vec<Expense>,
}

impl InventoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn sales(&self) -> &[Sale] {
        &self.sales
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    /// Sales inside `period`, measured from the local clock.
    pub fn sales_by_period(&self, period: Period) -> Vec<&Sale> {
        self.sales_by_period_at(period, &Local::now())
    }

    pub fn sales_by_period_at<Tz: TimeZone>(&self, period: Period, now: &DateTime<Tz>) -> Vec<&Sale> {
        period::within(&self.sales, period, now).collect()
    }

    /// Expenses inside `period`, measured from the local clock.
    pub fn expenses_by_period(&self, period: Period) -> Vec<&Expense> {
        self.expenses_by_period_at(period, &Local::now())
    }

    pub fn expenses_by_period_at<Tz: TimeZone>(
        &self,
        period: Period,
        now: &DateTime<Tz>,
    ) -> Vec<&Expense> {
        period::within(&self.expenses, period, now).collect()
    }

    /// Products strictly below `threshold` units, in catalog order.
    pub fn low_stock(&self, threshold: i64) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.is_low_stock(threshold))
            .collect()
    }

    // =========================================================================
    // Metrics (pull-based: ask again after every mutation)
    // =========================================================================

    /// Dashboard snapshot as of now.
    pub fn metrics(&self) -> DashboardMetrics {
        self.metrics_at(&Local::now())
    }

    pub fn metrics_at<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> DashboardMetrics {
        metrics::dashboard(&self.products, &self.sales, now)
    }

    pub fn total_stock(&self) -> i64 {
        metrics::total_stock(&self.products)
    }

    pub fn stock_value(&self) -> Money {
        metrics::stock_value(&self.products)
    }

    pub fn total_sales(&self, period: Period) -> Money {
        self.total_sales_at(period, &Local::now())
    }

    pub fn total_sales_at<Tz: TimeZone>(&self, period: Period, now: &DateTime<Tz>) -> Money {
        metrics::total_sales(&self.sales, period, now)
    }

    pub fn profit(&self, period: Period) -> Money {
        self.profit_at(period, &Local::now())
    }

    pub fn profit_at<Tz: TimeZone>(&self, period: Period, now: &DateTime<Tz>) -> Money {
        metrics::profit(&self.products, &self.sales, period, now)
    }

    pub fn total_expenses(&self, period: Period) -> Money {
        self.total_expenses_at(period, &Local::now())
    }

    pub fn total_expenses_at<Tz: TimeZone>(&self, period: Period, now: &DateTime<Tz>) -> Money {
        metrics::total_expenses(&self.expenses, period, now)
    }

    pub fn sales_series(&self, period: Period) -> Vec<SeriesPoint> {
        self.sales_series_at(period, &Local::now())
    }

    pub fn sales_series_at<Tz: TimeZone>(
        &self,
        period: Period,
        now: &DateTime<Tz>,
    ) -> Vec<SeriesPoint> {
        series::sales_series(&self.products, &self.sales, period, now)
    }

    // =========================================================================
    // Product Mutations
    // =========================================================================

    /// Adds a product to the catalog and returns it with its new id.
    pub fn add_product(&mut self, input: NewProduct) -> CoreResult<Product> {
        validation::validate_new_product(&input)?;

        let now = Utc::now();
        let product = Product {
            id: generate_id(),
            name: input.name.trim().to_string(),
            category: input.category.trim().to_string(),
            buy_price: input.buy_price,
            quantity: input.quantity,
            description: input.description,
            created_at: now,
            updated_at: now,
        };

        debug!(product_id = %product.id, name = %product.name, quantity = product.quantity, "Adding product");
        self.products.push(product.clone());
        Ok(product)
    }

    /// Merges `update` into the product and refreshes `updated_at`.
    ///
    /// An empty update only touches `updated_at`.
    pub fn update_product(&mut self, id: &str, update: ProductUpdate) -> CoreResult<Product> {
        validation::validate_product_update(&update)?;

        let product = self
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| CoreError::product_not_found(id))?;

        debug!(product_id = %id, empty = update.is_empty(), "Updating product");

        if let Some(name) = update.name {
            product.name = name.trim().to_string();
        }
        if let Some(category) = update.category {
            product.category = category.trim().to_string();
        }
        if let Some(buy_price) = update.buy_price {
            product.buy_price = buy_price;
        }
        if let Some(quantity) = update.quantity {
            product.quantity = quantity;
        }
        if let Some(description) = update.description {
            product.description = description;
        }
        product.updated_at = Utc::now();

        Ok(product.clone())
    }

    /// Removes a product and returns it. Its past sales stay in the ledger.
    pub fn delete_product(&mut self, id: &str) -> CoreResult<Product> {
        let position = self
            .products
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| CoreError::product_not_found(id))?;

        debug!(product_id = %id, "Deleting product");
        Ok(self.products.remove(position))
    }

    // =========================================================================
    // Ledger Mutations
    // =========================================================================

    /// Records a sale dated now and takes the units out of stock.
    pub fn record_sale(&mut self, input: NewSale) -> CoreResult<Sale> {
        self.record_sale_at(input, Utc::now())
    }

    /// Records a sale with an explicit date (imports, back-dated entries).
    ///
    /// ## Errors
    /// - `Validation`: non-positive quantity, negative prices
    /// - `NotFound`: the product is not in the catalog
    /// - `InsufficientStock`: more units requested than on hand
    pub fn record_sale_at(&mut self, input: NewSale, date: DateTime<Utc>) -> CoreResult<Sale> {
        validation::validate_new_sale(&input)?;

        let product = self
            .products
            .iter_mut()
            .find(|p| p.id == input.product_id)
            .ok_or_else(|| CoreError::product_not_found(&input.product_id))?;

        if !product.can_sell(input.quantity) {
            return Err(CoreError::InsufficientStock {
                product_id: product.id.clone(),
                available: product.quantity,
                requested: input.quantity,
            });
        }

        let sale = Sale {
            id: generate_id(),
            product_id: input.product_id,
            quantity: input.quantity,
            sale_price: input.sale_price,
            total_price: input.total_price,
            date,
        };

        product.quantity -= sale.quantity;
        product.updated_at = Utc::now();

        debug!(
            sale_id = %sale.id,
            product_id = %sale.product_id,
            quantity = sale.quantity,
            remaining = product.quantity,
            "Recording sale"
        );

        self.sales.push(sale.clone());
        Ok(sale)
    }

    /// Records an expense dated now.
    pub fn record_expense(&mut self, input: NewExpense) -> CoreResult<Expense> {
        self.record_expense_at(input, Utc::now())
    }

    /// Records an expense with an explicit date.
    pub fn record_expense_at(
        &mut self,
        input: NewExpense,
        date: DateTime<Utc>,
    ) -> CoreResult<Expense> {
        validation::validate_new_expense(&input)?;

        let expense = Expense {
            id: generate_id(),
            description: input.description.trim().to_string(),
            amount: input.amount,
            category: input.category,
            date,
        };

        debug!(expense_id = %expense.id, category = %expense.category, "Recording expense");
        self.expenses.push(expense.clone());
        Ok(expense)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ExpenseCategory;
    use crate::ValidationError;
    use chrono::Duration;
    use std::collections::HashSet;

    fn widget(store: &mut InventoryStore) -> Product {
        store
            .add_product(NewProduct::new("Widget", "Tools", Money::from_cents(1000), 5))
            .unwrap()
    }

    #[test]
    fn test_add_product_assigns_unique_ids_in_order() {
        let mut store = InventoryStore::new();
        let names: Vec<String> = (0..50).map(|i| format!("Item {}", i)).collect();

        for name in &names {
            store
                .add_product(NewProduct::new(name, "General", Money::from_cents(100), 1))
                .unwrap();
        }

        let ids: HashSet<&str> = store.products().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids.len(), names.len());

        let stored: Vec<&str> = store.products().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(stored, names.iter().map(String::as_str).collect::<Vec<_>>());
    }

    #[test]
    fn test_add_product_sets_timestamps() {
        let mut store = InventoryStore::new();
        let product = widget(&mut store);
        assert_eq!(product.created_at, product.updated_at);
        assert_eq!(store.product(&product.id), Some(&product));
    }

    #[test]
    fn test_add_product_rejects_negative_values() {
        let mut store = InventoryStore::new();
        let err = store
            .add_product(NewProduct::new("Widget", "Tools", Money::from_cents(1000), -1))
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(ValidationError::Negative { .. })));

        let err = store
            .add_product(NewProduct::new("Widget", "Tools", Money::from_cents(-5), 1))
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert!(store.products().is_empty());
    }

    #[test]
    fn test_huge_values_are_rejected_before_any_write() {
        let mut store = InventoryStore::new();

        let err = store
            .add_product(NewProduct::new("Widget", "Tools", Money::from_cents(1), i64::MAX))
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(ValidationError::TooLarge { .. })));

        let err = store
            .add_product(NewProduct::new(
                "Widget",
                "Tools",
                Money::from_cents(5_000_000_000_000_000_000),
                1000,
            ))
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(ValidationError::TooLarge { .. })));
        assert!(store.products().is_empty());

        let product = widget(&mut store);
        let update = ProductUpdate {
            buy_price: Some(Money::from_cents(i64::MAX)),
            ..Default::default()
        };
        assert!(store.update_product(&product.id, update).is_err());
        assert_eq!(store.stock_value().cents(), 5000);

        let err = store
            .record_expense(NewExpense::new(
                "Lease",
                Money::from_cents(i64::MAX),
                ExpenseCategory::Rent,
            ))
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert!(store.expenses().is_empty());
    }

    #[test]
    fn test_update_product_merges_fields() {
        let mut store = InventoryStore::new();
        let product = widget(&mut store);

        let updated = store
            .update_product(
                &product.id,
                ProductUpdate {
                    buy_price: Some(Money::from_cents(1200)),
                    description: Some(Some("Blue".to_string())),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.buy_price.cents(), 1200);
        assert_eq!(updated.description.as_deref(), Some("Blue"));
        assert_eq!(updated.name, "Widget");
        assert_eq!(updated.quantity, 5);
        assert_eq!(updated.created_at, product.created_at);
    }

    #[test]
    fn test_empty_update_only_touches_updated_at() {
        let mut store = InventoryStore::new();
        let product = widget(&mut store);

        let updated = store
            .update_product(&product.id, ProductUpdate::default())
            .unwrap();

        assert!(updated.updated_at >= product.updated_at);
        assert_eq!(
            Product {
                updated_at: product.updated_at,
                ..updated
            },
            product
        );
    }

    #[test]
    fn test_update_unknown_product_is_not_found() {
        let mut store = InventoryStore::new();
        widget(&mut store);
        let before = store.products().to_vec();

        let err = store
            .update_product("missing", ProductUpdate::default())
            .unwrap_err();
        assert_eq!(err, CoreError::product_not_found("missing"));
        assert_eq!(store.products(), before.as_slice());
    }

    #[test]
    fn test_delete_product() {
        let mut store = InventoryStore::new();
        let product = widget(&mut store);

        let removed = store.delete_product(&product.id).unwrap();
        assert_eq!(removed.id, product.id);
        assert!(store.products().is_empty());

        assert!(matches!(
            store.delete_product(&product.id),
            Err(CoreError::NotFound { .. })
        ));
    }

    #[test]
    fn test_record_sale_decrements_stock() {
        let mut store = InventoryStore::new();
        let product = widget(&mut store);

        let sale = store
            .record_sale(NewSale::new(&product.id, 2, Money::from_cents(1500)).unwrap())
            .unwrap();

        assert_eq!(sale.total_price.cents(), 3000);
        assert_eq!(store.sales(), std::slice::from_ref(&sale));
        assert_eq!(store.product(&product.id).unwrap().quantity, 3);
    }

    #[test]
    fn test_record_sale_can_empty_stock() {
        let mut store = InventoryStore::new();
        let product = widget(&mut store);

        store
            .record_sale(NewSale::new(&product.id, 5, Money::from_cents(1500)).unwrap())
            .unwrap();
        assert_eq!(store.product(&product.id).unwrap().quantity, 0);
    }

    #[test]
    fn test_oversell_is_rejected_without_changes() {
        let mut store = InventoryStore::new();
        let product = widget(&mut store);

        let err = store
            .record_sale(NewSale::new(&product.id, 10, Money::from_cents(1500)).unwrap())
            .unwrap_err();

        assert_eq!(
            err,
            CoreError::InsufficientStock {
                product_id: product.id.clone(),
                available: 5,
                requested: 10,
            }
        );
        assert!(store.sales().is_empty());
        assert_eq!(store.product(&product.id), Some(&product));
    }

    #[test]
    fn test_sale_for_unknown_product_is_rejected() {
        let mut store = InventoryStore::new();
        widget(&mut store);

        let err = store
            .record_sale(NewSale::new("missing", 1, Money::from_cents(1500)).unwrap())
            .unwrap_err();

        assert!(matches!(err, CoreError::NotFound { .. }));
        assert!(store.sales().is_empty());
    }

    #[test]
    fn test_sale_with_zero_quantity_is_rejected() {
        let mut store = InventoryStore::new();
        let product = widget(&mut store);

        let err = store
            .record_sale(NewSale::new(&product.id, 0, Money::from_cents(1500)).unwrap())
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert_eq!(store.product(&product.id).unwrap().quantity, 5);
    }

    #[test]
    fn test_sale_total_is_stored_as_given() {
        let mut store = InventoryStore::new();
        let product = widget(&mut store);

        let input = NewSale {
            product_id: product.id.clone(),
            quantity: 2,
            sale_price: Money::from_cents(1500),
            total_price: Money::from_cents(2800), // caller applied a discount
        };
        let sale = store.record_sale(input).unwrap();
        assert_eq!(sale.total_price.cents(), 2800);
        assert_eq!(store.total_sales(Period::Day).cents(), 2800);
    }

    #[test]
    fn test_widget_scenario() {
        let mut store = InventoryStore::new();
        let product = widget(&mut store);

        store
            .record_sale(NewSale {
                product_id: product.id.clone(),
                quantity: 2,
                sale_price: Money::from_cents(1500),
                total_price: Money::from_cents(3000),
            })
            .unwrap();

        assert_eq!(store.product(&product.id).unwrap().quantity, 3);
        assert!(store.total_sales(Period::Month).cents() >= 3000);
        assert!(store.profit(Period::Month).cents() >= 1000);
    }

    #[test]
    fn test_period_queries_include_today_and_exclude_old() {
        let mut store = InventoryStore::new();
        let product = store
            .add_product(NewProduct::new("Widget", "Tools", Money::from_cents(1000), 50))
            .unwrap();
        let now = Utc::now();

        let today = store
            .record_sale_at(NewSale::new(&product.id, 1, Money::from_cents(1500)).unwrap(), now)
            .unwrap();
        store
            .record_sale_at(
                NewSale::new(&product.id, 1, Money::from_cents(1500)).unwrap(),
                now - Duration::days(400),
            )
            .unwrap();

        for period in Period::ALL {
            let sales = store.sales_by_period_at(period, &now);
            assert_eq!(sales, vec![&today], "period {}", period);
        }
    }

    #[test]
    fn test_profit_ignores_deleted_products() {
        let mut store = InventoryStore::new();
        let kept = widget(&mut store);
        let dropped = store
            .add_product(NewProduct::new("Gadget", "Tools", Money::from_cents(200), 5))
            .unwrap();

        store
            .record_sale(NewSale::new(&kept.id, 1, Money::from_cents(1500)).unwrap())
            .unwrap();
        store
            .record_sale(NewSale::new(&dropped.id, 2, Money::from_cents(700)).unwrap())
            .unwrap();
        assert_eq!(store.profit(Period::Day).cents(), 500 + 1000);

        store.delete_product(&dropped.id).unwrap();
        assert_eq!(store.profit(Period::Day).cents(), 500);
        assert_eq!(store.total_sales(Period::Day).cents(), 1500 + 1400);
        assert_eq!(store.sales().len(), 2);
    }

    #[test]
    fn test_stock_value_tracks_every_mutation() {
        let mut store = InventoryStore::new();
        let product = widget(&mut store);
        assert_eq!(store.stock_value().cents(), 5000);

        store
            .record_sale(NewSale::new(&product.id, 2, Money::from_cents(1500)).unwrap())
            .unwrap();
        assert_eq!(store.stock_value().cents(), 3000);

        store
            .update_product(
                &product.id,
                ProductUpdate {
                    buy_price: Some(Money::from_cents(400)),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(store.stock_value().cents(), 1200);

        store.delete_product(&product.id).unwrap();
        assert!(store.stock_value().is_zero());
        assert_eq!(store.metrics().stock_value, store.stock_value());
    }

    #[test]
    fn test_expenses_do_not_change_dashboard_metrics() {
        let mut store = InventoryStore::new();
        widget(&mut store);
        let before = store.metrics();

        let expense = store
            .record_expense(NewExpense::new(
                "Electricity",
                Money::from_cents(8000),
                ExpenseCategory::Utilities,
            ))
            .unwrap();

        assert_eq!(store.metrics(), before);
        assert_eq!(store.expenses(), std::slice::from_ref(&expense));
        assert_eq!(store.expenses_by_period(Period::Day).len(), 1);
        assert_eq!(store.total_expenses(Period::Month).cents(), 8000);
    }

    #[test]
    fn test_record_expense_rejects_blank_description() {
        let mut store = InventoryStore::new();
        let err = store
            .record_expense(NewExpense::new("  ", Money::from_cents(100), ExpenseCategory::Other))
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(ValidationError::Required { .. })));
        assert!(store.expenses().is_empty());
    }

    #[test]
    fn test_low_stock() {
        let mut store = InventoryStore::new();
        let low = widget(&mut store);
        store
            .add_product(NewProduct::new("Bolt", "Tools", Money::from_cents(5), 120))
            .unwrap();

        let alerts = store.low_stock(10);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].id, low.id);
        assert!(store.low_stock(5).is_empty());
    }
}
