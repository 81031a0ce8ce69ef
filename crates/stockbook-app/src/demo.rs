//! Demo catalog loaded when `seed_demo_data` is on.
//!
//! Sales are back-dated across the last few weeks so every period window and
//! chart has something to show.

use chrono::{Duration, Utc};
use stockbook_core::{
    CoreResult, ExpenseCategory, InventoryStore, Money, NewExpense, NewProduct, NewSale,
};
use tracing::info;

/// (name, category, buy price in cents, quantity, description)
const PRODUCTS: [(&str, &str, i64, i64, &str); 4] = [
    ("Espresso beans 1kg", "Coffee", 1_800, 40, "Medium roast, whole bean"),
    ("Paper cups (50)", "Supplies", 350, 8, ""),
    ("Oat milk 1L", "Dairy", 220, 24, "Barista edition"),
    ("Ceramic mug", "Merchandise", 600, 12, ""),
];

/// (product index, quantity, unit price in cents, days ago)
const SALES: [(usize, i64, i64, i64); 6] = [
    (0, 3, 2_900, 0),
    (2, 6, 390, 0),
    (3, 2, 1_400, 2),
    (0, 5, 2_900, 6),
    (1, 4, 600, 12),
    (2, 10, 390, 25),
];

/// Fills `store` with demo products, sales and expenses.
pub fn seed(store: &mut InventoryStore) -> CoreResult<()> {
    let now = Utc::now();

    let mut ids = Vec::with_capacity(PRODUCTS.len());
    for (name, category, cents, quantity, description) in PRODUCTS {
        let mut input = NewProduct::new(name, category, Money::from_cents(cents), quantity);
        if !description.is_empty() {
            input = input.with_description(description);
        }
        ids.push(store.add_product(input)?.id);
    }

    for (index, quantity, cents, days_ago) in SALES {
        store.record_sale_at(
            NewSale::new(ids[index].clone(), quantity, Money::from_cents(cents))?,
            now - Duration::days(days_ago),
        )?;
    }

    store.record_expense_at(
        NewExpense::new("Shop rent", Money::from_cents(95_000), ExpenseCategory::Rent),
        now - Duration::days(9),
    )?;
    store.record_expense_at(
        NewExpense::new("Electricity", Money::from_cents(12_450), ExpenseCategory::Utilities),
        now - Duration::days(3),
    )?;

    info!(
        products = store.products().len(),
        sales = store.sales().len(),
        expenses = store.expenses().len(),
        "Demo data loaded"
    );
    Ok(())
}
