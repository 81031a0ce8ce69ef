//! # Expense Commands
//!
//! Expenses are append-only: record, then list.

use stockbook_core::validation::parse_money;
use stockbook_core::{Expense, ExpenseCategory, NewExpense, ValidationError};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{parse_period, rejected};
use crate::error::ApiError;
use crate::state::InventoryState;

/// Raw input from the expense form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseForm {
    pub description: String,
    pub amount: String,
    /// One of `rent|utilities|supplies|salary|marketing|other`.
    pub category: String,
}

impl ExpenseForm {
    pub fn parse(&self) -> Result<NewExpense, ValidationError> {
        let amount = parse_money("amount", &self.amount)?;
        let category: ExpenseCategory = self.category.parse()?;
        Ok(NewExpense::new(self.description.clone(), amount, category))
    }
}

pub fn record_expense(inventory: &InventoryState, form: ExpenseForm) -> Result<Expense, ApiError> {
    let input = form.parse().map_err(|e| rejected("record_expense", e))?;

    let expense = inventory
        .with_store_mut(|store| store.record_expense(input))
        .map_err(|e| rejected("record_expense", e))?;

    info!(
        expense_id = %expense.id,
        category = %expense.category,
        amount_cents = expense.amount.cents(),
        "Expense recorded"
    );
    Ok(expense)
}

pub fn list_expenses(inventory: &InventoryState) -> Vec<Expense> {
    inventory.with_store(|store| store.expenses().to_vec())
}

pub fn expenses_by_period(inventory: &InventoryState, period: &str) -> Result<Vec<Expense>, ApiError> {
    let period = parse_period("expenses_by_period", period)?;
    Ok(inventory.with_store(|store| {
        store
            .expenses_by_period(period)
            .into_iter()
            .cloned()
            .collect()
    }))
}

/// Category names for the expense form's picker.
pub fn expense_categories() -> Vec<&'static str> {
    ExpenseCategory::ALL.iter().map(|c| c.as_str()).collect()
}
