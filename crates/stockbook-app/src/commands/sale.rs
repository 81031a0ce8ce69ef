//! # Sale Commands
//!
//! Recording sales, the sales list, and chart series.
//!
//! ## Sale Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Record Sale                                          │
//! │                                                                         │
//! │  Select product ───► preview_sale() ───► total + expected profit       │
//! │       │                                  (nothing recorded)             │
//! │       ▼                                                                 │
//! │  Submit ───────────► record_sale()                                      │
//! │                          │                                              │
//! │                          ├── unknown product ──► NOT_FOUND              │
//! │                          ├── qty > stock ──────► INSUFFICIENT_STOCK     │
//! │                          └── ok ───────────────► stock −= qty, SaleDto  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The total is always `quantity × sale price`, computed here rather than
//! taken from the form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stockbook_core::validation::{parse_money, parse_quantity, validate_sale_quantity};
use stockbook_core::{CoreError, InventoryStore, Money, NewSale, Sale, SeriesPoint, ValidationError};
use tracing::info;

use super::{parse_period, rejected};
use crate::error::ApiError;
use crate::state::InventoryState;

// =============================================================================
// Form
// =============================================================================

/// Raw input from the sale form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleForm {
    pub product_id: String,
    pub quantity: String,
    pub sale_price: String,
}

impl SaleForm {
    pub fn parse(&self) -> Result<NewSale, ValidationError> {
        let product_id = self.product_id.trim();
        if product_id.is_empty() {
            return Err(ValidationError::Required {
                field: "product".to_string(),
            });
        }

        let quantity = parse_quantity("quantity", &self.quantity)?;
        validate_sale_quantity(quantity)?;
        let sale_price = parse_money("sale price", &self.sale_price)?;

        NewSale::new(product_id, quantity, sale_price)
    }
}

// =============================================================================
// DTOs
// =============================================================================

/// Sale row for the sales list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleDto {
    pub id: String,
    pub product_id: String,
    /// `None` once the product has been deleted.
    pub product_name: Option<String>,
    pub quantity: i64,
    pub sale_price: Money,
    pub total_price: Money,
    pub date: DateTime<Utc>,
}

impl SaleDto {
    fn from_sale(store: &InventoryStore, sale: &Sale) -> Self {
        SaleDto {
            id: sale.id.clone(),
            product_id: sale.product_id.clone(),
            product_name: store.product(&sale.product_id).map(|p| p.name.clone()),
            quantity: sale.quantity,
            sale_price: sale.sale_price,
            total_price: sale.total_price,
            date: sale.date,
        }
    }
}

/// What the sale form shows before submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalePreview {
    pub total_price: Money,
    /// (sale price − current buy price) × quantity
    pub expected_profit: Money,
    /// Units on hand right now.
    pub available: i64,
}

// =============================================================================
// Commands
// =============================================================================

/// Computes the total and margin of a sale without recording it.
pub fn preview_sale(inventory: &InventoryState, form: &SaleForm) -> Result<SalePreview, ApiError> {
    let input = form.parse().map_err(|e| rejected("preview_sale", e))?;

    inventory.with_store(|store| -> Result<SalePreview, ApiError> {
        let product = store
            .product(&input.product_id)
            .ok_or_else(|| rejected("preview_sale", CoreError::product_not_found(&input.product_id)))?;

        Ok(SalePreview {
            total_price: input.total_price,
            expected_profit: (input.sale_price - product.buy_price)
                .multiply_quantity(input.quantity),
            available: product.quantity,
        })
    })
}

/// Records a sale and takes the units out of stock.
pub fn record_sale(inventory: &InventoryState, form: SaleForm) -> Result<SaleDto, ApiError> {
    let input = form.parse().map_err(|e| rejected("record_sale", e))?;

    inventory.with_store_mut(|store| -> Result<SaleDto, ApiError> {
        let sale = store
            .record_sale(input)
            .map_err(|e| rejected("record_sale", e))?;

        info!(
            sale_id = %sale.id,
            product_id = %sale.product_id,
            quantity = sale.quantity,
            total_cents = sale.total_price.cents(),
            "Sale recorded"
        );
        Ok(SaleDto::from_sale(store, &sale))
    })
}

/// Every sale, oldest first.
pub fn list_sales(inventory: &InventoryState) -> Vec<SaleDto> {
    inventory.with_store(|store| {
        store
            .sales()
            .iter()
            .map(|sale| SaleDto::from_sale(store, sale))
            .collect()
    })
}

/// Sales inside the window named by `period` (`day|week|month|year`).
pub fn sales_by_period(inventory: &InventoryState, period: &str) -> Result<Vec<SaleDto>, ApiError> {
    let period = parse_period("sales_by_period", period)?;

    Ok(inventory.with_store(|store| {
        store
            .sales_by_period(period)
            .into_iter()
            .map(|sale| SaleDto::from_sale(store, sale))
            .collect()
    }))
}

/// Chart buckets for the sales chart.
pub fn sales_series(inventory: &InventoryState, period: &str) -> Result<Vec<SeriesPoint>, ApiError> {
    let period = parse_period("sales_series", period)?;
    Ok(inventory.with_store(|store| store.sales_series(period)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::product::{add_product, get_product, ProductForm};
    use crate::error::ErrorCode;

    fn setup() -> (InventoryState, String) {
        let inventory = InventoryState::new();
        let product = add_product(
            &inventory,
            ProductForm {
                name: "Widget".to_string(),
                category: "Tools".to_string(),
                buy_price: "10".to_string(),
                quantity: "5".to_string(),
                description: None,
            },
        )
        .unwrap();
        (inventory, product.id)
    }

    fn form(product_id: &str, quantity: &str, price: &str) -> SaleForm {
        SaleForm {
            product_id: product_id.to_string(),
            quantity: quantity.to_string(),
            sale_price: price.to_string(),
        }
    }

    #[test]
    fn test_record_sale_decrements_stock() {
        let (inventory, id) = setup();

        let sale = record_sale(&inventory, form(&id, "2", "15.00")).unwrap();
        assert_eq!(sale.total_price.cents(), 3000);
        assert_eq!(sale.product_name.as_deref(), Some("Widget"));
        assert_eq!(get_product(&inventory, &id).unwrap().quantity, 3);
    }

    #[test]
    fn test_oversell_is_rejected() {
        let (inventory, id) = setup();

        let err = record_sale(&inventory, form(&id, "10", "15")).unwrap_err();
        assert_eq!(err.code, ErrorCode::InsufficientStock);
        assert_eq!(get_product(&inventory, &id).unwrap().quantity, 5);
        assert!(list_sales(&inventory).is_empty());
    }

    #[test]
    fn test_sale_form_validation() {
        let (inventory, id) = setup();

        for bad in [
            form(&id, "0", "15"),
            form(&id, "-1", "15"),
            form(&id, "1", ""),
            form(&id, "1", "1.234"),
            form("  ", "1", "15"),
        ] {
            let err = record_sale(&inventory, bad).unwrap_err();
            assert_eq!(err.code, ErrorCode::ValidationError);
        }

        let err = record_sale(&inventory, form("missing", "1", "15")).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_huge_sale_is_rejected_not_panicking() {
        let (inventory, id) = setup();

        for bad in [
            form(&id, "9223372036854775807", "1"),
            form(&id, "1", "50000000000000000"),
            form(&id, "1000001", "1"),
        ] {
            assert!(preview_sale(&inventory, &bad).is_err());
            let err = record_sale(&inventory, bad).unwrap_err();
            assert_eq!(err.code, ErrorCode::ValidationError);
        }

        assert!(list_sales(&inventory).is_empty());
        assert_eq!(get_product(&inventory, &id).unwrap().quantity, 5);
    }

    #[test]
    fn test_preview_does_not_record() {
        let (inventory, id) = setup();

        let preview = preview_sale(&inventory, &form(&id, "2", "15")).unwrap();
        assert_eq!(preview.total_price.cents(), 3000);
        assert_eq!(preview.expected_profit.cents(), 1000);
        assert_eq!(preview.available, 5);
        assert!(list_sales(&inventory).is_empty());
    }

    #[test]
    fn test_deleted_product_keeps_sale_without_name() {
        let (inventory, id) = setup();
        record_sale(&inventory, form(&id, "1", "15")).unwrap();
        crate::commands::product::delete_product(&inventory, &id).unwrap();

        let sales = list_sales(&inventory);
        assert_eq!(sales.len(), 1);
        assert_eq!(sales[0].product_name, None);
    }

    #[test]
    fn test_period_queries() {
        let (inventory, id) = setup();
        record_sale(&inventory, form(&id, "2", "15")).unwrap();

        assert_eq!(sales_by_period(&inventory, "day").unwrap().len(), 1);
        let series = sales_series(&inventory, "year").unwrap();
        assert_eq!(series.iter().map(|p| p.units_sold).sum::<i64>(), 2);

        let err = sales_by_period(&inventory, "decade").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }
}
