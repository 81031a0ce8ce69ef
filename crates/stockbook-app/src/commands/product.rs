//! # Product Commands
//!
//! Catalog CRUD driven by the product form.
//!
//! ## Form Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Product Form                                         │
//! │                                                                         │
//! │  Name ............ "Widget"        ──► validate_product_name           │
//! │  Category ........ "Tools"         ──► validate_category               │
//! │  Buy price ....... "10,00"         ──► parse_money     → 1000 cents    │
//! │  Quantity ........ "5"             ──► parse_quantity  → 5             │
//! │  Description ..... "" (optional)   ──► empty means none                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  store.add_product(NewProduct)  ──► ProductDto                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stockbook_core::validation::{parse_money, parse_quantity};
use stockbook_core::{CoreError, Money, NewProduct, Product, ProductUpdate, ValidationError};
use tracing::{debug, info};

use super::rejected;
use crate::error::ApiError;
use crate::state::{AppConfig, InventoryState};

// =============================================================================
// Forms
// =============================================================================

/// Raw input from the "add product" form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductForm {
    pub name: String,
    pub category: String,
    pub buy_price: String,
    pub quantity: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl ProductForm {
    /// Converts the raw strings into a store input.
    pub fn parse(&self) -> Result<NewProduct, ValidationError> {
        let mut input = NewProduct::new(
            self.name.clone(),
            self.category.clone(),
            parse_money("buy price", &self.buy_price)?,
            parse_quantity("quantity", &self.quantity)?,
        );
        input.description = non_blank(self.description.as_deref());
        Ok(input)
    }
}

/// Raw input from the "edit product" form. Absent fields stay as they are.
///
/// An empty `description` clears it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatchForm {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub buy_price: Option<String>,
    #[serde(default)]
    pub quantity: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl ProductPatchForm {
    pub fn parse(&self) -> Result<ProductUpdate, ValidationError> {
        Ok(ProductUpdate {
            name: self.name.clone(),
            category: self.category.clone(),
            buy_price: self
                .buy_price
                .as_deref()
                .map(|raw| parse_money("buy price", raw))
                .transpose()?,
            quantity: self
                .quantity
                .as_deref()
                .map(|raw| parse_quantity("quantity", raw))
                .transpose()?,
            description: self
                .description
                .as_deref()
                .map(|raw| non_blank(Some(raw))),
        })
    }
}

fn non_blank(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

// =============================================================================
// DTO
// =============================================================================

/// Product row for the products table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: String,
    pub name: String,
    pub category: String,
    pub buy_price: Money,
    pub quantity: i64,
    pub description: Option<String>,
    /// quantity × buy price
    pub stock_value: Money,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductDto {
    fn from(p: Product) -> Self {
        ProductDto {
            stock_value: p.stock_value(),
            id: p.id,
            name: p.name,
            category: p.category,
            buy_price: p.buy_price,
            quantity: p.quantity,
            description: p.description,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

impl From<&Product> for ProductDto {
    fn from(p: &Product) -> Self {
        ProductDto::from(p.clone())
    }
}

// =============================================================================
// Commands
// =============================================================================

/// All products in catalog order.
pub fn list_products(inventory: &InventoryState) -> Vec<ProductDto> {
    inventory.with_store(|store| store.products().iter().map(ProductDto::from).collect())
}

/// One product by id.
pub fn get_product(inventory: &InventoryState, id: &str) -> Result<ProductDto, ApiError> {
    debug!(product_id = %id, "get_product command");
    inventory
        .with_store(|store| store.product(id).map(ProductDto::from))
        .ok_or_else(|| rejected("get_product", CoreError::product_not_found(id)))
}

/// Adds a product from the product form.
pub fn add_product(inventory: &InventoryState, form: ProductForm) -> Result<ProductDto, ApiError> {
    let input = form.parse().map_err(|e| rejected("add_product", e))?;

    let product = inventory
        .with_store_mut(|store| store.add_product(input))
        .map_err(|e| rejected("add_product", e))?;

    info!(product_id = %product.id, name = %product.name, quantity = product.quantity, "Product added");
    Ok(product.into())
}

/// Applies the edit form to an existing product.
pub fn update_product(
    inventory: &InventoryState,
    id: &str,
    form: ProductPatchForm,
) -> Result<ProductDto, ApiError> {
    let update = form.parse().map_err(|e| rejected("update_product", e))?;

    let product = inventory
        .with_store_mut(|store| store.update_product(id, update))
        .map_err(|e| rejected("update_product", e))?;

    info!(product_id = %product.id, quantity = product.quantity, "Product updated");
    Ok(product.into())
}

/// Removes a product. Its past sales stay in the ledger.
pub fn delete_product(inventory: &InventoryState, id: &str) -> Result<ProductDto, ApiError> {
    let product = inventory
        .with_store_mut(|store| store.delete_product(id))
        .map_err(|e| rejected("delete_product", e))?;

    info!(product_id = %product.id, name = %product.name, "Product deleted");
    Ok(product.into())
}

/// Products under the configured low-stock threshold.
pub fn low_stock(inventory: &InventoryState, config: &AppConfig) -> Vec<ProductDto> {
    inventory.with_store(|store| {
        store
            .low_stock(config.low_stock_threshold)
            .into_iter()
            .map(ProductDto::from)
            .collect()
    })
}
