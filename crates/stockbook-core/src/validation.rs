//! # Validation Module
//!
//! Input validation for Stockbook.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Dashboard forms                                              │
//! │  ├── Required fields, immediate feedback                               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: stockbook-app commands                                       │
//! │  ├── parse_money / parse_quantity on raw strings                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: InventoryStore                                               │
//! │  └── validate_new_* guards: no negative stock, no negative prices,     │
//! │      nothing above MAX_QUANTITY / MAX_AMOUNT_CENTS                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use stockbook_core::validation::{parse_money, validate_product_name};
//!
//! assert_eq!(parse_money("buy price", "12.50").unwrap().cents(), 1250);
//! assert!(validate_product_name("").is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{NewExpense, NewProduct, NewSale, ProductUpdate};
use crate::{MAX_AMOUNT_CENTS, MAX_QUANTITY, MAX_SALE_TOTAL_CENTS, MAX_TEXT_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

fn validate_text(field: &str, value: &str) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > MAX_TEXT_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_TEXT_LEN,
        });
    }

    Ok(())
}

/// Validates a product name: non-empty, at most 200 characters.
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    validate_text("name", name)
}

/// Validates a product category: non-empty, at most 200 characters.
pub fn validate_category(category: &str) -> ValidationResult<()> {
    validate_text("category", category)
}

/// Validates an expense description: non-empty, at most 200 characters.
pub fn validate_expense_description(description: &str) -> ValidationResult<()> {
    validate_text("description", description)
}

/// Validates an optional product description. Only the length is checked.
pub fn validate_product_description(description: Option<&str>) -> ValidationResult<()> {
    match description {
        Some(d) if d.chars().count() > MAX_TEXT_LEN => Err(ValidationError::TooLong {
            field: "description".to_string(),
            max: MAX_TEXT_LEN,
        }),
        _ => Ok(()),
    }
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates an amount that may be zero but not negative, and is at most
/// [`MAX_AMOUNT_CENTS`].
///
/// ## Example
/// ```rust
/// use stockbook_core::money::Money;
/// use stockbook_core::validation::validate_non_negative_money;
///
/// assert!(validate_non_negative_money("buy price", Money::zero()).is_ok());
/// assert!(validate_non_negative_money("buy price", Money::from_cents(-1)).is_err());
/// ```
pub fn validate_non_negative_money(field: &str, amount: Money) -> ValidationResult<()> {
    validate_money_range(field, amount, MAX_AMOUNT_CENTS)
}

fn validate_money_range(field: &str, amount: Money, max_cents: i64) -> ValidationResult<()> {
    if amount.is_negative() {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }

    if amount.cents() > max_cents {
        return Err(ValidationError::TooLarge {
            field: field.to_string(),
            max: Money::from_cents(max_cents).to_string(),
        });
    }

    Ok(())
}

fn validate_quantity_cap(qty: i64) -> ValidationResult<()> {
    if qty > MAX_QUANTITY {
        return Err(ValidationError::TooLarge {
            field: "quantity".to_string(),
            max: MAX_QUANTITY.to_string(),
        });
    }

    Ok(())
}

/// Validates a stock level (zero allowed, at most [`MAX_QUANTITY`]).
pub fn validate_stock_quantity(qty: i64) -> ValidationResult<()> {
    if qty < 0 {
        return Err(ValidationError::Negative {
            field: "quantity".to_string(),
        });
    }

    validate_quantity_cap(qty)
}

/// Validates a quantity sold (must be > 0, at most [`MAX_QUANTITY`]).
pub fn validate_sale_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    validate_quantity_cap(qty)
}

// =============================================================================
// Parsers for raw form input
// =============================================================================

/// Parses a decimal amount ("12", "12.5", "12,50") into cents.
///
/// ## Rules
/// - At most two fraction digits
/// - `.` or `,` as the decimal separator
/// - No sign, no thousands separators
/// - At most [`MAX_AMOUNT_CENTS`]
///
/// ## Example
/// ```rust
/// use stockbook_core::validation::parse_money;
///
/// assert_eq!(parse_money("amount", "7").unwrap().cents(), 700);
/// assert_eq!(parse_money("amount", "0,05").unwrap().cents(), 5);
/// assert!(parse_money("amount", "1.234").is_err());
/// assert!(parse_money("amount", "-3").is_err());
/// ```
pub fn parse_money(field: &str, raw: &str) -> ValidationResult<Money> {
    let raw = raw.trim();

    if raw.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: reason.to_string(),
    };

    if raw.starts_with('-') {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }

    let digits = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());

    let (whole, frac) = match raw.split_once(['.', ',']) {
        Some((whole, frac)) if digits(frac) => (whole, frac),
        Some(_) => return Err(invalid("must be a decimal number")),
        None => (raw, ""),
    };

    if !digits(whole) {
        return Err(invalid("must be a decimal number"));
    }

    if frac.len() > 2 {
        return Err(invalid("at most two decimal places"));
    }

    let whole: i64 = whole.parse().map_err(|_| invalid("amount too large"))?;
    let frac: i64 = match frac.len() {
        0 => 0,
        1 => frac.parse::<i64>().map_err(|_| invalid("must be a decimal number"))? * 10,
        _ => frac.parse().map_err(|_| invalid("must be a decimal number"))?,
    };

    let amount = whole
        .checked_mul(100)
        .and_then(|cents| cents.checked_add(frac))
        .map(Money::from_cents)
        .ok_or_else(|| invalid("amount too large"))?;

    validate_non_negative_money(field, amount)?;
    Ok(amount)
}

/// Parses a whole-number quantity.
pub fn parse_quantity(field: &str, raw: &str) -> ValidationResult<i64> {
    let raw = raw.trim();

    if raw.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    raw.parse::<i64>().map_err(|_| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: "must be a whole number".to_string(),
    })
}

// =============================================================================
// Record Validators (store guards)
// =============================================================================

/// Checks a product before it enters the catalog.
pub fn validate_new_product(input: &NewProduct) -> ValidationResult<()> {
    validate_product_name(&input.name)?;
    validate_category(&input.category)?;
    validate_non_negative_money("buy price", input.buy_price)?;
    validate_stock_quantity(input.quantity)?;
    validate_product_description(input.description.as_deref())
}

/// Checks only the fields an update actually sets.
pub fn validate_product_update(update: &ProductUpdate) -> ValidationResult<()> {
    if let Some(name) = &update.name {
        validate_product_name(name)?;
    }
    if let Some(category) = &update.category {
        validate_category(category)?;
    }
    if let Some(buy_price) = update.buy_price {
        validate_non_negative_money("buy price", buy_price)?;
    }
    if let Some(quantity) = update.quantity {
        validate_stock_quantity(quantity)?;
    }
    if let Some(description) = &update.description {
        validate_product_description(description.as_deref())?;
    }
    Ok(())
}

/// Checks a sale before stock is touched.
pub fn validate_new_sale(input: &NewSale) -> ValidationResult<()> {
    if input.product_id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "product".to_string(),
        });
    }
    validate_sale_quantity(input.quantity)?;
    validate_non_negative_money("sale price", input.sale_price)?;
    validate_money_range("total price", input.total_price, MAX_SALE_TOTAL_CENTS)
}

/// Checks an expense before it is recorded.
pub fn validate_new_expense(input: &NewExpense) -> ValidationResult<()> {
    validate_expense_description(&input.description)?;
    validate_non_negative_money("amount", input.amount)
}

// =============================================================================
// Unit Tests
// =============================================================================
