//! # Validation Module
//!
//! Input validation for checkout requests and catalogue writes.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP extractor (axum)                                        │
//! │  └── JSON / query shape (malformed body → InvalidInput)                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Checkout basket not empty, bounded                                │
//! │  ├── Quantities positive                                               │
//! │  └── Names present, prices and stock not negative                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── CHECK (stock >= 0), CHECK (price >= 0)                            │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything here runs before a unit of work is opened, so a rejected
//! request never holds the store's write lock.

use crate::error::ValidationError;
use crate::types::{CategoryInput, CheckoutLine, ProductInput};
use crate::{MAX_CHECKOUT_LINES, MAX_LINE_QUANTITY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_NAME_LEN: usize = 200;
const MAX_DESCRIPTION_LEN: usize = 1000;

// =============================================================================
// Checkout
// =============================================================================

/// Validates a checkout line quantity.
///
/// ## Rules
/// - Must be positive (> 0); a negative quantity would inflate stock
/// - Must not exceed MAX_LINE_QUANTITY (999)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_LINE_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a whole checkout basket.
///
/// ## Rules
/// - At least one line (an empty checkout is rejected, not a zero-total sale)
/// - At most MAX_CHECKOUT_LINES lines
/// - Every line names a positive product id
/// - Every line passes [`validate_quantity`]
///
/// Repeated product ids are allowed; they apply sequentially.
pub fn validate_checkout_lines(lines: &[CheckoutLine]) -> ValidationResult<()> {
    if lines.is_empty() {
        return Err(ValidationError::Required {
            field: "items".to_string(),
        });
    }

    if lines.len() > MAX_CHECKOUT_LINES {
        return Err(ValidationError::OutOfRange {
            field: "items".to_string(),
            min: 1,
            max: MAX_CHECKOUT_LINES as i64,
        });
    }

    for line in lines {
        if line.product_id <= 0 {
            return Err(ValidationError::MustBePositive {
                field: "product_id".to_string(),
            });
        }
        validate_quantity(line.quantity)?;
    }

    Ok(())
}

// =============================================================================
// Catalogue
// =============================================================================

fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

fn validate_not_negative(field: &str, value: i64) -> ValidationResult<()> {
    if value < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates a product create/update body.
///
/// ## Rules
/// - name: required, at most 200 characters
/// - price: >= 0 (free items allowed)
/// - stock: >= 0
pub fn validate_product_input(input: &ProductInput) -> ValidationResult<()> {
    validate_name("name", &input.name)?;
    validate_not_negative("price", input.price)?;
    validate_not_negative("stock", input.stock)?;
    Ok(())
}

/// Validates a category create/update body.
pub fn validate_category_input(input: &CategoryInput) -> ValidationResult<()> {
    validate_name("name", &input.name)?;

    if let Some(description) = &input.description {
        if description.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(ValidationError::TooLong {
                field: "description".to_string(),
                max: MAX_DESCRIPTION_LEN,
            });
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
