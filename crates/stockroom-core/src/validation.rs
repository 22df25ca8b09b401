//! # Validation Module
//!
//! The validation contract every write goes through before it reaches the
//! record store.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Insert check order (fixed)                         │
//! │                                                                         │
//! │  1. name non-empty                                                      │
//! │  2. price present ──► 3. price numeric ──► 4. price >= 0                │
//! │  5. quantity present ──► 6. quantity numeric ──► 7. quantity >= 0       │
//! │  8. supplier name non-empty                                             │
//! │  9. supplier phone non-empty                                            │
//! │                                                                         │
//! │  First failure aborts. Nothing is written.                              │
//! │                                                                         │
//! │  Update: same rules, same order, but absent fields are skipped.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Text is blank when it is empty after trimming. Stored text is kept
//! exactly as given; trimming is only used to decide emptiness.
//!
//! ## Usage
//! ```rust
//! use stockroom_core::types::{ProductColumn, ProductValues};
//! use stockroom_core::validation::validate_update;
//! use stockroom_core::ValidationError;
//!
//! let err = validate_update(&ProductValues::new().price(-5)).unwrap_err();
//! assert_eq!(err, ValidationError::Negative { field: ProductColumn::Price });
//! ```

use crate::error::{ValidationError, ValidationResult};
use crate::types::{FieldValue, NewProduct, ProductChanges, ProductColumn, ProductValues};

// =============================================================================
// Entry Points
// =============================================================================

/// Validates a complete product for insertion.
///
/// Every writable field must be present and valid.
pub fn validate_insert(values: &ProductValues) -> ValidationResult<NewProduct> {
    reject_read_only(values)?;

    let name = required_text(values, ProductColumn::Name)?;
    let price = required_non_negative(values, ProductColumn::Price)?;
    let quantity = required_non_negative(values, ProductColumn::Quantity)?;
    let supplier_name = required_text(values, ProductColumn::SupplierName)?;
    let supplier_phone = required_text(values, ProductColumn::SupplierPhone)?;

    Ok(NewProduct {
        name,
        price,
        quantity,
        supplier_name,
        supplier_phone,
    })
}

/// Validates a partial update.
///
/// Only the fields present in `values` are checked; a present field must
/// satisfy the same rule as on insert.
pub fn validate_update(values: &ProductValues) -> ValidationResult<ProductChanges> {
    reject_read_only(values)?;

    let present = |column| values.contains(column);

    let mut changes = ProductChanges::default();
    if present(ProductColumn::Name) {
        changes.name = Some(required_text(values, ProductColumn::Name)?);
    }
    if present(ProductColumn::Price) {
        changes.price = Some(required_non_negative(values, ProductColumn::Price)?);
    }
    if present(ProductColumn::Quantity) {
        changes.quantity = Some(required_non_negative(values, ProductColumn::Quantity)?);
    }
    if present(ProductColumn::SupplierName) {
        changes.supplier_name = Some(required_text(values, ProductColumn::SupplierName)?);
    }
    if present(ProductColumn::SupplierPhone) {
        changes.supplier_phone = Some(required_text(values, ProductColumn::SupplierPhone)?);
    }

    Ok(changes)
}

// =============================================================================
// Field Rules
// =============================================================================

/// Parses a numeric field value as an integer.
///
/// ## Rules
/// - `Integer` is taken as is
/// - `Text` must be a base-10 integer, surrounding whitespace ignored
/// - `Null` is a missing value
pub fn parse_integer(field: ProductColumn, value: &FieldValue) -> ValidationResult<i64> {
    match value {
        FieldValue::Null => Err(ValidationError::Required { field }),
        FieldValue::Integer(i) => Ok(*i),
        FieldValue::Text(text) => {
            text.trim()
                .parse::<i64>()
                .map_err(|_| ValidationError::NotANumber {
                    field,
                    value: text.clone(),
                })
        }
    }
}

/// Validates that a parsed number is not negative.
///
/// ## Example
/// ```rust
/// use stockroom_core::types::ProductColumn;
/// use stockroom_core::validation::validate_non_negative;
///
/// assert!(validate_non_negative(ProductColumn::Price, 0).is_ok());
/// assert!(validate_non_negative(ProductColumn::Price, -1).is_err());
/// ```
pub fn validate_non_negative(field: ProductColumn, value: i64) -> ValidationResult<i64> {
    if value < 0 {
        return Err(ValidationError::Negative { field });
    }
    Ok(value)
}

/// Validates a required text field and returns it unchanged.
///
/// Integers are accepted and kept as their decimal text, so a phone number
/// entered as a number is still stored as text.
pub fn validate_text(field: ProductColumn, value: &FieldValue) -> ValidationResult<String> {
    let text = value
        .to_text()
        .ok_or(ValidationError::Required { field })?;

    if text.trim().is_empty() {
        return Err(ValidationError::Required { field });
    }

    Ok(text)
}

fn required_text(values: &ProductValues, field: ProductColumn) -> ValidationResult<String> {
    let value = values.get(field).ok_or(ValidationError::Required { field })?;
    validate_text(field, value)
}

fn required_non_negative(values: &ProductValues, field: ProductColumn) -> ValidationResult<i64> {
    let value = values.get(field).ok_or(ValidationError::Required { field })?;
    let number = parse_integer(field, value)?;
    validate_non_negative(field, number)
}

fn reject_read_only(values: &ProductValues) -> ValidationResult<()> {
    if values.contains(ProductColumn::Id) {
        return Err(ValidationError::ReadOnly {
            field: ProductColumn::Id,
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
