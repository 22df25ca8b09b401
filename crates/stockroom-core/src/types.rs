//! # Domain Types
//!
//! Core domain types used throughout Stockroom.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │  ProductValues  │   │   FieldValue    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (store)     │   │  column → value │   │  Null           │       │
//! │  │  name           │   │  (write input,  │   │  Integer(i64)   │       │
//! │  │  price          │   │   unvalidated)  │   │  Text(String)   │       │
//! │  │  quantity       │   └────────┬────────┘   └─────────────────┘       │
//! │  │  supplier_*     │            │ validation                            │
//! │  └─────────────────┘            ▼                                       │
//! │                        ┌─────────────────┐   ┌─────────────────┐       │
//! │                        │   NewProduct    │   │ ProductChanges  │       │
//! │                        │ (insert, full)  │   │ (update, partial│       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Writes arrive as [`ProductValues`], the way form input arrives: every
//! field may be missing, null, a number or a piece of text. Validation turns
//! them into [`NewProduct`] or [`ProductChanges`], which only ever hold
//! values that are safe to persist.

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Columns
// =============================================================================

/// A column of the `products` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductColumn {
    Id,
    Name,
    Price,
    Quantity,
    SupplierName,
    SupplierPhone,
}

impl ProductColumn {
    /// All columns in schema order.
    pub const ALL: [ProductColumn; 6] = [
        ProductColumn::Id,
        ProductColumn::Name,
        ProductColumn::Price,
        ProductColumn::Quantity,
        ProductColumn::SupplierName,
        ProductColumn::SupplierPhone,
    ];

    /// SQL column name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ProductColumn::Id => "id",
            ProductColumn::Name => "name",
            ProductColumn::Price => "price",
            ProductColumn::Quantity => "quantity",
            ProductColumn::SupplierName => "supplier_name",
            ProductColumn::SupplierPhone => "supplier_phone",
        }
    }

    /// Human-readable field name used in messages.
    pub const fn label(&self) -> &'static str {
        match self {
            ProductColumn::Id => "id",
            ProductColumn::Name => "name",
            ProductColumn::Price => "price",
            ProductColumn::Quantity => "quantity",
            ProductColumn::SupplierName => "supplier name",
            ProductColumn::SupplierPhone => "supplier phone",
        }
    }

    /// Whether the column is stored as INTEGER.
    pub const fn is_integer(&self) -> bool {
        matches!(
            self,
            ProductColumn::Id | ProductColumn::Price | ProductColumn::Quantity
        )
    }

    /// Parses a SQL column name.
    pub fn from_name(name: &str) -> Option<Self> {
        ProductColumn::ALL
            .into_iter()
            .find(|column| column.as_str() == name)
    }
}

impl fmt::Display for ProductColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Field Values
// =============================================================================

/// A single loosely typed cell value.
///
/// Used both for write input (before validation) and for rows read back
/// from the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Integer(i64),
    Text(String),
}

impl FieldValue {
    /// Renders the value as text the way a form field would show it.
    ///
    /// `Null` has no text representation.
    pub fn to_text(&self) -> Option<String> {
        match self {
            FieldValue::Null => None,
            FieldValue::Integer(i) => Some(i.to_string()),
            FieldValue::Text(s) => Some(s.clone()),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => f.write_str("NULL"),
            FieldValue::Integer(i) => write!(f, "{}", i),
            FieldValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Integer(value as i64)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

// =============================================================================
// Product Values (write input)
// =============================================================================

/// Unvalidated column values for an insert or an update.
///
/// Holds at most one value per column; setting a column twice replaces the
/// earlier value. Insertion order is kept so that logs read naturally.
///
/// ## Example
/// ```rust
/// use stockroom_core::types::{ProductColumn, ProductValues};
///
/// let values = ProductValues::new().quantity(9);
/// assert_eq!(values.len(), 1);
/// assert!(values.contains(ProductColumn::Quantity));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductValues {
    entries: Vec<(ProductColumn, FieldValue)>,
}

impl ProductValues {
    /// Creates an empty value set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a column, replacing any previous value.
    pub fn set(&mut self, column: ProductColumn, value: impl Into<FieldValue>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(c, _)| *c == column) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((column, value)),
        }
    }

    /// Builder form of [`set`](Self::set).
    pub fn with(mut self, column: ProductColumn, value: impl Into<FieldValue>) -> Self {
        self.set(column, value);
        self
    }

    pub fn name(self, value: impl Into<FieldValue>) -> Self {
        self.with(ProductColumn::Name, value)
    }

    pub fn price(self, value: impl Into<FieldValue>) -> Self {
        self.with(ProductColumn::Price, value)
    }

    pub fn quantity(self, value: impl Into<FieldValue>) -> Self {
        self.with(ProductColumn::Quantity, value)
    }

    pub fn supplier_name(self, value: impl Into<FieldValue>) -> Self {
        self.with(ProductColumn::SupplierName, value)
    }

    pub fn supplier_phone(self, value: impl Into<FieldValue>) -> Self {
        self.with(ProductColumn::SupplierPhone, value)
    }

    /// Returns the value for a column, if present.
    pub fn get(&self, column: ProductColumn) -> Option<&FieldValue> {
        self.entries
            .iter()
            .find(|(c, _)| *c == column)
            .map(|(_, v)| v)
    }

    /// Whether the column is present (even if null).
    pub fn contains(&self, column: ProductColumn) -> bool {
        self.get(column).is_some()
    }

    /// Removes a column, returning its value.
    pub fn remove(&mut self, column: ProductColumn) -> Option<FieldValue> {
        let idx = self.entries.iter().position(|(c, _)| *c == column)?;
        Some(self.entries.remove(idx).1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(column, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (ProductColumn, &FieldValue)> {
        self.entries.iter().map(|(c, v)| (*c, v))
    }
}

// =============================================================================
// Product
// =============================================================================

/// A persisted product row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Identifier assigned by the store at creation.
    pub id: i64,

    /// Display name shown in the product list.
    pub name: String,

    /// Price in the smallest currency unit.
    pub price: i64,

    /// Units in stock.
    pub quantity: i64,

    pub supplier_name: String,

    /// Kept as text to preserve leading zeros, spaces and `+`.
    pub supplier_phone: String,
}

impl Product {
    /// Whether at least one unit can be sold.
    pub fn in_stock(&self) -> bool {
        self.quantity > 0
    }

    /// Returns the value of one column as a [`FieldValue`].
    pub fn value(&self, column: ProductColumn) -> FieldValue {
        match column {
            ProductColumn::Id => FieldValue::Integer(self.id),
            ProductColumn::Name => FieldValue::Text(self.name.clone()),
            ProductColumn::Price => FieldValue::Integer(self.price),
            ProductColumn::Quantity => FieldValue::Integer(self.quantity),
            ProductColumn::SupplierName => FieldValue::Text(self.supplier_name.clone()),
            ProductColumn::SupplierPhone => FieldValue::Text(self.supplier_phone.clone()),
        }
    }
}

// =============================================================================
// Validated write payloads
// =============================================================================

/// A fully validated product ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub price: i64,
    pub quantity: i64,
    pub supplier_name: String,
    pub supplier_phone: String,
}

impl NewProduct {
    /// Column assignments in schema order, with store-native value types.
    pub fn assignments(&self) -> Vec<(ProductColumn, FieldValue)> {
        vec![
            (ProductColumn::Name, FieldValue::Text(self.name.clone())),
            (ProductColumn::Price, FieldValue::Integer(self.price)),
            (ProductColumn::Quantity, FieldValue::Integer(self.quantity)),
            (
                ProductColumn::SupplierName,
                FieldValue::Text(self.supplier_name.clone()),
            ),
            (
                ProductColumn::SupplierPhone,
                FieldValue::Text(self.supplier_phone.clone()),
            ),
        ]
    }
}

/// A validated partial update. Absent fields stay untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub price: Option<i64>,
    pub quantity: Option<i64>,
    pub supplier_name: Option<String>,
    pub supplier_phone: Option<String>,
}

impl ProductChanges {
    /// Returns true if no field would be written.
    pub fn is_empty(&self) -> bool {
        self.assignments().is_empty()
    }

    /// Column assignments for the present fields, in schema order.
    pub fn assignments(&self) -> Vec<(ProductColumn, FieldValue)> {
        let mut out = Vec::new();
        if let Some(name) = &self.name {
            out.push((ProductColumn::Name, FieldValue::Text(name.clone())));
        }
        if let Some(price) = self.price {
            out.push((ProductColumn::Price, FieldValue::Integer(price)));
        }
        if let Some(quantity) = self.quantity {
            out.push((ProductColumn::Quantity, FieldValue::Integer(quantity)));
        }
        if let Some(supplier_name) = &self.supplier_name {
            out.push((
                ProductColumn::SupplierName,
                FieldValue::Text(supplier_name.clone()),
            ));
        }
        if let Some(supplier_phone) = &self.supplier_phone {
            out.push((
                ProductColumn::SupplierPhone,
                FieldValue::Text(supplier_phone.clone()),
            ));
        }
        out
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
