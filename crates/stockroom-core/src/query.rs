//! # Query Descriptions
//!
//! Filters, sort orders and row sets, described as plain data. The record
//! store turns them into SQL with every value bound as a parameter.

use serde::{Deserialize, Serialize};

use crate::types::{FieldValue, ProductColumn};

// =============================================================================
// Filter
// =============================================================================

/// Comparison operator of a filter condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Comparison {
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Like,
}

impl Comparison {
    /// SQL operator text.
    pub const fn as_sql(&self) -> &'static str {
        match self {
            Comparison::Eq => "=",
            Comparison::NotEq => "!=",
            Comparison::Lt => "<",
            Comparison::LtEq => "<=",
            Comparison::Gt => ">",
            Comparison::GtEq => ">=",
            Comparison::Like => "LIKE",
        }
    }
}

/// One `column <op> value` condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub column: ProductColumn,
    pub comparison: Comparison,
    pub value: FieldValue,
}

/// A conjunction of conditions. An empty filter matches every row.
///
/// ## Example
/// ```rust
/// use stockroom_core::query::Filter;
/// use stockroom_core::types::ProductColumn;
///
/// let low_stock = Filter::new()
///     .lt(ProductColumn::Quantity, 5)
///     .eq(ProductColumn::SupplierName, "Acme");
/// assert_eq!(low_stock.conditions().len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    conditions: Vec<Condition>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter matching a single product id.
    pub fn by_id(id: i64) -> Self {
        Filter::new().eq(ProductColumn::Id, id)
    }

    /// Adds a condition.
    pub fn and(
        mut self,
        column: ProductColumn,
        comparison: Comparison,
        value: impl Into<FieldValue>,
    ) -> Self {
        self.conditions.push(Condition {
            column,
            comparison,
            value: value.into(),
        });
        self
    }

    pub fn eq(self, column: ProductColumn, value: impl Into<FieldValue>) -> Self {
        self.and(column, Comparison::Eq, value)
    }

    pub fn not_eq(self, column: ProductColumn, value: impl Into<FieldValue>) -> Self {
        self.and(column, Comparison::NotEq, value)
    }

    pub fn lt(self, column: ProductColumn, value: impl Into<FieldValue>) -> Self {
        self.and(column, Comparison::Lt, value)
    }

    pub fn gt(self, column: ProductColumn, value: impl Into<FieldValue>) -> Self {
        self.and(column, Comparison::Gt, value)
    }

    pub fn like(self, column: ProductColumn, pattern: impl Into<String>) -> Self {
        self.and(column, Comparison::Like, FieldValue::Text(pattern.into()))
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

// =============================================================================
// Sort Order
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub const fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Ordered list of sort keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOrder {
    keys: Vec<(ProductColumn, SortDirection)>,
}

impl SortOrder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn asc(mut self, column: ProductColumn) -> Self {
        self.keys.push((column, SortDirection::Asc));
        self
    }

    pub fn desc(mut self, column: ProductColumn) -> Self {
        self.keys.push((column, SortDirection::Desc));
        self
    }

    pub fn keys(&self) -> &[(ProductColumn, SortDirection)] {
        &self.keys
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

// =============================================================================
// Row Set
// =============================================================================

/// Result of a read: the projected columns and one value per column per row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowSet {
    columns: Vec<ProductColumn>,
    rows: Vec<Vec<FieldValue>>,
}

impl RowSet {
    /// Creates an empty row set with the given projection.
    pub fn new(columns: Vec<ProductColumn>) -> Self {
        RowSet {
            columns,
            rows: Vec::new(),
        }
    }

    /// Appends a row. The row must have one value per projected column.
    pub fn push_row(&mut self, row: Vec<FieldValue>) {
        debug_assert_eq!(row.len(), self.columns.len());
        self.rows.push(row);
    }

    pub fn columns(&self) -> &[ProductColumn] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<FieldValue>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns one cell, or `None` if the row or column is not in the set.
    pub fn get(&self, row: usize, column: ProductColumn) -> Option<&FieldValue> {
        let idx = self.columns.iter().position(|c| *c == column)?;
        self.rows.get(row)?.get(idx)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn full_row(id: i64, quantity: i64) -> Vec<FieldValue> {
        vec![
            FieldValue::Integer(id),
            FieldValue::Text("Widget".into()),
            FieldValue::Integer(500),
            FieldValue::Integer(quantity),
            FieldValue::Text("Acme".into()),
            FieldValue::Text("12345678".into()),
        ]
    }

    #[test]
    fn test_row_set_cells() {
        let mut rows = RowSet::new(ProductColumn::ALL.to_vec());
        rows.push_row(full_row(1, 10));
        rows.push_row(full_row(2, 0));

        assert_eq!(rows.len(), 2);
        assert_eq!(rows.get(0, ProductColumn::Quantity), Some(&FieldValue::Integer(10)));
        assert_eq!(rows.get(1, ProductColumn::Id), Some(&FieldValue::Integer(2)));
        assert_eq!(rows.get(2, ProductColumn::Id), None);
    }

    #[test]
    fn test_partial_projection() {
        let mut rows = RowSet::new(vec![ProductColumn::Name, ProductColumn::Quantity]);
        rows.push_row(vec![FieldValue::Text("Widget".into()), FieldValue::Integer(3)]);

        assert_eq!(rows.get(0, ProductColumn::Quantity), Some(&FieldValue::Integer(3)));
        assert_eq!(rows.get(0, ProductColumn::Price), None);
    }

    #[test]
    fn test_filter_builder() {
        let filter = Filter::by_id(3).like(ProductColumn::Name, "Wid%");
        assert_eq!(filter.conditions()[0].comparison, Comparison::Eq);
        assert_eq!(filter.conditions()[1].comparison.as_sql(), "LIKE");
        assert!(Filter::new().is_empty());
    }

    #[test]
    fn test_sort_order() {
        let sort = SortOrder::new().desc(ProductColumn::Price).asc(ProductColumn::Name);
        assert_eq!(
            sort.keys(),
            &[
                (ProductColumn::Price, SortDirection::Desc),
                (ProductColumn::Name, SortDirection::Asc)
            ]
        );
    }
}
