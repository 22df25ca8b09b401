//! # Product Repository
//!
//! Generic relational primitives over the `products` table.
//!
//! ## Query Building
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Filter::new().lt(Quantity, 5).eq(SupplierName, "Acme")                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SELECT id, name FROM products                                          │
//! │   WHERE quantity < ? AND supplier_name = ?     ← values bound, never    │
//! │   ORDER BY name ASC                               spliced into SQL      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Column names come from [`ProductColumn`], so only known identifiers ever
//! reach the SQL text.

use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use stockroom_core::{
    FieldValue, Filter, Product, ProductColumn, RowSet, SortOrder, PRODUCTS_TABLE,
};

/// Repository for product database operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Selects rows.
    ///
    /// ## Arguments
    /// * `projection` - Columns to return; empty means every column in schema order
    /// * `filter` - Conditions joined with AND; empty matches every row
    /// * `sort` - Sort keys; empty leaves the order to SQLite
    pub async fn select(
        &self,
        projection: &[ProductColumn],
        filter: &Filter,
        sort: &SortOrder,
    ) -> DbResult<RowSet> {
        let columns: Vec<ProductColumn> = if projection.is_empty() {
            ProductColumn::ALL.to_vec()
        } else {
            projection.to_vec()
        };

        let mut qb: QueryBuilder<'_, Sqlite> = QueryBuilder::new("SELECT ");
        for (i, column) in columns.iter().enumerate() {
            if i > 0 {
                qb.push(", ");
            }
            qb.push(column.as_str());
        }
        qb.push(" FROM ").push(PRODUCTS_TABLE);
        push_filter(&mut qb, filter);
        push_sort(&mut qb, sort);

        let rows = qb.build().fetch_all(&self.pool).await?;

        let mut set = RowSet::new(columns);
        for row in &rows {
            let decoded = decode_row(row, set.columns())?;
            set.push_row(decoded);
        }

        debug!(count = set.len(), "Selected product rows");
        Ok(set)
    }

    /// Inserts one row and returns the id assigned by SQLite.
    pub async fn insert_row(&self, assignments: &[(ProductColumn, FieldValue)]) -> DbResult<i64> {
        let mut qb: QueryBuilder<'_, Sqlite> = QueryBuilder::new("INSERT INTO ");
        qb.push(PRODUCTS_TABLE);

        if assignments.is_empty() {
            qb.push(" DEFAULT VALUES");
        } else {
            qb.push(" (");
            for (i, (column, _)) in assignments.iter().enumerate() {
                if i > 0 {
                    qb.push(", ");
                }
                qb.push(column.as_str());
            }
            qb.push(") VALUES (");
            for (i, (_, value)) in assignments.iter().enumerate() {
                if i > 0 {
                    qb.push(", ");
                }
                push_value(&mut qb, value);
            }
            qb.push(")");
        }

        let result = qb.build().execute(&self.pool).await?;
        let id = result.last_insert_rowid();

        debug!(id, "Inserted product row");
        Ok(id)
    }

    /// Updates every row matching `filter`, returning the affected count.
    ///
    /// An empty assignment list issues no SQL and affects nothing.
    pub async fn update_rows(
        &self,
        assignments: &[(ProductColumn, FieldValue)],
        filter: &Filter,
    ) -> DbResult<u64> {
        if assignments.is_empty() {
            return Ok(0);
        }

        let mut qb: QueryBuilder<'_, Sqlite> = QueryBuilder::new("UPDATE ");
        qb.push(PRODUCTS_TABLE).push(" SET ");
        for (i, (column, value)) in assignments.iter().enumerate() {
            if i > 0 {
                qb.push(", ");
            }
            qb.push(column.as_str()).push(" = ");
            push_value(&mut qb, value);
        }
        push_filter(&mut qb, filter);

        let affected = qb.build().execute(&self.pool).await?.rows_affected();

        debug!(affected, "Updated product rows");
        Ok(affected)
    }

    /// Deletes every row matching `filter`, returning the affected count.
    pub async fn delete_rows(&self, filter: &Filter) -> DbResult<u64> {
        let mut qb: QueryBuilder<'_, Sqlite> = QueryBuilder::new("DELETE FROM ");
        qb.push(PRODUCTS_TABLE);
        push_filter(&mut qb, filter);

        let affected = qb.build().execute(&self.pool).await?.rows_affected();

        debug!(affected, "Deleted product rows");
        Ok(affected)
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, price, quantity, supplier_name, supplier_phone
            FROM products
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Lists every product ordered by id.
    pub async fn list_all(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, price, quantity, supplier_name, supplier_phone
            FROM products
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Counts total products.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// SQL helpers
// =============================================================================

fn push_value(qb: &mut QueryBuilder<'_, Sqlite>, value: &FieldValue) {
    match value {
        FieldValue::Null => {
            qb.push_bind(Option::<i64>::None);
        }
        FieldValue::Integer(i) => {
            qb.push_bind(*i);
        }
        FieldValue::Text(s) => {
            qb.push_bind(s.clone());
        }
    }
}

fn push_filter(qb: &mut QueryBuilder<'_, Sqlite>, filter: &Filter) {
    for (i, condition) in filter.conditions().iter().enumerate() {
        qb.push(if i == 0 { " WHERE " } else { " AND " });
        qb.push(condition.column.as_str())
            .push(" ")
            .push(condition.comparison.as_sql())
            .push(" ");
        push_value(qb, &condition.value);
    }
}

fn push_sort(qb: &mut QueryBuilder<'_, Sqlite>, sort: &SortOrder) {
    for (i, (column, direction)) in sort.keys().iter().enumerate() {
        qb.push(if i == 0 { " ORDER BY " } else { ", " });
        qb.push(column.as_str()).push(" ").push(direction.as_sql());
    }
}

fn decode_row(row: &SqliteRow, columns: &[ProductColumn]) -> DbResult<Vec<FieldValue>> {
    let mut values = Vec::with_capacity(columns.len());
    for (idx, column) in columns.iter().enumerate() {
        let value = if column.is_integer() {
            row.try_get::<Option<i64>, _>(idx)?.map(FieldValue::Integer)
        } else {
            row.try_get::<Option<String>, _>(idx)?.map(FieldValue::Text)
        };
        values.push(value.unwrap_or(FieldValue::Null));
    }
    Ok(values)
}

// =============================================================================
// Unit Tests
// =============================================================================
