//! # Sale Commands
//!
//! Selling one unit of a product from the list.
//!
//! ## Sale Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  sell_one(gateway, 7)                                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  gateway.get_product(7) ──► None ──► NotFound                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  quantity == 0 ──► OutOfStock (no write)                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  gateway.update("/products", quantity - 1,                              │
//! │                 WHERE id = 7 AND quantity = <read quantity>)            │
//! │       │            (same field rules as any other edit)                 │
//! │       ▼                                                                 │
//! │  1 row  → Sold { remaining }                                            │
//! │  0 rows → re-read: quantity moved → retry, unchanged → Failed           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The write only lands if the quantity is still the one that was read, so
//! two sellers racing on the last unit get one `Sold` and one `OutOfStock`.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::ApiError;
use stockroom_core::{Filter, ProductColumn, ProductValues, ResourcePath};
use stockroom_db::Gateway;

/// Attempts before a sale that keeps losing races gives up.
const MAX_SALE_ATTEMPTS: usize = 5;

/// Result of selling one unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum SaleOutcome {
    /// One unit sold; `remaining` units left.
    Sold { remaining: i64 },
    /// Quantity is already zero.
    OutOfStock,
    /// No product with that id.
    NotFound,
    /// The store did not accept the write.
    Failed,
}

/// Sells one unit of a product.
pub async fn sell_one(gateway: &Gateway, id: i64) -> Result<SaleOutcome, ApiError> {
    let collection = ResourcePath::Products.to_string();

    for attempt in 1..=MAX_SALE_ATTEMPTS {
        let Some(product) = gateway.get_product(id).await? else {
            debug!(id, "sell_one: product not found");
            return Ok(SaleOutcome::NotFound);
        };

        if !product.in_stock() {
            debug!(id, quantity = product.quantity, "sell_one: out of stock");
            return Ok(SaleOutcome::OutOfStock);
        }

        let remaining = product.quantity - 1;
        let values = ProductValues::new().quantity(remaining);
        let expected = Filter::by_id(id).eq(ProductColumn::Quantity, product.quantity);

        if gateway.update(&collection, &values, Some(expected)).await? > 0 {
            info!(id, remaining, "Sold one unit");
            return Ok(SaleOutcome::Sold { remaining });
        }

        // Nothing matched: either another write moved the quantity or the
        // store rejected ours
        match gateway.get_product(id).await? {
            Some(current) if current.quantity != product.quantity => {
                debug!(id, attempt, "sell_one: quantity changed, retrying");
            }
            Some(_) => return Ok(SaleOutcome::Failed),
            None => return Ok(SaleOutcome::NotFound),
        }
    }

    warn!(id, attempts = MAX_SALE_ATTEMPTS, "sell_one: giving up after repeated conflicts");
    Ok(SaleOutcome::Failed)
}
