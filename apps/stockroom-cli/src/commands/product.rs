//! # Product Commands
//!
//! Listing, lookup and deletion of products.
//!
//! ## Catalog Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  stockroom list            ──► list_products()    ──► Vec<ProductDto>   │
//! │  stockroom show 7          ──► get_product(7)     ──► ProductDto        │
//! │  stockroom delete 7        ──► delete_product(7)  ──► bool              │
//! │  stockroom delete-all      ──► delete_all_products() ──► count          │
//! │                                                                         │
//! │  Every call goes through the Gateway; nothing here touches SQL.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ApiError;
use stockroom_core::{Product, ResourcePath};
use stockroom_db::Gateway;

/// Product DTO (Data Transfer Object) for output.
///
/// Serializes with camelCase keys for `--json` consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: i64,
    pub name: String,
    /// Price in the smallest currency unit
    pub price: i64,
    pub quantity: i64,
    pub supplier_name: String,
    pub supplier_phone: String,
    /// Whether at least one unit can be sold.
    pub in_stock: bool,
}

impl From<Product> for ProductDto {
    fn from(p: Product) -> Self {
        let in_stock = p.in_stock();
        ProductDto {
            id: p.id,
            name: p.name,
            price: p.price,
            quantity: p.quantity,
            supplier_name: p.supplier_name,
            supplier_phone: p.supplier_phone,
            in_stock,
        }
    }
}

/// Lists every product ordered by id.
pub async fn list_products(gateway: &Gateway) -> Result<Vec<ProductDto>, ApiError> {
    let products = gateway.list_products().await?;
    debug!(count = products.len(), "list_products command");
    Ok(products.into_iter().map(ProductDto::from).collect())
}

/// Gets a single product.
///
/// ## Returns
/// The product if found, or `ApiError` with `NOT_FOUND`
pub async fn get_product(gateway: &Gateway, id: i64) -> Result<ProductDto, ApiError> {
    debug!(id, "get_product command");
    let product = gateway
        .get_product(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Product", id))?;
    Ok(ProductDto::from(product))
}

/// Deletes one product.
///
/// ## Returns
/// `true` if a row was removed
pub async fn delete_product(gateway: &Gateway, id: i64) -> Result<bool, ApiError> {
    let path = ResourcePath::Product(id).to_string();
    let deleted = gateway.delete(&path, None).await? > 0;

    info!(id, deleted, "delete_product command");
    Ok(deleted)
}

/// Deletes every product, returning how many were removed.
pub async fn delete_all_products(gateway: &Gateway) -> Result<u64, ApiError> {
    let path = ResourcePath::Products.to_string();
    let deleted = gateway.delete(&path, None).await?;

    info!(deleted, "delete_all_products command");
    Ok(deleted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use stockroom_core::{ProductValues, Router};
    use stockroom_db::{Database, DbConfig};

    async fn gateway_with(names: &[&str]) -> Gateway {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let gateway = db.gateway(Router::standard());
        for (i, name) in names.iter().enumerate() {
            let values = ProductValues::new()
                .name(*name)
                .price(100)
                .quantity(i as i64)
                .supplier_name("Acme")
                .supplier_phone("0047 1234");
            gateway.insert("/products", &values).await.unwrap();
        }
        gateway
    }

    #[tokio::test]
    async fn test_list_products() {
        let gateway = gateway_with(&["Bolt", "Nut"]).await;
        let products = list_products(&gateway).await.unwrap();

        assert_eq!(products.len(), 2);
        assert_eq!(products[0].name, "Bolt");
        assert!(!products[0].in_stock);
        assert!(products[1].in_stock);
    }

    #[tokio::test]
    async fn test_get_missing_product() {
        let gateway = gateway_with(&[]).await;
        let err = get_product(&gateway, 3).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_delete_product() {
        let gateway = gateway_with(&["Bolt", "Nut"]).await;

        assert!(delete_product(&gateway, 1).await.unwrap());
        assert!(!delete_product(&gateway, 1).await.unwrap());
        assert_eq!(list_products(&gateway).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_all_products() {
        let gateway = gateway_with(&["Bolt", "Nut", "Washer"]).await;

        assert_eq!(delete_all_products(&gateway).await.unwrap(), 3);
        assert_eq!(delete_all_products(&gateway).await.unwrap(), 0);
    }

    #[test]
    fn test_dto_serializes_camel_case() {
        let dto = ProductDto {
            id: 1,
            name: "Bolt".to_string(),
            price: 35,
            quantity: 4,
            supplier_name: "Acme".to_string(),
            supplier_phone: "+44 20".to_string(),
            in_stock: true,
        };
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["supplierPhone"], "+44 20");
        assert_eq!(json["inStock"], true);
    }
}
