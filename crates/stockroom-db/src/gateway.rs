//! # Access Gateway
//!
//! The single entry point for product reads and writes.
//!
//! ## Write Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  gateway.update("/products/7", values, filter)                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  1. Route      Router::route(path) ──► UnknownResource on miss          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  2. Validate   validate_update(values) ──► ValidationError, no write    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  3. Scope      /products/7 → WHERE id = 7 (caller filter replaced)      │
//! │                /products   → caller filter (or every row)               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  4. Write      ProductRepository::update_rows ──► Err → warn!, 0 rows   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  5. Notify     rows > 0 → ChangeNotifier::publish(path, Update)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Failure Reporting
//! Reads propagate storage failures as [`GatewayError::Storage`]. Writes
//! report them as sentinels instead: `None` from an insert, `0` rows from an
//! update or delete. Validation and routing failures always propagate.

use std::sync::Arc;

use tracing::{debug, warn};

use stockroom_core::validation::{validate_insert, validate_update};
use stockroom_core::{
    Filter, Product, ProductColumn, ProductValues, ResourcePath, Router, RowSet, SortOrder,
};

use crate::error::{GatewayError, GatewayResult};
use crate::notify::{ChangeNotifier, ChangeOperation, ResourceChange, ResourceChangeStream};
use crate::repository::product::ProductRepository;

/// Validating access layer over the product record store.
#[derive(Debug, Clone)]
pub struct Gateway {
    products: ProductRepository,
    router: Router,
    notifier: Arc<ChangeNotifier>,
}

impl Gateway {
    /// Creates a gateway with its own notifier.
    pub fn new(products: ProductRepository, router: Router) -> Self {
        Gateway::with_notifier(products, router, Arc::new(ChangeNotifier::default()))
    }

    /// Creates a gateway that publishes through an existing notifier.
    pub fn with_notifier(
        products: ProductRepository,
        router: Router,
        notifier: Arc<ChangeNotifier>,
    ) -> Self {
        Gateway {
            products,
            router,
            notifier,
        }
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn notifier(&self) -> &Arc<ChangeNotifier> {
        &self.notifier
    }

    /// Receives every change published by this gateway from now on.
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<ResourceChange> {
        self.notifier.subscribe()
    }

    /// Streams changes that affect `path`.
    pub fn watch(&self, path: &str) -> GatewayResult<ResourceChangeStream> {
        Ok(self.notifier.watch(self.resolve(path)?))
    }

    /// Resolves a path through the routing table.
    pub fn resolve(&self, path: &str) -> GatewayResult<ResourcePath> {
        self.router
            .route(path)
            .ok_or_else(|| GatewayError::UnknownResource(path.to_string()))
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Reads rows from a resource.
    ///
    /// ## Arguments
    /// * `resource` - `/products` or `/products/{id}`
    /// * `projection` - Columns to return; `None` returns every column
    /// * `filter` - Row conditions; ignored for item paths
    /// * `sort` - Sort keys; `None` leaves the order unspecified
    pub async fn query(
        &self,
        resource: &str,
        projection: Option<&[ProductColumn]>,
        filter: Option<Filter>,
        sort: Option<SortOrder>,
    ) -> GatewayResult<RowSet> {
        let path = self.resolve(resource)?;
        self.select_at(path, projection, filter, sort).await
    }

    /// Returns the content type a resource yields.
    pub fn content_type(&self, resource: &str) -> GatewayResult<&'static str> {
        Ok(self.resolve(resource)?.content_type())
    }

    /// Lists every product ordered by id.
    pub async fn list_products(&self) -> GatewayResult<Vec<Product>> {
        Ok(self.products.list_all().await?)
    }

    /// Gets one product, `None` if it does not exist.
    pub async fn get_product(&self, id: i64) -> GatewayResult<Option<Product>> {
        Ok(self.products.get_by_id(id).await?)
    }

    /// Counts stored products.
    pub async fn count(&self) -> GatewayResult<i64> {
        Ok(self.products.count().await?)
    }

    async fn select_at(
        &self,
        path: ResourcePath,
        projection: Option<&[ProductColumn]>,
        filter: Option<Filter>,
        sort: Option<SortOrder>,
    ) -> GatewayResult<RowSet> {
        let filter = scoped_filter(path, filter);
        let sort = sort.unwrap_or_default();

        debug!(path = %path, conditions = filter.conditions().len(), "Querying products");
        let rows = self
            .products
            .select(projection.unwrap_or(&[]), &filter, &sort)
            .await?;
        Ok(rows)
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Inserts a new product.
    ///
    /// ## Returns
    /// * `Ok(Some(path))` - Stored; `path` addresses the new product
    /// * `Ok(None)` - The store rejected the write
    /// * `Err(_)` - Unknown path, item path, or a field failed validation
    pub async fn insert(
        &self,
        resource: &str,
        values: &ProductValues,
    ) -> GatewayResult<Option<ResourcePath>> {
        let path = self.resolve(resource)?;
        if !path.is_collection() {
            return Err(GatewayError::InsertNotSupported(resource.to_string()));
        }

        let product = validate_insert(values)?;

        match self.products.insert_row(&product.assignments()).await {
            Ok(id) => {
                debug!(id, name = %product.name, "Product inserted");
                self.notifier
                    .publish(ResourceChange::new(path, ChangeOperation::Insert));
                Ok(Some(ResourcePath::Product(id)))
            }
            Err(e) => {
                warn!(path = %path, error = %e, "Failed to insert product");
                Ok(None)
            }
        }
    }

    /// Updates the present fields on every matching product.
    ///
    /// Returns the number of rows changed. No fields means nothing to write
    /// and returns `0` without touching the store.
    pub async fn update(
        &self,
        resource: &str,
        values: &ProductValues,
        filter: Option<Filter>,
    ) -> GatewayResult<u64> {
        let path = self.resolve(resource)?;
        if values.is_empty() {
            return Ok(0);
        }

        let changes = validate_update(values)?;
        let filter = scoped_filter(path, filter);

        let affected = match self
            .products
            .update_rows(&changes.assignments(), &filter)
            .await
        {
            Ok(affected) => affected,
            Err(e) => {
                warn!(path = %path, error = %e, "Failed to update products");
                0
            }
        };

        if affected > 0 {
            self.notifier
                .publish(ResourceChange::new(path, ChangeOperation::Update));
        }
        debug!(path = %path, affected, "Products updated");
        Ok(affected)
    }

    /// Deletes every matching product, returning the number removed.
    pub async fn delete(&self, resource: &str, filter: Option<Filter>) -> GatewayResult<u64> {
        let path = self.resolve(resource)?;
        let filter = scoped_filter(path, filter);

        let affected = match self.products.delete_rows(&filter).await {
            Ok(affected) => affected,
            Err(e) => {
                warn!(path = %path, error = %e, "Failed to delete products");
                0
            }
        };

        if affected > 0 {
            self.notifier
                .publish(ResourceChange::new(path, ChangeOperation::Delete));
        }
        debug!(path = %path, affected, "Products deleted");
        Ok(affected)
    }
}

/// The filter a path actually applies: an item path always means its id.
fn scoped_filter(path: ResourcePath, filter: Option<Filter>) -> Filter {
    match path {
        ResourcePath::Product(id) => Filter::by_id(id),
        ResourcePath::Products => filter.unwrap_or_default(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use stockroom_core::{FieldValue, ValidationError};
    use tokio::sync::broadcast::error::TryRecvError;

    async fn setup() -> (Database, Gateway) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let gateway = db.gateway(Router::standard());
        (db, gateway)
    }

    fn widget() -> ProductValues {
        ProductValues::new()
            .name("Widget")
            .price(500)
            .quantity(10)
            .supplier_name("Acme")
            .supplier_phone("555-0100")
    }

    #[tokio::test]
    async fn test_insert_assigns_id_and_notifies() {
        let (_db, gateway) = setup().await;
        let mut rx = gateway.subscribe();

        let path = gateway.insert("/products", &widget()).await.unwrap();
        assert_eq!(path, Some(ResourcePath::Product(1)));

        let change = rx.try_recv().unwrap();
        assert_eq!(change.path, ResourcePath::Products);
        assert_eq!(change.operation, ChangeOperation::Insert);

        let product = gateway.get_product(1).await.unwrap().unwrap();
        assert_eq!(product.name, "Widget");
        assert_eq!(product.price, 500);
        assert_eq!(product.quantity, 10);
        assert_eq!(product.supplier_name, "Acme");
        assert_eq!(product.supplier_phone, "555-0100");
    }

    #[tokio::test]
    async fn test_partial_update_keeps_other_fields() {
        let (_db, gateway) = setup().await;
        gateway.insert("/products", &widget()).await.unwrap();

        let affected = gateway
            .update("/products/1", &ProductValues::new().quantity(9), None)
            .await
            .unwrap();
        assert_eq!(affected, 1);

        let product = gateway.get_product(1).await.unwrap().unwrap();
        assert_eq!(
            product,
            Product {
                id: 1,
                name: "Widget".to_string(),
                price: 500,
                quantity: 9,
                supplier_name: "Acme".to_string(),
                supplier_phone: "555-0100".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_list_products_is_ordered_by_id() {
        let (_db, gateway) = setup().await;
        gateway.insert("/products", &widget().name("Bolt")).await.unwrap();
        gateway.insert("/products", &widget().name("Anchor")).await.unwrap();

        let names: Vec<String> = gateway
            .list_products()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, ["Bolt", "Anchor"]);
        assert!(gateway.get_product(3).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_insert_accepts_numeric_text() {
        let (_db, gateway) = setup().await;
        let values = widget().price(" 250 ").quantity("0");

        gateway.insert("/products", &values).await.unwrap().unwrap();
        let product = gateway.get_product(1).await.unwrap().unwrap();
        assert_eq!(product.price, 250);
        assert_eq!(product.quantity, 0);
    }

    #[tokio::test]
    async fn test_insert_validation_is_ordered_and_writes_nothing() {
        let (_db, gateway) = setup().await;
        let mut rx = gateway.subscribe();

        // Blank name and negative price: name is checked first
        let values = widget().name("  ").price(-1);
        let err = gateway.insert("/products", &values).await.unwrap_err();
        assert!(matches!(
            err,
            GatewayError::Validation(ValidationError::Required {
                field: ProductColumn::Name
            })
        ));

        let err = gateway
            .insert("/products", &widget().quantity("lots"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            GatewayError::Validation(ValidationError::NotANumber {
                field: ProductColumn::Quantity,
                ..
            })
        ));

        let mut missing_phone = widget();
        missing_phone.remove(ProductColumn::SupplierPhone);
        let err = gateway.insert("/products", &missing_phone).await.unwrap_err();
        assert!(matches!(
            err,
            GatewayError::Validation(ValidationError::Required {
                field: ProductColumn::SupplierPhone
            })
        ));

        assert_eq!(gateway.count().await.unwrap(), 0);
        assert_eq!(rx.try_recv().unwrap_err(), TryRecvError::Empty);
    }

    #[tokio::test]
    async fn test_insert_on_item_path_is_rejected() {
        let (_db, gateway) = setup().await;
        let err = gateway.insert("/products/4", &widget()).await.unwrap_err();
        assert!(matches!(err, GatewayError::InsertNotSupported(p) if p == "/products/4"));
    }

    #[tokio::test]
    async fn test_unknown_resource() {
        let (_db, gateway) = setup().await;

        let err = gateway.query("/suppliers", None, None, None).await.unwrap_err();
        assert!(matches!(err, GatewayError::UnknownResource(p) if p == "/suppliers"));

        assert!(gateway.delete("/products/abc", None).await.is_err());
        assert!(gateway.content_type("/").is_err());
    }

    #[tokio::test]
    async fn test_negative_price_update_is_rejected() {
        let (_db, gateway) = setup().await;
        gateway.insert("/products", &widget()).await.unwrap();
        let mut rx = gateway.subscribe();

        let err = gateway
            .update("/products/1", &ProductValues::new().price(-5), None)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            GatewayError::Validation(ValidationError::Negative {
                field: ProductColumn::Price
            })
        ));

        assert_eq!(gateway.get_product(1).await.unwrap().unwrap().price, 500);
        assert_eq!(rx.try_recv().unwrap_err(), TryRecvError::Empty);
    }

    #[tokio::test]
    async fn test_update_item_path_changes_only_that_row() {
        let (_db, gateway) = setup().await;
        gateway.insert("/products", &widget()).await.unwrap();
        gateway
            .insert("/products", &widget().name("Gadget"))
            .await
            .unwrap();
        let mut rx = gateway.subscribe();

        // Caller filter would match both rows; the item path wins
        let affected = gateway
            .update(
                "/products/1",
                &ProductValues::new().quantity(9),
                Some(Filter::new()),
            )
            .await
            .unwrap();
        assert_eq!(affected, 1);

        assert_eq!(gateway.get_product(1).await.unwrap().unwrap().quantity, 9);
        assert_eq!(gateway.get_product(2).await.unwrap().unwrap().quantity, 10);

        let change = rx.try_recv().unwrap();
        assert_eq!(change.path, ResourcePath::Product(1));
        assert_eq!(change.operation, ChangeOperation::Update);
    }

    #[tokio::test]
    async fn test_update_collection_with_filter() {
        let (_db, gateway) = setup().await;
        gateway.insert("/products", &widget()).await.unwrap();
        gateway
            .insert("/products", &widget().supplier_name("Other").quantity(1))
            .await
            .unwrap();

        let affected = gateway
            .update(
                "/products",
                &ProductValues::new().price(1),
                Some(Filter::new().eq(ProductColumn::SupplierName, "Acme")),
            )
            .await
            .unwrap();
        assert_eq!(affected, 1);
        assert_eq!(gateway.get_product(2).await.unwrap().unwrap().price, 500);
    }

    #[tokio::test]
    async fn test_empty_update_writes_nothing() {
        let (_db, gateway) = setup().await;
        gateway.insert("/products", &widget()).await.unwrap();
        let mut rx = gateway.subscribe();

        let affected = gateway
            .update("/products/1", &ProductValues::new(), None)
            .await
            .unwrap();
        assert_eq!(affected, 0);
        assert_eq!(rx.try_recv().unwrap_err(), TryRecvError::Empty);
    }

    #[tokio::test]
    async fn test_update_rejects_id() {
        let (_db, gateway) = setup().await;
        gateway.insert("/products", &widget()).await.unwrap();

        let values = ProductValues::new().with(ProductColumn::Id, 42).quantity(1);
        let err = gateway.update("/products/1", &values, None).await.unwrap_err();
        assert!(matches!(
            err,
            GatewayError::Validation(ValidationError::ReadOnly {
                field: ProductColumn::Id
            })
        ));
    }

    #[tokio::test]
    async fn test_update_missing_row_does_not_notify() {
        let (_db, gateway) = setup().await;
        let mut rx = gateway.subscribe();

        let affected = gateway
            .update("/products/999", &ProductValues::new().quantity(1), None)
            .await
            .unwrap();
        assert_eq!(affected, 0);
        assert_eq!(rx.try_recv().unwrap_err(), TryRecvError::Empty);
    }

    #[tokio::test]
    async fn test_delete_all_then_nothing_left() {
        let (_db, gateway) = setup().await;
        for _ in 0..3 {
            gateway.insert("/products", &widget()).await.unwrap();
        }
        let mut rx = gateway.subscribe();

        assert_eq!(gateway.delete("/products", None).await.unwrap(), 3);
        let change = rx.try_recv().unwrap();
        assert_eq!(change.path, ResourcePath::Products);
        assert_eq!(change.operation, ChangeOperation::Delete);

        assert_eq!(gateway.delete("/products", None).await.unwrap(), 0);
        assert_eq!(rx.try_recv().unwrap_err(), TryRecvError::Empty);
    }

    #[tokio::test]
    async fn test_delete_missing_item() {
        let (_db, gateway) = setup().await;
        gateway.insert("/products", &widget()).await.unwrap();
        let mut rx = gateway.subscribe();

        assert_eq!(gateway.delete("/products/999", None).await.unwrap(), 0);
        assert_eq!(rx.try_recv().unwrap_err(), TryRecvError::Empty);
        assert_eq!(gateway.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_query_projection_and_item_scope() {
        let (_db, gateway) = setup().await;
        gateway.insert("/products", &widget()).await.unwrap();
        gateway
            .insert("/products", &widget().name("Gadget"))
            .await
            .unwrap();

        let rows = gateway
            .query(
                "/products/2",
                Some(&[ProductColumn::Name]),
                Some(Filter::by_id(1)),
                None,
            )
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows.columns(), &[ProductColumn::Name]);
        assert_eq!(
            rows.get(0, ProductColumn::Name),
            Some(&FieldValue::Text("Gadget".into()))
        );

        let all = gateway
            .query(
                "/products",
                None,
                None,
                Some(SortOrder::new().desc(ProductColumn::Id)),
            )
            .await
            .unwrap();
        assert_eq!(all.columns(), &ProductColumn::ALL);
        assert_eq!(all.get(0, ProductColumn::Id), Some(&FieldValue::Integer(2)));
    }

    #[tokio::test]
    async fn test_content_types() {
        let (_db, gateway) = setup().await;
        assert_eq!(
            gateway.content_type("/products").unwrap(),
            "vnd.stockroom.dir/products"
        );
        assert_eq!(
            gateway.content_type("/products/3").unwrap(),
            "vnd.stockroom.item/products"
        );
    }

    #[tokio::test]
    async fn test_storage_failure_on_writes_is_a_sentinel() {
        let (db, gateway) = setup().await;
        gateway.insert("/products", &widget()).await.unwrap();
        db.close().await;

        assert_eq!(gateway.insert("/products", &widget()).await.unwrap(), None);
        assert_eq!(
            gateway
                .update("/products/1", &ProductValues::new().quantity(1), None)
                .await
                .unwrap(),
            0
        );
        assert_eq!(gateway.delete("/products", None).await.unwrap(), 0);

        // Reads propagate the failure
        let err = gateway.list_products().await.unwrap_err();
        assert!(matches!(err, GatewayError::Storage(_)));
    }

    #[tokio::test]
    async fn test_watch_item_path() {
        use tokio_stream::StreamExt;

        let (_db, gateway) = setup().await;
        gateway.insert("/products", &widget()).await.unwrap();
        gateway.insert("/products", &widget()).await.unwrap();
        let mut stream = gateway.watch("/products/2").unwrap();

        gateway
            .update("/products/1", &ProductValues::new().quantity(1), None)
            .await
            .unwrap();
        gateway
            .update("/products/2", &ProductValues::new().quantity(2), None)
            .await
            .unwrap();

        let change = stream.next().await.unwrap();
        assert_eq!(change.path, ResourcePath::Product(2));
    }
}
