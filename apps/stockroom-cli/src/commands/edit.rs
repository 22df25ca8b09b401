//! # Edit Commands
//!
//! Create-or-update of a product from raw form text.
//!
//! ## Save Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ProductForm (five text fields, as typed)                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  EditMode::Create and every field blank? ──► SaveOutcome::Skipped       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  trim fields ──► ProductValues                                          │
//! │       │                                                                 │
//! │       ├── Create          ──► gateway.insert("/products")               │
//! │       │                        Some(path) → Created(id), None → Failed  │
//! │       │                                                                 │
//! │       └── EditExisting(id) ──► gateway.update("/products/{id}")         │
//! │                                1 row → Updated, 0 rows → Failed         │
//! │                                                                         │
//! │  Field rules live in the gateway: a bad field is an ApiError here.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::ApiError;
use stockroom_core::{Product, ProductValues, ResourcePath};
use stockroom_db::Gateway;

/// What the form is editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    /// Adding a new product.
    Create,
    /// Changing the product with this id.
    EditExisting(i64),
}

impl EditMode {
    /// Screen title for the mode.
    pub fn title(&self) -> &'static str {
        match self {
            EditMode::Create => "Add a Product",
            EditMode::EditExisting(_) => "Edit Product",
        }
    }

    /// Only an existing product can be deleted from the form.
    pub fn allows_delete(&self) -> bool {
        matches!(self, EditMode::EditExisting(_))
    }

    pub fn path(&self) -> ResourcePath {
        match self {
            EditMode::Create => ResourcePath::Products,
            EditMode::EditExisting(id) => ResourcePath::Product(*id),
        }
    }
}

/// Raw text of the five product input fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductForm {
    pub name: String,
    pub price: String,
    pub quantity: String,
    pub supplier_name: String,
    pub supplier_phone: String,
}

impl ProductForm {
    /// Prefills the form from a stored product.
    pub fn from_product(product: &Product) -> Self {
        ProductForm {
            name: product.name.clone(),
            price: product.price.to_string(),
            quantity: product.quantity.to_string(),
            supplier_name: product.supplier_name.clone(),
            supplier_phone: product.supplier_phone.clone(),
        }
    }

    /// Returns true if every field is empty after trimming.
    pub fn is_blank(&self) -> bool {
        [
            &self.name,
            &self.price,
            &self.quantity,
            &self.supplier_name,
            &self.supplier_phone,
        ]
        .iter()
        .all(|field| field.trim().is_empty())
    }

    /// Adds one to the quantity field.
    pub fn increment_quantity(&mut self) {
        let quantity = self.current_quantity().saturating_add(1);
        self.quantity = quantity.to_string();
    }

    /// Removes one from the quantity field, stopping at zero.
    pub fn decrement_quantity(&mut self) {
        let quantity = self.current_quantity().saturating_sub(1).max(0);
        self.quantity = quantity.to_string();
    }

    // Unparseable text counts as zero
    fn current_quantity(&self) -> i64 {
        self.quantity.trim().parse::<i64>().unwrap_or(0)
    }

    /// Trimmed field values, all five present.
    pub fn to_values(&self) -> ProductValues {
        ProductValues::new()
            .name(self.name.trim())
            .price(self.price.trim())
            .quantity(self.quantity.trim())
            .supplier_name(self.supplier_name.trim())
            .supplier_phone(self.supplier_phone.trim())
    }
}

/// Result of a save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum SaveOutcome {
    /// New form left blank, nothing written.
    Skipped,
    /// Product inserted with this id.
    Created { id: i64 },
    /// Existing product changed.
    Updated,
    /// The store did not accept the write.
    Failed,
}

/// Saves the form in the given mode.
///
/// ## Errors
/// A field that breaks a rule returns `VALIDATION_ERROR` and writes nothing.
pub async fn save_product(
    gateway: &Gateway,
    mode: EditMode,
    form: &ProductForm,
) -> Result<SaveOutcome, ApiError> {
    if mode == EditMode::Create && form.is_blank() {
        debug!("Blank new product, nothing to save");
        return Ok(SaveOutcome::Skipped);
    }

    let values = form.to_values();
    let path = mode.path().to_string();

    let outcome = match mode {
        EditMode::Create => match gateway.insert(&path, &values).await? {
            Some(created) => SaveOutcome::Created {
                id: created.id().unwrap_or_default(),
            },
            None => SaveOutcome::Failed,
        },
        EditMode::EditExisting(_) => {
            if gateway.update(&path, &values, None).await? > 0 {
                SaveOutcome::Updated
            } else {
                SaveOutcome::Failed
            }
        }
    };

    match outcome {
        SaveOutcome::Failed => warn!(path = %path, "Product save failed"),
        _ => info!(path = %path, ?outcome, "Product saved"),
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use stockroom_core::Router;
    use stockroom_db::{Database, DbConfig};

    async fn gateway() -> Gateway {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.gateway(Router::standard())
    }

    fn form() -> ProductForm {
        ProductForm {
            name: "  Widget ".to_string(),
            price: "500".to_string(),
            quantity: " 10".to_string(),
            supplier_name: "Acme".to_string(),
            supplier_phone: "0047 1234".to_string(),
        }
    }

    #[test]
    fn test_decrement_never_below_zero() {
        let mut form = ProductForm {
            quantity: "1".to_string(),
            ..ProductForm::default()
        };
        form.decrement_quantity();
        assert_eq!(form.quantity, "0");
        form.decrement_quantity();
        assert_eq!(form.quantity, "0");
    }

    #[test]
    fn test_step_from_non_numeric_quantity() {
        let mut form = ProductForm {
            quantity: "abc".to_string(),
            ..ProductForm::default()
        };
        form.increment_quantity();
        assert_eq!(form.quantity, "1");

        form.quantity = " 41 ".to_string();
        form.increment_quantity();
        assert_eq!(form.quantity, "42");
    }

    #[test]
    fn test_is_blank() {
        assert!(ProductForm::default().is_blank());
        let whitespace = ProductForm {
            name: "   ".to_string(),
            ..ProductForm::default()
        };
        assert!(whitespace.is_blank());
        assert!(!form().is_blank());
    }

    #[test]
    fn test_mode_title_and_delete() {
        assert_eq!(EditMode::Create.title(), "Add a Product");
        assert!(!EditMode::Create.allows_delete());
        assert!(EditMode::EditExisting(3).allows_delete());
        assert_eq!(EditMode::EditExisting(3).path(), ResourcePath::Product(3));
    }

    #[tokio::test]
    async fn test_blank_create_is_skipped() {
        let gateway = gateway().await;
        let outcome = save_product(&gateway, EditMode::Create, &ProductForm::default())
            .await
            .unwrap();
        assert_eq!(outcome, SaveOutcome::Skipped);
        assert_eq!(gateway.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_create_trims_fields() {
        let gateway = gateway().await;
        let outcome = save_product(&gateway, EditMode::Create, &form()).await.unwrap();
        assert_eq!(outcome, SaveOutcome::Created { id: 1 });

        let product = gateway.get_product(1).await.unwrap().unwrap();
        assert_eq!(product.name, "Widget");
        assert_eq!(product.quantity, 10);
        assert_eq!(product.supplier_phone, "0047 1234");
    }

    #[tokio::test]
    async fn test_create_with_bad_price() {
        let gateway = gateway().await;
        let bad = ProductForm {
            price: "12abc".to_string(),
            ..form()
        };

        let err = save_product(&gateway, EditMode::Create, &bad).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "'12abc' is not a valid number for price");
        assert_eq!(gateway.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_partially_blank_create_is_rejected() {
        let gateway = gateway().await;
        let partial = ProductForm {
            name: "Widget".to_string(),
            ..ProductForm::default()
        };

        let err = save_product(&gateway, EditMode::Create, &partial)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_edit_existing() {
        let gateway = gateway().await;
        save_product(&gateway, EditMode::Create, &form()).await.unwrap();

        let stored = gateway.get_product(1).await.unwrap().unwrap();
        let mut edit = ProductForm::from_product(&stored);
        edit.increment_quantity();
        edit.supplier_name = "Northwind".to_string();

        let outcome = save_product(&gateway, EditMode::EditExisting(1), &edit)
            .await
            .unwrap();
        assert_eq!(outcome, SaveOutcome::Updated);

        let product = gateway.get_product(1).await.unwrap().unwrap();
        assert_eq!(product.quantity, 11);
        assert_eq!(product.supplier_name, "Northwind");
    }

    #[tokio::test]
    async fn test_edit_missing_product_fails() {
        let gateway = gateway().await;
        let outcome = save_product(&gateway, EditMode::EditExisting(9), &form())
            .await
            .unwrap();
        assert_eq!(outcome, SaveOutcome::Failed);
    }

    #[tokio::test]
    async fn test_blank_edit_is_validated() {
        let gateway = gateway().await;
        save_product(&gateway, EditMode::Create, &form()).await.unwrap();

        // Edit mode never skips; blank fields fail the rules instead
        let err = save_product(&gateway, EditMode::EditExisting(1), &ProductForm::default())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }
}
