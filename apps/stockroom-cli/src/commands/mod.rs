//! # Commands Module
//!
//! The operations a front end invokes.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── product.rs  ◄─── List, show, delete
//! ├── edit.rs     ◄─── Create / edit form and save
//! └── sale.rs     ◄─── Sell one unit
//! ```
//!
//! ## How Commands Work
//! Every command takes the [`Gateway`](stockroom_db::Gateway) it runs
//! against and returns `Result<T, ApiError>`:
//! ```rust,ignore
//! let outcome = save_product(state.gateway(), EditMode::Create, &form).await?;
//! let sale = sell_one(state.gateway(), 7).await?;
//! ```

pub mod edit;
pub mod product;
pub mod sale;

pub use edit::{save_product, EditMode, ProductForm, SaveOutcome};
pub use product::{delete_all_products, delete_product, get_product, list_products, ProductDto};
pub use sale::{sell_one, SaleOutcome};
