//! # stockroom-core: Pure Domain Logic for Stockroom
//!
//! This crate holds everything about products that can be decided without
//! touching the disk: what a product looks like, how loosely typed form
//! input is validated, and how resource paths are routed.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stockroom Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Command layer (apps/stockroom-cli)              │   │
//! │  │      save_product, sell_one, delete_product, list_products      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              stockroom-db (gateway + record store)              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ uses                                   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ stockroom-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌────────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │ validation │  │ resource  │  │   query   │  │   │
//! │  │   │  Product  │  │  insert /  │  │  Router   │  │  Filter   │  │   │
//! │  │   │  Values   │  │  update    │  │  Paths    │  │  RowSet   │  │   │
//! │  │   └───────────┘  └────────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • PURE FUNCTIONS                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Product, column names, loosely typed field values
//! - [`validation`] - Insert and partial-update validation
//! - [`resource`] - Resource paths and the routing table
//! - [`query`] - Filters, sort orders and row sets
//! - [`error`] - Validation error types
//!
//! ## Example Usage
//!
//! ```rust
//! use stockroom_core::types::ProductValues;
//! use stockroom_core::validation::validate_insert;
//!
//! let values = ProductValues::new()
//!     .name("Widget")
//!     .price(500)
//!     .quantity("10")
//!     .supplier_name("Acme")
//!     .supplier_phone("12345678");
//!
//! let product = validate_insert(&values).unwrap();
//! assert_eq!(product.quantity, 10);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod query;
pub mod resource;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::ValidationError;
pub use query::{Comparison, Filter, RowSet, SortDirection, SortOrder};
pub use resource::{ResourcePath, Router};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Name of the single table holding product rows.
pub const PRODUCTS_TABLE: &str = "products";

/// Path segment addressing the product collection (`/products`).
pub const PRODUCTS_SEGMENT: &str = "products";
