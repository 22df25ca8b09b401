//! # stockroom-db: Database Layer for Stockroom
//!
//! This crate provides product storage for Stockroom.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stockroom Data Flow                              │
//! │                                                                         │
//! │  Command (save_product, sell_one, ...)                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  stockroom-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐   ┌────────────────┐   ┌───────────────┐   │   │
//! │  │   │    Gateway    │──►│   Repository   │   │  Migrations   │   │   │
//! │  │   │ (gateway.rs)  │   │ (product.rs)   │   │  (embedded)   │   │   │
//! │  │   │ route         │   │ select         │   │ 0001_create_  │   │   │
//! │  │   │ validate      │   │ insert_row     │   │  products.sql │   │   │
//! │  │   │ notify ──┐    │   │ update_rows    │   └───────────────┘   │   │
//! │  │   └──────────┼────┘   │ delete_rows    │                       │   │
//! │  │              ▼        └───────┬────────┘                       │   │
//! │  │   ChangeNotifier              │  Database (pool.rs)            │   │
//! │  │   (notify.rs)                 ▼                                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   <data dir>/stockroom.db                                       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database and gateway error types
//! - [`repository`] - Record store primitives
//! - [`gateway`] - Validating access gateway
//! - [`notify`] - Change notification
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stockroom_core::{ProductValues, Router};
//! use stockroom_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/stockroom.db")).await?;
//! let gateway = db.gateway(Router::standard());
//!
//! let values = ProductValues::new()
//!     .name("Widget")
//!     .price(500)
//!     .quantity(10)
//!     .supplier_name("Acme")
//!     .supplier_phone("555-0100");
//! let path = gateway.insert("/products", &values).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod gateway;
pub mod migrations;
pub mod notify;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, GatewayError, GatewayResult};
pub use gateway::Gateway;
pub use migrations::SCHEMA_VERSION;
pub use notify::{ChangeNotifier, ChangeOperation, ResourceChange, ResourceChangeStream};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::product::ProductRepository;
