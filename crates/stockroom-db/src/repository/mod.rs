//! # Repository Module
//!
//! Record store implementation for Stockroom.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Who talks to SQL                                     │
//! │                                                                         │
//! │  Command layer                                                         │
//! │       │  gateway.update("/products/1", values, None)                   │
//! │       ▼                                                                 │
//! │  Gateway  (route → validate → write → notify)                          │
//! │       │  products.update_rows(assignments, filter)                     │
//! │       ▼                                                                 │
//! │  ProductRepository                                                     │
//! │  ├── select(projection, filter, sort)                                  │
//! │  ├── insert_row(assignments)                                           │
//! │  ├── update_rows(assignments, filter)                                  │
//! │  └── delete_rows(filter)                                               │
//! │       │  SQL with bound parameters                                     │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The repository does no validation of its own; the gateway is its only
//! caller outside of tests and seeding.

pub mod product;
