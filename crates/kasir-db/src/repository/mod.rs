//! # Repository Module
//!
//! Database repository implementations for Kasir POS.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  HTTP handler                                                          │
//! │       │                                                                 │
//! │       │  db.transactions().checkout(&lines)                            │
//! │       ▼                                                                 │
//! │  TransactionRepository                                                 │
//! │  ├── checkout(&self, lines)     one unit of work                       │
//! │  ├── get_by_id(&self, id)                                              │
//! │  └── report(&self, range)                                              │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  SQL lives only here; handlers never see a query string.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`](product::ProductRepository) - Product CRUD
//! - [`CategoryRepository`](category::CategoryRepository) - Category CRUD
//! - [`TransactionRepository`](transaction::TransactionRepository) - Checkout, lookup, reports

pub mod category;
pub mod product;
pub mod transaction;
