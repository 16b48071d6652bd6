//! # kasir-core: Pure Business Logic for Kasir POS
//!
//! Everything the checkout and reporting engines decide without touching
//! storage lives here: the domain types, integer money, input validation,
//! the checkout draft that builds a transaction line by line, and the
//! day-boundary math behind sales reports.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Kasir POS Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    apps/api (axum)                              │   │
//! │  │    /api/checkout, /api/report, /api/products, ...               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ kasir-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │ checkout  │  │  report   │  │   │
//! │  │   │  Product  │  │   Money   │  │  Draft    │  │  Range    │  │   │
//! │  │   │Transaction│  │           │  │           │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO CLOCK • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    kasir-db (Database Layer)                    │   │
//! │  │        SQLite queries, migrations, the checkout unit of work    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Category, Transaction, SalesReport)
//! - [`money`] - Money type with integer arithmetic
//! - [`checkout`] - Transaction draft: stock checks, subtotals, totals
//! - [`report`] - Report time ranges (daily, multi-day)
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation rules
//!
//! ## Example Usage
//!
//! ```rust
//! use kasir_core::checkout::TransactionDraft;
//! use kasir_core::types::ProductSnapshot;
//!
//! let coffee = ProductSnapshot {
//!     id: 1,
//!     name: "Kopi Susu".to_string(),
//!     price: 18_000,
//!     stock: 10,
//! };
//!
//! let mut draft = TransactionDraft::new();
//! draft.add_line(&coffee, 3).unwrap();
//!
//! assert_eq!(draft.total().amount(), 54_000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod checkout;
pub mod error;
pub mod money;
pub mod report;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use checkout::TransactionDraft;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use report::ReportRange;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum number of lines accepted in a single checkout.
///
/// ## Business Reason
/// Every line holds the store's write lock a little longer; a bounded basket
/// keeps the lock window short for the checkouts queued behind it.
pub const MAX_CHECKOUT_LINES: usize = 100;

/// Maximum quantity of a single checkout line.
///
/// Catches fat-finger input (typing 1000 instead of 10) before it reaches
/// the stock check.
pub const MAX_LINE_QUANTITY: i64 = 999;

/// Name reported as best seller when a report range has no sales.
pub const NO_BEST_SELLER: &str = "-";
