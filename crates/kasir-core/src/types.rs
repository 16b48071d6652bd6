//! # Domain Types
//!
//! Core domain types used throughout Kasir POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Category     │◄──│    Product      │   │  CheckoutLine   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  product_id     │       │
//! │  │  name           │   │  name, price    │   │  quantity       │       │
//! │  │  description    │   │  stock          │   │  (transient)    │       │
//! │  └─────────────────┘   └────────┬────────┘   └─────────────────┘       │
//! │                                 │ snapshot at checkout                  │
//! │                                 ▼                                       │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   Transaction   │──►│TransactionDetail│   │   SalesReport   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  product_id     │   │  total_revenue  │       │
//! │  │  total_amount   │   │  product_name   │   │  total_trans.   │       │
//! │  │  created_at     │   │  quantity       │   │  best_seller    │       │
//! │  │  details        │   │  subtotal       │   │  (derived)      │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Every persisted entity has a store-assigned integer id. Transactions and
//! their details are append-only: created once by the checkout engine and
//! never updated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::NO_BEST_SELLER;

// =============================================================================
// Category
// =============================================================================

/// A product grouping (drinks, snacks, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

/// Request body for creating or replacing a category.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CategoryInput {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Product {
    /// Store-assigned identifier.
    pub id: i64,

    /// Display name, snapshotted into transaction details at checkout.
    pub name: String,

    /// Unit price in the smallest currency unit.
    pub price: i64,

    /// Remaining purchasable quantity. Never negative.
    pub stock: i64,

    /// Optional category; cleared when the category is deleted.
    pub category_id: Option<i64>,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating or replacing a product.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductInput {
    pub name: String,
    pub price: i64,
    pub stock: i64,
    #[serde(default)]
    pub category_id: Option<i64>,
}

/// The columns of a product the checkout engine reads under lock.
///
/// Captured once per checkout line; price and name are frozen into the
/// resulting [`TransactionDetail`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ProductSnapshot {
    pub id: i64,
    pub name: String,
    pub price: i64,
    pub stock: i64,
}

// =============================================================================
// Checkout
// =============================================================================

/// One requested line of a checkout. Transient, never persisted as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CheckoutLine {
    pub product_id: i64,
    pub quantity: i64,
}

impl CheckoutLine {
    pub fn new(product_id: i64, quantity: i64) -> Self {
        CheckoutLine {
            product_id,
            quantity,
        }
    }
}

// =============================================================================
// Transaction
// =============================================================================

/// A line of a committed transaction.
/// Uses snapshot pattern to freeze the product name at time of sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct TransactionDetail {
    pub product_id: i64,
    /// Product name at time of sale (frozen).
    pub product_name: String,
    pub quantity: i64,
    /// Unit price at time of sale × quantity.
    pub subtotal: i64,
}

/// A committed checkout.
///
/// Built by [`crate::checkout::TransactionDraft::finish`], so `total_amount`
/// is the sum of the detail subtotals from the moment it exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Transaction {
    pub id: i64,
    pub total_amount: i64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    pub details: Vec<TransactionDetail>,
}

impl Transaction {
    #[inline]
    pub fn total(&self) -> Money {
        Money::new(self.total_amount)
    }
}

// =============================================================================
// Reporting
// =============================================================================

/// The product with the highest sold quantity in a report range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BestSeller {
    pub name: String,
    pub quantity: i64,
}

impl BestSeller {
    /// Sentinel used when nothing was sold in the range.
    pub fn none() -> Self {
        BestSeller {
            name: NO_BEST_SELLER.to_string(),
            quantity: 0,
        }
    }
}

/// Aggregated sales over a time range. Derived, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SalesReport {
    pub total_revenue: i64,
    pub total_transactions: i64,
    pub best_seller: BestSeller,
}

impl SalesReport {
    /// Report for a range without any transaction.
    pub fn empty() -> Self {
        SalesReport {
            total_revenue: 0,
            total_transactions: 0,
            best_seller: BestSeller::none(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
