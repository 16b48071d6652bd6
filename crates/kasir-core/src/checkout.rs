//! # Checkout Draft
//!
//! The pure half of the checkout engine. The storage layer locks a product
//! row, hands its [`ProductSnapshot`] to [`TransactionDraft::add_line`], and
//! decrements stock only if the draft accepted the line.
//!
//! ## Line Processing
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  for each CheckoutLine (input order):                                  │
//! │                                                                         │
//! │     kasir-db: lock row ──► ProductSnapshot { name, price, stock }      │
//! │                                  │                                      │
//! │     kasir-core: add_line() ──────┤                                      │
//! │        ├── stock < qty?  → InsufficientStock (unit of work aborts)     │
//! │        ├── price × qty   → subtotal (checked)                          │
//! │        ├── total += subtotal (checked)                                 │
//! │        └── push TransactionDetail (name frozen)                        │
//! │                                  │                                      │
//! │     kasir-db: stock -= qty ◄─────┘                                      │
//! │                                                                         │
//! │  then: insert header(total) → insert details → commit                  │
//! │        finish(id, created_at) → Transaction                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{ProductSnapshot, Transaction, TransactionDetail};
use crate::validation::validate_quantity;

/// Details and running total of a checkout that has not been committed yet.
#[derive(Debug, Clone, Default)]
pub struct TransactionDraft {
    details: Vec<TransactionDetail>,
    total: Money,
}

impl TransactionDraft {
    pub fn new() -> Self {
        TransactionDraft::default()
    }

    pub fn with_capacity(lines: usize) -> Self {
        TransactionDraft {
            details: Vec::with_capacity(lines),
            total: Money::zero(),
        }
    }

    /// Accepts one line against the product state read under lock.
    ///
    /// On success the caller must decrement the product's stock by
    /// `quantity` inside the same unit of work. On error the draft is left
    /// unchanged and the whole checkout is expected to abort.
    pub fn add_line(
        &mut self,
        product: &ProductSnapshot,
        quantity: i64,
    ) -> CoreResult<&TransactionDetail> {
        validate_quantity(quantity)?;

        if product.stock < quantity {
            return Err(CoreError::InsufficientStock {
                name: product.name.clone(),
                available: product.stock,
                requested: quantity,
            });
        }

        let subtotal = Money::new(product.price)
            .checked_mul_quantity(quantity)
            .ok_or_else(|| CoreError::AmountOverflow {
                what: format!("subtotal of '{}'", product.name),
            })?;

        let total = self
            .total
            .checked_add(subtotal)
            .ok_or_else(|| CoreError::AmountOverflow {
                what: "transaction total".to_string(),
            })?;

        self.total = total;
        self.details.push(TransactionDetail {
            product_id: product.id,
            product_name: product.name.clone(),
            quantity,
            subtotal: subtotal.amount(),
        });

        Ok(&self.details[self.details.len() - 1])
    }

    /// Running total of accepted lines.
    #[inline]
    pub fn total(&self) -> Money {
        self.total
    }

    pub fn details(&self) -> &[TransactionDetail] {
        &self.details
    }

    /// Seals the draft once the store has assigned identity and timestamp.
    pub fn finish(self, id: i64, created_at: DateTime<Utc>) -> Transaction {
        Transaction {
            id,
            total_amount: self.total.amount(),
            created_at,
            details: self.details,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
