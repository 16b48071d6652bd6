//! # Money Module
//!
//! Provides the `Money` type for monetary values.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Every price, subtotal and total is an integer count of the smallest   │
//! │  currency unit (rupiah has no minor unit in practice).                 │
//! │                                                                         │
//! │    price 18_000 × qty 3 = 54_000          exact, no rounding           │
//! │    Σ subtotals          = total           exact, no drift              │
//! │                                                                         │
//! │  Multiplication is checked: a subtotal that would overflow i64 is a    │
//! │  rejected checkout, never a wrapped negative total.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use kasir_core::money::Money;
//!
//! let price = Money::new(18_000);
//! let subtotal = price.checked_mul_quantity(3).unwrap();
//! assert_eq!(subtotal.amount(), 54_000);
//! assert_eq!(subtotal.to_string(), "Rp54.000");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit.
///
/// Newtype structs serialize as their inner value, so JSON bodies stay
/// `"total_amount": 54000`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from an amount in the smallest currency unit.
    #[inline]
    pub const fn new(amount: i64) -> Self {
        Money(amount)
    }

    /// Returns the raw amount.
    #[inline]
    pub const fn amount(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Multiplies a unit price by a quantity, `None` on overflow.
    ///
    /// ## User Workflow
    /// ```text
    /// Locked product: Kopi Susu, price 18_000
    /// Checkout line:  quantity 3
    ///      │
    ///      ▼
    /// checked_mul_quantity(3) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// Subtotal: 54_000 → added to the draft total
    /// ```
    #[inline]
    pub const fn checked_mul_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(v) => Some(Money(v)),
            None => None,
        }
    }

    /// Adds two amounts, `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Money(v)),
            None => None,
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Rupiah-style display with `.` as the thousands separator.
///
/// For logs and debugging; clients format amounts themselves.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.0.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(ch);
        }
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}Rp{}", sign, grouped)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_groups_thousands() {
        assert_eq!(Money::new(0).to_string(), "Rp0");
        assert_eq!(Money::new(999).to_string(), "Rp999");
        assert_eq!(Money::new(54_000).to_string(), "Rp54.000");
        assert_eq!(Money::new(1_250_500).to_string(), "Rp1.250.500");
        assert_eq!(Money::new(-7_500).to_string(), "-Rp7.500");
    }

    #[test]
    fn test_checked_mul_quantity() {
        assert_eq!(Money::new(2_500).checked_mul_quantity(4), Some(Money::new(10_000)));
        assert_eq!(Money::new(0).checked_mul_quantity(999), Some(Money::zero()));
        assert_eq!(Money::new(i64::MAX).checked_mul_quantity(2), None);
    }

    #[test]
    fn test_checked_add_overflow() {
        assert_eq!(Money::new(1).checked_add(Money::new(2)), Some(Money::new(3)));
        assert_eq!(Money::new(i64::MAX).checked_add(Money::new(1)), None);
    }

    #[test]
    fn test_serializes_as_plain_integer() {
        let json = serde_json::to_string(&Money::new(54_000)).unwrap();
        assert_eq!(json, "54000");
    }
}
