//! # Transaction Repository
//!
//! The checkout unit of work, transaction lookup, and sales reports.
//!
//! ## Checkout Unit of Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       checkout(lines)                                   │
//! │                                                                         │
//! │  validate_checkout_lines()            (no storage touched yet)         │
//! │       │                                                                 │
//! │  BEGIN                                                                  │
//! │       │                                                                 │
//! │  for each line, in order:                                              │
//! │  ├── UPDATE products SET stock = stock ... RETURNING                   │
//! │  │       first one takes the database write lock; other writers        │
//! │  │       wait on busy_timeout until COMMIT / ROLLBACK                  │
//! │  ├── None → ProductNotFound                                            │
//! │  ├── TransactionDraft::add_line() → stock check, subtotal, total      │
//! │  └── UPDATE products SET stock = stock - qty WHERE stock >= qty        │
//! │       │                                                                 │
//! │  INSERT transactions (total_amount, created_at) RETURNING id           │
//! │  INSERT transaction_details VALUES (...), (...), ...   (one statement) │
//! │       │                                                                 │
//! │  COMMIT            any `?` before this drops the tx → ROLLBACK         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! SQLite has no `SELECT ... FOR UPDATE`. A no-op `UPDATE ... RETURNING` is
//! both the locked read and the lock acquisition: a deferred transaction
//! upgrades to the write lock on its first write, so nothing another writer
//! commits can slip in between reading a product and decrementing it.

use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};
use tracing::{debug, info, warn};

use crate::error::{DbError, DbResult};
use kasir_core::validation::validate_checkout_lines;
use kasir_core::{
    BestSeller, CheckoutLine, CoreError, ProductSnapshot, ReportRange, SalesReport, Transaction,
    TransactionDetail, TransactionDraft,
};

/// Repository for transactions and the reports built on them.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    pool: SqlitePool,
}

impl TransactionRepository {
    /// Creates a new TransactionRepository.
    pub fn new(pool: SqlitePool) -> Self {
        TransactionRepository { pool }
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    /// Converts a basket into a committed transaction, decrementing stock.
    ///
    /// All-or-nothing: on any error no stock changes and no transaction row
    /// exists. Lines are applied in order, so a product listed twice is
    /// checked against the stock left by its earlier line.
    ///
    /// ## Errors
    /// * `DbError::Core(Validation)` - empty basket, bad quantity
    /// * `DbError::Core(ProductNotFound)` - unknown product id
    /// * `DbError::Core(InsufficientStock)` - not enough stock for a line
    /// * `DbError::Core(AmountOverflow)` - subtotal or total overflow
    /// * `DbError::Busy` - write lock not acquired within the lock timeout
    pub async fn checkout(&self, lines: &[CheckoutLine]) -> DbResult<Transaction> {
        validate_checkout_lines(lines).map_err(CoreError::from)?;

        debug!(lines = lines.len(), "Starting checkout");

        match self.checkout_unit_of_work(lines).await {
            Ok(transaction) => {
                info!(
                    transaction_id = transaction.id,
                    total = %transaction.total(),
                    lines = transaction.details.len(),
                    "Checkout committed"
                );
                Ok(transaction)
            }
            Err(err) => {
                warn!(error = %err, "Checkout rolled back");
                Err(err)
            }
        }
    }

    async fn checkout_unit_of_work(&self, lines: &[CheckoutLine]) -> DbResult<Transaction> {
        let mut tx = self.pool.begin().await?;
        let mut draft = TransactionDraft::with_capacity(lines.len());

        for line in lines {
            let product = lock_product(&mut tx, line.product_id)
                .await?
                .ok_or(CoreError::ProductNotFound(line.product_id))?;

            let detail = draft.add_line(&product, line.quantity)?;
            debug!(
                product_id = detail.product_id,
                quantity = detail.quantity,
                subtotal = detail.subtotal,
                "Line accepted"
            );

            decrement_stock(&mut tx, &product, line.quantity).await?;
        }

        let created_at = Utc::now();

        let transaction_id: i64 = sqlx::query_scalar(
            "INSERT INTO transactions (total_amount, created_at) VALUES (?1, ?2) RETURNING id",
        )
        .bind(draft.total().amount())
        .bind(created_at)
        .fetch_one(&mut *tx)
        .await?;

        insert_details(&mut tx, transaction_id, draft.details()).await?;

        tx.commit().await?;

        Ok(draft.finish(transaction_id, created_at))
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    /// Gets a committed transaction with its details in insertion order.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Transaction> {
        let header: Option<(i64, i64, DateTime<Utc>)> = sqlx::query_as(
            "SELECT id, total_amount, created_at FROM transactions WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let (id, total_amount, created_at) =
            header.ok_or(DbError::Core(CoreError::TransactionNotFound(id)))?;

        let details = sqlx::query_as::<_, TransactionDetail>(
            "SELECT product_id, product_name, quantity, subtotal \
             FROM transaction_details WHERE transaction_id = ?1 ORDER BY id",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Transaction {
            id,
            total_amount,
            created_at,
            details,
        })
    }

    // =========================================================================
    // Reports
    // =========================================================================

    /// Aggregates committed transactions with `start <= created_at <= end`.
    ///
    /// Takes no lock; reads whatever is committed when the queries run.
    ///
    /// ## Best Seller
    /// ```text
    /// transaction_details ⋈ transactions (in range)
    ///      │ GROUP BY product_id, SUM(quantity)
    ///      ▼
    /// highest quantity, ties → lowest product id
    ///      │
    ///      ▼
    /// name = current catalogue name, else the sold-under snapshot
    /// ```
    pub async fn report(&self, range: &ReportRange) -> DbResult<SalesReport> {
        debug!(start = %range.start(), end = %range.end(), "Building sales report");

        let (total_revenue, total_transactions): (i64, i64) = sqlx::query_as(
            "SELECT COALESCE(SUM(total_amount), 0), COUNT(id) \
             FROM transactions \
             WHERE created_at >= ?1 AND created_at <= ?2",
        )
        .bind(range.start())
        .bind(range.end())
        .fetch_one(&self.pool)
        .await?;

        if total_transactions == 0 {
            return Ok(SalesReport::empty());
        }

        let best: Option<(i64, String, i64)> = sqlx::query_as(
            "SELECT td.product_id, \
                    COALESCE(p.name, MAX(td.product_name)) AS name, \
                    SUM(td.quantity) AS sold \
             FROM transaction_details td \
             JOIN transactions t ON t.id = td.transaction_id \
             LEFT JOIN products p ON p.id = td.product_id \
             WHERE t.created_at >= ?1 AND t.created_at <= ?2 \
             GROUP BY td.product_id \
             ORDER BY sold DESC, td.product_id ASC \
             LIMIT 1",
        )
        .bind(range.start())
        .bind(range.end())
        .fetch_optional(&self.pool)
        .await?;

        let best_seller = match best {
            Some((_, name, quantity)) => BestSeller { name, quantity },
            None => BestSeller::none(),
        };

        Ok(SalesReport {
            total_revenue,
            total_transactions,
            best_seller,
        })
    }
}

// =============================================================================
// Unit-of-work steps
// =============================================================================

/// Reads a product under the database write lock.
async fn lock_product(
    conn: &mut SqliteConnection,
    product_id: i64,
) -> DbResult<Option<ProductSnapshot>> {
    let product = sqlx::query_as::<_, ProductSnapshot>(
        "UPDATE products SET stock = stock WHERE id = ?1 RETURNING id, name, price, stock",
    )
    .bind(product_id)
    .fetch_optional(conn)
    .await?;

    Ok(product)
}

async fn decrement_stock(
    conn: &mut SqliteConnection,
    product: &ProductSnapshot,
    quantity: i64,
) -> DbResult<()> {
    let result = sqlx::query(
        "UPDATE products SET stock = stock - ?1, updated_at = ?2 WHERE id = ?3 AND stock >= ?1",
    )
    .bind(quantity)
    .bind(Utc::now())
    .bind(product.id)
    .execute(conn)
    .await?;

    // Unreachable while the write lock is held
    if result.rows_affected() == 0 {
        return Err(CoreError::InsufficientStock {
            name: product.name.clone(),
            available: product.stock,
            requested: quantity,
        }
        .into());
    }

    Ok(())
}

/// Inserts every detail in one multi-row statement.
async fn insert_details(
    conn: &mut SqliteConnection,
    transaction_id: i64,
    details: &[TransactionDetail],
) -> DbResult<()> {
    let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
        "INSERT INTO transaction_details \
         (transaction_id, product_id, product_name, quantity, subtotal) ",
    );

    builder.push_values(details, |mut row, detail| {
        row.push_bind(transaction_id)
            .push_bind(detail.product_id)
            .push_bind(detail.product_name.clone())
            .push_bind(detail.quantity)
            .push_bind(detail.subtotal);
    });

    builder.build().execute(conn).await?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
