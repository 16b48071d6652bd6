//! # Product Repository
//!
//! Catalogue CRUD for products.
//!
//! Stock is only ever decremented by the checkout unit of work in
//! [`super::transaction`]; here it is set wholesale by create/update.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use kasir_core::validation::validate_product_input;
use kasir_core::{CoreError, Product, ProductInput};

const PRODUCT_COLUMNS: &str = "id, name, price, stock, category_id, created_at, updated_at";

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.products();
///
/// let all = repo.list(None).await?;
/// let noodles = repo.list(Some("indomie")).await?;
/// let product = repo.get_by_id(1).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists products ordered by id, optionally filtered by a
    /// case-insensitive name fragment.
    ///
    /// The fragment matches literally: `%` and `_` are not wildcards.
    pub async fn list(&self, name: Option<&str>) -> DbResult<Vec<Product>> {
        let name = name.map(str::trim).filter(|n| !n.is_empty());

        debug!(name = ?name, "Listing products");

        let products = match name {
            Some(fragment) => {
                let sql = format!(
                    "SELECT {PRODUCT_COLUMNS} FROM products \
                     WHERE name LIKE '%' || ?1 || '%' ESCAPE '\\' ORDER BY id"
                );
                sqlx::query_as::<_, Product>(&sql)
                    .bind(escape_like(fragment))
                    .fetch_all(&self.pool)
                    .await?
            }
            None => {
                let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products ORDER BY id");
                sqlx::query_as::<_, Product>(&sql)
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        debug!(count = products.len(), "Listed products");
        Ok(products)
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Product)` - Product found
    /// * `Err(DbError::Core(ProductNotFound))` - No such id
    pub async fn get_by_id(&self, id: i64) -> DbResult<Product> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1");

        sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(DbError::Core(CoreError::ProductNotFound(id)))
    }

    /// Creates a product and returns it with its assigned id.
    pub async fn create(&self, input: &ProductInput) -> DbResult<Product> {
        validate_product_input(input).map_err(CoreError::from)?;

        debug!(name = %input.name, price = input.price, stock = input.stock, "Creating product");

        let now = Utc::now();
        let sql = format!(
            "INSERT INTO products (name, price, stock, category_id, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?5) \
             RETURNING {PRODUCT_COLUMNS}"
        );

        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(input.name.trim())
            .bind(input.price)
            .bind(input.stock)
            .bind(input.category_id)
            .bind(now)
            .fetch_one(&self.pool)
            .await?;

        Ok(product)
    }

    /// Replaces name, price, stock and category of an existing product.
    ///
    /// Committed transaction details keep the name they were sold under.
    pub async fn update(&self, id: i64, input: &ProductInput) -> DbResult<Product> {
        validate_product_input(input).map_err(CoreError::from)?;

        debug!(id, "Updating product");

        let now = Utc::now();
        let sql = format!(
            "UPDATE products SET \
                name = ?2, price = ?3, stock = ?4, category_id = ?5, updated_at = ?6 \
             WHERE id = ?1 \
             RETURNING {PRODUCT_COLUMNS}"
        );

        sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .bind(input.name.trim())
            .bind(input.price)
            .bind(input.stock)
            .bind(input.category_id)
            .bind(now)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(DbError::Core(CoreError::ProductNotFound(id)))
    }

    /// Deletes a product.
    ///
    /// A product that appears in any committed transaction cannot be deleted;
    /// SQLite rejects it with a foreign key violation.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(CoreError::ProductNotFound(id).into());
        }

        Ok(())
    }

    /// Counts total products (for diagnostics and the seed binary).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Escapes LIKE metacharacters for use with `ESCAPE '\'`.
fn escape_like(fragment: &str) -> String {
    let mut escaped = String::with_capacity(fragment.len());
    for ch in fragment.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

// =============================================================================
// Unit Tests
// =============================================================================
