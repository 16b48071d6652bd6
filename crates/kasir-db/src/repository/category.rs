//! # Category Repository
//!
//! Catalogue CRUD for categories. Deleting a category leaves its products in
//! place with `category_id` cleared (`ON DELETE SET NULL`).

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use kasir_core::validation::validate_category_input;
use kasir_core::{Category, CategoryInput, CoreError};

/// Repository for category database operations.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    pool: SqlitePool,
}

impl CategoryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        CategoryRepository { pool }
    }

    /// Lists all categories ordered by id.
    pub async fn list(&self) -> DbResult<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT id, name, description FROM categories ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    pub async fn get_by_id(&self, id: i64) -> DbResult<Category> {
        let category = sqlx::query_as::<_, Category>(
            "SELECT id, name, description FROM categories WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        category.ok_or_else(|| CoreError::CategoryNotFound(id).into())
    }

    pub async fn create(&self, input: &CategoryInput) -> DbResult<Category> {
        validate_category_input(input).map_err(CoreError::from)?;

        debug!(name = %input.name, "Creating category");

        let category = sqlx::query_as::<_, Category>(
            "INSERT INTO categories (name, description) VALUES (?1, ?2) \
             RETURNING id, name, description",
        )
        .bind(input.name.trim())
        .bind(input.description.as_deref())
        .fetch_one(&self.pool)
        .await?;

        Ok(category)
    }

    pub async fn update(&self, id: i64, input: &CategoryInput) -> DbResult<Category> {
        validate_category_input(input).map_err(CoreError::from)?;

        debug!(id, "Updating category");

        let category = sqlx::query_as::<_, Category>(
            "UPDATE categories SET name = ?2, description = ?3 WHERE id = ?1 \
             RETURNING id, name, description",
        )
        .bind(id)
        .bind(input.name.trim())
        .bind(input.description.as_deref())
        .fetch_optional(&self.pool)
        .await?;

        category.ok_or_else(|| CoreError::CategoryNotFound(id).into())
    }

    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id, "Deleting category");

        let result = sqlx::query("DELETE FROM categories WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(CoreError::CategoryNotFound(id).into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig, DbError};
    use kasir_core::{CategoryInput, CoreError};

    fn input(name: &str, description: Option<&str>) -> CategoryInput {
        CategoryInput {
            name: name.to_string(),
            description: description.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_category_crud() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.categories();

        let drinks = repo.create(&input("Minuman", Some("Drinks"))).await.unwrap();
        let snacks = repo.create(&input("Makanan Ringan", None)).await.unwrap();
        assert_eq!(drinks.description.as_deref(), Some("Drinks"));
        assert_eq!(snacks.description, None);

        let listed = repo.list().await.unwrap();
        assert_eq!(listed, vec![drinks.clone(), snacks.clone()]);

        let renamed = repo
            .update(drinks.id, &input("Minuman Dingin", None))
            .await
            .unwrap();
        assert_eq!(renamed.name, "Minuman Dingin");
        assert_eq!(renamed.description, None);
        assert_eq!(repo.get_by_id(drinks.id).await.unwrap(), renamed);

        repo.delete(snacks.id).await.unwrap();
        let err = repo.get_by_id(snacks.id).await.unwrap_err();
        assert!(matches!(err, DbError::Core(CoreError::CategoryNotFound(_))));
    }

    #[tokio::test]
    async fn test_missing_category() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.categories();

        assert!(matches!(
            repo.update(8, &input("X", None)).await,
            Err(DbError::Core(CoreError::CategoryNotFound(8)))
        ));
        assert!(matches!(
            repo.delete(8).await,
            Err(DbError::Core(CoreError::CategoryNotFound(8)))
        ));
    }

    #[tokio::test]
    async fn test_blank_name_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let err = db.categories().create(&input("  ", None)).await.unwrap_err();
        assert!(matches!(err, DbError::Core(CoreError::Validation(_))));
    }
}
