//! # Category Repository
//!
//! Database operations for product categories.
//!
//! ## Key Operations
//! - CRUD with the UNIQUE name constraint
//! - Reference counting for the delete guard (a category with products
//!   cannot be removed)

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use boutique_core::Category;

/// Columns selected for a full Category row.
const CATEGORY_COLUMNS: &str = "id, name, created_at";

/// Repository for category database operations.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    pool: SqlitePool,
}

impl CategoryRepository {
    /// Creates a new CategoryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CategoryRepository { pool }
    }

    /// Lists all categories ordered by name.
    pub async fn list(&self) -> DbResult<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories ORDER BY name"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    /// Gets a category by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Category))` - Category found
    /// * `Ok(None)` - Category not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    /// Gets a category by its (unique) name.
    ///
    /// Used for the duplicate check when creating a category.
    pub async fn get_by_name(&self, name: &str) -> DbResult<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories WHERE name = ?1"
        ))
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    /// Inserts a new category.
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - name already exists
    pub async fn insert(&self, category: &Category) -> DbResult<()> {
        debug!(name = %category.name, "Inserting category");

        sqlx::query("INSERT INTO categories (id, name, created_at) VALUES (?1, ?2, ?3)")
            .bind(&category.id)
            .bind(&category.name)
            .bind(category.created_at)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Renames a category.
    ///
    /// No uniqueness pre-check here; the UNIQUE index rejects a collision
    /// as `DbError::UniqueViolation`.
    pub async fn rename(&self, id: &str, new_name: &str) -> DbResult<()> {
        debug!(id = %id, new_name = %new_name, "Renaming category");

        let result = sqlx::query("UPDATE categories SET name = ?2 WHERE id = ?1")
            .bind(id)
            .bind(new_name)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Category", id));
        }

        Ok(())
    }

    /// Deletes a category.
    ///
    /// The caller checks [`Self::product_count`] first to produce the
    /// conflict message; the ON DELETE RESTRICT foreign key is the
    /// last-line backstop against a race.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting category");

        let result = sqlx::query("DELETE FROM categories WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Category", id));
        }

        Ok(())
    }

    /// Counts products referencing the given category.
    pub async fn product_count(&self, id: &str) -> DbResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE category_id = ?1")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
