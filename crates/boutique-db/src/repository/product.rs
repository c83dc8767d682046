//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Key Operations
//! - CRUD over the inventory
//! - Hard delete (history rows in the ledgers keep their dangling
//!   product_id; see the sales/audit repositories)
//!
//! Stock mutations do NOT live here: the sale decrement and the audit
//! overwrite are transactional and belong to their ledger repositories.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use boutique_core::Product;

/// Columns selected for a full Product row.
pub(crate) const PRODUCT_COLUMNS: &str = "id, name, category_id, category_name, cost_cents, \
     price_cents, stock_quantity, min_stock_level, created_at, updated_at";

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.products();
///
/// let items = repo.list().await?;
/// let product = repo.get_by_id("uuid-here").await?;
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

    /// Lists all products ordered by name (the inventory page).
    pub async fn list(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY name"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Inserts a new product.
    pub async fn insert(&self, product: &Product) -> DbResult<()> {
        debug!(name = %product.name, "Inserting product");

        sqlx::query(
            r#"
            INSERT INTO products (
                id, name, category_id, category_name,
                cost_cents, price_cents, stock_quantity, min_stock_level,
                created_at, updated_at
            ) VALUES (
                ?1, ?2, ?3, ?4,
                ?5, ?6, ?7, ?8,
                ?9, ?10
            )
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(&product.category_id)
        .bind(&product.category_name)
        .bind(product.cost_cents)
        .bind(product.price_cents)
        .bind(product.stock_quantity)
        .bind(product.min_stock_level)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Updates an existing product (all mutable columns).
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - Product doesn't exist
    pub async fn update(&self, product: &Product) -> DbResult<()> {
        debug!(id = %product.id, "Updating product");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE products SET
                name = ?2,
                category_id = ?3,
                category_name = ?4,
                cost_cents = ?5,
                price_cents = ?6,
                stock_quantity = ?7,
                min_stock_level = ?8,
                updated_at = ?9
            WHERE id = ?1
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(&product.category_id)
        .bind(&product.category_name)
        .bind(product.cost_cents)
        .bind(product.price_cents)
        .bind(product.stock_quantity)
        .bind(product.min_stock_level)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", &product.id));
        }

        Ok(())
    }

    /// Deletes a product.
    ///
    /// ## History Is Kept
    /// Sale and StockAudit rows referencing this product are NOT touched;
    /// they keep the now-dangling product_id as historical record.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Counts total products (for diagnostics and the seed tool).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Helper to generate a new product ID.
///
/// ## Usage
/// ```rust,ignore
/// let id = generate_product_id();
/// let product = Product { id, ... };
/// ```
pub fn generate_product_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use boutique_core::Money;

    pub(crate) fn sample_product(name: &str, stock: i64) -> Product {
        let now = Utc::now();
        Product {
            id: generate_product_id(),
            name: name.to_string(),
            category_id: None,
            category_name: "Other".to_string(),
            cost_cents: Money::from_cents(250_000),
            price_cents: Money::from_cents(450_000),
            stock_quantity: stock,
            min_stock_level: 5,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_insert_and_roundtrip() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();

        let product = sample_product("Rose Perfume", 3);
        repo.insert(&product).await.unwrap();

        let loaded = repo.get_by_id(&product.id).await.unwrap().unwrap();
        assert_eq!(loaded.name, "Rose Perfume");
        assert_eq!(loaded.cost_cents, Money::from_cents(250_000));
        assert_eq!(loaded.price_cents, Money::from_cents(450_000));
        assert_eq!(loaded.stock_quantity, 3);
        assert_eq!(loaded.category_name, "Other");
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_and_not_found() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();

        let mut product = sample_product("Rose Perfume", 3);
        repo.insert(&product).await.unwrap();

        product.name = "Rose Perfume 50ml".to_string();
        product.stock_quantity = 7;
        repo.update(&product).await.unwrap();

        let loaded = repo.get_by_id(&product.id).await.unwrap().unwrap();
        assert_eq!(loaded.name, "Rose Perfume 50ml");
        assert_eq!(loaded.stock_quantity, 7);

        let ghost = sample_product("Ghost", 1);
        assert!(matches!(
            repo.update(&ghost).await.unwrap_err(),
            DbError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn test_delete() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();

        let product = sample_product("Rose Perfume", 3);
        repo.insert(&product).await.unwrap();
        repo.delete(&product.id).await.unwrap();

        assert!(repo.get_by_id(&product.id).await.unwrap().is_none());
        assert!(matches!(
            repo.delete(&product.id).await.unwrap_err(),
            DbError::NotFound { .. }
        ));
    }
}
