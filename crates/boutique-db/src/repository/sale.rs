//! # Sale Repository
//!
//! Database operations for the sales ledger.
//!
//! ## Sale Commit Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    Atomic Sale Commit                               │
//! │                                                                     │
//! │  BEGIN TRANSACTION                                                  │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  1. CONDITIONAL DECREMENT (first statement = takes write lock)      │
//! │     UPDATE products                                                 │
//! │     SET stock_quantity = stock_quantity - q                         │
//! │     WHERE id = ? AND stock_quantity >= q                            │
//! │       │                                                             │
//! │       ├── 0 rows ──► product missing OR out of stock ──► ROLLBACK   │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  2. SNAPSHOT PRICES (same transaction, consistent view)             │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  3. INSERT Sale ledger row (revenue / cost / profit / timestamp)    │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  COMMIT  ← decrement and ledger row land together or not at all     │
//! │                                                                     │
//! │  Why decrement-first?                                               │
//! │  The WHERE clause is evaluated against the row as it is AT WRITE    │
//! │  TIME, so two concurrent sales of the last unit serialize on the    │
//! │  write lock and the loser sees the already-decremented stock.       │
//! │  A read-then-check-then-write sequence could not promise that.      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use crate::repository::product::PRODUCT_COLUMNS;
use boutique_core::{Product, Sale, SaleFigures};

/// Columns selected for a full Sale row.
const SALE_COLUMNS: &str =
    "id, product_id, quantity, revenue_cents, cost_cents, profit_cents, sale_date";

/// Outcome of an attempted sale commit.
///
/// The quantity itself is validated by the caller (boutique-ops) before
/// the commit is attempted; the repository only reports what the store
/// said at write time.
#[derive(Debug)]
pub enum SaleCommit {
    /// Stock was decremented and the ledger row written.
    Committed(Sale),

    /// No product with that id exists.
    ProductMissing,

    /// The product exists but holds fewer units than requested.
    /// `available` is the stock at the moment the commit was refused.
    OutOfStock { product_name: String, available: i64 },
}

/// Repository for sale database operations.
///
/// Sales are an append-only ledger: this repository exposes no update and
/// no delete.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Atomically commits a sale: decrements stock and appends the ledger
    /// row in a single transaction.
    ///
    /// ## Arguments
    /// * `product_id` - Product being sold
    /// * `quantity` - Units to sell; the caller guarantees `quantity > 0`
    ///
    /// ## Guarantees
    /// - Stock never goes negative, including under concurrent callers
    /// - The decrement and the Sale row commit together or not at all
    /// - Revenue/cost/profit are snapshotted from the prices in effect
    ///   inside the same transaction
    pub async fn commit_sale(&self, product_id: &str, quantity: i64) -> DbResult<SaleCommit> {
        debug!(product_id = %product_id, quantity = %quantity, "Committing sale");

        let mut tx = self.pool.begin().await?;
        let now = Utc::now();

        // Conditional decrement first. This statement is both the stock
        // guard and the point where the transaction takes the write lock.
        let result = sqlx::query(
            r#"
            UPDATE products
            SET stock_quantity = stock_quantity - ?2,
                updated_at = ?3
            WHERE id = ?1 AND stock_quantity >= ?2
            "#,
        )
        .bind(product_id)
        .bind(quantity)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            // Nothing changed; distinguish a missing product from an
            // out-of-stock refusal for the caller's message. Dropping the
            // transaction rolls it back.
            let product = sqlx::query_as::<_, Product>(&format!(
                "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1"
            ))
            .bind(product_id)
            .fetch_optional(&mut *tx)
            .await?;

            return Ok(match product {
                None => SaleCommit::ProductMissing,
                Some(p) => SaleCommit::OutOfStock {
                    product_name: p.name,
                    available: p.stock_quantity,
                },
            });
        }

        // Snapshot the prices within the same transaction.
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1"
        ))
        .bind(product_id)
        .fetch_one(&mut *tx)
        .await?;

        let figures = SaleFigures::compute(quantity, product.price_cents, product.cost_cents);

        let sale = Sale {
            id: Uuid::new_v4().to_string(),
            product_id: product_id.to_string(),
            quantity,
            revenue_cents: figures.revenue,
            cost_cents: figures.cost,
            profit_cents: figures.profit,
            sale_date: now,
        };

        sqlx::query(
            r#"
            INSERT INTO sales (
                id, product_id, quantity,
                revenue_cents, cost_cents, profit_cents, sale_date
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&sale.id)
        .bind(&sale.product_id)
        .bind(sale.quantity)
        .bind(sale.revenue_cents)
        .bind(sale.cost_cents)
        .bind(sale.profit_cents)
        .bind(sale.sale_date)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        debug!(sale_id = %sale.id, revenue = %sale.revenue_cents, "Sale committed");
        Ok(SaleCommit::Committed(sale))
    }

    /// Gets a sale by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Sale>> {
        let sale = sqlx::query_as::<_, Sale>(&format!(
            "SELECT {SALE_COLUMNS} FROM sales WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(sale)
    }

    /// Lists all sales, newest first (ties broken by insertion order).
    pub async fn list(&self) -> DbResult<Vec<Sale>> {
        let sales = sqlx::query_as::<_, Sale>(&format!(
            "SELECT {SALE_COLUMNS} FROM sales ORDER BY sale_date DESC, rowid DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
