//! # Stock Audit Repository
//!
//! Database operations for the stock reconciliation ledger.
//!
//! ## Reconciliation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    Atomic Audit Record                              │
//! │                                                                     │
//! │  BEGIN TRANSACTION                                                  │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  1. READ product (pre-correction system_stock)                      │
//! │       │                                                             │
//! │       ├── missing ──► ROLLBACK, report ProductMissing               │
//! │       ▼                                                             │
//! │  2. INSERT StockAudit ledger row                                    │
//! │     (system_stock, physical_count, discrepancy, notes)              │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  3. OVERWRITE products.stock_quantity := physical_count             │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  COMMIT                                                             │
//! │                                                                     │
//! │  The ledger row is inserted BEFORE the overwrite: if the insert     │
//! │  fails, the prior count survives untouched. After commit, the       │
//! │  audit row is the only remaining record of the discrepancy.         │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use boutique_core::StockAudit;

/// Columns selected for a full StockAudit row.
const AUDIT_COLUMNS: &str =
    "id, product_id, system_stock, physical_count, discrepancy, audit_date, notes";

/// Outcome of an attempted audit record.
#[derive(Debug)]
pub enum AuditCommit {
    /// Ledger row written and system stock corrected.
    Recorded(StockAudit),

    /// No product with that id exists.
    ProductMissing,
}

/// Repository for stock audit database operations.
///
/// Audits are an append-only ledger: this repository exposes no update
/// and no delete.
#[derive(Debug, Clone)]
pub struct AuditRepository {
    pool: SqlitePool,
}

impl AuditRepository {
    /// Creates a new AuditRepository.
    pub fn new(pool: SqlitePool) -> Self {
        AuditRepository { pool }
    }

    /// Atomically records a stock audit: appends the ledger row and
    /// overwrites the system stock with the physical count, in a single
    /// transaction.
    ///
    /// ## Arguments
    /// * `product_id` - Product being counted
    /// * `physical_count` - Units actually on the shelf; the caller
    ///   guarantees `physical_count >= 0`
    /// * `notes` - Optional free text from the person counting
    pub async fn record(
        &self,
        product_id: &str,
        physical_count: i64,
        notes: Option<String>,
    ) -> DbResult<AuditCommit> {
        debug!(product_id = %product_id, physical_count = %physical_count, "Recording stock audit");

        let mut tx = self.pool.begin().await?;
        let now = Utc::now();

        // Pre-correction system count, read inside the transaction so the
        // discrepancy and the overwrite agree on one value.
        let system_stock: Option<i64> =
            sqlx::query_scalar("SELECT stock_quantity FROM products WHERE id = ?1")
                .bind(product_id)
                .fetch_optional(&mut *tx)
                .await?;

        let Some(system_stock) = system_stock else {
            return Ok(AuditCommit::ProductMissing);
        };

        let audit = StockAudit {
            id: Uuid::new_v4().to_string(),
            product_id: product_id.to_string(),
            system_stock,
            physical_count,
            discrepancy: StockAudit::discrepancy_between(system_stock, physical_count),
            audit_date: now,
            notes,
        };

        sqlx::query(
            r#"
            INSERT INTO stock_audits (
                id, product_id, system_stock,
                physical_count, discrepancy, audit_date, notes
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&audit.id)
        .bind(&audit.product_id)
        .bind(audit.system_stock)
        .bind(audit.physical_count)
        .bind(audit.discrepancy)
        .bind(audit.audit_date)
        .bind(&audit.notes)
        .execute(&mut *tx)
        .await?;

        // Correct system stock to match the shelf count.
        sqlx::query("UPDATE products SET stock_quantity = ?2, updated_at = ?3 WHERE id = ?1")
            .bind(product_id)
            .bind(physical_count)
            .bind(now)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        debug!(audit_id = %audit.id, discrepancy = %audit.discrepancy, "Audit recorded");
        Ok(AuditCommit::Recorded(audit))
    }

    /// Lists all audits, newest first (the audit history page).
    pub async fn list(&self) -> DbResult<Vec<StockAudit>> {
        let audits = sqlx::query_as::<_, StockAudit>(&format!(
            "SELECT {AUDIT_COLUMNS} FROM stock_audits ORDER BY audit_date DESC, rowid DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(audits)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use boutique_core::{Money, Product};

    fn sample_product(stock: i64) -> Product {
        let now = Utc::now();
        Product {
            id: Uuid::new_v4().to_string(),
            name: "Rose Perfume".to_string(),
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
    async fn test_record_shrinkage() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let product = sample_product(3);
        db.products().insert(&product).await.unwrap();

        let commit = db
            .audits()
            .record(&product.id, 0, Some("end of month count".to_string()))
            .await
            .unwrap();
        let audit = match commit {
            AuditCommit::Recorded(a) => a,
            other => panic!("expected recorded, got {:?}", other),
        };

        assert_eq!(audit.system_stock, 3);
        assert_eq!(audit.physical_count, 0);
        assert_eq!(audit.discrepancy, 3); // 3 items missing
        assert_eq!(audit.notes.as_deref(), Some("end of month count"));

        // System stock corrected to the shelf count
        let loaded = db.products().get_by_id(&product.id).await.unwrap().unwrap();
        assert_eq!(loaded.stock_quantity, 0);
    }

    #[tokio::test]
    async fn test_record_surplus_and_missing_product() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let product = sample_product(2);
        db.products().insert(&product).await.unwrap();

        let commit = db.audits().record(&product.id, 5, None).await.unwrap();
        match commit {
            AuditCommit::Recorded(a) => assert_eq!(a.discrepancy, -3), // surplus
            other => panic!("expected recorded, got {:?}", other),
        }

        let commit = db.audits().record("no-such-id", 1, None).await.unwrap();
        assert!(matches!(commit, AuditCommit::ProductMissing));
    }

    /// Audit overwrite idempotence: the same physical count twice in a row
    /// yields a second ledger row with discrepancy 0 and an unchanged
    /// stock quantity.
    #[tokio::test]
    async fn test_repeat_audit_is_idempotent_on_stock() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let product = sample_product(8);
        db.products().insert(&product).await.unwrap();

        db.audits().record(&product.id, 6, None).await.unwrap();
        let commit = db.audits().record(&product.id, 6, None).await.unwrap();

        match commit {
            AuditCommit::Recorded(a) => {
                assert_eq!(a.system_stock, 6);
                assert_eq!(a.discrepancy, 0);
            }
            other => panic!("expected recorded, got {:?}", other),
        }

        let loaded = db.products().get_by_id(&product.id).await.unwrap().unwrap();
        assert_eq!(loaded.stock_quantity, 6);

        // Both audits kept: the ledger is append-only
        let history = db.audits().list().await.unwrap();
        assert_eq!(history.len(), 2);
        // Newest first
        assert_eq!(history[0].discrepancy, 0);
        assert_eq!(history[1].discrepancy, 2);
    }
}
