//! # Report Repository
//!
//! Read-only aggregates for the dashboard. Every figure here is computed
//! by the database at request time; nothing is cached or pre-rolled.
//!
//! ## Dashboard Figures
//! - All-time revenue and profit (SUM over the sales ledger)
//! - Today's profit (UTC half-open range derived from the local date)
//! - Low-stock count (`stock_quantity <= min_stock_level`)
//! - The five most recent sales, joined with product names

use chrono::{DateTime, Local, NaiveTime, TimeZone, Utc};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::error::DbResult;
use boutique_core::{Money, LATEST_SALES_LIMIT};

/// A recent sale as shown on the dashboard.
///
/// `product_name` is resolved through a LEFT JOIN at read time: when the
/// product has since been deleted, the name is `None` and the row still
/// appears (the ledger outlives the catalog).
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct LatestSale {
    pub id: String,
    pub product_id: String,
    pub product_name: Option<String>,
    pub quantity: i64,
    pub revenue_cents: Money,
    pub profit_cents: Money,
    pub sale_date: DateTime<Utc>,
}

/// Repository for dashboard reporting queries.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    pool: SqlitePool,
}

impl ReportRepository {
    /// Creates a new ReportRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReportRepository { pool }
    }

    /// All-time revenue across the sales ledger.
    pub async fn total_revenue(&self) -> DbResult<Money> {
        let cents: i64 = sqlx::query_scalar("SELECT COALESCE(SUM(revenue_cents), 0) FROM sales")
            .fetch_one(&self.pool)
            .await?;

        Ok(Money::from_cents(cents))
    }

    /// All-time profit across the sales ledger.
    pub async fn total_profit(&self) -> DbResult<Money> {
        let cents: i64 = sqlx::query_scalar("SELECT COALESCE(SUM(profit_cents), 0) FROM sales")
            .fetch_one(&self.pool)
            .await?;

        Ok(Money::from_cents(cents))
    }

    /// Profit from sales dated today, where "today" is the server's local
    /// calendar date translated to a UTC half-open range.
    pub async fn today_profit(&self) -> DbResult<Money> {
        let (start, end) = local_day_bounds_utc();

        let cents: i64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(profit_cents), 0) FROM sales \
             WHERE sale_date >= ?1 AND sale_date < ?2",
        )
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await?;

        Ok(Money::from_cents(cents))
    }

    /// Number of products at or below their reorder threshold.
    pub async fn low_stock_count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM products WHERE stock_quantity <= min_stock_level",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    /// The five most recent sales with product names resolved.
    pub async fn latest_sales(&self) -> DbResult<Vec<LatestSale>> {
        let sales = sqlx::query_as::<_, LatestSale>(
            r#"
            SELECT
                s.id, s.product_id, p.name AS product_name,
                s.quantity, s.revenue_cents, s.profit_cents, s.sale_date
            FROM sales s
            LEFT JOIN products p ON p.id = s.product_id
            ORDER BY s.sale_date DESC, s.rowid DESC
            LIMIT ?1
            "#,
        )
        .bind(LATEST_SALES_LIMIT)
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }
}

/// The current local calendar day as a half-open `[start, end)` UTC range.
///
/// Computed from midnight local time; when local midnight does not exist
/// (DST gap) the range falls back to the UTC calendar day.
fn local_day_bounds_utc() -> (DateTime<Utc>, DateTime<Utc>) {
    let today = Local::now().date_naive();
    let midnight = today.and_time(NaiveTime::MIN);

    match Local.from_local_datetime(&midnight).earliest() {
        Some(start_local) => {
            let start = start_local.with_timezone(&Utc);
            (start, start + chrono::Duration::days(1))
        }
        None => {
            let start = Utc.from_utc_datetime(&Utc::now().date_naive().and_time(NaiveTime::MIN));
            (start, start + chrono::Duration::days(1))
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::repository::sale::SaleCommit;
    use boutique_core::Product;
    use chrono::Utc;
    use uuid::Uuid;

    fn sample_product(name: &str, stock: i64, min_level: i64) -> Product {
        let now = Utc::now();
        Product {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            category_id: None,
            category_name: "Other".to_string(),
            cost_cents: Money::from_cents(250_000),
            price_cents: Money::from_cents(450_000),
            stock_quantity: stock,
            min_stock_level: min_level,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_empty_store_reports_zeroes() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let reports = db.reports();

        assert_eq!(reports.total_revenue().await.unwrap(), Money::zero());
        assert_eq!(reports.total_profit().await.unwrap(), Money::zero());
        assert_eq!(reports.today_profit().await.unwrap(), Money::zero());
        assert_eq!(reports.low_stock_count().await.unwrap(), 0);
        assert!(reports.latest_sales().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_totals_accumulate_over_sales() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let product = sample_product("Rose Perfume", 10, 2);
        db.products().insert(&product).await.unwrap();

        db.sales().commit_sale(&product.id, 2).await.unwrap();
        db.sales().commit_sale(&product.id, 1).await.unwrap();

        let reports = db.reports();
        // 3 units @ price 450_000 / cost 250_000 cents each
        assert_eq!(reports.total_revenue().await.unwrap(), Money::from_cents(1_350_000));
        assert_eq!(reports.total_profit().await.unwrap(), Money::from_cents(600_000));
        // Sales just committed fall inside today's range
        assert_eq!(reports.today_profit().await.unwrap(), Money::from_cents(600_000));
    }

    #[tokio::test]
    async fn test_low_stock_boundary_is_inclusive() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        // stock == min_level counts as low; stock == min_level + 1 does not
        db.products()
            .insert(&sample_product("At Threshold", 5, 5))
            .await
            .unwrap();
        db.products()
            .insert(&sample_product("Above Threshold", 6, 5))
            .await
            .unwrap();
        db.products()
            .insert(&sample_product("Below Threshold", 1, 5))
            .await
            .unwrap();

        assert_eq!(db.reports().low_stock_count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_latest_sales_limit_and_deleted_product() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let product = sample_product("Rose Perfume", 20, 2);
        db.products().insert(&product).await.unwrap();

        for _ in 0..7 {
            let commit = db.sales().commit_sale(&product.id, 1).await.unwrap();
            assert!(matches!(commit, SaleCommit::Committed(_)));
        }

        let latest = db.reports().latest_sales().await.unwrap();
        assert_eq!(latest.len(), 5);
        assert_eq!(latest[0].product_name.as_deref(), Some("Rose Perfume"));

        // Deleting the product keeps the ledger rows; the name goes away
        db.products().delete(&product.id).await.unwrap();
        let latest = db.reports().latest_sales().await.unwrap();
        assert_eq!(latest.len(), 5);
        assert!(latest[0].product_name.is_none());
        assert_eq!(latest[0].product_id, product.id);
    }
}
