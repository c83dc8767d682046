//! # boutique-ops: Caller-Facing Operations for Boutique POS
//!
//! The surface the web layer calls. Each operation takes raw form input,
//! validates it, runs the flow against the database, and answers with a
//! typed response carrying a human-readable outcome message, or an
//! [`OpError`] with a code and message.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │              Web layer (external collaborator)                      │
//! │   inventory page ──► sell form ──► audit form ──► dashboard         │
//! └────────────────────────────┬────────────────────────────────────────┘
//!                              │  raw form strings in,
//!                              │  responses / OpError out
//! ┌────────────────────────────▼────────────────────────────────────────┐
//! │                 ★ boutique-ops (THIS CRATE) ★                       │
//! │                                                                     │
//! │   ┌──────────┐  ┌─────────┐  ┌─────────┐  ┌───────────┐             │
//! │   │ catalog  │  │  sales  │  │  audit  │  │ dashboard │             │
//! │   │ CRUD +   │  │ sell    │  │ count + │  │ reports   │             │
//! │   │ snapshot │  │ flow    │  │ correct │  │           │             │
//! │   └──────────┘  └─────────┘  └─────────┘  └───────────┘             │
//! └────────────────────────────┬────────────────────────────────────────┘
//!                              │
//!                  boutique-db / boutique-core
//! ```
//!
//! ## Example
//! ```rust,ignore
//! use boutique_db::{Database, DbConfig};
//! use boutique_ops::{catalog, sales, dashboard};
//!
//! let db = Database::new(DbConfig::new("./boutique.db")).await?;
//!
//! let response = sales::record_sale(&db, &product_id, "2").await?;
//! println!("{}", response.message); // "Sale recorded: 2 Rose Perfume"
//!
//! let report = dashboard::dashboard(&db).await?;
//! println!("profit today: {}", report.today_profit);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod audit;
pub mod catalog;
pub mod dashboard;
pub mod error;
pub mod sales;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{ErrorCode, OpError, OpResult};

pub use audit::AuditResponse;
pub use catalog::{CategoryResponse, ProductForm, ProductResponse};
pub use dashboard::Dashboard;
pub use sales::SaleResponse;

// =============================================================================
// End-To-End Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use boutique_core::Money;
    use boutique_db::{Database, DbConfig};

    /// The whole working day in one test: stock a product, sell some, fail
    /// to oversell, reconcile the shelf, and watch the dashboard track it.
    #[tokio::test]
    async fn test_boutique_working_day() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        // Morning: set up the catalog
        let fragrance = catalog::create_category(&db, "Fragrance")
            .await
            .unwrap()
            .category;

        let form = ProductForm {
            name: "Rose Perfume".to_string(),
            category_id: Some(fragrance.id.clone()),
            cost: "2500".to_string(),
            price: "4500".to_string(),
            stock: "3".to_string(),
            min_level: "5".to_string(),
        };
        let product = catalog::create_product(&db, &form).await.unwrap().product;
        assert_eq!(product.category_name, "Fragrance");
        // Three in stock against a minimum of five: already low
        assert!(product.is_low_stock());
        assert_eq!(dashboard::dashboard(&db).await.unwrap().low_stock_count, 1);

        // A customer buys two
        let sale = sales::record_sale(&db, &product.id, "2").await.unwrap();
        assert_eq!(sale.message, "Sale recorded: 2 Rose Perfume");
        assert_eq!(sale.sale.revenue_cents, Money::from_cents(900_000));
        assert_eq!(sale.sale.cost_cents, Money::from_cents(500_000));
        assert_eq!(sale.sale.profit_cents, Money::from_cents(400_000));
        assert_eq!(
            catalog::get_product(&db, &product.id)
                .await
                .unwrap()
                .stock_quantity,
            1
        );

        // Another customer wants five; only one left
        let err = sales::record_sale(&db, &product.id, "5").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InsufficientStock);
        assert_eq!(err.message, "Insufficient stock. Only 1 available.");

        // Closing time: the shelf is actually empty
        let audit = audit::record_audit(&db, &product.id, "0", None)
            .await
            .unwrap();
        assert_eq!(audit.audit.system_stock, 1);
        assert_eq!(audit.audit.discrepancy, 1);
        assert_eq!(
            catalog::get_product(&db, &product.id)
                .await
                .unwrap()
                .stock_quantity,
            0
        );

        // The dashboard saw exactly one committed sale
        let report = dashboard::dashboard(&db).await.unwrap();
        assert_eq!(report.total_revenue, Money::from_cents(900_000));
        assert_eq!(report.total_profit, Money::from_cents(400_000));
        assert_eq!(report.today_profit, Money::from_cents(400_000));
        assert_eq!(report.low_stock_count, 1);
        assert_eq!(report.latest_sales.len(), 1);
        assert_eq!(
            report.latest_sales[0].product_name.as_deref(),
            Some("Rose Perfume")
        );
    }

    /// Deleting a product keeps its ledger history; the dashboard keeps
    /// counting the money and shows the sale with no product name.
    #[tokio::test]
    async fn test_ledger_outlives_product() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let form = ProductForm {
            name: "Silk Scarf".to_string(),
            category_id: None,
            cost: "900".to_string(),
            price: "2200".to_string(),
            stock: "4".to_string(),
            min_level: "1".to_string(),
        };
        let product = catalog::create_product(&db, &form).await.unwrap().product;

        sales::record_sale(&db, &product.id, "1").await.unwrap();
        catalog::delete_product(&db, &product.id).await.unwrap();

        let report = dashboard::dashboard(&db).await.unwrap();
        assert_eq!(report.total_revenue, Money::from_cents(220_000));
        assert_eq!(report.latest_sales.len(), 1);
        assert!(report.latest_sales[0].product_name.is_none());
        assert_eq!(report.latest_sales[0].product_id, product.id);
    }
}
