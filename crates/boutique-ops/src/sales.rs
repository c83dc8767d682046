//! # Sale Operations
//!
//! The sell flow: Validate → Check Stock → Commit.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  record_sale(product_id, "2")                                       │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  parse quantity (malformed ⇒ 0)                                     │
//! │       │                                                             │
//! │       ├── qty ≤ 0 ──► ValidationError "Invalid quantity entered."   │
//! │       ▼                                                             │
//! │  SaleRepository::commit_sale (atomic decrement + ledger insert)     │
//! │       │                                                             │
//! │       ├── ProductMissing ──► NotFound                               │
//! │       ├── OutOfStock ──► InsufficientStock "Only N available."      │
//! │       ▼                                                             │
//! │  "Sale recorded: 2 Rose Perfume"                                    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The stock check and the decrement are one conditional UPDATE inside the
//! repository's transaction, so a refusal here reports the stock as it was
//! at the exact moment the commit was attempted.

use serde::Serialize;
use tracing::{debug, info};

use crate::error::{OpError, OpResult};
use boutique_core::validation::parse_sale_quantity;
use boutique_core::{CoreError, Sale};
use boutique_db::{Database, SaleCommit};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleResponse {
    pub sale: Sale,
    pub message: String,
}

/// Records a sale of `raw_quantity` units of the given product.
///
/// ## Errors
/// - `ValidationError` - quantity malformed or not strictly positive
/// - `NotFound` - no product with that id
/// - `InsufficientStock` - fewer units on hand than requested; the message
///   reports the available quantity and no state changes
pub async fn record_sale(db: &Database, product_id: &str, raw_quantity: &str) -> OpResult<SaleResponse> {
    debug!(product_id = %product_id, raw_quantity = %raw_quantity, "record_sale");

    let quantity = parse_sale_quantity(raw_quantity);
    if quantity <= 0 {
        return Err(OpError::validation("Invalid quantity entered."));
    }

    match db.sales().commit_sale(product_id, quantity).await? {
        SaleCommit::Committed(sale) => {
            // The product survived the commit; read its name for the message
            let product_name = db
                .products()
                .get_by_id(product_id)
                .await?
                .map(|p| p.name)
                .unwrap_or_else(|| product_id.to_string());

            info!(
                sale_id = %sale.id,
                quantity = %quantity,
                profit = %sale.profit_cents,
                "Sale recorded"
            );

            let message = format!("Sale recorded: {} {}", quantity, product_name);
            Ok(SaleResponse { sale, message })
        }
        SaleCommit::ProductMissing => Err(OpError::not_found("Product", product_id)),
        SaleCommit::OutOfStock {
            product_name,
            available,
        } => Err(CoreError::InsufficientStock {
            product: product_name,
            available,
            requested: quantity,
        }
        .into()),
    }
}

/// Lists the full sales ledger, newest first.
pub async fn list_sales(db: &Database) -> OpResult<Vec<Sale>> {
    Ok(db.sales().list().await?)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{self, ProductForm};
    use crate::error::ErrorCode;
    use boutique_core::Money;
    use boutique_db::DbConfig;

    async fn seeded_product(db: &Database, stock: &str) -> String {
        let form = ProductForm {
            name: "Rose Perfume".to_string(),
            category_id: None,
            cost: "2500".to_string(),
            price: "4500".to_string(),
            stock: stock.to_string(),
            min_level: "5".to_string(),
        };
        catalog::create_product(db, &form).await.unwrap().product.id
    }

    #[tokio::test]
    async fn test_record_sale_happy_path() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let product_id = seeded_product(&db, "3").await;

        let response = record_sale(&db, &product_id, "2").await.unwrap();
        assert_eq!(response.message, "Sale recorded: 2 Rose Perfume");
        assert_eq!(response.sale.revenue_cents, Money::from_cents(900_000));
        assert_eq!(response.sale.cost_cents, Money::from_cents(500_000));
        assert_eq!(response.sale.profit_cents, Money::from_cents(400_000));

        let product = catalog::get_product(&db, &product_id).await.unwrap();
        assert_eq!(product.stock_quantity, 1);
    }

    #[tokio::test]
    async fn test_invalid_quantities_rejected_before_touching_stock() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let product_id = seeded_product(&db, "3").await;

        for raw in ["0", "-2", "abc", "", "2.5"] {
            let err = record_sale(&db, &product_id, raw).await.unwrap_err();
            assert_eq!(err.code, ErrorCode::ValidationError, "raw input: {:?}", raw);
            assert_eq!(err.message, "Invalid quantity entered.");
        }

        // Stock untouched, ledger empty
        let product = catalog::get_product(&db, &product_id).await.unwrap();
        assert_eq!(product.stock_quantity, 3);
        assert!(list_sales(&db).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_insufficient_stock_reports_available() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let product_id = seeded_product(&db, "1").await;

        let err = record_sale(&db, &product_id, "5").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InsufficientStock);
        assert_eq!(err.message, "Insufficient stock. Only 1 available.");

        // Refusal left the store untouched
        let product = catalog::get_product(&db, &product_id).await.unwrap();
        assert_eq!(product.stock_quantity, 1);
        assert!(list_sales(&db).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_product_is_not_found() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let err = record_sale(&db, "no-such-id", "1").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_selling_exact_stock_empties_shelf() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let product_id = seeded_product(&db, "3").await;

        record_sale(&db, &product_id, "3").await.unwrap();

        let product = catalog::get_product(&db, &product_id).await.unwrap();
        assert_eq!(product.stock_quantity, 0);

        // The next unit is refused
        let err = record_sale(&db, &product_id, "1").await.unwrap_err();
        assert_eq!(err.message, "Insufficient stock. Only 0 available.");
    }
}
