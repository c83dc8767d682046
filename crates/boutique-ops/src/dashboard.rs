//! # Dashboard Operation
//!
//! Assembles the landing-page report: all-time revenue and profit, today's
//! profit, the low-stock count, and the five latest sales.
//!
//! Every figure is recomputed from the ledgers on each call; the dashboard
//! holds no state of its own and a failed sale or audit never shows up
//! here, because refused operations write nothing.

use serde::Serialize;
use tracing::debug;

use crate::error::OpResult;
use boutique_core::Money;
use boutique_db::{Database, LatestSale};

/// The dashboard report.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    /// All-time revenue across the sales ledger.
    pub total_revenue: Money,

    /// All-time profit across the sales ledger.
    pub total_profit: Money,

    /// Profit from sales on the current (server-local) calendar date.
    pub today_profit: Money,

    /// Products at or below their reorder threshold.
    pub low_stock_count: i64,

    /// The five most recent sales, product names resolved where the
    /// product still exists.
    pub latest_sales: Vec<LatestSale>,
}

/// Builds the dashboard report.
pub async fn dashboard(db: &Database) -> OpResult<Dashboard> {
    debug!("dashboard");

    let reports = db.reports();

    Ok(Dashboard {
        total_revenue: reports.total_revenue().await?,
        total_profit: reports.total_profit().await?,
        today_profit: reports.today_profit().await?,
        low_stock_count: reports.low_stock_count().await?,
        latest_sales: reports.latest_sales().await?,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
