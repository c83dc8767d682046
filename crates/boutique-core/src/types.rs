//! # Domain Types
//!
//! Core domain types used throughout Boutique POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                │
//! │                                                                     │
//! │  ┌────────────────┐   ┌────────────────┐                            │
//! │  │    Category    │   │    Product     │                            │
//! │  │  ────────────  │   │  ────────────  │                            │
//! │  │  id (UUID)     │◄──│  category_id   │  (nullable reference)      │
//! │  │  name (unique) │   │  category_name │  (denormalised snapshot)   │
//! │  └────────────────┘   │  cost_cents    │                            │
//! │                       │  price_cents   │                            │
//! │                       │  stock_quantity│                            │
//! │                       └───────┬────────┘                            │
//! │                               │                                     │
//! │         ┌─────────────────────┴─────────────────┐                   │
//! │         ▼                                       ▼                   │
//! │  ┌────────────────┐                     ┌────────────────┐          │
//! │  │      Sale      │                     │   StockAudit   │          │
//! │  │  ────────────  │                     │  ────────────  │          │
//! │  │  ledger row:   │                     │  ledger row:   │          │
//! │  │  never edited, │                     │  never edited, │          │
//! │  │  never deleted │                     │  never deleted │          │
//! │  └────────────────┘                     └────────────────┘          │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ledger Semantics
//! `Sale` and `StockAudit` are append-only. The crate deliberately exposes
//! no mutation for them: once a row is written it is history. Both keep
//! their `product_id` even after the product itself is deleted, so readers
//! must tolerate a dangling reference.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Category
// =============================================================================

/// A product category.
///
/// Names are unique and non-empty. A category may only be deleted once no
/// product references it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Category {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name, unique across categories.
    pub name: String,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name shown on the inventory page.
    pub name: String,

    /// Owning category, if any. References categories.id.
    pub category_id: Option<String>,

    /// Denormalised snapshot of the category's name.
    ///
    /// ## Keeping It In Sync
    /// This is a derived field, recomputed on every product write from the
    /// current `category_id` referent. It is never authoritative on its own;
    /// when resolution fails the write files the product under
    /// [`crate::FALLBACK_CATEGORY_NAME`] instead of failing.
    pub category_name: String,

    /// Buying price from suppliers, in cents. Always positive.
    pub cost_cents: Money,

    /// Price for customers, in cents. Always positive.
    pub price_cents: Money,

    /// Physical units on hand. Never goes negative as a result of a sale.
    pub stock_quantity: i64,

    /// Reorder point for low-stock flagging.
    pub min_stock_level: i64,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Whether this product is flagged as low stock.
    ///
    /// The boundary is inclusive: a product sitting exactly at its minimum
    /// level counts as low stock.
    ///
    /// ## Example
    /// ```rust
    /// # use boutique_core::{Money, Product};
    /// # use chrono::Utc;
    /// # let mut p = Product {
    /// #     id: "p1".into(), name: "Rose Perfume".into(),
    /// #     category_id: None, category_name: "Other".into(),
    /// #     cost_cents: Money::from_cents(1), price_cents: Money::from_cents(2),
    /// #     stock_quantity: 5, min_stock_level: 5,
    /// #     created_at: Utc::now(), updated_at: Utc::now(),
    /// # };
    /// assert!(p.is_low_stock());      // 5 <= 5
    /// p.stock_quantity = 6;
    /// assert!(!p.is_low_stock());     // 6 > 5
    /// ```
    #[inline]
    pub fn is_low_stock(&self) -> bool {
        self.stock_quantity <= self.min_stock_level
    }
}

// =============================================================================
// Sale
// =============================================================================

/// One committed sale transaction - an immutable ledger row.
///
/// Financial figures are snapshotted at the moment of sale, so later price
/// edits never rewrite history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Sale {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Product sold. May dangle if the product was deleted afterwards.
    pub product_id: String,

    /// Units sold. Always positive.
    pub quantity: i64,

    /// quantity × selling price at time of sale.
    pub revenue_cents: Money,

    /// quantity × cost price at time of sale.
    pub cost_cents: Money,

    /// revenue − cost. Exact by construction.
    pub profit_cents: Money,

    /// Timestamp set at creation.
    pub sale_date: DateTime<Utc>,
}

/// Financial figures computed at the moment of a sale.
///
/// ## Profit Identity
/// For every committed sale these hold exactly:
/// - `revenue == quantity × selling_price`
/// - `cost == quantity × cost_price`
/// - `profit == revenue − cost`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleFigures {
    pub revenue: Money,
    pub cost: Money,
    pub profit: Money,
}

impl SaleFigures {
    /// Computes the figures for selling `quantity` units at the given
    /// per-unit selling and cost price.
    ///
    /// ## Example
    /// ```rust
    /// use boutique_core::money::Money;
    /// use boutique_core::types::SaleFigures;
    ///
    /// let figures = SaleFigures::compute(
    ///     2,
    ///     Money::from_cents(450_000), // selling price 4,500.00
    ///     Money::from_cents(250_000), // cost price 2,500.00
    /// );
    /// assert_eq!(figures.revenue.cents(), 900_000);
    /// assert_eq!(figures.cost.cents(), 500_000);
    /// assert_eq!(figures.profit.cents(), 400_000);
    /// ```
    pub fn compute(quantity: i64, selling_price: Money, cost_price: Money) -> Self {
        let revenue = selling_price.multiply_quantity(quantity);
        let cost = cost_price.multiply_quantity(quantity);
        SaleFigures {
            revenue,
            cost,
            profit: revenue - cost,
        }
    }
}

// =============================================================================
// Stock Audit
// =============================================================================

/// One stock reconciliation - an immutable ledger row.
///
/// Records the system count, the physical shelf count, and their difference
/// at a moment in time. After the audit the system stock is overwritten with
/// the physical count, so this row is the only surviving record of the
/// discrepancy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct StockAudit {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Product audited. May dangle if the product was deleted afterwards.
    pub product_id: String,

    /// What the system said before correction.
    pub system_stock: i64,

    /// What was counted on the shelf.
    pub physical_count: i64,

    /// system_stock − physical_count.
    /// Positive ⇒ items missing (shrinkage); negative ⇒ surplus.
    pub discrepancy: i64,

    /// Timestamp set at creation.
    pub audit_date: DateTime<Utc>,

    /// Free-text notes from the person counting.
    pub notes: Option<String>,
}

impl StockAudit {
    /// Computes the discrepancy between the system count and a physical
    /// shelf count. Positive means items are missing.
    #[inline]
    pub const fn discrepancy_between(system_stock: i64, physical_count: i64) -> i64 {
        system_stock - physical_count
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(stock: i64, min: i64) -> Product {
        Product {
            id: "p1".to_string(),
            name: "Rose Perfume".to_string(),
            category_id: None,
            category_name: "Other".to_string(),
            cost_cents: Money::from_cents(250_000),
            price_cents: Money::from_cents(450_000),
            stock_quantity: stock,
            min_stock_level: min,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_low_stock_boundary() {
        // At the minimum level counts as low stock
        assert!(product(5, 5).is_low_stock());
        // One above does not
        assert!(!product(6, 5).is_low_stock());
        // Below obviously does
        assert!(product(0, 5).is_low_stock());
    }

    #[test]
    fn test_sale_figures_profit_identity() {
        let figures = SaleFigures::compute(
            2,
            Money::from_cents(450_000),
            Money::from_cents(250_000),
        );
        assert_eq!(figures.revenue, Money::from_cents(900_000));
        assert_eq!(figures.cost, Money::from_cents(500_000));
        assert_eq!(figures.profit, figures.revenue - figures.cost);
    }

    #[test]
    fn test_sale_figures_negative_margin() {
        // Selling below cost produces a negative profit, not a panic
        let figures = SaleFigures::compute(3, Money::from_cents(100), Money::from_cents(150));
        assert_eq!(figures.profit, Money::from_cents(-150));
    }

    #[test]
    fn test_discrepancy_sign() {
        // Positive: missing items (shrinkage)
        assert_eq!(StockAudit::discrepancy_between(3, 0), 3);
        // Negative: surplus on the shelf
        assert_eq!(StockAudit::discrepancy_between(3, 5), -2);
        // Zero: counts agree
        assert_eq!(StockAudit::discrepancy_between(4, 4), 0);
    }
}
