//! # boutique-core: Pure Business Logic for Boutique POS
//!
//! This crate is the **heart** of Boutique POS. It contains all business
//! logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     Boutique POS Architecture                       │
//! │                                                                     │
//! │  ┌─────────────────────────────────────────────────────────────┐    │
//! │  │              Web layer (external collaborator)              │    │
//! │  │   inventory page ──► sell form ──► audit form ──► dashboard │    │
//! │  └────────────────────────────┬────────────────────────────────┘    │
//! │                               │                                     │
//! │  ┌────────────────────────────▼────────────────────────────────┐    │
//! │  │                      boutique-ops                           │    │
//! │  │   catalog, sales, audit, dashboard operations               │    │
//! │  └────────────────────────────┬────────────────────────────────┘    │
//! │                               │                                     │
//! │  ┌────────────────────────────▼────────────────────────────────┐    │
//! │  │              ★ boutique-core (THIS CRATE) ★                 │    │
//! │  │                                                             │    │
//! │  │   ┌───────────┐  ┌───────────┐  ┌────────────┐              │    │
//! │  │   │   types   │  │   money   │  │ validation │              │    │
//! │  │   │  Product  │  │   Money   │  │ form-field │              │    │
//! │  │   │  Sale ... │  │  figures  │  │  parsing   │              │    │
//! │  │   └───────────┘  └───────────┘  └────────────┘              │    │
//! │  │                                                             │    │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS        │    │
//! │  └────────────────────────────┬────────────────────────────────┘    │
//! │                               │                                     │
//! │  ┌────────────────────────────▼────────────────────────────────┐    │
//! │  │                 boutique-db (Database Layer)                │    │
//! │  │           SQLite queries, migrations, repositories          │    │
//! │  └─────────────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Category, Product, Sale, StockAudit)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Form-input parsing and business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use boutique_core::money::Money;
//! use boutique_core::types::SaleFigures;
//!
//! // Create money from cents (never from floats!)
//! let price = Money::from_cents(450_000); // 4,500.00
//! let cost = Money::from_cents(250_000);  // 2,500.00
//!
//! // Figures for selling 2 units
//! let figures = SaleFigures::compute(2, price, cost);
//! assert_eq!(figures.revenue.cents(), 900_000);
//! assert_eq!(figures.profit.cents(), 400_000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use boutique_core::Money` instead of
// `use boutique_core::money::Money`

pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Sentinel category name used when a product's category reference cannot
/// be resolved.
///
/// ## Why a sentinel instead of an error?
/// A stale or missing category selection on the product form is tolerated
/// deliberately: the product is still saved, filed under "Other", rather
/// than failing the whole write. The denormalised
/// `category_name` column is recomputed on every product write, so a later
/// correct selection repairs it.
pub const FALLBACK_CATEGORY_NAME: &str = "Other";

/// Default minimum stock level for new products.
///
/// ## Business Reason
/// A product at or below its minimum is flagged as low stock on the
/// dashboard. Five units is the shop's reorder point for most lines.
pub const DEFAULT_MIN_STOCK_LEVEL: i64 = 5;

/// Number of sales shown in the dashboard "latest sales" panel.
pub const LATEST_SALES_LIMIT: u32 = 5;
