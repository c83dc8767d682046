//! # boutique-db: Database Layer for Boutique POS
//!
//! This crate provides database access for the Boutique POS system.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Boutique POS Data Flow                         │
//! │                                                                     │
//! │  Operation (record_sale, create_product, dashboard)                 │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  ┌─────────────────────────────────────────────────────────────┐    │
//! │  │                  boutique-db (THIS CRATE)                   │    │
//! │  │                                                             │    │
//! │  │   ┌─────────────┐   ┌────────────────┐   ┌──────────────┐   │    │
//! │  │   │  Database   │   │  Repositories  │   │  Migrations  │   │    │
//! │  │   │  (pool.rs)  │   │ category/...   │   │  (embedded)  │   │    │
//! │  │   │             │   │                │   │              │   │    │
//! │  │   │ SqlitePool  │◄──│ CategoryRepo   │   │ 001_init.sql │   │    │
//! │  │   │ Connection  │   │ ProductRepo    │   │              │   │    │
//! │  │   │ Management  │   │ SaleRepo ...   │   │              │   │    │
//! │  │   └─────────────┘   └────────────────┘   └──────────────┘   │    │
//! │  │                                                             │    │
//! │  └─────────────────────────────────────────────────────────────┘    │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  SQLite database file (WAL mode, foreign keys on)                   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (category, product, sale, audit, report)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use boutique_db::{Database, DbConfig};
//!
//! // Create database with default config
//! let config = DbConfig::new("path/to/boutique.db");
//! let db = Database::new(config).await?;
//!
//! // Use repositories
//! let products = db.products().list().await?;
//! let commit = db.sales().commit_sale("product-uuid", 2).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::audit::{AuditCommit, AuditRepository};
pub use repository::category::CategoryRepository;
pub use repository::product::ProductRepository;
pub use repository::report::{LatestSale, ReportRepository};
pub use repository::sale::{SaleCommit, SaleRepository};
