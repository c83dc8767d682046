//! # Repository Module
//!
//! Database repository implementations for Boutique POS.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                     │
//! │                                                                     │
//! │  The Repository pattern abstracts database access behind a clean    │
//! │  API.                                                               │
//! │                                                                     │
//! │  Operation                                                          │
//! │       │                                                             │
//! │       │  db.sales().commit_sale(product_id, qty)                    │
//! │       │  ↓                                                          │
//! │       ▼                                                             │
//! │  SaleRepository                                                     │
//! │  ├── commit_sale(&self, product_id, quantity)                       │
//! │  └── get_by_id(&self, id)                                           │
//! │       │                                                             │
//! │       │  SQL (single transaction where it matters)                  │
//! │       ▼                                                             │
//! │  SQLite Database                                                    │
//! │                                                                     │
//! │  Benefits:                                                          │
//! │  • Clean separation of concerns                                     │
//! │  • SQL is isolated in one place                                     │
//! │  • Ledger immutability is structural: the sale and audit repos      │
//! │    simply expose no update or delete                                │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`CategoryRepository`] - Category CRUD and reference counting
//! - [`ProductRepository`] - Product CRUD
//! - [`SaleRepository`] - Atomic sale commit (stock decrement + ledger insert)
//! - [`AuditRepository`] - Atomic stock reconciliation
//! - [`ReportRepository`] - Read-only dashboard aggregates
//!
//! [`CategoryRepository`]: category::CategoryRepository
//! [`ProductRepository`]: product::ProductRepository
//! [`SaleRepository`]: sale::SaleRepository
//! [`AuditRepository`]: audit::AuditRepository
//! [`ReportRepository`]: report::ReportRepository

pub mod audit;
pub mod category;
pub mod product;
pub mod report;
pub mod sale;
