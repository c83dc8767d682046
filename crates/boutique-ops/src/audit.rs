//! # Stock Audit Operations
//!
//! Manual stock reconciliation: the shopkeeper counts the shelf, the system
//! logs the discrepancy and corrects its own count to match reality.
//!
//! Positive discrepancy means shrinkage (system had more than the shelf);
//! negative means surplus. A repeat count with the same number produces a
//! discrepancy of zero and changes nothing.

use serde::Serialize;
use tracing::{debug, info};

use crate::error::{OpError, OpResult};
use boutique_core::validation::{parse_physical_count, validate_notes};
use boutique_core::StockAudit;
use boutique_db::{AuditCommit, Database};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditResponse {
    pub audit: StockAudit,
    pub message: String,
}

/// Records a stock audit for the given product.
///
/// ## Errors
/// - `ValidationError` - physical count malformed or negative, or notes
///   too long
/// - `NotFound` - no product with that id
pub async fn record_audit(
    db: &Database,
    product_id: &str,
    raw_physical_count: &str,
    notes: Option<&str>,
) -> OpResult<AuditResponse> {
    debug!(product_id = %product_id, raw_physical_count = %raw_physical_count, "record_audit");

    let physical_count = parse_physical_count(raw_physical_count)?;
    let notes = validate_notes(notes)?;

    match db.audits().record(product_id, physical_count, notes).await? {
        AuditCommit::Recorded(audit) => {
            info!(
                audit_id = %audit.id,
                discrepancy = %audit.discrepancy,
                "Stock audit recorded"
            );

            Ok(AuditResponse {
                audit,
                message: "Audit logged. Stock count corrected.".to_string(),
            })
        }
        AuditCommit::ProductMissing => Err(OpError::not_found("Product", product_id)),
    }
}

/// Lists the audit history, newest first.
pub async fn list_audits(db: &Database) -> OpResult<Vec<StockAudit>> {
    Ok(db.audits().list().await?)
}

// =============================================================================
// Unit Tests
// =============================================================================
