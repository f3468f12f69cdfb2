//! Result shapes for bulk operations.
//!
//! Bulk operations dispatch N independent calls and aggregate pass/fail;
//! partial failure is reported, never rolled back.

use melboard_core::types::DbId;
use serde::Serialize;

/// One failed item in a bulk approve/reject.
#[derive(Debug, Clone, Serialize)]
pub struct BulkError {
    pub id: DbId,
    pub error: String,
}

/// Aggregate result of a bulk approve/reject.
///
/// `success_count + failure_count` always equals the number of requested ids.
#[derive(Debug, Clone, Serialize)]
pub struct BulkOutcome {
    pub success_count: usize,
    pub failure_count: usize,
    pub errors: Vec<BulkError>,
}

/// One failed row in a bulk import, keyed by zero-based row index.
#[derive(Debug, Clone, Serialize)]
pub struct ImportError {
    pub row: usize,
    pub error: String,
}

/// Aggregate result of a bulk import.
#[derive(Debug, Clone, Serialize)]
pub struct ImportOutcome {
    pub imported: usize,
    pub failed: usize,
    pub errors: Vec<ImportError>,
}
