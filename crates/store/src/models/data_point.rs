//! Data point entity model, audit trail, and DTOs.

use melboard_core::audit;
use melboard_core::types::{DbId, Timestamp};
use melboard_core::workflow::{DataPointStatus, Priority};
use serde::{Deserialize, Serialize};
use validator::Validate;

// ---------------------------------------------------------------------------
// Audit trail
// ---------------------------------------------------------------------------

/// One workflow action recorded against a data point. Immutable once
/// appended; the integrity hash chains over the previous entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub action: String,
    pub user_id: DbId,
    pub timestamp: Timestamp,
    pub comment: Option<String>,
    pub integrity_hash: String,
}

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A submitted measurement against an indicator for a project/period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataPoint {
    pub id: DbId,
    pub project_id: DbId,
    pub indicator_id: DbId,
    pub value: f64,
    pub period: String,
    pub status: DataPointStatus,
    #[serde(default)]
    pub priority: Priority,
    pub submitted_by: DbId,
    pub submitted_at: Timestamp,
    pub updated_at: Timestamp,
    pub comment: Option<String>,
    pub quality_score: Option<f64>,
    pub approved_by: Option<DbId>,
    pub approved_at: Option<Timestamp>,
    pub rejected_by: Option<DbId>,
    pub rejected_at: Option<Timestamp>,
    pub rejection_reason: Option<String>,
    #[serde(default)]
    pub rejection_count: i32,
    #[serde(default)]
    pub changes_requested_count: i32,
    #[serde(default)]
    pub audit_trail: Vec<AuditEntry>,
}

impl DataPoint {
    /// Append an audit entry, chaining its integrity hash over the last one.
    pub fn append_audit(
        &mut self,
        action: &str,
        user_id: DbId,
        timestamp: Timestamp,
        comment: Option<&str>,
    ) {
        let prev_hash = self.audit_trail.last().map(|e| e.integrity_hash.as_str());
        let data = audit::canonical_entry_data(action, user_id, &timestamp, comment);
        let integrity_hash = audit::compute_integrity_hash(prev_hash, &data);
        self.audit_trail.push(AuditEntry {
            action: action.to_string(),
            user_id,
            timestamp,
            comment: comment.map(str::to_string),
            integrity_hash,
        });
    }
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// DTO for submitting a new data point.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateDataPoint {
    pub project_id: DbId,
    pub indicator_id: DbId,
    #[validate(range(min = 0.0))]
    pub value: f64,
    #[validate(length(min = 1, max = 10))]
    pub period: String,
    #[serde(default)]
    pub priority: Priority,
    pub comment: Option<String>,
    /// Save as an editable draft instead of submitting for review.
    #[serde(default)]
    pub save_as_draft: bool,
}

/// DTO for editing a draft. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateDataPoint {
    #[validate(range(min = 0.0))]
    pub value: Option<f64>,
    #[validate(length(min = 1, max = 10))]
    pub period: Option<String>,
    pub priority: Option<Priority>,
    pub comment: Option<String>,
}

/// Filter parameters for listing data points. Absent fields do not filter.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DataPointQuery {
    pub status: Option<DataPointStatus>,
    pub project_id: Option<DbId>,
    pub indicator_id: Option<DbId>,
    pub country_id: Option<DbId>,
    pub period: Option<String>,
    pub submitted_by: Option<DbId>,
}

// ---------------------------------------------------------------------------
// Enriched view
// ---------------------------------------------------------------------------

/// A data point enriched with names resolved from related entities, as
/// returned by list/get endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct DataPointView {
    #[serde(flatten)]
    pub data_point: DataPoint,
    pub project_name: String,
    pub indicator_name: String,
    pub country_id: DbId,
    pub country_name: String,
    pub submitter_name: String,
}
