//! Approval queue filtering and sorting.
//!
//! Pure in-memory transforms over enriched pending submissions. Filtering
//! is idempotent; sorting is deterministic with an id tie-break so equal
//! keys keep a stable order across recomputation.

use serde::{Deserialize, Serialize};

use crate::types::{DbId, Timestamp};
use crate::workflow::{DataPointStatus, Priority};

// ---------------------------------------------------------------------------
// Queue item
// ---------------------------------------------------------------------------

/// A pending submission enriched with names resolved from related entities.
#[derive(Debug, Clone, Serialize)]
pub struct QueueItem {
    pub id: DbId,
    pub status: DataPointStatus,
    pub priority: Priority,
    pub value: f64,
    pub period: String,
    pub project_name: String,
    pub indicator_name: String,
    pub country_name: String,
    pub submitted_by: DbId,
    pub submitter_name: String,
    pub submitted_at: Timestamp,
    pub quality_score: Option<f64>,
}

// ---------------------------------------------------------------------------
// Filters and sort keys
// ---------------------------------------------------------------------------

/// Queue filter parameters. Absent fields do not filter.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueueFilters {
    pub status: Option<DataPointStatus>,
    pub priority: Option<Priority>,
    pub submitted_by: Option<DbId>,
    /// Keep only items submitted at most this many days before `now`.
    pub max_age_days: Option<i64>,
}

/// Sortable queue columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    SubmittedAt,
    Priority,
    Value,
    ProjectName,
    IndicatorName,
    SubmitterName,
    QualityScore,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

// ---------------------------------------------------------------------------
// Transform
// ---------------------------------------------------------------------------

fn matches(item: &QueueItem, filters: &QueueFilters, now: Timestamp) -> bool {
    if filters.status.is_some_and(|s| item.status != s) {
        return false;
    }
    if filters.priority.is_some_and(|p| item.priority != p) {
        return false;
    }
    if filters.submitted_by.is_some_and(|u| item.submitted_by != u) {
        return false;
    }
    if let Some(days) = filters.max_age_days {
        if now.signed_duration_since(item.submitted_at) > chrono::Duration::days(days) {
            return false;
        }
    }
    true
}

fn compare(a: &QueueItem, b: &QueueItem, field: SortField) -> std::cmp::Ordering {
    match field {
        SortField::SubmittedAt => a.submitted_at.cmp(&b.submitted_at),
        SortField::Priority => a.priority.cmp(&b.priority),
        SortField::Value => a.value.total_cmp(&b.value),
        SortField::ProjectName => a.project_name.cmp(&b.project_name),
        SortField::IndicatorName => a.indicator_name.cmp(&b.indicator_name),
        SortField::SubmitterName => a.submitter_name.cmp(&b.submitter_name),
        SortField::QualityScore => a
            .quality_score
            .unwrap_or(f64::NEG_INFINITY)
            .total_cmp(&b.quality_score.unwrap_or(f64::NEG_INFINITY)),
    }
}

/// Filter and sort queue items.
///
/// `now` anchors the age filter so callers (and tests) control the clock.
pub fn apply(
    mut items: Vec<QueueItem>,
    filters: &QueueFilters,
    sort_by: SortField,
    order: SortOrder,
    now: Timestamp,
) -> Vec<QueueItem> {
    items.retain(|item| matches(item, filters, now));
    items.sort_by(|a, b| {
        let cmp = compare(a, b, sort_by).then(a.id.cmp(&b.id));
        match order {
            SortOrder::Asc => cmp,
            SortOrder::Desc => cmp.reverse(),
        }
    });
    items
}
