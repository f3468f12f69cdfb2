//! Repository for data points and their approval workflow.
//!
//! Workflow mutations are optimistic: each call takes the data point write
//! lock, validates the transition, mutates in place, and appends an audit
//! entry. There is no rollback; callers recover by re-fetching.

use std::collections::HashMap;

use chrono::Utc;
use melboard_core::audit::{self, action_types, ChainVerification};
use melboard_core::error::CoreError;
use melboard_core::period::validate_period;
use melboard_core::quality::{quality_score, QualityInputs};
use melboard_core::queue::QueueItem;
use melboard_core::types::DbId;
use melboard_core::workflow::{self, DataPointStatus};

use crate::models::{
    AuditEntry, CreateDataPoint, DataPoint, DataPointQuery, DataPointView, UpdateDataPoint,
};
use crate::repositories::validate_dto;
use crate::store::{next_id, Store};

/// CRUD and workflow operations for data points.
pub struct DataPointRepo;

// ---------------------------------------------------------------------------
// Reference data snapshot for enrichment
// ---------------------------------------------------------------------------

/// Name lookups cloned out of the reference collections.
///
/// Taken one lock at a time before the data point lock, so no two locks are
/// ever held together.
struct RefData {
    /// project id -> (project name, country id)
    projects: HashMap<DbId, (String, DbId)>,
    indicators: HashMap<DbId, String>,
    countries: HashMap<DbId, String>,
    users: HashMap<DbId, String>,
}

impl RefData {
    async fn snapshot(store: &Store) -> Self {
        let projects = store
            .projects
            .read()
            .await
            .iter()
            .map(|p| (p.id, (p.name.clone(), p.country_id)))
            .collect();
        let indicators = store
            .indicators
            .read()
            .await
            .iter()
            .map(|i| (i.id, i.name.clone()))
            .collect();
        let countries = store
            .countries
            .read()
            .await
            .iter()
            .map(|c| (c.id, c.name.clone()))
            .collect();
        let users = store
            .users
            .read()
            .await
            .iter()
            .map(|u| (u.id, u.name.clone()))
            .collect();
        Self {
            projects,
            indicators,
            countries,
            users,
        }
    }

    fn country_of(&self, project_id: DbId) -> Option<DbId> {
        self.projects.get(&project_id).map(|(_, country)| *country)
    }

    fn enrich(&self, dp: DataPoint) -> DataPointView {
        let unknown = || "Unknown".to_string();
        let (project_name, country_id) = self
            .projects
            .get(&dp.project_id)
            .cloned()
            .unwrap_or_else(|| (unknown(), 0));
        DataPointView {
            project_name,
            indicator_name: self
                .indicators
                .get(&dp.indicator_id)
                .cloned()
                .unwrap_or_else(unknown),
            country_id,
            country_name: self.countries.get(&country_id).cloned().unwrap_or_else(unknown),
            submitter_name: self
                .users
                .get(&dp.submitted_by)
                .cloned()
                .unwrap_or_else(unknown),
            data_point: dp,
        }
    }
}

/// Indicator targets for quality scoring; zero targets are treated as unset.
async fn indicator_targets(store: &Store) -> HashMap<DbId, f64> {
    store
        .indicators
        .read()
        .await
        .iter()
        .filter(|i| i.target > 0.0)
        .map(|i| (i.id, i.target))
        .collect()
}

fn score(dp: &DataPoint, targets: &HashMap<DbId, f64>) -> f64 {
    quality_score(&QualityInputs {
        value: dp.value,
        period: &dp.period,
        comment: dp.comment.as_deref(),
        indicator_target: targets.get(&dp.indicator_id).copied(),
    })
}

impl DataPointRepo {
    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// List data points matching `query`, enriched with related names.
    pub async fn list(store: &Store, query: &DataPointQuery) -> Vec<DataPointView> {
        store.simulate_latency().await;
        let refs = RefData::snapshot(store).await;
        let points = store.data_points.read().await.clone();

        points
            .into_iter()
            .filter(|d| query.status.is_none_or(|s| d.status == s))
            .filter(|d| query.project_id.is_none_or(|p| d.project_id == p))
            .filter(|d| query.indicator_id.is_none_or(|i| d.indicator_id == i))
            .filter(|d| query.submitted_by.is_none_or(|u| d.submitted_by == u))
            .filter(|d| {
                query
                    .period
                    .as_deref()
                    .is_none_or(|p| d.period == p)
            })
            .filter(|d| {
                query
                    .country_id
                    .is_none_or(|c| refs.country_of(d.project_id) == Some(c))
            })
            .map(|d| refs.enrich(d))
            .collect()
    }

    pub async fn find_by_id(store: &Store, id: DbId) -> Result<DataPoint, CoreError> {
        store.simulate_latency().await;
        store
            .data_points
            .read()
            .await
            .iter()
            .find(|d| d.id == id)
            .cloned()
            .ok_or(CoreError::NotFound { entity: "DataPoint", id })
    }

    /// Fetch one data point enriched with related names.
    pub async fn find_view_by_id(store: &Store, id: DbId) -> Result<DataPointView, CoreError> {
        let refs = RefData::snapshot(store).await;
        let dp = Self::find_by_id(store, id).await?;
        Ok(refs.enrich(dp))
    }

    /// Pending submissions enriched for the approval queue.
    pub async fn queue_items(store: &Store) -> Vec<QueueItem> {
        store.simulate_latency().await;
        let refs = RefData::snapshot(store).await;
        let points = store.data_points.read().await.clone();

        points
            .into_iter()
            .filter(|d| d.status.is_pending_review())
            .map(|d| {
                let view = refs.enrich(d);
                QueueItem {
                    id: view.data_point.id,
                    status: view.data_point.status,
                    priority: view.data_point.priority,
                    value: view.data_point.value,
                    period: view.data_point.period.clone(),
                    project_name: view.project_name,
                    indicator_name: view.indicator_name,
                    country_name: view.country_name,
                    submitted_by: view.data_point.submitted_by,
                    submitter_name: view.submitter_name,
                    submitted_at: view.data_point.submitted_at,
                    quality_score: view.data_point.quality_score,
                }
            })
            .collect()
    }

    /// A data point's audit trail, oldest first.
    pub async fn audit_trail(store: &Store, id: DbId) -> Result<Vec<AuditEntry>, CoreError> {
        Ok(Self::find_by_id(store, id).await?.audit_trail)
    }

    /// Recompute a data point's audit hash chain and report the first break.
    pub async fn verify_audit_chain(
        store: &Store,
        id: DbId,
    ) -> Result<ChainVerification, CoreError> {
        let trail = Self::audit_trail(store, id).await?;
        Ok(audit::verify_chain(trail.iter().map(|e| {
            (
                e.integrity_hash.as_str(),
                audit::canonical_entry_data(&e.action, e.user_id, &e.timestamp, e.comment.as_deref()),
            )
        })))
    }

    // -----------------------------------------------------------------------
    // Create / update / delete
    // -----------------------------------------------------------------------

    /// Create a data point, submitted for review unless `save_as_draft`.
    pub async fn create(
        store: &Store,
        input: CreateDataPoint,
        submitted_by: DbId,
    ) -> Result<DataPoint, CoreError> {
        store.simulate_latency().await;
        validate_dto(&input)?;
        validate_period(&input.period)?;

        let project_exists = store
            .projects
            .read()
            .await
            .iter()
            .any(|p| p.id == input.project_id);
        if !project_exists {
            return Err(CoreError::Validation(format!(
                "Unknown project id {}",
                input.project_id
            )));
        }

        let targets = indicator_targets(store).await;
        let indicator_known = store
            .indicators
            .read()
            .await
            .iter()
            .any(|i| i.id == input.indicator_id);
        if !indicator_known {
            return Err(CoreError::Validation(format!(
                "Unknown indicator id {}",
                input.indicator_id
            )));
        }

        let now = Utc::now();
        let status = if input.save_as_draft {
            DataPointStatus::Draft
        } else {
            DataPointStatus::Submitted
        };

        let mut data_points = store.data_points.write().await;
        let mut dp = DataPoint {
            id: next_id(data_points.iter().map(|d| d.id)),
            project_id: input.project_id,
            indicator_id: input.indicator_id,
            value: input.value,
            period: input.period,
            status,
            priority: input.priority,
            submitted_by,
            submitted_at: now,
            updated_at: now,
            comment: input.comment,
            quality_score: None,
            approved_by: None,
            approved_at: None,
            rejected_by: None,
            rejected_at: None,
            rejection_reason: None,
            rejection_count: 0,
            changes_requested_count: 0,
            audit_trail: Vec::new(),
        };
        dp.append_audit(action_types::CREATE, submitted_by, now, None);
        if status == DataPointStatus::Submitted {
            dp.quality_score = Some(score(&dp, &targets));
            dp.append_audit(action_types::SUBMIT, submitted_by, now, None);
        }

        data_points.push(dp.clone());
        Ok(dp)
    }

    /// Edit a draft. Submitted and decided points are immutable through this
    /// path.
    pub async fn update(
        store: &Store,
        id: DbId,
        input: UpdateDataPoint,
        user_id: DbId,
    ) -> Result<DataPoint, CoreError> {
        store.simulate_latency().await;
        validate_dto(&input)?;
        if let Some(period) = input.period.as_deref() {
            validate_period(period)?;
        }

        let mut data_points = store.data_points.write().await;
        let dp = data_points
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or(CoreError::NotFound { entity: "DataPoint", id })?;

        if !dp.status.is_editable() {
            return Err(CoreError::Conflict(format!(
                "Data point {id} is '{}' and cannot be edited",
                dp.status
            )));
        }

        if let Some(value) = input.value {
            dp.value = value;
        }
        if let Some(period) = input.period {
            dp.period = period;
        }
        if let Some(priority) = input.priority {
            dp.priority = priority;
        }
        if let Some(comment) = input.comment {
            dp.comment = Some(comment);
        }
        let now = Utc::now();
        dp.updated_at = now;
        dp.append_audit(action_types::UPDATE, user_id, now, None);

        Ok(dp.clone())
    }

    /// Hard-delete a data point. Admin-only at the API layer.
    pub async fn delete(store: &Store, id: DbId) -> Result<(), CoreError> {
        store.simulate_latency().await;

        let mut data_points = store.data_points.write().await;
        let before = data_points.len();
        data_points.retain(|d| d.id != id);
        if data_points.len() == before {
            return Err(CoreError::NotFound { entity: "DataPoint", id });
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Workflow transitions
    // -----------------------------------------------------------------------

    /// Submit a draft (or returned point) for review.
    pub async fn submit(store: &Store, id: DbId, user_id: DbId) -> Result<DataPoint, CoreError> {
        store.simulate_latency().await;
        let targets = indicator_targets(store).await;

        let mut data_points = store.data_points.write().await;
        let dp = data_points
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or(CoreError::NotFound { entity: "DataPoint", id })?;

        workflow::ensure_transition(dp.status, DataPointStatus::Submitted)?;

        let now = Utc::now();
        dp.status = DataPointStatus::Submitted;
        dp.submitted_by = user_id;
        dp.submitted_at = now;
        dp.updated_at = now;
        dp.quality_score = Some(score(dp, &targets));
        dp.append_audit(action_types::SUBMIT, user_id, now, None);

        Ok(dp.clone())
    }

    /// Claim a submission for review.
    pub async fn mark_in_review(
        store: &Store,
        id: DbId,
        reviewer: DbId,
    ) -> Result<DataPoint, CoreError> {
        store.simulate_latency().await;

        let mut data_points = store.data_points.write().await;
        let dp = data_points
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or(CoreError::NotFound { entity: "DataPoint", id })?;

        workflow::ensure_transition(dp.status, DataPointStatus::InReview)?;

        let now = Utc::now();
        dp.status = DataPointStatus::InReview;
        dp.updated_at = now;
        dp.append_audit(action_types::MARK_IN_REVIEW, reviewer, now, None);

        Ok(dp.clone())
    }

    /// Approve a pending submission. Irreversible.
    pub async fn approve(
        store: &Store,
        id: DbId,
        approver: DbId,
        feedback: Option<&str>,
    ) -> Result<DataPoint, CoreError> {
        store.simulate_latency().await;

        let mut data_points = store.data_points.write().await;
        let dp = data_points
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or(CoreError::NotFound { entity: "DataPoint", id })?;

        workflow::ensure_transition(dp.status, DataPointStatus::Approved)?;

        let now = Utc::now();
        dp.status = DataPointStatus::Approved;
        dp.approved_by = Some(approver);
        dp.approved_at = Some(now);
        dp.updated_at = now;
        dp.append_audit(action_types::APPROVE, approver, now, feedback);

        Ok(dp.clone())
    }

    /// Reject a pending submission, returning it to draft.
    ///
    /// Requires a non-empty reason; a refused rejection leaves the data
    /// point unchanged.
    pub async fn reject(
        store: &Store,
        id: DbId,
        rejector: DbId,
        reason: &str,
    ) -> Result<DataPoint, CoreError> {
        store.simulate_latency().await;
        workflow::validate_rejection_reason(reason)?;

        let mut data_points = store.data_points.write().await;
        let dp = data_points
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or(CoreError::NotFound { entity: "DataPoint", id })?;

        workflow::ensure_transition(dp.status, DataPointStatus::Draft)?;

        let now = Utc::now();
        dp.status = DataPointStatus::Draft;
        dp.rejected_by = Some(rejector);
        dp.rejected_at = Some(now);
        dp.rejection_reason = Some(reason.to_string());
        dp.rejection_count += 1;
        dp.updated_at = now;
        dp.append_audit(action_types::REJECT, rejector, now, Some(reason));

        Ok(dp.clone())
    }

    /// Send a pending submission back to its submitter for changes.
    ///
    /// Requires non-empty feedback; a refused request leaves the data point
    /// unchanged.
    pub async fn request_changes(
        store: &Store,
        id: DbId,
        reviewer: DbId,
        feedback: &str,
    ) -> Result<DataPoint, CoreError> {
        store.simulate_latency().await;
        workflow::validate_changes_feedback(feedback)?;

        let mut data_points = store.data_points.write().await;
        let dp = data_points
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or(CoreError::NotFound { entity: "DataPoint", id })?;

        workflow::ensure_transition(dp.status, DataPointStatus::Draft)?;

        let now = Utc::now();
        dp.status = DataPointStatus::Draft;
        dp.changes_requested_count += 1;
        dp.updated_at = now;
        dp.append_audit(action_types::REQUEST_CHANGES, reviewer, now, Some(feedback));

        Ok(dp.clone())
    }
}
