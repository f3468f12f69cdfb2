//! Approval workflow state machine for data points.
//!
//! The workflow graph is fixed:
//!
//! ```text
//! draft -> submitted -> in_review -> { approved | rejected -> draft | changes_requested -> draft }
//! ```
//!
//! Decisions (approve, reject, request changes) are accepted from both
//! `submitted` and `in_review`; marking in-review is the explicit claim
//! step, not a precondition. `approved` is terminal.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Lifecycle status of a data point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataPointStatus {
    Draft,
    Submitted,
    InReview,
    Approved,
    Rejected,
    ChangesRequested,
}

impl DataPointStatus {
    /// Stable string form matching the wire/fixture representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            DataPointStatus::Draft => "draft",
            DataPointStatus::Submitted => "submitted",
            DataPointStatus::InReview => "in_review",
            DataPointStatus::Approved => "approved",
            DataPointStatus::Rejected => "rejected",
            DataPointStatus::ChangesRequested => "changes_requested",
        }
    }

    /// Whether the data point is waiting on a reviewer decision.
    pub fn is_pending_review(&self) -> bool {
        matches!(self, DataPointStatus::Submitted | DataPointStatus::InReview)
    }

    /// Whether the data point may still be edited by its submitter.
    pub fn is_editable(&self) -> bool {
        matches!(self, DataPointStatus::Draft)
    }

    /// Whether the status is terminal (no outgoing transitions).
    pub fn is_terminal(&self) -> bool {
        matches!(self, DataPointStatus::Approved)
    }
}

impl std::fmt::Display for DataPointStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DataPointStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(DataPointStatus::Draft),
            "submitted" => Ok(DataPointStatus::Submitted),
            "in_review" => Ok(DataPointStatus::InReview),
            "approved" => Ok(DataPointStatus::Approved),
            "rejected" => Ok(DataPointStatus::Rejected),
            "changes_requested" => Ok(DataPointStatus::ChangesRequested),
            other => Err(CoreError::Validation(format!(
                "Invalid data point status '{other}'"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

/// Review priority of a submission. Ordering is Low < Normal < High so
/// priority can be used directly as a sort key.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Normal,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Normal => "normal",
            Priority::High => "high",
        }
    }
}

// ---------------------------------------------------------------------------
// Transition table
// ---------------------------------------------------------------------------

/// Whether a status transition is permitted by the workflow graph.
///
/// `rejected` and `changes_requested` are accepted as stored statuses (they
/// occur in imported data) and feed back into `draft`/`submitted` the same
/// way a freshly returned point does.
pub fn can_transition(from: DataPointStatus, to: DataPointStatus) -> bool {
    use DataPointStatus::*;
    matches!(
        (from, to),
        (Draft, Submitted)
            | (Submitted, InReview)
            | (Submitted, Approved)
            | (Submitted, Draft)
            | (InReview, Approved)
            | (InReview, Draft)
            | (Rejected, Draft)
            | (Rejected, Submitted)
            | (ChangesRequested, Draft)
            | (ChangesRequested, Submitted)
    )
}

/// Validate a transition, producing a [`CoreError::Conflict`] when the
/// workflow graph does not allow it.
pub fn ensure_transition(
    from: DataPointStatus,
    to: DataPointStatus,
) -> Result<(), CoreError> {
    if can_transition(from, to) {
        Ok(())
    } else {
        Err(CoreError::Conflict(format!(
            "Cannot transition data point from '{from}' to '{to}'"
        )))
    }
}

// ---------------------------------------------------------------------------
// Decision input validation
// ---------------------------------------------------------------------------

/// A rejection must carry a non-empty reason.
pub fn validate_rejection_reason(reason: &str) -> Result<(), CoreError> {
    if reason.trim().is_empty() {
        return Err(CoreError::Validation(
            "A rejection requires a non-empty reason".to_string(),
        ));
    }
    Ok(())
}

/// A change request must carry non-empty feedback for the submitter.
pub fn validate_changes_feedback(feedback: &str) -> Result<(), CoreError> {
    if feedback.trim().is_empty() {
        return Err(CoreError::Validation(
            "A change request requires non-empty feedback".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use DataPointStatus::*;

    #[test]
    fn happy_path_transitions_allowed() {
        assert!(can_transition(Draft, Submitted));
        assert!(can_transition(Submitted, InReview));
        assert!(can_transition(InReview, Approved));
    }

    #[test]
    fn decisions_allowed_from_submitted() {
        assert!(can_transition(Submitted, Approved));
        assert!(can_transition(Submitted, Draft));
    }

    #[test]
    fn approved_is_terminal() {
        for to in [Draft, Submitted, InReview, Approved, Rejected, ChangesRequested] {
            assert!(!can_transition(Approved, to), "approved -> {to} must be refused");
        }
        assert!(Approved.is_terminal());
    }

    #[test]
    fn draft_cannot_skip_submission() {
        assert!(!can_transition(Draft, InReview));
        assert!(!can_transition(Draft, Approved));
    }

    #[test]
    fn returned_points_can_resubmit() {
        assert!(can_transition(Rejected, Submitted));
        assert!(can_transition(ChangesRequested, Submitted));
    }

    #[test]
    fn ensure_transition_reports_conflict() {
        let err = ensure_transition(Approved, Draft).unwrap_err();
        assert!(err.to_string().contains("Cannot transition"));
    }

    #[test]
    fn empty_rejection_reason_refused() {
        assert!(validate_rejection_reason("").is_err());
        assert!(validate_rejection_reason("   ").is_err());
        assert!(validate_rejection_reason("value looks implausible").is_ok());
    }

    #[test]
    fn empty_changes_feedback_refused() {
        assert!(validate_changes_feedback("\t").is_err());
        assert!(validate_changes_feedback("please split by district").is_ok());
    }

    #[test]
    fn status_round_trips_through_strings() {
        for status in [Draft, Submitted, InReview, Approved, Rejected, ChangesRequested] {
            assert_eq!(status.as_str().parse::<DataPointStatus>().unwrap(), status);
        }
        assert!("unknown".parse::<DataPointStatus>().is_err());
    }

    #[test]
    fn pending_review_covers_queue_statuses() {
        assert!(Submitted.is_pending_review());
        assert!(InReview.is_pending_review());
        assert!(!Draft.is_pending_review());
        assert!(!Approved.is_pending_review());
    }

    #[test]
    fn priority_orders_low_to_high() {
        assert!(Priority::Low < Priority::Normal);
        assert!(Priority::Normal < Priority::High);
    }
}
