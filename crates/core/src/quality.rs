//! Quality scoring for submitted data points.
//!
//! A submission's quality score is computed once at submission time from
//! observable completeness signals and stored on the data point. Scores
//! are on a 0-100 scale.

use crate::period::validate_period;

/// Weight for a finite, non-negative value.
const WEIGHT_VALUE_SANE: f64 = 40.0;
/// Weight for a well-formed reporting period.
const WEIGHT_PERIOD_VALID: f64 = 20.0;
/// Weight for an explanatory comment.
const WEIGHT_HAS_COMMENT: f64 = 20.0;
/// Weight for a value within plausible range of the indicator target.
const WEIGHT_WITHIN_TARGET_RANGE: f64 = 20.0;

/// Values above `target * PLAUSIBLE_TARGET_MULTIPLE` are treated as outliers.
const PLAUSIBLE_TARGET_MULTIPLE: f64 = 1.5;

/// Inputs to quality scoring, flattened from the submission.
#[derive(Debug, Clone)]
pub struct QualityInputs<'a> {
    pub value: f64,
    pub period: &'a str,
    pub comment: Option<&'a str>,
    /// The indicator's target, when one is defined and non-zero.
    pub indicator_target: Option<f64>,
}

/// Compute the quality score for a submission.
pub fn quality_score(inputs: &QualityInputs<'_>) -> f64 {
    let mut score = 0.0;

    if inputs.value.is_finite() && inputs.value >= 0.0 {
        score += WEIGHT_VALUE_SANE;
    }

    if validate_period(inputs.period).is_ok() {
        score += WEIGHT_PERIOD_VALID;
    }

    if inputs.comment.is_some_and(|c| !c.trim().is_empty()) {
        score += WEIGHT_HAS_COMMENT;
    }

    match inputs.indicator_target {
        Some(target) if target > 0.0 => {
            if inputs.value <= target * PLAUSIBLE_TARGET_MULTIPLE {
                score += WEIGHT_WITHIN_TARGET_RANGE;
            }
        }
        // No usable target: grant half weight rather than penalizing the
        // submitter for missing reference data.
        _ => score += WEIGHT_WITHIN_TARGET_RANGE / 2.0,
    }

    score.clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_submission_scores_full_marks() {
        let score = quality_score(&QualityInputs {
            value: 120.0,
            period: "2024-Q4",
            comment: Some("district rollup, verified against field reports"),
            indicator_target: Some(150.0),
        });
        assert_eq!(score, 100.0);
    }

    #[test]
    fn missing_comment_costs_its_weight() {
        let score = quality_score(&QualityInputs {
            value: 120.0,
            period: "2024-Q4",
            comment: None,
            indicator_target: Some(150.0),
        });
        assert_eq!(score, 80.0);
    }

    #[test]
    fn blank_comment_counts_as_missing() {
        let with_blank = quality_score(&QualityInputs {
            value: 1.0,
            period: "2024-Q4",
            comment: Some("   "),
            indicator_target: None,
        });
        let without = quality_score(&QualityInputs {
            value: 1.0,
            period: "2024-Q4",
            comment: None,
            indicator_target: None,
        });
        assert_eq!(with_blank, without);
    }

    #[test]
    fn outlier_value_loses_target_weight() {
        let score = quality_score(&QualityInputs {
            value: 1000.0,
            period: "2024-Q4",
            comment: Some("note"),
            indicator_target: Some(100.0),
        });
        assert_eq!(score, 80.0);
    }

    #[test]
    fn negative_value_loses_sanity_weight() {
        let score = quality_score(&QualityInputs {
            value: -5.0,
            period: "2024-Q4",
            comment: Some("note"),
            indicator_target: Some(100.0),
        });
        assert_eq!(score, 60.0);
    }

    #[test]
    fn malformed_period_loses_period_weight() {
        let good = quality_score(&QualityInputs {
            value: 10.0,
            period: "2024-Q4",
            comment: None,
            indicator_target: None,
        });
        let bad = quality_score(&QualityInputs {
            value: 10.0,
            period: "Q4-2024",
            comment: None,
            indicator_target: None,
        });
        assert_eq!(good - bad, WEIGHT_PERIOD_VALID);
    }

    #[test]
    fn unknown_target_grants_half_weight() {
        let score = quality_score(&QualityInputs {
            value: 10.0,
            period: "2024-Q4",
            comment: Some("note"),
            indicator_target: None,
        });
        assert_eq!(score, 90.0);
    }
}
