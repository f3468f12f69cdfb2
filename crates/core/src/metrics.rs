//! Dashboard KPI aggregation.
//!
//! Pure aggregation over in-memory slices: the store layer flattens its
//! entities into [`MetricPoint`] / [`ProjectFacts`] inputs and everything
//! here is computed fresh on every call. Metrics are derived views, never
//! stored.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::types::DbId;
use crate::workflow::DataPointStatus;

// ---------------------------------------------------------------------------
// Well-known indicators and periods
// ---------------------------------------------------------------------------

/// People trained.
pub const INDICATOR_PEOPLE_TRAINED: DbId = 1;
/// Women participants.
pub const INDICATOR_WOMEN_PARTICIPANTS: DbId = 2;
/// Loans disbursed.
pub const INDICATOR_LOANS_DISBURSED: DbId = 4;
/// Training sessions held.
pub const INDICATOR_TRAINING_SESSIONS: DbId = 7;

/// The reporting period headline KPIs are computed over.
pub const CURRENT_PERIOD: &str = "2024-Q4";

/// Historical periods used for trend and growth computation, oldest first.
pub const HISTORICAL_PERIODS: &[&str] = &["2024-Q1", "2024-Q2", "2024-Q3", "2024-Q4"];

/// Minimum growth assumptions for the three projected periods.
pub const PROJECTION_FLOORS: [f64; 3] = [0.02, 0.03, 0.05];

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// Flattened data point fed into aggregation.
#[derive(Debug, Clone)]
pub struct MetricPoint {
    pub indicator_id: DbId,
    pub country_id: DbId,
    pub value: f64,
    pub period: String,
    pub status: DataPointStatus,
    pub quality_score: Option<f64>,
}

impl MetricPoint {
    fn counts(&self, country: Option<DbId>) -> bool {
        self.status == DataPointStatus::Approved
            && country.is_none_or(|c| self.country_id == c)
    }
}

/// Flattened project fed into aggregation.
#[derive(Debug, Clone)]
pub struct ProjectFacts {
    pub country_id: DbId,
    pub active: bool,
    pub budget: f64,
    pub target_reach: i64,
    pub current_reach: i64,
}

/// Indicator target lookup input.
#[derive(Debug, Clone)]
pub struct IndicatorFacts {
    pub id: DbId,
    pub target: f64,
}

/// Country name lookup input for the per-country breakdown.
#[derive(Debug, Clone)]
pub struct CountryFacts {
    pub id: DbId,
    pub name: String,
}

// ---------------------------------------------------------------------------
// Outputs
// ---------------------------------------------------------------------------

/// Flat KPI object consumed directly by the dashboard endpoints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardMetrics {
    pub period: String,
    pub total_people_reached: f64,
    pub women_participants: f64,
    pub female_participation_rate: f64,
    pub loans_disbursed: f64,
    pub training_sessions: f64,
    pub active_projects: usize,
    pub total_budget: f64,
    pub reach_achievement_pct: f64,
    pub target_achievement_pct: f64,
    pub avg_quality_score: f64,
    pub avg_growth_rate: f64,
    pub projected_people_reached: [f64; 3],
}

/// One period's summed value, for trend charts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodSum {
    pub period: String,
    pub value: f64,
}

/// Per-country participation breakdown row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryMetrics {
    pub country_id: DbId,
    pub country_name: String,
    pub people_reached: f64,
    pub women_participants: f64,
    pub female_participation_rate: f64,
}

// ---------------------------------------------------------------------------
// Building blocks
// ---------------------------------------------------------------------------

/// Percentage `part / whole * 100`, 0 when the denominator is 0.
pub fn pct(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        0.0
    } else {
        part / whole * 100.0
    }
}

/// Sum of approved values for one indicator in one period.
pub fn period_sum(
    points: &[MetricPoint],
    indicator_id: DbId,
    period: &str,
    country: Option<DbId>,
) -> f64 {
    points
        .iter()
        .filter(|p| p.counts(country) && p.indicator_id == indicator_id && p.period == period)
        .map(|p| p.value)
        .sum()
}

/// Average fractional quarter-over-quarter change across a value series.
///
/// Steps with a zero base are skipped; a series with no usable steps
/// yields 0.
pub fn growth_rate(series: &[f64]) -> f64 {
    let rates: Vec<f64> = series
        .windows(2)
        .filter(|w| w[0] != 0.0)
        .map(|w| (w[1] - w[0]) / w[0])
        .collect();
    if rates.is_empty() {
        0.0
    } else {
        rates.iter().sum::<f64>() / rates.len() as f64
    }
}

/// Project a value three periods forward, compounding
/// `next = prev * (1 + max(avg_growth, floor))` with the configured floors.
pub fn project_forward(last: f64, avg_growth: f64) -> [f64; 3] {
    let mut out = [0.0; 3];
    let mut prev = last;
    for (slot, floor) in out.iter_mut().zip(PROJECTION_FLOORS) {
        prev *= 1.0 + avg_growth.max(floor);
        *slot = prev;
    }
    out
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Compute the headline dashboard KPIs.
///
/// Only approved data points participate. `country` narrows everything to
/// one country; a filter that matches nothing produces zeroed KPIs rather
/// than an error.
pub fn compute(
    points: &[MetricPoint],
    projects: &[ProjectFacts],
    indicators: &[IndicatorFacts],
    country: Option<DbId>,
) -> DashboardMetrics {
    let sum = |indicator_id| period_sum(points, indicator_id, CURRENT_PERIOD, country);

    let total_people_reached = sum(INDICATOR_PEOPLE_TRAINED);
    let women_participants = sum(INDICATOR_WOMEN_PARTICIPANTS);
    let loans_disbursed = sum(INDICATOR_LOANS_DISBURSED);
    let training_sessions = sum(INDICATOR_TRAINING_SESSIONS);

    let in_scope = |p: &&ProjectFacts| country.is_none_or(|c| p.country_id == c);
    let active_projects = projects.iter().filter(in_scope).filter(|p| p.active).count();
    let total_budget: f64 = projects.iter().filter(in_scope).map(|p| p.budget).sum();
    let target_reach: i64 = projects.iter().filter(in_scope).map(|p| p.target_reach).sum();
    let current_reach: i64 = projects.iter().filter(in_scope).map(|p| p.current_reach).sum();

    let quality_scores: Vec<f64> = points
        .iter()
        .filter(|p| p.counts(country))
        .filter_map(|p| p.quality_score)
        .collect();
    let avg_quality_score = if quality_scores.is_empty() {
        0.0
    } else {
        quality_scores.iter().sum::<f64>() / quality_scores.len() as f64
    };

    let people_target = indicators
        .iter()
        .find(|i| i.id == INDICATOR_PEOPLE_TRAINED)
        .map(|i| i.target)
        .unwrap_or(0.0);

    let series: Vec<f64> = HISTORICAL_PERIODS
        .iter()
        .map(|period| period_sum(points, INDICATOR_PEOPLE_TRAINED, period, country))
        .collect();
    let avg_growth_rate = growth_rate(&series);

    DashboardMetrics {
        period: CURRENT_PERIOD.to_string(),
        total_people_reached,
        women_participants,
        female_participation_rate: pct(women_participants, total_people_reached),
        loans_disbursed,
        training_sessions,
        active_projects,
        total_budget,
        reach_achievement_pct: pct(current_reach as f64, target_reach as f64),
        target_achievement_pct: pct(total_people_reached, people_target),
        avg_quality_score,
        avg_growth_rate,
        projected_people_reached: project_forward(total_people_reached, avg_growth_rate),
    }
}

/// Per-period sums for one indicator, over the fixed historical window.
pub fn trend(
    points: &[MetricPoint],
    indicator_id: DbId,
    country: Option<DbId>,
) -> Vec<PeriodSum> {
    HISTORICAL_PERIODS
        .iter()
        .map(|period| PeriodSum {
            period: period.to_string(),
            value: period_sum(points, indicator_id, period, country),
        })
        .collect()
}

/// Current-period participation broken down per country.
///
/// Countries with no approved data still appear, zeroed, so the dashboard
/// table stays complete.
pub fn country_breakdown(
    points: &[MetricPoint],
    countries: &[CountryFacts],
) -> Vec<CountryMetrics> {
    let mut people: BTreeMap<DbId, f64> = BTreeMap::new();
    let mut women: BTreeMap<DbId, f64> = BTreeMap::new();

    for p in points {
        if !p.counts(None) || p.period != CURRENT_PERIOD {
            continue;
        }
        match p.indicator_id {
            INDICATOR_PEOPLE_TRAINED => *people.entry(p.country_id).or_default() += p.value,
            INDICATOR_WOMEN_PARTICIPANTS => *women.entry(p.country_id).or_default() += p.value,
            _ => {}
        }
    }

    countries
        .iter()
        .map(|c| {
            let reached = people.get(&c.id).copied().unwrap_or(0.0);
            let w = women.get(&c.id).copied().unwrap_or(0.0);
            CountryMetrics {
                country_id: c.id,
                country_name: c.name.clone(),
                people_reached: reached,
                women_participants: w,
                female_participation_rate: pct(w, reached),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(indicator_id: DbId, value: f64, period: &str, status: DataPointStatus) -> MetricPoint {
        MetricPoint {
            indicator_id,
            country_id: 1,
            value,
            period: period.to_string(),
            status,
            quality_score: None,
        }
    }

    fn approved(indicator_id: DbId, value: f64, period: &str) -> MetricPoint {
        point(indicator_id, value, period, DataPointStatus::Approved)
    }

    #[test]
    fn sums_and_participation_rate() {
        let points = vec![
            approved(INDICATOR_PEOPLE_TRAINED, 100.0, CURRENT_PERIOD),
            approved(INDICATOR_WOMEN_PARTICIPANTS, 40.0, CURRENT_PERIOD),
        ];
        let m = compute(&points, &[], &[], None);
        assert_eq!(m.total_people_reached, 100.0);
        assert_eq!(m.women_participants, 40.0);
        assert_eq!(m.female_participation_rate, 40.0);
    }

    #[test]
    fn unapproved_points_are_excluded() {
        let points = vec![
            approved(INDICATOR_PEOPLE_TRAINED, 100.0, CURRENT_PERIOD),
            point(INDICATOR_PEOPLE_TRAINED, 50.0, CURRENT_PERIOD, DataPointStatus::Submitted),
            point(INDICATOR_PEOPLE_TRAINED, 25.0, CURRENT_PERIOD, DataPointStatus::Draft),
        ];
        let m = compute(&points, &[], &[], None);
        assert_eq!(m.total_people_reached, 100.0);
    }

    #[test]
    fn other_periods_do_not_leak_into_headline() {
        let points = vec![
            approved(INDICATOR_PEOPLE_TRAINED, 100.0, CURRENT_PERIOD),
            approved(INDICATOR_PEOPLE_TRAINED, 999.0, "2024-Q1"),
        ];
        let m = compute(&points, &[], &[], None);
        assert_eq!(m.total_people_reached, 100.0);
    }

    #[test]
    fn zero_total_guards_participation_rate() {
        let points = vec![approved(INDICATOR_WOMEN_PARTICIPANTS, 40.0, CURRENT_PERIOD)];
        let m = compute(&points, &[], &[], None);
        assert_eq!(m.female_participation_rate, 0.0);
    }

    #[test]
    fn growth_rate_matches_reference_series() {
        assert_eq!(growth_rate(&[100.0, 150.0, 225.0]), 0.5);
    }

    #[test]
    fn growth_rate_skips_zero_bases() {
        // Only the 100 -> 150 step is usable.
        assert_eq!(growth_rate(&[0.0, 100.0, 150.0]), 0.5);
        assert_eq!(growth_rate(&[0.0, 0.0]), 0.0);
        assert_eq!(growth_rate(&[]), 0.0);
        assert_eq!(growth_rate(&[42.0]), 0.0);
    }

    #[test]
    fn projections_compound_with_floors() {
        // Growth below every floor: the floors drive the projection.
        let p = project_forward(100.0, 0.0);
        assert!((p[0] - 102.0).abs() < 1e-9);
        assert!((p[1] - 102.0 * 1.03).abs() < 1e-9);
        assert!((p[2] - 102.0 * 1.03 * 1.05).abs() < 1e-9);

        // Growth above every floor: growth drives the projection.
        let p = project_forward(100.0, 0.5);
        assert!((p[0] - 150.0).abs() < 1e-9);
        assert!((p[1] - 225.0).abs() < 1e-9);
        assert!((p[2] - 337.5).abs() < 1e-9);
    }

    #[test]
    fn country_filter_narrows_everything() {
        let mut other = approved(INDICATOR_PEOPLE_TRAINED, 500.0, CURRENT_PERIOD);
        other.country_id = 2;
        let points = vec![approved(INDICATOR_PEOPLE_TRAINED, 100.0, CURRENT_PERIOD), other];

        let m = compute(&points, &[], &[], Some(1));
        assert_eq!(m.total_people_reached, 100.0);

        // A filter matching nothing yields zeroes, not an error.
        let m = compute(&points, &[], &[], Some(99));
        assert_eq!(m.total_people_reached, 0.0);
    }

    #[test]
    fn project_and_target_figures() {
        let projects = vec![
            ProjectFacts { country_id: 1, active: true, budget: 1000.0, target_reach: 200, current_reach: 100 },
            ProjectFacts { country_id: 1, active: false, budget: 500.0, target_reach: 100, current_reach: 100 },
        ];
        let indicators = vec![IndicatorFacts { id: INDICATOR_PEOPLE_TRAINED, target: 400.0 }];
        let points = vec![approved(INDICATOR_PEOPLE_TRAINED, 100.0, CURRENT_PERIOD)];

        let m = compute(&points, &projects, &indicators, None);
        assert_eq!(m.active_projects, 1);
        assert_eq!(m.total_budget, 1500.0);
        assert!((m.reach_achievement_pct - 200.0 / 300.0 * 100.0).abs() < 1e-9);
        assert_eq!(m.target_achievement_pct, 25.0);
    }

    #[test]
    fn quality_average_over_approved_only() {
        let mut a = approved(INDICATOR_PEOPLE_TRAINED, 10.0, CURRENT_PERIOD);
        a.quality_score = Some(80.0);
        let mut b = approved(INDICATOR_LOANS_DISBURSED, 10.0, "2024-Q2");
        b.quality_score = Some(60.0);
        let mut c = point(INDICATOR_PEOPLE_TRAINED, 10.0, CURRENT_PERIOD, DataPointStatus::Submitted);
        c.quality_score = Some(0.0);

        let m = compute(&[a, b, c], &[], &[], None);
        assert_eq!(m.avg_quality_score, 70.0);
    }

    #[test]
    fn trend_covers_all_historical_periods() {
        let points = vec![
            approved(INDICATOR_PEOPLE_TRAINED, 100.0, "2024-Q1"),
            approved(INDICATOR_PEOPLE_TRAINED, 150.0, "2024-Q2"),
        ];
        let t = trend(&points, INDICATOR_PEOPLE_TRAINED, None);
        assert_eq!(t.len(), HISTORICAL_PERIODS.len());
        assert_eq!(t[0].value, 100.0);
        assert_eq!(t[1].value, 150.0);
        assert_eq!(t[2].value, 0.0);
    }

    #[test]
    fn country_breakdown_zeroes_missing_countries() {
        let countries = vec![
            CountryFacts { id: 1, name: "Kenya".into() },
            CountryFacts { id: 2, name: "Uganda".into() },
        ];
        let points = vec![
            approved(INDICATOR_PEOPLE_TRAINED, 100.0, CURRENT_PERIOD),
            approved(INDICATOR_WOMEN_PARTICIPANTS, 55.0, CURRENT_PERIOD),
        ];
        let rows = country_breakdown(&points, &countries);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].people_reached, 100.0);
        assert_eq!(rows[0].female_participation_rate, 55.0);
        assert_eq!(rows[1].people_reached, 0.0);
        assert_eq!(rows[1].female_participation_rate, 0.0);
    }
}
