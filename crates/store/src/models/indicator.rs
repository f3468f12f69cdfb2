//! Indicator entity model and DTOs.

use melboard_core::types::DbId;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// How an indicator's values are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorValueType {
    Number,
    Currency,
    Percentage,
}

/// A measurable metric definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Indicator {
    pub id: DbId,
    pub name: String,
    pub unit: String,
    pub value_type: IndicatorValueType,
    pub target: f64,
    pub baseline: f64,
}

/// DTO for creating an indicator.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateIndicator {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 50))]
    pub unit: String,
    pub value_type: IndicatorValueType,
    #[validate(range(min = 0.0))]
    pub target: f64,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub baseline: f64,
}

/// DTO for updating an indicator. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateIndicator {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub unit: Option<String>,
    pub value_type: Option<IndicatorValueType>,
    #[validate(range(min = 0.0))]
    pub target: Option<f64>,
    #[validate(range(min = 0.0))]
    pub baseline: Option<f64>,
}
