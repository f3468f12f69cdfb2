//! Project entity model and DTOs.

use chrono::NaiveDate;
use melboard_core::types::DbId;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Lifecycle status of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Planned,
    Active,
    Completed,
    Suspended,
}

/// A program project within one country.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: DbId,
    pub country_id: DbId,
    pub name: String,
    pub status: ProjectStatus,
    pub budget: f64,
    pub target_reach: i64,
    pub current_reach: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// DTO for creating a project.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProject {
    pub country_id: DbId,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub status: ProjectStatus,
    #[validate(range(min = 0.0))]
    pub budget: f64,
    #[validate(range(min = 0))]
    pub target_reach: i64,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub current_reach: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// DTO for updating a project. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProject {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub status: Option<ProjectStatus>,
    #[validate(range(min = 0.0))]
    pub budget: Option<f64>,
    #[validate(range(min = 0))]
    pub target_reach: Option<i64>,
    #[validate(range(min = 0))]
    pub current_reach: Option<i64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}
