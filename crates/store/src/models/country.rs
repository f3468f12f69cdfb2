//! Country entity model and DTOs.

use melboard_core::types::DbId;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Operational status of a country program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountryStatus {
    Active,
    Inactive,
}

/// A country program. Reference data maintained by admins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Country {
    pub id: DbId,
    pub name: String,
    /// ISO 3166-1 alpha-2 code.
    pub code: String,
    pub status: CountryStatus,
    pub population: i64,
    pub total_participants: i64,
    pub female_participants: i64,
}

/// DTO for creating a country.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCountry {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(equal = 2))]
    pub code: String,
    pub status: CountryStatus,
    #[validate(range(min = 0))]
    pub population: i64,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub total_participants: i64,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub female_participants: i64,
}

/// DTO for updating a country. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateCountry {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(equal = 2))]
    pub code: Option<String>,
    pub status: Option<CountryStatus>,
    #[validate(range(min = 0))]
    pub population: Option<i64>,
    #[validate(range(min = 0))]
    pub total_participants: Option<i64>,
    #[validate(range(min = 0))]
    pub female_participants: Option<i64>,
}
