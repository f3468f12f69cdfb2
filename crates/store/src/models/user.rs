//! User entity model and DTOs.

use melboard_core::roles::Role;
use melboard_core::types::DbId;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A platform user. Identity is reference data; there are no credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub role: Role,
    /// Country scoping for country managers and project officers.
    pub country_id: Option<DbId>,
    pub active: bool,
}

/// DTO for creating a user.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUser {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub role: Role,
    pub country_id: Option<DbId>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// DTO for updating a user. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateUser {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub role: Option<Role>,
    /// `Some(None)` clears the country scope.
    #[serde(default, with = "double_option")]
    pub country_id: Option<Option<DbId>>,
    pub active: Option<bool>,
}

/// Distinguishes an absent field from an explicit `null` for clearing.
mod double_option {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(de).map(Some)
    }
}
