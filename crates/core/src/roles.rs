//! User roles and permission checks.
//!
//! Roles are a fixed hierarchy: super admins manage everything, country
//! managers review submissions for their country, project officers submit
//! data, executives and external users are read-only.

use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// A user's role on the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    SuperAdmin,
    CountryManager,
    ProjectOfficer,
    Executive,
    External,
}

impl Role {
    /// Stable string form matching the wire/fixture representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "super_admin",
            Role::CountryManager => "country_manager",
            Role::ProjectOfficer => "project_officer",
            Role::Executive => "executive",
            Role::External => "external",
        }
    }

    /// Whether this role may review submissions (approve, reject, request changes).
    pub fn can_review(&self) -> bool {
        matches!(self, Role::SuperAdmin | Role::CountryManager)
    }

    /// Whether this role may submit data points.
    pub fn can_submit(&self) -> bool {
        matches!(
            self,
            Role::SuperAdmin | Role::CountryManager | Role::ProjectOfficer
        )
    }

    /// Whether this role may manage reference data (countries, projects,
    /// indicators, users).
    pub fn can_manage_reference_data(&self) -> bool {
        matches!(self, Role::SuperAdmin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check whether a user scoped to `user_country` may act on data belonging
/// to `target_country`.
///
/// Users with no country scope (and super admins regardless of scope) may
/// act everywhere.
pub fn country_scope_allows(
    role: Role,
    user_country: Option<DbId>,
    target_country: DbId,
) -> bool {
    if role == Role::SuperAdmin {
        return true;
    }
    match user_country {
        Some(scoped) => scoped == target_country,
        None => true,
    }
}
