//! Repository for users.

use melboard_core::error::CoreError;
use melboard_core::roles;
use melboard_core::types::DbId;

use crate::models::{CreateUser, UpdateUser, User};
use crate::repositories::validate_dto;
use crate::store::{next_id, Store};

/// CRUD operations for user reference data.
pub struct UserRepo;

impl UserRepo {
    pub async fn list(store: &Store) -> Vec<User> {
        store.simulate_latency().await;
        store.users.read().await.clone()
    }

    pub async fn find_by_id(store: &Store, id: DbId) -> Result<User, CoreError> {
        store.simulate_latency().await;
        store
            .users
            .read()
            .await
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or(CoreError::NotFound { entity: "User", id })
    }

    /// Active users allowed to review submissions for `country_id`: super
    /// admins, plus country managers scoped to that country or unscoped.
    pub async fn reviewers_for_country(store: &Store, country_id: DbId) -> Vec<User> {
        store.simulate_latency().await;
        store
            .users
            .read()
            .await
            .iter()
            .filter(|u| u.active && u.role.can_review())
            .filter(|u| roles::country_scope_allows(u.role, u.country_id, country_id))
            .cloned()
            .collect()
    }

    /// Create a user. Emails must be unique.
    pub async fn create(store: &Store, input: CreateUser) -> Result<User, CoreError> {
        store.simulate_latency().await;
        validate_dto(&input)?;

        let mut users = store.users.write().await;
        if users
            .iter()
            .any(|u| u.email.eq_ignore_ascii_case(&input.email))
        {
            return Err(CoreError::Conflict(format!(
                "Email '{}' already exists",
                input.email
            )));
        }

        let user = User {
            id: next_id(users.iter().map(|u| u.id)),
            name: input.name,
            email: input.email,
            role: input.role,
            country_id: input.country_id,
            active: input.active,
        };
        users.push(user.clone());
        Ok(user)
    }

    pub async fn update(store: &Store, id: DbId, input: UpdateUser) -> Result<User, CoreError> {
        store.simulate_latency().await;
        validate_dto(&input)?;

        let mut users = store.users.write().await;
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(CoreError::NotFound { entity: "User", id })?;

        if let Some(name) = input.name {
            user.name = name;
        }
        if let Some(email) = input.email {
            user.email = email;
        }
        if let Some(role) = input.role {
            user.role = role;
        }
        if let Some(country_id) = input.country_id {
            user.country_id = country_id;
        }
        if let Some(active) = input.active {
            user.active = active;
        }

        Ok(user.clone())
    }

    /// Delete a user. Refused while data points still name them as submitter.
    pub async fn delete(store: &Store, id: DbId) -> Result<(), CoreError> {
        store.simulate_latency().await;

        let referenced = store
            .data_points
            .read()
            .await
            .iter()
            .any(|d| d.submitted_by == id);
        if referenced {
            return Err(CoreError::Conflict(format!(
                "User {id} still has submissions; deactivate instead"
            )));
        }

        let mut users = store.users.write().await;
        let before = users.len();
        users.retain(|u| u.id != id);
        if users.len() == before {
            return Err(CoreError::NotFound { entity: "User", id });
        }
        Ok(())
    }
}
