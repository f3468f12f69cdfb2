//! Repository for projects.

use melboard_core::error::CoreError;
use melboard_core::types::DbId;

use crate::models::{CreateProject, Project, UpdateProject};
use crate::repositories::validate_dto;
use crate::store::{next_id, Store};

/// CRUD operations for project reference data.
pub struct ProjectRepo;

impl ProjectRepo {
    /// List projects, optionally narrowed to one country.
    pub async fn list(store: &Store, country_id: Option<DbId>) -> Vec<Project> {
        store.simulate_latency().await;
        store
            .projects
            .read()
            .await
            .iter()
            .filter(|p| country_id.is_none_or(|c| p.country_id == c))
            .cloned()
            .collect()
    }

    pub async fn find_by_id(store: &Store, id: DbId) -> Result<Project, CoreError> {
        store.simulate_latency().await;
        store
            .projects
            .read()
            .await
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(CoreError::NotFound { entity: "Project", id })
    }

    /// Create a project. The referenced country must exist and the date
    /// range must be ordered.
    pub async fn create(store: &Store, input: CreateProject) -> Result<Project, CoreError> {
        store.simulate_latency().await;
        validate_dto(&input)?;

        if input.end_date < input.start_date {
            return Err(CoreError::Validation(
                "Project end date precedes start date".to_string(),
            ));
        }

        let country_exists = store
            .countries
            .read()
            .await
            .iter()
            .any(|c| c.id == input.country_id);
        if !country_exists {
            return Err(CoreError::Validation(format!(
                "Unknown country id {}",
                input.country_id
            )));
        }

        let mut projects = store.projects.write().await;
        let project = Project {
            id: next_id(projects.iter().map(|p| p.id)),
            country_id: input.country_id,
            name: input.name,
            status: input.status,
            budget: input.budget,
            target_reach: input.target_reach,
            current_reach: input.current_reach,
            start_date: input.start_date,
            end_date: input.end_date,
        };
        projects.push(project.clone());
        Ok(project)
    }

    pub async fn update(
        store: &Store,
        id: DbId,
        input: UpdateProject,
    ) -> Result<Project, CoreError> {
        store.simulate_latency().await;
        validate_dto(&input)?;

        let mut projects = store.projects.write().await;
        let project = projects
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(CoreError::NotFound { entity: "Project", id })?;

        if let Some(name) = input.name {
            project.name = name;
        }
        if let Some(status) = input.status {
            project.status = status;
        }
        if let Some(budget) = input.budget {
            project.budget = budget;
        }
        if let Some(target) = input.target_reach {
            project.target_reach = target;
        }
        if let Some(current) = input.current_reach {
            project.current_reach = current;
        }
        if let Some(start) = input.start_date {
            project.start_date = start;
        }
        if let Some(end) = input.end_date {
            project.end_date = end;
        }
        if project.end_date < project.start_date {
            return Err(CoreError::Validation(
                "Project end date precedes start date".to_string(),
            ));
        }

        Ok(project.clone())
    }

    /// Delete a project. Refused while data points still reference it.
    pub async fn delete(store: &Store, id: DbId) -> Result<(), CoreError> {
        store.simulate_latency().await;

        let referenced = store
            .data_points
            .read()
            .await
            .iter()
            .any(|d| d.project_id == id);
        if referenced {
            return Err(CoreError::Conflict(format!(
                "Project {id} still has data points"
            )));
        }

        let mut projects = store.projects.write().await;
        let before = projects.len();
        projects.retain(|p| p.id != id);
        if projects.len() == before {
            return Err(CoreError::NotFound { entity: "Project", id });
        }
        Ok(())
    }
}
