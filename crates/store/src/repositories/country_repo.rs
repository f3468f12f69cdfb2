//! Repository for countries.

use melboard_core::error::CoreError;
use melboard_core::types::DbId;

use crate::models::{Country, CreateCountry, UpdateCountry};
use crate::repositories::validate_dto;
use crate::store::{next_id, Store};

/// CRUD operations for country reference data.
pub struct CountryRepo;

impl CountryRepo {
    /// List all countries.
    pub async fn list(store: &Store) -> Vec<Country> {
        store.simulate_latency().await;
        store.countries.read().await.clone()
    }

    pub async fn find_by_id(store: &Store, id: DbId) -> Result<Country, CoreError> {
        store.simulate_latency().await;
        store
            .countries
            .read()
            .await
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or(CoreError::NotFound { entity: "Country", id })
    }

    /// Create a country. Codes are normalized to uppercase and must be unique.
    pub async fn create(store: &Store, input: CreateCountry) -> Result<Country, CoreError> {
        store.simulate_latency().await;
        validate_dto(&input)?;

        let mut countries = store.countries.write().await;
        if countries
            .iter()
            .any(|c| c.code.eq_ignore_ascii_case(&input.code))
        {
            return Err(CoreError::Conflict(format!(
                "Country code '{}' already exists",
                input.code
            )));
        }

        let country = Country {
            id: next_id(countries.iter().map(|c| c.id)),
            name: input.name,
            code: input.code.to_uppercase(),
            status: input.status,
            population: input.population,
            total_participants: input.total_participants,
            female_participants: input.female_participants,
        };
        countries.push(country.clone());
        Ok(country)
    }

    pub async fn update(
        store: &Store,
        id: DbId,
        input: UpdateCountry,
    ) -> Result<Country, CoreError> {
        store.simulate_latency().await;
        validate_dto(&input)?;

        let mut countries = store.countries.write().await;
        let country = countries
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(CoreError::NotFound { entity: "Country", id })?;

        if let Some(name) = input.name {
            country.name = name;
        }
        if let Some(code) = input.code {
            country.code = code.to_uppercase();
        }
        if let Some(status) = input.status {
            country.status = status;
        }
        if let Some(population) = input.population {
            country.population = population;
        }
        if let Some(total) = input.total_participants {
            country.total_participants = total;
        }
        if let Some(female) = input.female_participants {
            country.female_participants = female;
        }

        Ok(country.clone())
    }

    /// Delete a country. Refused while projects still reference it.
    pub async fn delete(store: &Store, id: DbId) -> Result<(), CoreError> {
        store.simulate_latency().await;

        let referenced = store
            .projects
            .read()
            .await
            .iter()
            .any(|p| p.country_id == id);
        if referenced {
            return Err(CoreError::Conflict(format!(
                "Country {id} still has projects"
            )));
        }

        let mut countries = store.countries.write().await;
        let before = countries.len();
        countries.retain(|c| c.id != id);
        if countries.len() == before {
            return Err(CoreError::NotFound { entity: "Country", id });
        }
        Ok(())
    }
}
