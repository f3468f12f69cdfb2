//! Repository for indicators.

use melboard_core::error::CoreError;
use melboard_core::types::DbId;

use crate::models::{CreateIndicator, Indicator, UpdateIndicator};
use crate::repositories::validate_dto;
use crate::store::{next_id, Store};

/// CRUD operations for indicator reference data.
pub struct IndicatorRepo;

impl IndicatorRepo {
    pub async fn list(store: &Store) -> Vec<Indicator> {
        store.simulate_latency().await;
        store.indicators.read().await.clone()
    }

    pub async fn find_by_id(store: &Store, id: DbId) -> Result<Indicator, CoreError> {
        store.simulate_latency().await;
        store
            .indicators
            .read()
            .await
            .iter()
            .find(|i| i.id == id)
            .cloned()
            .ok_or(CoreError::NotFound { entity: "Indicator", id })
    }

    pub async fn create(store: &Store, input: CreateIndicator) -> Result<Indicator, CoreError> {
        store.simulate_latency().await;
        validate_dto(&input)?;

        let mut indicators = store.indicators.write().await;
        let indicator = Indicator {
            id: next_id(indicators.iter().map(|i| i.id)),
            name: input.name,
            unit: input.unit,
            value_type: input.value_type,
            target: input.target,
            baseline: input.baseline,
        };
        indicators.push(indicator.clone());
        Ok(indicator)
    }

    pub async fn update(
        store: &Store,
        id: DbId,
        input: UpdateIndicator,
    ) -> Result<Indicator, CoreError> {
        store.simulate_latency().await;
        validate_dto(&input)?;

        let mut indicators = store.indicators.write().await;
        let indicator = indicators
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or(CoreError::NotFound { entity: "Indicator", id })?;

        if let Some(name) = input.name {
            indicator.name = name;
        }
        if let Some(unit) = input.unit {
            indicator.unit = unit;
        }
        if let Some(value_type) = input.value_type {
            indicator.value_type = value_type;
        }
        if let Some(target) = input.target {
            indicator.target = target;
        }
        if let Some(baseline) = input.baseline {
            indicator.baseline = baseline;
        }

        Ok(indicator.clone())
    }

    /// Delete an indicator. Refused while data points still reference it.
    pub async fn delete(store: &Store, id: DbId) -> Result<(), CoreError> {
        store.simulate_latency().await;

        let referenced = store
            .data_points
            .read()
            .await
            .iter()
            .any(|d| d.indicator_id == id);
        if referenced {
            return Err(CoreError::Conflict(format!(
                "Indicator {id} still has data points"
            )));
        }

        let mut indicators = store.indicators.write().await;
        let before = indicators.len();
        indicators.retain(|i| i.id != id);
        if indicators.len() == before {
            return Err(CoreError::NotFound { entity: "Indicator", id });
        }
        Ok(())
    }
}
