//! The shared in-memory store.

use std::time::Duration;

use melboard_core::error::CoreError;
use melboard_core::types::DbId;
use rand::Rng;
use tokio::sync::RwLock;

use crate::fixtures::{self, Seed};
use crate::models::{Country, DataPoint, Indicator, Notification, Project, User};

// ---------------------------------------------------------------------------
// Latency simulation
// ---------------------------------------------------------------------------

/// Artificial latency applied to every repository call, simulating a remote
/// data service.
#[derive(Debug, Clone, Copy)]
pub struct LatencyProfile {
    /// Fixed delay in milliseconds.
    pub base_ms: u64,
    /// Upper bound of additional random jitter in milliseconds.
    pub jitter_ms: u64,
}

impl LatencyProfile {
    /// No artificial delay. Used by tests.
    pub const NONE: LatencyProfile = LatencyProfile {
        base_ms: 0,
        jitter_ms: 0,
    };

    pub fn new(base_ms: u64, jitter_ms: u64) -> Self {
        Self { base_ms, jitter_ms }
    }
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// Shared in-memory entity arrays.
///
/// Each entity collection sits behind its own `RwLock`; a repository call
/// takes at most one lock at a time (reference lookups clone what they need
/// and release before the next lock), so calls cannot deadlock. Across
/// calls the semantics are last-write-wins, exactly like the remote service
/// this store simulates.
pub struct Store {
    latency: LatencyProfile,
    pub(crate) countries: RwLock<Vec<Country>>,
    pub(crate) projects: RwLock<Vec<Project>>,
    pub(crate) indicators: RwLock<Vec<Indicator>>,
    pub(crate) users: RwLock<Vec<User>>,
    pub(crate) data_points: RwLock<Vec<DataPoint>>,
    pub(crate) notifications: RwLock<Vec<Notification>>,
}

impl Store {
    /// An empty store. Tests build their own state through the repositories.
    pub fn empty(latency: LatencyProfile) -> Self {
        Self::with_seed(Seed::default(), latency)
    }

    /// A store pre-populated from the given seed.
    pub fn with_seed(seed: Seed, latency: LatencyProfile) -> Self {
        Self {
            latency,
            countries: RwLock::new(seed.countries),
            projects: RwLock::new(seed.projects),
            indicators: RwLock::new(seed.indicators),
            users: RwLock::new(seed.users),
            data_points: RwLock::new(seed.data_points),
            notifications: RwLock::new(seed.notifications),
        }
    }

    /// A store seeded from the embedded JSON fixtures.
    pub fn seeded(latency: LatencyProfile) -> Result<Self, CoreError> {
        Ok(Self::with_seed(fixtures::load()?, latency))
    }

    /// Sleep for the configured base latency plus random jitter.
    pub(crate) async fn simulate_latency(&self) {
        let LatencyProfile { base_ms, jitter_ms } = self.latency;
        if base_ms == 0 && jitter_ms == 0 {
            return;
        }
        let jitter = if jitter_ms > 0 {
            rand::rng().random_range(0..=jitter_ms)
        } else {
            0
        };
        tokio::time::sleep(Duration::from_millis(base_ms + jitter)).await;
    }
}

/// Next primary key for an entity collection.
pub(crate) fn next_id(ids: impl Iterator<Item = DbId>) -> DbId {
    ids.max().unwrap_or(0) + 1
}
