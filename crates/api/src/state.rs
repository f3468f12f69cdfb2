use std::sync::Arc;

use melboard_events::EventBus;
use melboard_store::Store;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// The in-memory entity store.
    pub store: Arc<Store>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Centralized event bus for publishing workflow events.
    pub event_bus: Arc<EventBus>,
}
