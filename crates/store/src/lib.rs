//! Fixture-backed in-memory data layer.
//!
//! The store simulates a remote data service: entities live in shared
//! in-memory arrays seeded from embedded JSON fixtures, and every
//! repository call passes through a configurable artificial-latency gate.
//! There is no persistence and no transactions; concurrent writers are
//! serialized per entity by the store's locks and otherwise last-write-wins.

pub mod fixtures;
pub mod models;
pub mod repositories;
mod store;

pub use store::{LatencyProfile, Store};
