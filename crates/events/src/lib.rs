//! In-process domain event bus for the melboard platform.

mod bus;

pub use bus::{event_types, DomainEvent, EventBus};
