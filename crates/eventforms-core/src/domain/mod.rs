//! Domain layer
//!
//! Aggregates, value objects and events for form definitions and responses.

pub mod aggregates;
pub mod value_objects;
pub mod events;

pub use events::{DomainEvent, FormEvent};
