//! Infrastructure layer
//!
//! Concrete adapters for the outbound ports.

pub mod persistence;
mod events;
mod clock;

pub use clock::MonotonicClock;
pub use events::{RecordingEventPublisher, TracingEventPublisher};
