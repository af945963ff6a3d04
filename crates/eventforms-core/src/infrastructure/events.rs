//! Event publishers

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::DomainEvent;
use crate::ports::outbound::{EventPublisher, RepositoryError};

/// Writes every domain event to the tracing log
#[derive(Debug, Default)]
pub struct TracingEventPublisher;

#[async_trait]
impl EventPublisher for TracingEventPublisher {
    async fn publish(&self, events: Vec<DomainEvent>) -> Result<(), RepositoryError> {
        for event in events {
            tracing::info!(event = event.name(), form_id = %event.form_id(), detail = ?event, "domain event");
        }
        Ok(())
    }
}

/// Keeps published events in memory (for testing)
#[derive(Debug, Default)]
pub struct RecordingEventPublisher {
    events: Mutex<Vec<DomainEvent>>,
}

impl RecordingEventPublisher {
    pub fn names(&self) -> Vec<&'static str> {
        self.events.lock().iter().map(DomainEvent::name).collect()
    }
}

#[async_trait]
impl EventPublisher for RecordingEventPublisher {
    async fn publish(&self, events: Vec<DomainEvent>) -> Result<(), RepositoryError> {
        self.events.lock().extend(events);
        Ok(())
    }
}
