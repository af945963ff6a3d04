//! Outbound ports (Repository traits)
//!
//! Hexagonal architecture: these are the interfaces that infrastructure must implement.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::aggregates::{FormDefinition, Response};
use crate::domain::value_objects::EntityId;
use crate::domain::DomainEvent;

/// Form definition repository port
#[async_trait]
pub trait FormRepository: Send + Sync {
    /// Find form by ID
    async fn find_by_id(&self, id: &EntityId) -> Result<Option<FormDefinition>, RepositoryError>;

    /// Forms of one administrator, ordered by creation time
    async fn find_by_owner(&self, owner_id: &EntityId) -> Result<Vec<FormDefinition>, RepositoryError>;

    /// Save form (insert or replace)
    async fn save(&self, form: &FormDefinition) -> Result<(), RepositoryError>;

    /// Delete form, returning whether it existed
    async fn delete(&self, id: &EntityId) -> Result<bool, RepositoryError>;
}

/// Response repository port
#[async_trait]
pub trait ResponseRepository: Send + Sync {
    /// Append a response; responses are never updated
    async fn append(&self, response: &Response) -> Result<(), RepositoryError>;

    /// Responses of a form in insertion order
    async fn find_by_form(&self, form_id: &EntityId) -> Result<Vec<Response>, RepositoryError>;

    async fn count_by_form(&self, form_id: &EntityId) -> Result<usize, RepositoryError>;
}

/// Event publisher port
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish domain events
    async fn publish(&self, events: Vec<DomainEvent>) -> Result<(), RepositoryError>;
}

/// Repository error type
#[derive(Debug, Clone, Error)]
pub enum RepositoryError {
    #[error("duplicate key: {0}")]
    DuplicateKey(String),
}
