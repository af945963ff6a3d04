//! Inbound ports (Use case traits)
//!
//! Every operation that mutates or exposes administrator data takes the
//! calling administrator's id explicitly; submission and definition reads are
//! anonymous.

use async_trait::async_trait;

use crate::application::dto::{CreateFormCommand, FormCreated, UpdateFormCommand};
use crate::domain::aggregates::{FormDefinition, Response};
use crate::domain::value_objects::{Answers, EntityId, FormStatus};
use crate::error::Result;
use crate::export::{ExportFormat, ExportedFile};

/// Form definition store
#[async_trait]
pub trait FormUseCases: Send + Sync {
    /// Create an active form and return it with its respondent link
    async fn create_form(&self, owner: &EntityId, command: CreateFormCommand) -> Result<FormCreated>;

    /// Replace name and fields of an owned form
    async fn update_form(
        &self,
        owner: &EntityId,
        id: &EntityId,
        command: UpdateFormCommand,
    ) -> Result<FormDefinition>;

    /// Read a form regardless of status
    async fn get_form(&self, id: &EntityId) -> Result<FormDefinition>;

    /// Delete an owned form; its responses are left in place
    async fn delete_form(&self, owner: &EntityId, id: &EntityId) -> Result<()>;

    /// Activate or pause an owned form
    async fn set_status(&self, owner: &EntityId, id: &EntityId, status: FormStatus) -> Result<FormDefinition>;

    /// Forms created by `owner`, oldest first
    async fn list_forms(&self, owner: &EntityId) -> Result<Vec<FormDefinition>>;
}

/// Response collector
#[async_trait]
pub trait ResponseUseCases: Send + Sync {
    /// Store answers against an active form
    async fn submit_response(&self, form_id: &EntityId, answers: Answers) -> Result<Response>;

    /// All responses of an owned form in submission order
    async fn list_responses(&self, owner: &EntityId, form_id: &EntityId) -> Result<Vec<Response>>;

    /// Render the responses of an owned form as a downloadable file
    async fn export_responses(
        &self,
        owner: &EntityId,
        form_id: &EntityId,
        format: ExportFormat,
    ) -> Result<ExportedFile>;
}
