//! Command handlers
//!
//! Application services that orchestrate use cases.

use std::sync::Arc;
use async_trait::async_trait;

use crate::application::dto::{self, CreateFormCommand, FormCreated, UpdateFormCommand};
use crate::domain::aggregates::{FormDefinition, Response};
use crate::domain::events::{DomainEvent, FormEvent};
use crate::domain::value_objects::{Answers, EntityId, FormStatus};
use crate::error::{FormsError, Result};
use crate::export::{self, ExportFormat, ExportedFile, ResponseTable};
use crate::infrastructure::MonotonicClock;
use crate::ports::inbound::{FormUseCases, ResponseUseCases};
use crate::ports::outbound::{EventPublisher, FormRepository, ResponseRepository};

/// Load a form the caller owns. Someone else's form reads as missing.
async fn load_owned(
    forms: &dyn FormRepository,
    owner: &EntityId,
    id: &EntityId,
) -> Result<FormDefinition> {
    match forms.find_by_id(id).await? {
        Some(form) if form.is_owned_by(owner) => Ok(form),
        _ => Err(FormsError::NotFound(id.to_string())),
    }
}

/// Hand events to the publisher once the change is stored. A failed publish is
/// logged; the stored change stands.
async fn publish(publisher: &dyn EventPublisher, events: Vec<DomainEvent>) {
    if events.is_empty() {
        return;
    }
    let names: Vec<&'static str> = events.iter().map(DomainEvent::name).collect();
    if let Err(e) = publisher.publish(events).await {
        tracing::warn!(events = ?names, error = %e, "event publish failed");
    }
}

/// Form definition application service
pub struct FormService {
    forms: Arc<dyn FormRepository>,
    event_publisher: Arc<dyn EventPublisher>,
    link_base: String,
}

impl FormService {
    pub fn new(
        forms: Arc<dyn FormRepository>,
        event_publisher: Arc<dyn EventPublisher>,
        link_base: impl Into<String>,
    ) -> Self {
        Self {
            forms,
            event_publisher,
            link_base: link_base.into().trim_end_matches('/').to_string(),
        }
    }

    /// Respondent-facing URL of a form
    pub fn link_for(&self, id: &EntityId) -> String {
        format!("{}/form/{}", self.link_base, id)
    }
}

#[async_trait]
impl FormUseCases for FormService {
    async fn create_form(&self, owner: &EntityId, command: CreateFormCommand) -> Result<FormCreated> {
        let mut form = FormDefinition::create(owner.clone(), command.name, dto::into_parts(command.fields))?;

        self.forms.save(&form).await?;
        publish(self.event_publisher.as_ref(), form.take_events()).await;

        tracing::info!(form_id = %form.id(), owner = %owner, fields = form.fields().len(), "form created");
        let link = self.link_for(form.id());
        Ok(FormCreated { form, link })
    }

    async fn update_form(
        &self,
        owner: &EntityId,
        id: &EntityId,
        command: UpdateFormCommand,
    ) -> Result<FormDefinition> {
        let mut form = load_owned(self.forms.as_ref(), owner, id).await?;
        form.replace(command.name, dto::into_parts(command.fields))?;

        self.forms.save(&form).await?;
        publish(self.event_publisher.as_ref(), form.take_events()).await;

        tracing::info!(form_id = %id, "form updated");
        Ok(form)
    }

    async fn get_form(&self, id: &EntityId) -> Result<FormDefinition> {
        tracing::debug!(form_id = %id, "fetching form");
        self.forms
            .find_by_id(id)
            .await?
            .ok_or_else(|| FormsError::NotFound(id.to_string()))
    }

    async fn delete_form(&self, owner: &EntityId, id: &EntityId) -> Result<()> {
        load_owned(self.forms.as_ref(), owner, id).await?;

        if !self.forms.delete(id).await? {
            return Err(FormsError::NotFound(id.to_string()));
        }
        publish(
            self.event_publisher.as_ref(),
            vec![DomainEvent::Form(FormEvent::Deleted { form_id: id.clone() })],
        )
        .await;

        tracing::info!(form_id = %id, "form deleted");
        Ok(())
    }

    async fn set_status(&self, owner: &EntityId, id: &EntityId, status: FormStatus) -> Result<FormDefinition> {
        let mut form = load_owned(self.forms.as_ref(), owner, id).await?;
        form.set_status(status);

        self.forms.save(&form).await?;
        publish(self.event_publisher.as_ref(), form.take_events()).await;

        tracing::info!(form_id = %id, %status, "form status set");
        Ok(form)
    }

    async fn list_forms(&self, owner: &EntityId) -> Result<Vec<FormDefinition>> {
        Ok(self.forms.find_by_owner(owner).await?)
    }
}

/// Response collection application service
pub struct ResponseService {
    forms: Arc<dyn FormRepository>,
    responses: Arc<dyn ResponseRepository>,
    event_publisher: Arc<dyn EventPublisher>,
    clock: MonotonicClock,
    export_prefix: String,
}

impl ResponseService {
    pub fn new(
        forms: Arc<dyn FormRepository>,
        responses: Arc<dyn ResponseRepository>,
        event_publisher: Arc<dyn EventPublisher>,
        export_prefix: impl Into<String>,
    ) -> Self {
        Self {
            forms,
            responses,
            event_publisher,
            clock: MonotonicClock::new(),
            export_prefix: export_prefix.into(),
        }
    }
}

#[async_trait]
impl ResponseUseCases for ResponseService {
    async fn submit_response(&self, form_id: &EntityId, answers: Answers) -> Result<Response> {
        // Status is read, then the response written; a concurrent pause may
        // land in between.
        let form = self
            .forms
            .find_by_id(form_id)
            .await?
            .ok_or_else(|| FormsError::NotFound(form_id.to_string()))?;
        form.ensure_accepting()?;

        let response = Response::submit(form_id.clone(), answers, self.clock.now());
        self.responses.append(&response).await?;
        publish(
            self.event_publisher.as_ref(),
            vec![DomainEvent::Form(FormEvent::ResponseSubmitted {
                form_id: form_id.clone(),
                response_id: response.id().clone(),
                submitted_at: response.created_at(),
            })],
        )
        .await;

        tracing::info!(form_id = %form_id, response_id = %response.id(), "response submitted");
        Ok(response)
    }

    async fn list_responses(&self, owner: &EntityId, form_id: &EntityId) -> Result<Vec<Response>> {
        load_owned(self.forms.as_ref(), owner, form_id).await?;
        Ok(self.responses.find_by_form(form_id).await?)
    }

    async fn export_responses(
        &self,
        owner: &EntityId,
        form_id: &EntityId,
        format: ExportFormat,
    ) -> Result<ExportedFile> {
        let form = load_owned(self.forms.as_ref(), owner, form_id).await?;
        let responses = self.responses.find_by_form(form_id).await?;

        let table = ResponseTable::build(&responses);
        let file = export::render(&self.export_prefix, form.name(), &table, format).map_err(|e| {
            tracing::error!(form_id = %form_id, %format, error = %e, "export failed");
            FormsError::from(e)
        })?;

        tracing::info!(form_id = %form_id, %format, rows = table.rows().len(), "responses exported");
        Ok(file)
    }
}
