//! Domain Events
//!
//! Events raised by the forms bounded context.

use chrono::{DateTime, Utc};

use crate::domain::value_objects::{EntityId, FormStatus};

#[derive(Clone, Debug, PartialEq)]
pub enum DomainEvent {
    Form(FormEvent),
}

#[derive(Clone, Debug, PartialEq)]
pub enum FormEvent {
    Created {
        form_id: EntityId,
        owner_id: EntityId,
        field_count: usize,
        created_at: DateTime<Utc>,
    },

    Updated {
        form_id: EntityId,
        field_count: usize,
        updated_at: DateTime<Utc>,
    },

    StatusChanged {
        form_id: EntityId,
        from: FormStatus,
        to: FormStatus,
    },

    Deleted {
        form_id: EntityId,
    },

    ResponseSubmitted {
        form_id: EntityId,
        response_id: EntityId,
        submitted_at: DateTime<Utc>,
    },
}

impl DomainEvent {
    pub fn form_id(&self) -> &EntityId {
        match self {
            Self::Form(FormEvent::Created { form_id, .. })
            | Self::Form(FormEvent::Updated { form_id, .. })
            | Self::Form(FormEvent::StatusChanged { form_id, .. })
            | Self::Form(FormEvent::Deleted { form_id })
            | Self::Form(FormEvent::ResponseSubmitted { form_id, .. }) => form_id,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Form(FormEvent::Created { .. }) => "form.created",
            Self::Form(FormEvent::Updated { .. }) => "form.updated",
            Self::Form(FormEvent::StatusChanged { .. }) => "form.status_changed",
            Self::Form(FormEvent::Deleted { .. }) => "form.deleted",
            Self::Form(FormEvent::ResponseSubmitted { .. }) => "form.response_submitted",
        }
    }
}
