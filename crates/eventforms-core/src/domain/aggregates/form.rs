//! Form Definition Aggregate
//!
//! Administrator-authored schema: a name, an ordered list of fields and a
//! status that gates response collection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::events::{DomainEvent, FormEvent};
use crate::domain::value_objects::{EntityId, Field, FieldParts, FormStatus};
use crate::error::{FormsError, Result};

/// Form definition aggregate root
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FormDefinition {
    id: EntityId,
    owner_id: EntityId,
    name: String,
    fields: Vec<Field>,
    status: FormStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    #[serde(skip)]
    events: Vec<DomainEvent>,
}

impl PartialEq for FormDefinition {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.owner_id == other.owner_id
            && self.name == other.name
            && self.fields == other.fields
            && self.status == other.status
            && self.created_at == other.created_at
            && self.updated_at == other.updated_at
    }
}

impl FormDefinition {
    /// Create a new active form (factory method)
    pub fn create(
        owner_id: EntityId,
        name: impl Into<String>,
        fields: Vec<FieldParts>,
    ) -> Result<Self> {
        let name = name.into();
        let fields = validate_definition(&name, fields)?;
        let now = Utc::now();
        let id = EntityId::new();

        let mut form = Self {
            id: id.clone(),
            owner_id: owner_id.clone(),
            name,
            status: FormStatus::Active,
            created_at: now,
            updated_at: now,
            events: vec![],
            fields,
        };

        form.raise_event(DomainEvent::Form(FormEvent::Created {
            form_id: id,
            owner_id,
            field_count: form.fields.len(),
            created_at: now,
        }));

        Ok(form)
    }

    pub fn id(&self) -> &EntityId { &self.id }
    pub fn owner_id(&self) -> &EntityId { &self.owner_id }
    pub fn name(&self) -> &str { &self.name }
    pub fn fields(&self) -> &[Field] { &self.fields }
    pub fn status(&self) -> FormStatus { self.status }
    pub fn created_at(&self) -> DateTime<Utc> { self.created_at }
    pub fn updated_at(&self) -> DateTime<Utc> { self.updated_at }

    pub fn is_owned_by(&self, owner_id: &EntityId) -> bool {
        &self.owner_id == owner_id
    }

    pub fn accepts_responses(&self) -> bool {
        self.status.accepts_responses()
    }

    /// Replace name and fields as a whole document; nothing is merged
    pub fn replace(&mut self, name: impl Into<String>, fields: Vec<FieldParts>) -> Result<()> {
        let name = name.into();
        let fields = validate_definition(&name, fields)?;
        self.name = name;
        self.fields = fields;
        self.touch();

        self.raise_event(DomainEvent::Form(FormEvent::Updated {
            form_id: self.id.clone(),
            field_count: self.fields.len(),
            updated_at: self.updated_at,
        }));
        Ok(())
    }

    pub fn set_status(&mut self, status: FormStatus) {
        let from = self.status;
        self.status = status;
        self.touch();

        if from != status {
            self.raise_event(DomainEvent::Form(FormEvent::StatusChanged {
                form_id: self.id.clone(),
                from,
                to: status,
            }));
        }
    }

    /// Fail with `FormPaused` unless the form is taking responses
    pub fn ensure_accepting(&self) -> Result<()> {
        if self.accepts_responses() {
            Ok(())
        } else {
            Err(FormsError::FormPaused(self.id.to_string()))
        }
    }

    pub fn take_events(&mut self) -> Vec<DomainEvent> {
        std::mem::take(&mut self.events)
    }

    fn raise_event(&mut self, event: DomainEvent) {
        self.events.push(event);
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Checks run on create and update, first failure wins.
fn validate_definition(name: &str, parts: Vec<FieldParts>) -> Result<Vec<Field>> {
    if name.trim().is_empty() {
        return Err(FormsError::validation("form name is required"));
    }
    if parts.is_empty() {
        return Err(FormsError::validation("add at least one field"));
    }

    parts
        .into_iter()
        .enumerate()
        .map(|(index, (field_type, label, options))| {
            Field::new(field_type, label, options)
                .map_err(|e| FormsError::validation(format!("field {}: {}", index + 1, e)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::FieldType;

    fn text(label: &str) -> FieldParts {
        (FieldType::Text, label.to_string(), vec![])
    }

    fn choice(field_type: FieldType, label: &str, options: &[&str]) -> FieldParts {
        (field_type, label.to_string(), options.iter().map(|o| o.to_string()).collect())
    }

    fn feedback_fields() -> Vec<FieldParts> {
        vec![text("Comment")]
    }

    #[test]
    fn test_create_form() {
        let mut form = FormDefinition::create(EntityId::new(), "Feedback", feedback_fields()).unwrap();
        assert_eq!(form.status(), FormStatus::Active);
        assert_eq!(form.fields().len(), 1);
        assert_eq!(form.fields()[0].label(), "Comment");

        let events = form.take_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].name(), "form.created");
        assert!(form.take_events().is_empty());
    }

    #[test]
    fn test_create_rejects_blank_name() {
        let err = FormDefinition::create(EntityId::new(), "  ", feedback_fields()).unwrap_err();
        assert!(matches!(err, FormsError::Validation(m) if m.contains("name")));
    }

    #[test]
    fn test_create_rejects_no_fields() {
        let err = FormDefinition::create(EntityId::new(), "Feedback", vec![]).unwrap_err();
        assert!(matches!(err, FormsError::Validation(m) if m.contains("at least one field")));
    }

    #[test]
    fn test_field_errors_name_position() {
        let drafts = vec![
            text("Name"),
            choice(FieldType::Radio, "Year", &[]),
        ];
        let err = FormDefinition::create(EntityId::new(), "Signup", drafts).unwrap_err();
        assert!(matches!(err, FormsError::Validation(m) if m.starts_with("field 2:")));
    }

    #[test]
    fn test_replace_is_whole_document() {
        let mut form = FormDefinition::create(EntityId::new(), "Feedback", feedback_fields()).unwrap();
        let created_at = form.created_at();

        form.replace("Survey", vec![choice(FieldType::Checkbox, "Tracks", &["AI"])])
            .unwrap();

        assert_eq!(form.name(), "Survey");
        assert_eq!(form.fields().len(), 1);
        assert_eq!(form.fields()[0].label(), "Tracks");
        assert_eq!(form.created_at(), created_at);
        assert!(form.updated_at() >= created_at);
    }

    #[test]
    fn test_failed_replace_leaves_form_untouched() {
        let mut form = FormDefinition::create(EntityId::new(), "Feedback", feedback_fields()).unwrap();
        let before = form.clone();
        assert!(form.replace("Feedback", vec![text("")]).is_err());
        assert_eq!(form, before);
    }

    #[test]
    fn test_pause_blocks_responses() {
        let mut form = FormDefinition::create(EntityId::new(), "Feedback", feedback_fields()).unwrap();
        form.take_events();

        form.set_status(FormStatus::Paused);
        assert!(matches!(form.ensure_accepting(), Err(FormsError::FormPaused(_))));
        assert_eq!(form.take_events().len(), 1);

        form.set_status(FormStatus::Paused);
        assert!(form.take_events().is_empty());

        form.set_status(FormStatus::Active);
        assert!(form.ensure_accepting().is_ok());
    }
}
