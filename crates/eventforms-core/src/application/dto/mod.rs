//! Data Transfer Objects
//!
//! Unvalidated input shapes. Validation happens when the aggregate is built,
//! so a rejected command never reaches a repository.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::aggregates::FormDefinition;
use crate::domain::value_objects::{FieldParts, FieldType};

/// A field as the form builder sends it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FieldDraft {
    /// One of `text`, `radio`, `checkbox`
    #[serde(rename = "type")]
    #[schema(value_type = String, example = "radio")]
    pub field_type: FieldType,
    #[serde(default)]
    pub label: String,
    /// Required for `radio` and `checkbox`, ignored for `text`
    #[serde(default)]
    pub options: Vec<String>,
}

impl FieldDraft {
    pub fn new(field_type: FieldType, label: impl Into<String>, options: Vec<String>) -> Self {
        Self { field_type, label: label.into(), options }
    }

    pub fn text(label: impl Into<String>) -> Self {
        Self::new(FieldType::Text, label, vec![])
    }

    pub fn into_parts(self) -> FieldParts {
        (self.field_type, self.label, self.options)
    }
}

pub(crate) fn into_parts(drafts: Vec<FieldDraft>) -> Vec<FieldParts> {
    drafts.into_iter().map(FieldDraft::into_parts).collect()
}

/// Command to create a form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFormCommand {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldDraft>,
}

/// Command to replace a form's name and fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateFormCommand {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldDraft>,
}

/// A freshly created form and the link respondents open
#[derive(Debug, Clone)]
pub struct FormCreated {
    pub form: FormDefinition,
    pub link: String,
}
