//! API Models

use axum::extract::FromRequest;
use chrono::{DateTime, Utc};
use eventforms_core::{
    Answers, CreateFormCommand, Field, FieldDraft, FieldKind, FormDefinition, Response, UpdateFormCommand,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ApiError;

/// JSON body extractor whose rejections use the API error body
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

// ============ Forms ============

/// Form create/update request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FormInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldDraft>,
}

impl From<FormInput> for CreateFormCommand {
    fn from(input: FormInput) -> Self {
        Self { name: input.name, fields: input.fields }
    }
}

impl From<FormInput> for UpdateFormCommand {
    fn from(input: FormInput) -> Self {
        Self { name: input.name, fields: input.fields }
    }
}

/// Form field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FieldView {
    #[serde(rename = "type")]
    pub field_type: String,
    pub label: String,
    pub options: Vec<String>,
}

impl From<&Field> for FieldView {
    fn from(field: &Field) -> Self {
        let options = match field.kind() {
            FieldKind::Text => vec![],
            FieldKind::Radio { options } | FieldKind::Checkbox { options } => options.clone(),
        };
        Self { field_type: field.field_type().to_string(), label: field.label().to_string(), options }
    }
}

/// Form definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FormView {
    pub id: String,
    pub name: String,
    pub fields: Vec<FieldView>,
    /// `active` or `paused`
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&FormDefinition> for FormView {
    fn from(form: &FormDefinition) -> Self {
        Self {
            id: form.id().to_string(),
            name: form.name().to_string(),
            fields: form.fields().iter().map(FieldView::from).collect(),
            status: form.status().to_string(),
            created_at: form.created_at(),
            updated_at: form.updated_at(),
        }
    }
}

/// Created form and the link respondents open
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FormCreatedView {
    pub id: String,
    pub link: String,
}

/// Status change request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatusUpdate {
    /// `active` or `paused`
    pub status: String,
}

// ============ Responses ============

/// Stored response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ResponseView {
    pub id: String,
    pub form_id: String,
    /// Label to answer; an answer is a string or an array of strings
    #[schema(value_type = Object)]
    pub answers: Answers,
    pub created_at: DateTime<Utc>,
}

impl From<&Response> for ResponseView {
    fn from(response: &Response) -> Self {
        Self {
            id: response.id().to_string(),
            form_id: response.form_id().to_string(),
            answers: response.answers().clone(),
            created_at: response.created_at(),
        }
    }
}

/// Export query
#[derive(Debug, Clone, Deserialize)]
pub struct ExportParams {
    /// `spreadsheet` (default) or `document`
    pub format: Option<String>,
}

// ============ Session ============

/// The authenticated administrator behind a request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SessionView {
    pub admin_id: String,
    pub email: String,
    pub expires_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use eventforms_core::FieldType;

    #[test]
    fn test_field_view_of_text_has_no_options() {
        let field = Field::new(FieldType::Text, "Comment", vec!["x".into()]).unwrap();
        let view = FieldView::from(&field);
        assert_eq!(view.field_type, "text");
        assert!(view.options.is_empty());
    }

    #[test]
    fn test_form_input_accepts_builder_payload() {
        let input: FormInput = serde_json::from_str(
            r#"{"name":"Signup","fields":[{"type":"checkbox","label":"Interests","options":["A","B"],"rawOptions":"A, B"}]}"#,
        )
        .unwrap();
        let command = CreateFormCommand::from(input);
        assert_eq!(command.fields[0].field_type, FieldType::Checkbox);
        assert_eq!(command.fields[0].options, ["A", "B"]);
    }
}
