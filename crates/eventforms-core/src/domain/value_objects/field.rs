//! Field Value Object
//!
//! One schema entry of a form definition. The field type decides which input
//! widget a respondent sees and which validation applies, so it is modelled as
//! a closed sum rather than a free-form type string.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Discriminant of a field, as it appears on the wire
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Radio,
    Checkbox,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Radio => "radio",
            Self::Checkbox => "checkbox",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "radio" => Ok(Self::Radio),
            "checkbox" => Ok(Self::Checkbox),
            other => Err(FieldError::UnknownType(other.to_string())),
        }
    }
}

/// Unvalidated field input: type, label and options
pub type FieldParts = (FieldType, String, Vec<String>);

/// Field kind with the data each kind needs
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Radio { options: Vec<String> },
    Checkbox { options: Vec<String> },
}

impl FieldKind {
    pub fn field_type(&self) -> FieldType {
        match self {
            Self::Text => FieldType::Text,
            Self::Radio { .. } => FieldType::Radio,
            Self::Checkbox { .. } => FieldType::Checkbox,
        }
    }

    /// Options offered to the respondent; empty for free text
    pub fn options(&self) -> &[String] {
        match self {
            Self::Text => &[],
            Self::Radio { options } | Self::Checkbox { options } => options,
        }
    }
}

/// A validated form field
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "FieldRecord", into = "FieldRecord")]
pub struct Field {
    label: String,
    kind: FieldKind,
}

impl Field {
    /// Build a field from its wire parts.
    ///
    /// `options` is ignored for text fields and must be non-empty for radio
    /// and checkbox fields.
    pub fn new(
        field_type: FieldType,
        label: impl Into<String>,
        options: Vec<String>,
    ) -> Result<Self, FieldError> {
        let label = label.into();
        if label.trim().is_empty() {
            return Err(FieldError::BlankLabel);
        }

        let kind = match field_type {
            FieldType::Text => FieldKind::Text,
            FieldType::Radio if options.is_empty() => return Err(FieldError::MissingOptions(field_type)),
            FieldType::Radio => FieldKind::Radio { options },
            FieldType::Checkbox if options.is_empty() => return Err(FieldError::MissingOptions(field_type)),
            FieldType::Checkbox => FieldKind::Checkbox { options },
        };

        Ok(Self { label, kind })
    }

    pub fn text(label: impl Into<String>) -> Result<Self, FieldError> {
        Self::new(FieldType::Text, label, vec![])
    }

    pub fn label(&self) -> &str { &self.label }
    pub fn kind(&self) -> &FieldKind { &self.kind }
    pub fn field_type(&self) -> FieldType { self.kind.field_type() }
    pub fn options(&self) -> &[String] { self.kind.options() }
}

/// Flat storage/wire shape of a field
#[derive(Clone, Debug, Serialize, Deserialize)]
struct FieldRecord {
    #[serde(rename = "type")]
    field_type: FieldType,
    label: String,
    #[serde(default)]
    options: Vec<String>,
}

impl TryFrom<FieldRecord> for Field {
    type Error = FieldError;

    fn try_from(record: FieldRecord) -> Result<Self, Self::Error> {
        Field::new(record.field_type, record.label, record.options)
    }
}

impl From<Field> for FieldRecord {
    fn from(field: Field) -> Self {
        let field_type = field.field_type();
        let options = match field.kind {
            FieldKind::Text => vec![],
            FieldKind::Radio { options } | FieldKind::Checkbox { options } => options,
        };
        Self { field_type, label: field.label, options }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    BlankLabel,
    MissingOptions(FieldType),
    UnknownType(String),
}

impl std::error::Error for FieldError {}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BlankLabel => write!(f, "field label cannot be empty"),
            Self::MissingOptions(t) => write!(f, "{} field must have at least one option", t),
            Self::UnknownType(t) => write!(f, "unknown field type: {:?}", t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_field_drops_options() {
        let field = Field::new(FieldType::Text, "Name", vec!["ignored".into()]).unwrap();
        assert_eq!(field.kind(), &FieldKind::Text);
        assert!(field.options().is_empty());
    }

    #[test]
    fn test_choice_fields_keep_option_order() {
        let field = Field::new(FieldType::Radio, "Year", vec!["2nd".into(), "1st".into()]).unwrap();
        assert_eq!(field.options(), ["2nd".to_string(), "1st".to_string()]);

        let field = Field::new(FieldType::Checkbox, "Interests", vec!["A".into()]).unwrap();
        assert_eq!(field.kind(), &FieldKind::Checkbox { options: vec!["A".into()] });
    }

    #[test]
    fn test_blank_label_rejected() {
        assert_eq!(Field::text("   "), Err(FieldError::BlankLabel));
    }

    #[test]
    fn test_choice_without_options_rejected() {
        assert_eq!(
            Field::new(FieldType::Checkbox, "Interests", vec![]),
            Err(FieldError::MissingOptions(FieldType::Checkbox))
        );
    }

    #[test]
    fn test_wire_shape_is_flat() {
        let field = Field::new(FieldType::Radio, "T-shirt", vec!["S".into(), "M".into()]).unwrap();
        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(json, serde_json::json!({"type": "radio", "label": "T-shirt", "options": ["S", "M"]}));

        let back: Field = serde_json::from_value(json).unwrap();
        assert_eq!(back, field);
    }

    #[test]
    fn test_deserialize_text_without_options() {
        let field: Field = serde_json::from_str(r#"{"type":"text","label":"Comment"}"#).unwrap();
        assert_eq!(field.label(), "Comment");
    }

    #[test]
    fn test_deserialize_rejects_invalid_field() {
        assert!(serde_json::from_str::<Field>(r#"{"type":"radio","label":"Pick"}"#).is_err());
        assert!(serde_json::from_str::<Field>(r#"{"type":"dropdown","label":"Pick"}"#).is_err());
    }
}
