//! Answer Value Object

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Answers keyed by field label, in the order the respondent sent them.
///
/// Labels are not unique within a form, so a later duplicate key overwrites
/// the earlier value while keeping the earlier position.
pub type Answers = IndexMap<String, Answer>;

/// A single answer: free text or a radio choice, or the set of boxes ticked
/// in a checkbox group.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Text(String),
    Choices(Vec<String>),
}

impl Answer {
    /// Checkbox selection with duplicates collapsed, first occurrence wins
    pub fn choices<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut selected: Vec<String> = Vec::new();
        for value in values {
            let value = value.into();
            if !selected.contains(&value) {
                selected.push(value);
            }
        }
        Self::Choices(selected)
    }

    /// Canonical stored form of a submitted answer
    pub fn normalized(self) -> Self {
        match self {
            Self::Text(text) => Self::Text(text),
            Self::Choices(values) => Self::choices(values),
        }
    }

    /// Cell text used by listings and exports
    pub fn render(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Choices(values) => values.join(", "),
        }
    }
}

impl From<&str> for Answer {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Answer {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}
