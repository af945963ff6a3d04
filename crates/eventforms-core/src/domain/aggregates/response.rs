//! Response Entity
//!
//! One respondent's answers against a form. Immutable once created.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{Answer, Answers, EntityId};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Response {
    id: EntityId,
    form_id: EntityId,
    answers: Answers,
    created_at: DateTime<Utc>,
}

impl Response {
    /// Record a submission. Answer keys are not checked against the form's
    /// labels; checkbox selections are collapsed to a set.
    pub fn submit(form_id: EntityId, answers: Answers, created_at: DateTime<Utc>) -> Self {
        let answers = answers
            .into_iter()
            .map(|(label, answer)| (label, answer.normalized()))
            .collect();

        Self { id: EntityId::new(), form_id, answers, created_at }
    }

    pub fn id(&self) -> &EntityId { &self.id }
    pub fn form_id(&self) -> &EntityId { &self.form_id }
    pub fn answers(&self) -> &Answers { &self.answers }
    pub fn created_at(&self) -> DateTime<Utc> { self.created_at }

    pub fn answer(&self, label: &str) -> Option<&Answer> {
        self.answers.get(label)
    }
}
