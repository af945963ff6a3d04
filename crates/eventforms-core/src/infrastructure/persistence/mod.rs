//! In-memory repository implementations
//!
//! Single-document writes are atomic; there is no locking across documents.
//! Lists are unpaginated, which is fine at event-registration volumes.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::RwLock;

use crate::domain::aggregates::{FormDefinition, Response};
use crate::domain::value_objects::EntityId;
use crate::ports::outbound::{FormRepository, RepositoryError, ResponseRepository};

/// In-memory form repository
#[derive(Default)]
pub struct InMemoryFormRepository {
    forms: DashMap<EntityId, StoredForm>,
    next_seq: AtomicU64,
}

/// Insertion sequence survives replacement, so listings stay in creation order
struct StoredForm {
    seq: u64,
    form: FormDefinition,
}

impl InMemoryFormRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }
}

#[async_trait]
impl FormRepository for InMemoryFormRepository {
    async fn find_by_id(&self, id: &EntityId) -> Result<Option<FormDefinition>, RepositoryError> {
        Ok(self.forms.get(id).map(|entry| entry.form.clone()))
    }

    async fn find_by_owner(&self, owner_id: &EntityId) -> Result<Vec<FormDefinition>, RepositoryError> {
        let mut owned: Vec<(u64, FormDefinition)> = self
            .forms
            .iter()
            .filter(|entry| entry.form.is_owned_by(owner_id))
            .map(|entry| (entry.seq, entry.form.clone()))
            .collect();
        owned.sort_by_key(|(seq, _)| *seq);
        Ok(owned.into_iter().map(|(_, form)| form).collect())
    }

    async fn save(&self, form: &FormDefinition) -> Result<(), RepositoryError> {
        self.forms
            .entry(form.id().clone())
            .and_modify(|stored| stored.form = form.clone())
            .or_insert_with(|| StoredForm {
                seq: self.next_seq.fetch_add(1, Ordering::Relaxed),
                form: form.clone(),
            });
        Ok(())
    }

    async fn delete(&self, id: &EntityId) -> Result<bool, RepositoryError> {
        Ok(self.forms.remove(id).is_some())
    }
}

/// In-memory response repository, one append-only list per form
#[derive(Default)]
pub struct InMemoryResponseRepository {
    responses: RwLock<HashMap<EntityId, Vec<Response>>>,
}

impl InMemoryResponseRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ResponseRepository for InMemoryResponseRepository {
    async fn append(&self, response: &Response) -> Result<(), RepositoryError> {
        let mut responses = self.responses.write();
        let list = responses.entry(response.form_id().clone()).or_default();
        if list.iter().any(|r| r.id() == response.id()) {
            return Err(RepositoryError::DuplicateKey(response.id().to_string()));
        }
        list.push(response.clone());
        Ok(())
    }

    async fn find_by_form(&self, form_id: &EntityId) -> Result<Vec<Response>, RepositoryError> {
        Ok(self.responses.read().get(form_id).cloned().unwrap_or_default())
    }

    async fn count_by_form(&self, form_id: &EntityId) -> Result<usize, RepositoryError> {
        Ok(self.responses.read().get(form_id).map_or(0, Vec::len))
    }
}
