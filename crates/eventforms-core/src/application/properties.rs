//! Property tests for form definition validation and storage

use std::sync::Arc;
use proptest::prelude::*;

use crate::application::dto::{CreateFormCommand, FieldDraft, UpdateFormCommand};
use crate::application::FormService;
use crate::domain::value_objects::{EntityId, FieldType};
use crate::error::FormsError;
use crate::infrastructure::persistence::InMemoryFormRepository;
use crate::infrastructure::TracingEventPublisher;
use crate::ports::inbound::FormUseCases;

fn service() -> (FormService, Arc<InMemoryFormRepository>) {
    let repo = Arc::new(InMemoryFormRepository::new());
    let service = FormService::new(repo.clone(), Arc::new(TracingEventPublisher), "http://localhost:3000");
    (service, repo)
}

fn label() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9 ?]{0,20}"
}

fn valid_field() -> impl Strategy<Value = FieldDraft> {
    let options = prop::collection::vec("[a-z0-9]{1,8}", 1..5);
    prop_oneof![
        label().prop_map(FieldDraft::text),
        (label(), options.clone()).prop_map(|(l, o)| FieldDraft::new(FieldType::Radio, l, o)),
        (label(), options).prop_map(|(l, o)| FieldDraft::new(FieldType::Checkbox, l, o)),
    ]
}

fn valid_fields() -> impl Strategy<Value = Vec<FieldDraft>> {
    prop::collection::vec(valid_field(), 1..8)
}

/// Valid fields with exactly one rule broken somewhere
fn invalid_fields() -> impl Strategy<Value = Vec<FieldDraft>> {
    let broken = prop_oneof![
        Just(FieldDraft::text("")),
        Just(FieldDraft::text("   ")),
        label().prop_map(|l| FieldDraft::new(FieldType::Radio, l, vec![])),
        label().prop_map(|l| FieldDraft::new(FieldType::Checkbox, l, vec![])),
    ];
    prop_oneof![
        Just(vec![]),
        (valid_fields(), broken, any::<prop::sample::Index>()).prop_map(|(mut fields, bad, at)| {
            let position = at.index(fields.len() + 1);
            fields.insert(position, bad);
            fields
        }),
    ]
}

proptest! {
    #[test]
    fn create_then_get_round_trips(name in label(), fields in valid_fields()) {
        let (service, _) = service();
        let owner = EntityId::new();
        tokio_test::block_on(async {
            let created = service
                .create_form(&owner, CreateFormCommand { name: name.clone(), fields: fields.clone() })
                .await
                .unwrap();
            let fetched = service.get_form(created.form.id()).await.unwrap();

            prop_assert_eq!(&fetched, &created.form);
            prop_assert_eq!(fetched.name(), name.as_str());
            prop_assert_eq!(fetched.fields().len(), fields.len());
            for (field, draft) in fetched.fields().iter().zip(&fields) {
                prop_assert_eq!(field.label(), draft.label.as_str());
                prop_assert_eq!(field.field_type(), draft.field_type);
                if draft.field_type != FieldType::Text {
                    prop_assert_eq!(field.options(), draft.options.as_slice());
                }
            }

            // Repeated reads with no mutation agree
            prop_assert_eq!(service.get_form(created.form.id()).await.unwrap(), fetched);
            Ok(())
        })?;
    }

    #[test]
    fn invalid_definitions_are_rejected_and_not_stored(name in label(), fields in invalid_fields()) {
        let (service, repo) = service();
        let owner = EntityId::new();
        tokio_test::block_on(async {
            let result = service.create_form(&owner, CreateFormCommand { name, fields }).await;
            prop_assert!(matches!(result, Err(FormsError::Validation(_))));
            prop_assert_eq!(repo.len(), 0);
            Ok(())
        })?;
    }

    #[test]
    fn update_replaces_whole_document(
        first in valid_fields(),
        name in label(),
        second in valid_fields(),
    ) {
        let (service, _) = service();
        let owner = EntityId::new();
        tokio_test::block_on(async {
            let id = service
                .create_form(&owner, CreateFormCommand { name: "Original".into(), fields: first })
                .await
                .unwrap()
                .form
                .id()
                .clone();

            service
                .update_form(&owner, &id, UpdateFormCommand { name: name.clone(), fields: second.clone() })
                .await
                .unwrap();

            let fetched = service.get_form(&id).await.unwrap();
            prop_assert_eq!(fetched.name(), name.as_str());
            let labels: Vec<&str> = fetched.fields().iter().map(|f| f.label()).collect();
            let expected: Vec<&str> = second.iter().map(|d| d.label.as_str()).collect();
            prop_assert_eq!(labels, expected);
            Ok(())
        })?;
    }
}
