//! E-Cell Event Forms
//!
//! Administrator-authored registration forms and the responses collected
//! against them.
//!
//! ## Architecture
//!
//! - **Domain Layer**: `FormDefinition` aggregate, `Field` and `Answer` value
//!   objects, `Response` entity, domain events
//! - **Ports Layer**: use case traits (inbound) and repository traits (outbound)
//! - **Application Layer**: `FormService` and `ResponseService`
//! - **Infrastructure Layer**: in-memory repositories, tracing event publisher
//! - **Export**: spreadsheet (`.xlsx`) and document (`.pdf`) renderings of the
//!   response table
//!
//! ## Lifecycle
//!
//! An administrator creates a form (status `active`), may pause and resume it,
//! edit it as a whole document, or delete it. Anonymous respondents fetch the
//! definition and submit answers while the form is active.

pub mod domain;
pub mod ports;
pub mod application;
pub mod infrastructure;
pub mod export;
pub mod error;

pub use domain::aggregates::{FormDefinition, Response};
pub use domain::value_objects::{Answer, Answers, EntityId, Field, FieldKind, FieldParts, FieldType, FormStatus};
pub use domain::events::{DomainEvent, FormEvent};
pub use application::{FormService, ResponseService};
pub use application::dto::{CreateFormCommand, FieldDraft, FormCreated, UpdateFormCommand};
pub use ports::inbound::{FormUseCases, ResponseUseCases};
pub use ports::outbound::{EventPublisher, FormRepository, RepositoryError, ResponseRepository};
pub use export::{ExportError, ExportFormat, ExportedFile};
pub use error::{FormsError, Result};
