//! Error types for form definitions and response collection

use thiserror::Error;

use crate::export::ExportError;
use crate::ports::outbound::RepositoryError;

/// Forms error type
#[derive(Error, Debug)]
pub enum FormsError {
    /// Bad shape or an empty required value
    #[error("validation error: {0}")]
    Validation(String),

    /// Unknown form id (or a form owned by another administrator)
    #[error("form not found: {0}")]
    NotFound(String),

    /// Submission attempted while the form is paused
    #[error("form {0} is paused and not accepting responses")]
    FormPaused(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

impl FormsError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

/// Result type for forms operations
pub type Result<T> = std::result::Result<T, FormsError>;
