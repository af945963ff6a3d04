//! HTTP error mapping

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use eventforms_core::FormsError;
use thiserror::Error;

use crate::models::ErrorResponse;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Forms(#[from] FormsError),

    /// Missing, malformed, expired or revoked credential
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Forms(FormsError::Validation(_)) => StatusCode::BAD_REQUEST,
            Self::Forms(FormsError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::Forms(FormsError::FormPaused(_)) => StatusCode::CONFLICT,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forms(FormsError::Repository(_))
            | Self::Forms(FormsError::Export(_))
            | Self::Config(_)
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Forms(FormsError::Validation(_)) => "validation_error",
            Self::Forms(FormsError::NotFound(_)) => "not_found",
            Self::Forms(FormsError::FormPaused(_)) => "form_paused",
            Self::Unauthorized(_) => "unauthorized",
            _ => "internal_error",
        }
    }

    fn public_message(&self) -> String {
        match self {
            Self::Forms(FormsError::Validation(message)) => message.clone(),
            Self::Forms(FormsError::NotFound(_)) => "form not found".into(),
            Self::Forms(FormsError::FormPaused(_)) => {
                "this form is currently paused and not accepting responses".into()
            }
            Self::Unauthorized(_) => "unauthorized - please login again".into(),
            _ => "internal server error".into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, %status, "request rejected");
        }

        let body = ErrorResponse { code: self.code().to_string(), message: self.public_message() };
        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Forms(FormsError::Validation(rejection.body_text()))
    }
}
