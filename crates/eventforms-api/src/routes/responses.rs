//! Response collection endpoints

use axum::{Json, extract::{Path, Query, State}};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use eventforms_core::{Answers, EntityId, ExportFormat};
use std::sync::Arc;

use crate::error::ApiError;
use crate::middleware::auth::AdminSession;
use crate::models::*;
use crate::AppState;

/// Submit a response (public)
#[utoipa::path(
    post,
    path = "/api/v1/forms/{id}/responses",
    params(("id" = String, Path, description = "Form ID")),
    request_body(content = Object, description = "Label to answer (string or array of strings)"),
    responses(
        (status = 201, description = "Response stored", body = ResponseView),
        (status = 404, description = "Form not found", body = ErrorResponse),
        (status = 409, description = "Form is paused", body = ErrorResponse)
    ),
    tag = "responses"
)]
pub async fn submit_response(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ApiJson(answers): ApiJson<Answers>,
) -> Result<(StatusCode, Json<ResponseView>), ApiError> {
    let response = state
        .responses
        .submit_response(&EntityId::from_string(id), answers)
        .await?;
    Ok((StatusCode::CREATED, Json(ResponseView::from(&response))))
}

/// List a form's responses in submission order
#[utoipa::path(
    get,
    path = "/api/v1/forms/{id}/responses",
    params(("id" = String, Path, description = "Form ID")),
    responses(
        (status = 200, description = "All responses, unpaginated", body = [ResponseView]),
        (status = 404, description = "Form not found", body = ErrorResponse)
    ),
    tag = "responses",
    security(("bearer" = []))
)]
pub async fn list_responses(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    session: AdminSession,
) -> Result<Json<Vec<ResponseView>>, ApiError> {
    let responses = state
        .responses
        .list_responses(session.admin_id(), &EntityId::from_string(id))
        .await?;
    Ok(Json(responses.iter().map(ResponseView::from).collect()))
}

/// Download a form's responses as a spreadsheet or document
#[utoipa::path(
    get,
    path = "/api/v1/forms/{id}/responses/export",
    params(
        ("id" = String, Path, description = "Form ID"),
        ("format" = Option<String>, Query, description = "spreadsheet (default) or document")
    ),
    responses(
        (status = 200, description = "File download"),
        (status = 400, description = "Unknown format", body = ErrorResponse),
        (status = 404, description = "Form not found", body = ErrorResponse)
    ),
    tag = "responses",
    security(("bearer" = []))
)]
pub async fn export_responses(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(params): Query<ExportParams>,
    session: AdminSession,
) -> Result<impl IntoResponse, ApiError> {
    let format = match params.format.as_deref() {
        None => ExportFormat::Spreadsheet,
        Some(raw) => raw.parse()?,
    };

    let file = state
        .responses
        .export_responses(session.admin_id(), &EntityId::from_string(id), format)
        .await?;

    let disposition = format!("attachment; filename=\"{}\"", header_safe(&file.file_name));
    Ok((
        [
            (header::CONTENT_TYPE, file.content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        file.bytes,
    ))
}

/// File names come from form names; keep the header value plain ASCII
fn header_safe(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') { c } else { '_' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_safe() {
        assert_eq!(header_safe("ecell_café_night.pdf"), "ecell_caf__night.pdf");
        assert_eq!(header_safe("ecell_a\"b.xlsx"), "ecell_a_b.xlsx");
    }
}
