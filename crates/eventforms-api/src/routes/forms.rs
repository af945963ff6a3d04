//! Form definition endpoints

use axum::{Router, Json, extract::{Path, State}};
use axum::http::StatusCode;
use axum::routing::{get, put};
use eventforms_core::{EntityId, FormStatus};
use std::sync::Arc;

use crate::error::ApiError;
use crate::middleware::auth::AdminSession;
use crate::models::*;
use crate::routes::responses;
use crate::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_forms).post(create_form))
        .route("/:id", get(get_form).put(update_form).delete(delete_form))
        .route("/:id/status", put(set_status))
        .route("/:id/responses", get(responses::list_responses).post(responses::submit_response))
        .route("/:id/responses/export", get(responses::export_responses))
}

/// Create a form
#[utoipa::path(
    post,
    path = "/api/v1/forms",
    request_body = FormInput,
    responses(
        (status = 201, description = "Form created", body = FormCreatedView),
        (status = 400, description = "Invalid definition", body = ErrorResponse),
        (status = 401, description = "Missing or invalid credential", body = ErrorResponse)
    ),
    tag = "forms",
    security(("bearer" = []))
)]
pub async fn create_form(
    State(state): State<Arc<AppState>>,
    session: AdminSession,
    ApiJson(input): ApiJson<FormInput>,
) -> Result<(StatusCode, Json<FormCreatedView>), ApiError> {
    let created = state.forms.create_form(session.admin_id(), input.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(FormCreatedView { id: created.form.id().to_string(), link: created.link }),
    ))
}

/// List the caller's forms
#[utoipa::path(
    get,
    path = "/api/v1/forms",
    responses(
        (status = 200, description = "Forms owned by the caller", body = [FormView]),
        (status = 401, description = "Missing or invalid credential", body = ErrorResponse)
    ),
    tag = "forms",
    security(("bearer" = []))
)]
pub async fn list_forms(
    State(state): State<Arc<AppState>>,
    session: AdminSession,
) -> Result<Json<Vec<FormView>>, ApiError> {
    let forms = state.forms.list_forms(session.admin_id()).await?;
    Ok(Json(forms.iter().map(FormView::from).collect()))
}

/// Get a form definition (public, any status)
#[utoipa::path(
    get,
    path = "/api/v1/forms/{id}",
    params(("id" = String, Path, description = "Form ID")),
    responses(
        (status = 200, description = "Form definition", body = FormView),
        (status = 404, description = "Form not found", body = ErrorResponse)
    ),
    tag = "forms"
)]
pub async fn get_form(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<FormView>, ApiError> {
    let form = state.forms.get_form(&EntityId::from_string(id)).await?;
    Ok(Json(FormView::from(&form)))
}

/// Replace a form's name and fields
#[utoipa::path(
    put,
    path = "/api/v1/forms/{id}",
    params(("id" = String, Path, description = "Form ID")),
    request_body = FormInput,
    responses(
        (status = 200, description = "Updated form", body = FormView),
        (status = 400, description = "Invalid definition", body = ErrorResponse),
        (status = 404, description = "Form not found", body = ErrorResponse)
    ),
    tag = "forms",
    security(("bearer" = []))
)]
pub async fn update_form(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    session: AdminSession,
    ApiJson(input): ApiJson<FormInput>,
) -> Result<Json<FormView>, ApiError> {
    let form = state
        .forms
        .update_form(session.admin_id(), &EntityId::from_string(id), input.into())
        .await?;
    Ok(Json(FormView::from(&form)))
}

/// Delete a form; stored responses are kept
#[utoipa::path(
    delete,
    path = "/api/v1/forms/{id}",
    params(("id" = String, Path, description = "Form ID")),
    responses(
        (status = 204, description = "Form deleted"),
        (status = 404, description = "Form not found", body = ErrorResponse)
    ),
    tag = "forms",
    security(("bearer" = []))
)]
pub async fn delete_form(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    session: AdminSession,
) -> Result<StatusCode, ApiError> {
    state.forms.delete_form(session.admin_id(), &EntityId::from_string(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Pause or resume response collection
#[utoipa::path(
    put,
    path = "/api/v1/forms/{id}/status",
    params(("id" = String, Path, description = "Form ID")),
    request_body = StatusUpdate,
    responses(
        (status = 200, description = "Form with its new status", body = FormView),
        (status = 400, description = "Unknown status", body = ErrorResponse),
        (status = 404, description = "Form not found", body = ErrorResponse)
    ),
    tag = "forms",
    security(("bearer" = []))
)]
pub async fn set_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    session: AdminSession,
    ApiJson(update): ApiJson<StatusUpdate>,
) -> Result<Json<FormView>, ApiError> {
    let status: FormStatus = update.status.parse()?;
    let form = state
        .forms
        .set_status(session.admin_id(), &EntityId::from_string(id), status)
        .await?;
    Ok(Json(FormView::from(&form)))
}
