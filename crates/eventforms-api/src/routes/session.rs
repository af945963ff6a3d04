//! Session endpoints

use axum::{Router, Json, extract::State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use std::sync::Arc;

use crate::middleware::auth::AdminSession;
use crate::models::SessionView;
use crate::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(current_session))
        .route("/logout", post(logout))
}

/// Who the presented token belongs to
#[utoipa::path(
    get,
    path = "/api/v1/session",
    responses(
        (status = 200, description = "Current session", body = SessionView),
        (status = 401, description = "Missing or invalid credential")
    ),
    tag = "session",
    security(("bearer" = []))
)]
pub async fn current_session(session: AdminSession) -> Json<SessionView> {
    Json(SessionView {
        admin_id: session.admin_id().to_string(),
        email: session.email().to_string(),
        expires_at: session.expires_at(),
    })
}

/// Revoke the presented token
#[utoipa::path(
    post,
    path = "/api/v1/session/logout",
    responses(
        (status = 204, description = "Session ended"),
        (status = 401, description = "Missing or invalid credential")
    ),
    tag = "session",
    security(("bearer" = []))
)]
pub async fn logout(State(state): State<Arc<AppState>>, session: AdminSession) -> StatusCode {
    state.auth.revoke(&session);
    StatusCode::NO_CONTENT
}
