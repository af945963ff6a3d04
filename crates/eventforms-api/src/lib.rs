//! Event Forms API
//!
//! REST surface over the form builder and response collection services.
//! Administrators authenticate with bearer tokens; fetching a form and
//! submitting a response are public.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;

use axum::{Json, Router, routing::get};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use eventforms_core::infrastructure::persistence::{InMemoryFormRepository, InMemoryResponseRepository};
use eventforms_core::infrastructure::TracingEventPublisher;
use eventforms_core::{EventPublisher, FieldDraft, FormService, FormUseCases, ResponseService, ResponseUseCases};

pub use config::ServerConfig;
pub use error::ApiError;
pub use middleware::auth::{AdminSession, Authenticator};
pub use models::*;

/// API state
pub struct AppState {
    pub forms: Arc<dyn FormUseCases>,
    pub responses: Arc<dyn ResponseUseCases>,
    pub auth: Authenticator,
}

impl AppState {
    /// Wire the services over in-memory storage
    pub fn in_memory(config: &ServerConfig) -> Result<Self, ApiError> {
        let form_repo = Arc::new(InMemoryFormRepository::new());
        let response_repo = Arc::new(InMemoryResponseRepository::new());
        let publisher: Arc<dyn EventPublisher> = Arc::new(TracingEventPublisher);

        Ok(Self {
            forms: Arc::new(FormService::new(
                form_repo.clone(),
                publisher.clone(),
                config.public_base_url.clone(),
            )),
            responses: Arc::new(ResponseService::new(
                form_repo,
                response_repo,
                publisher,
                config.export_prefix.clone(),
            )),
            auth: Authenticator::new(&config.jwt_secret)?,
        })
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Event Forms API",
        description = "Registration forms for E-Cell events and the responses they collect",
        license(name = "Apache-2.0")
    ),
    paths(
        routes::health::health_check,
        routes::forms::create_form,
        routes::forms::list_forms,
        routes::forms::get_form,
        routes::forms::update_form,
        routes::forms::delete_form,
        routes::forms::set_status,
        routes::responses::submit_response,
        routes::responses::list_responses,
        routes::responses::export_responses,
        routes::session::current_session,
        routes::session::logout,
    ),
    components(
        schemas(
            ErrorResponse, routes::health::HealthResponse,
            FieldDraft, FormInput, FieldView, FormView, FormCreatedView, StatusUpdate,
            ResponseView, SessionView
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "forms", description = "Form builder"),
        (name = "responses", description = "Response collection and export"),
        (name = "session", description = "Administrator session")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Build the API router
pub fn build_router(state: AppState, cors_permissive: bool) -> Router {
    let router = Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/api-docs/openapi.json", get(openapi_json))
        .nest("/api/v1", api_routes())
        .layer(TraceLayer::new_for_http());

    let router = if cors_permissive { router.layer(CorsLayer::permissive()) } else { router };
    router.with_state(Arc::new(state))
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .nest("/forms", routes::forms::router())
        .nest("/session", routes::session::router())
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn router() -> Router {
        let config = ServerConfig { jwt_secret: "unit-secret".into(), ..Default::default() };
        build_router(AppState::in_memory(&config).unwrap(), false)
    }

    #[test]
    fn test_state_requires_secret() {
        assert!(matches!(AppState::in_memory(&ServerConfig::default()), Err(ApiError::Config(_))));
    }

    #[tokio::test]
    async fn test_health_route() {
        let response = router()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let response = router()
            .oneshot(Request::builder().uri("/api/v2/forms").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_openapi_lists_form_routes() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/v1/forms/{id}/responses/export"));
    }
}
