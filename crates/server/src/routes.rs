pub mod appointments;
pub mod auth;
pub mod availability;
pub mod persons;

use axum::{middleware, routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

use crate::metrics;
use crate::openapi::ApiDoc;
use auth::ServerState;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

/// Root route: empty 200.
pub async fn root() {}

/// Build the full application router: public routes, bearer-protected
/// scheduling routes, and the OpenAPI/Swagger UI.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    // Public routes
    let public = Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/metrics", get(metrics::metrics_handler));

    // Protected scheduling routes; singular paths are legacy aliases
    let api = Router::new()
        .route("/persons", get(persons::list_persons))
        .route("/persons/:person_id", get(persons::get_person))
        .route("/person", get(persons::list_persons))
        .route("/person/:person_id", get(persons::get_person))
        .route("/availability", get(availability::list_availability))
        .route("/availability/:person_id", get(availability::list_availability_for_person))
        .route(
            "/appointments",
            get(appointments::list_appointments).post(appointments::create_appointment),
        )
        .route(
            "/appointments/:appointment_id",
            get(appointments::get_appointment).put(appointments::update_appointment),
        )
        .route(
            "/appointment",
            get(appointments::list_appointments).post(appointments::create_appointment),
        )
        .route(
            "/appointment/:appointment_id",
            get(appointments::get_appointment).put(appointments::update_appointment),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_bearer_token));

    // Compose
    public
        .merge(api)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(middleware::from_fn(metrics::track_requests))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
