use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use models::Appointment;
use service::auth::Caller;
use service::errors::ServiceError;
use tracing::info;

use crate::errors::JsonApiError;
use crate::metrics;
use crate::routes::auth::ServerState;

#[utoipa::path(
    get, path = "/appointments", tag = "appointments",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "All appointments in insertion order", body = [crate::openapi::AppointmentDoc]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn list_appointments(
    State(state): State<ServerState>,
    Extension(caller): Extension<Caller>,
) -> Result<Json<Vec<Appointment>>, JsonApiError> {
    Ok(Json(state.gate.list_appointments(&caller.capabilities).await?))
}

#[utoipa::path(
    get, path = "/appointments/{appointment_id}", tag = "appointments",
    security(("bearer" = [])),
    params(("appointment_id" = i32, Path, description = "Appointment id")),
    responses(
        (status = 200, description = "Appointment", body = crate::openapi::AppointmentDoc),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_appointment(
    State(state): State<ServerState>,
    Extension(caller): Extension<Caller>,
    Path(appointment_id): Path<i32>,
) -> Result<Json<Appointment>, JsonApiError> {
    state
        .gate
        .get_appointment(&caller.capabilities, appointment_id)
        .await?
        .map(Json)
        .ok_or_else(|| ServiceError::not_found("appointment").into())
}

#[utoipa::path(
    post, path = "/appointments", tag = "appointments",
    security(("bearer" = [])),
    request_body = crate::openapi::AppointmentDoc,
    responses(
        (status = 201, description = "Appended"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn create_appointment(
    State(state): State<ServerState>,
    Extension(caller): Extension<Caller>,
    Json(appointment): Json<Appointment>,
) -> Result<StatusCode, JsonApiError> {
    state.gate.create_appointment(&caller.capabilities, appointment).await?;
    metrics::APPOINTMENTS_WRITTEN_TOTAL.inc();
    Ok(StatusCode::CREATED)
}

/// Replace-on-update; an unmatched id behaves like create.
#[utoipa::path(
    put, path = "/appointments/{appointment_id}", tag = "appointments",
    security(("bearer" = [])),
    params(("appointment_id" = i32, Path, description = "Id of the entry to replace")),
    request_body = crate::openapi::AppointmentDoc,
    responses(
        (status = 200, description = "Replaced or appended"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn update_appointment(
    State(state): State<ServerState>,
    Extension(caller): Extension<Caller>,
    Path(appointment_id): Path<i32>,
    Json(appointment): Json<Appointment>,
) -> Result<StatusCode, JsonApiError> {
    let outcome = state
        .gate
        .update_appointment(&caller.capabilities, appointment_id, appointment)
        .await?;
    metrics::APPOINTMENTS_WRITTEN_TOTAL.inc();
    info!(appointment_id, ?outcome, "appointment updated");
    Ok(StatusCode::OK)
}
