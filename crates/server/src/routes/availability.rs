use axum::{
    extract::{Path, State},
    Extension, Json,
};
use models::AvailableTime;
use service::auth::Caller;
use tracing::debug;

use crate::errors::JsonApiError;
use crate::routes::auth::ServerState;

#[utoipa::path(
    get, path = "/availability", tag = "availability",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Every availability window", body = [crate::openapi::AvailableTimeDoc]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn list_availability(
    State(state): State<ServerState>,
    Extension(caller): Extension<Caller>,
) -> Result<Json<Vec<AvailableTime>>, JsonApiError> {
    Ok(Json(state.gate.list_availability(&caller.capabilities).await?))
}

/// Unknown ids give an empty list, never 404.
#[utoipa::path(
    get, path = "/availability/{person_id}", tag = "availability",
    security(("bearer" = [])),
    params(("person_id" = i32, Path, description = "Person id")),
    responses(
        (status = 200, description = "Windows for the person, possibly empty", body = [crate::openapi::AvailableTimeDoc]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn list_availability_for_person(
    State(state): State<ServerState>,
    Extension(caller): Extension<Caller>,
    Path(person_id): Path<i32>,
) -> Result<Json<Vec<AvailableTime>>, JsonApiError> {
    let windows = state
        .gate
        .list_availability_for_person(&caller.capabilities, person_id)
        .await?;
    debug!(person_id, count = windows.len(), "availability for person");
    Ok(Json(windows))
}
