use axum::{
    extract::{Path, State},
    Extension, Json,
};
use models::Person;
use service::auth::Caller;
use service::errors::ServiceError;

use crate::errors::JsonApiError;
use crate::routes::auth::ServerState;

#[utoipa::path(
    get, path = "/persons", tag = "persons",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "All persons in insertion order", body = [crate::openapi::PersonDoc]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn list_persons(
    State(state): State<ServerState>,
    Extension(caller): Extension<Caller>,
) -> Result<Json<Vec<Person>>, JsonApiError> {
    Ok(Json(state.gate.list_persons(&caller.capabilities).await?))
}

#[utoipa::path(
    get, path = "/persons/{person_id}", tag = "persons",
    security(("bearer" = [])),
    params(("person_id" = i32, Path, description = "Person id")),
    responses(
        (status = 200, description = "Person", body = crate::openapi::PersonDoc),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_person(
    State(state): State<ServerState>,
    Extension(caller): Extension<Caller>,
    Path(person_id): Path<i32>,
) -> Result<Json<Person>, JsonApiError> {
    state
        .gate
        .get_person(&caller.capabilities, person_id)
        .await?
        .map(Json)
        .ok_or_else(|| ServiceError::not_found("person").into())
}
