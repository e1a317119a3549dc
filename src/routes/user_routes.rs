use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Serialize;

use crate::errors::UserError;
use crate::services::user_service;
use crate::state::users::UserStore;

/// Build all user routes under /users
pub fn routes(store: UserStore) -> Router {
    Router::new()
        .route("/", get(list_users))
        .route(
            "/:id",
            get(get_user)
                .post(upsert_user)
                .delete(delete_user),
        )
        .with_state(store)
}

/// Serialize `value` into an `application/json` response.
fn json_response<T: Serialize>(value: &T) -> Result<Response, UserError> {
    let body = serde_json::to_vec(value).map_err(UserError::Encode)?;
    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}

//
// ─────────────────────────────────────────────────────────────
// POST /users/{id}
// Create or replace the user stored under id
// ─────────────────────────────────────────────────────────────
//
// The body is taken raw so that any content-type is accepted and every
// decode failure maps to 400.
async fn upsert_user(
    Path(id): Path<String>,
    State(store): State<UserStore>,
    body: Bytes,
) -> Result<StatusCode, UserError>
{
    user_service::upsert(&store, id, &body)?;
    Ok(StatusCode::OK)
}

//
// ─────────────────────────────────────────────────────────────
// GET /users/{id}
// Return the JSON record or 404
// ─────────────────────────────────────────────────────────────
//
async fn get_user(
    Path(id): Path<String>,
    State(store): State<UserStore>,
) -> Result<Response, UserError>
{
    let user = user_service::get(&store, &id)?;
    json_response(&user)
}

//
// ─────────────────────────────────────────────────────────────
// GET /users
// Return every record as a bare JSON array
// ─────────────────────────────────────────────────────────────
//
async fn list_users(
    State(store): State<UserStore>,
) -> Result<Response, UserError>
{
    json_response(&user_service::list(&store))
}

//
// ─────────────────────────────────────────────────────────────
// DELETE /users/{id}
// Remove the record if it exists
// ─────────────────────────────────────────────────────────────
//
async fn delete_user(
    Path(id): Path<String>,
    State(store): State<UserStore>,
) -> StatusCode
{
    user_service::delete(&store, &id);
    StatusCode::OK
}
