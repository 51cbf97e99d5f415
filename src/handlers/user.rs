use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::sync::Arc;

use crate::error::ApiError;
use crate::handlers::{BarePath, JsonBody, UserId};
use crate::server::State;
use crate::store::UserInput;

/// The response output for `PUT /users/:id`
#[derive(Debug, Serialize)]
pub(crate) struct UpdatedResponse {
    pub(crate) msg: &'static str,
}

/// Handler for `GET /users`
pub(crate) async fn list_users(
    _: BarePath,
    state: Extension<Arc<State>>,
) -> Result<Response, ApiError> {
    let users = state.store.list_users().await?;
    Ok(Json(users).into_response())
}

/// Handler for `POST /users`
pub(crate) async fn create_user(
    _: BarePath,
    state: Extension<Arc<State>>,
    JsonBody(input): JsonBody<UserInput>,
) -> Result<Response, ApiError> {
    let id = state.store.create_user(input).await?;
    tracing::debug!(id, "user created");

    Ok(StatusCode::CREATED.into_response())
}

/// Handler for `PUT /users/:id`
pub(crate) async fn update_user(
    UserId(id): UserId,
    state: Extension<Arc<State>>,
    JsonBody(input): JsonBody<UserInput>,
) -> Result<Response, ApiError> {
    if !state.store.update_user(id, input).await? {
        return Err(ApiError::NotFound);
    }

    Ok(Json(UpdatedResponse {
        msg: "User updated successfully!",
    })
    .into_response())
}

/// Handler for `DELETE /users/:id`
pub(crate) async fn delete_user(
    UserId(id): UserId,
    state: Extension<Arc<State>>,
) -> Result<Response, ApiError> {
    if !state.store.delete_user(id).await? {
        return Err(ApiError::NotFound);
    }
    tracing::debug!(id, "user deleted");

    Ok(StatusCode::NO_CONTENT.into_response())
}
