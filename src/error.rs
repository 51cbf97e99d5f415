use axum::{
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

const USER_NOT_FOUND_MESSAGE: &str = "User Not found";

/// Any error a request to the users resource can end in.
#[derive(Debug, Error)]
pub(crate) enum ApiError {
    /// Malformed body, missing field or bad id segment.
    #[error("{0}")]
    ClientInput(String),

    #[error("user not found")]
    NotFound,

    #[error("no route")]
    RouteNotFound,

    #[error(transparent)]
    Store(#[from] sea_orm::DbErr),
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::ClientInput(err.to_string())
    }
}

impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        ApiError::ClientInput(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::ClientInput(ref message) => {
                tracing::debug!("rejected request input: {}", message);
                (StatusCode::BAD_REQUEST, format!("Error: {}", message)).into_response()
            }
            ApiError::NotFound => (
                StatusCode::NOT_FOUND,
                Json(json!({ "Error": USER_NOT_FOUND_MESSAGE })),
            )
                .into_response(),
            ApiError::RouteNotFound => StatusCode::NOT_FOUND.into_response(),
            ApiError::Store(ref e) => {
                tracing::warn!("store error occurred: {:?}", e);
                (StatusCode::BAD_REQUEST, format!("Error: {}", self)).into_response()
            }
        }
    }
}
