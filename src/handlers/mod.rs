use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

pub(crate) mod user;

pub(crate) use user::*;

const USERS_PREFIX: &str = "/users/";

/// A JSON body, decoded whatever the `Content-Type` says.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct JsonBody<T>(pub(crate) T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await?;
        let value = serde_json::from_slice(&bytes)?;
        Ok(JsonBody(value))
    }
}

/// The id of `/users/{id}`: the last segment of any path under `/users/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct UserId(pub(crate) i64);

impl UserId {
    fn from_path(path: &str) -> Result<Self, ApiError> {
        let rest = path
            .strip_prefix(USERS_PREFIX)
            .ok_or(ApiError::RouteNotFound)?;
        let segment = rest.rsplit('/').next().unwrap_or(rest);

        segment
            .parse()
            .map(UserId)
            .map_err(|e| ApiError::ClientInput(format!("invalid user id `{}`: {}", segment, e)))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for UserId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        UserId::from_path(parts.uri.path())
    }
}

/// Guard for `/users` itself: the collection only answers its bare path, so any
/// query string makes the request an unmatched route.
#[derive(Debug, Clone, Copy)]
pub(crate) struct BarePath;

#[async_trait]
impl<S> FromRequestParts<S> for BarePath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.uri.query() {
            Some(_) => Err(ApiError::RouteNotFound),
            None => Ok(BarePath),
        }
    }
}

/// Fallback for every method/path pair without a handler.
pub(crate) async fn not_found() -> ApiError {
    ApiError::RouteNotFound
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_is_the_last_segment() {
        assert_eq!(UserId::from_path("/users/7").unwrap(), UserId(7));
        assert_eq!(UserId::from_path("/users/a/b/12").unwrap(), UserId(12));
        assert_eq!(
            UserId::from_path("/users/99999999999").unwrap(),
            UserId(99_999_999_999)
        );
    }

    #[test]
    fn bad_ids_are_client_errors() {
        for path in ["/users/abc", "/users/", "/users/1/", "/users/99999999999999999999"] {
            assert!(
                matches!(UserId::from_path(path), Err(ApiError::ClientInput(_))),
                "{}",
                path
            );
        }
    }

    #[test]
    fn foreign_paths_are_not_routed() {
        assert!(matches!(
            UserId::from_path("/accounts/1"),
            Err(ApiError::RouteNotFound)
        ));
    }
}
