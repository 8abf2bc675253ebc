use axum::{
    extract::{FromRequest, FromRequestParts, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use utils::sessions::session_id_from_headers;
use uuid::Uuid;

use crate::{AppState, error::ApiError};

/// axum's `Json` with rejections mapped to the API's `{message}` 400 body,
/// so a malformed payload reports its first schema error like any other
/// validation failure.
pub struct Json<T>(pub T);

impl<S, T> FromRequest<S> for Json<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(Json(value)),
            Err(rejection) => Err(ApiError::BadRequest(rejection.body_text())),
        }
    }
}

/// axum's `Path` with rejections mapped the same way, so a malformed id
/// segment comes back as a `{message}` 400 too.
pub struct Path<T>(pub T);

impl<S, T> FromRequestParts<S> for Path<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match axum::extract::Path::<T>::from_request_parts(parts, state).await {
            Ok(axum::extract::Path(value)) => Ok(Path(value)),
            Err(rejection) => Err(ApiError::BadRequest(rejection.body_text())),
        }
    }
}

/// The authenticated caller. Extraction fails with 401 when the session
/// cookie is missing or no longer maps to a live session.
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser {
    pub id: Uuid,
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session_id =
            session_id_from_headers(&parts.headers).ok_or(ApiError::Unauthorized)?;
        let user_id = state
            .sessions
            .get(&session_id)
            .await
            .ok_or(ApiError::Unauthorized)?;
        Ok(CurrentUser { id: user_id })
    }
}
