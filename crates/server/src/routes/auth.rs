//! Registration, login, and session lookup.

use axum::{
    Router,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Json as ResponseJson},
    routing::{get, post},
};
use db::models::user::{Credentials, User, UserInfo};
use utils::{
    password,
    response::OkBody,
    sessions::{clear_session_cookie, session_cookie, session_id_from_headers},
};

use crate::{
    AppState,
    error::ApiError,
    extract::{CurrentUser, Json},
};

pub async fn register(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> Result<impl IntoResponse, ApiError> {
    let username = credentials.username.trim().to_string();
    if username.is_empty() || credentials.password.is_empty() {
        return Err(ApiError::BadRequest(
            "Username and password are required".to_string(),
        ));
    }
    if User::find_by_username(&state.db.pool, &username)
        .await?
        .is_some()
    {
        return Err(ApiError::BadRequest("Username already taken".to_string()));
    }

    let hash = password::hash(credentials.password).await?;
    // Two registrations can race past the check above; the UNIQUE constraint
    // decides, and the loser gets the same 400 as the fast path.
    let user = match User::create(&state.db.pool, &username, &hash).await {
        Ok(user) => user,
        Err(sqlx::Error::Database(err)) if err.is_unique_violation() => {
            return Err(ApiError::BadRequest("Username already taken".to_string()));
        }
        Err(err) => return Err(err.into()),
    };
    let session_id = state.sessions.create(user.id).await;
    tracing::info!(username = %user.username, "user registered");

    Ok((
        StatusCode::CREATED,
        [(header::SET_COOKIE, session_cookie(&session_id))],
        ResponseJson(user.info()),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> Result<impl IntoResponse, ApiError> {
    let Some(user) = User::find_by_username(&state.db.pool, &credentials.username).await? else {
        return Err(ApiError::InvalidCredentials);
    };
    if !password::verify(user.password_hash.clone(), credentials.password).await? {
        return Err(ApiError::InvalidCredentials);
    }

    let session_id = state.sessions.create(user.id).await;
    Ok((
        [(header::SET_COOKIE, session_cookie(&session_id))],
        ResponseJson(user.info()),
    ))
}

pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    if let Some(session_id) = session_id_from_headers(&headers) {
        state.sessions.remove(&session_id).await;
    }
    Ok((
        [(header::SET_COOKIE, clear_session_cookie())],
        ResponseJson(OkBody::ok()),
    ))
}

pub async fn get_user(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<ResponseJson<UserInfo>, ApiError> {
    // A session can outlive its user row; treat that as logged out.
    let user = User::find_by_id(&state.db.pool, user.id)
        .await?
        .ok_or(ApiError::Unauthorized)?;
    Ok(ResponseJson(user.info()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/user", get(get_user))
}
