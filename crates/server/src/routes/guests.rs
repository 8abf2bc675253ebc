use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::Json as ResponseJson,
    routing::{get, put},
};
use db::models::guest::{CreateGuest, Guest, UpdateGuest};
use utils::response::OkBody;
use uuid::Uuid;

use crate::{
    AppState,
    error::ApiError,
    extract::{CurrentUser, Json, Path},
};

pub async fn list_guests(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<ResponseJson<Vec<Guest>>, ApiError> {
    let guests = Guest::find_by_user_id(&state.db.pool, user.id).await?;
    Ok(ResponseJson(guests))
}

pub async fn create_guest(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<CreateGuest>,
) -> Result<(StatusCode, ResponseJson<Guest>), ApiError> {
    let guest = Guest::create(&state.db.pool, user.id, &payload).await?;
    Ok((StatusCode::CREATED, ResponseJson(guest)))
}

pub async fn update_guest(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateGuest>,
) -> Result<ResponseJson<Guest>, ApiError> {
    let guest = Guest::update(&state.db.pool, id, user.id, &payload)
        .await?
        .ok_or(ApiError::NotFound("Guest"))?;
    Ok(ResponseJson(guest))
}

pub async fn delete_guest(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<OkBody>, ApiError> {
    let deleted = Guest::delete(&state.db.pool, id, user.id).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound("Guest"));
    }
    Ok(ResponseJson(OkBody::ok()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/guests", get(list_guests).post(create_guest))
        .route("/guests/{id}", put(update_guest).delete(delete_guest))
}
