use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::Json as ResponseJson,
    routing::{get, put},
};
use db::models::note::{CreateNote, Note, UpdateNote};
use utils::response::OkBody;
use uuid::Uuid;

use crate::{
    AppState,
    error::ApiError,
    extract::{CurrentUser, Json, Path},
};

pub async fn list_notes(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<ResponseJson<Vec<Note>>, ApiError> {
    let notes = Note::find_by_user_id(&state.db.pool, user.id).await?;
    Ok(ResponseJson(notes))
}

pub async fn create_note(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<CreateNote>,
) -> Result<(StatusCode, ResponseJson<Note>), ApiError> {
    let note = Note::create(&state.db.pool, user.id, &payload).await?;
    Ok((StatusCode::CREATED, ResponseJson(note)))
}

pub async fn update_note(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateNote>,
) -> Result<ResponseJson<Note>, ApiError> {
    let note = Note::update(&state.db.pool, id, user.id, &payload)
        .await?
        .ok_or(ApiError::NotFound("Note"))?;
    Ok(ResponseJson(note))
}

pub async fn delete_note(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<OkBody>, ApiError> {
    let deleted = Note::delete(&state.db.pool, id, user.id).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound("Note"));
    }
    Ok(ResponseJson(OkBody::ok()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/notes", get(list_notes).post(create_note))
        .route("/notes/{id}", put(update_note).delete(delete_note))
}
