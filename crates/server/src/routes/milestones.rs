use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json as ResponseJson, Response},
    routing::{get, patch},
};
use db::models::milestone::{CreateMilestone, Milestone, UpdateMilestone};
use utils::{payload::OneOrMany, response::OkBody};
use uuid::Uuid;

use crate::{
    AppState,
    error::ApiError,
    extract::{CurrentUser, Json, Path},
};

pub async fn list_milestones(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<ResponseJson<Vec<Milestone>>, ApiError> {
    let milestones = Milestone::find_by_user_id(&state.db.pool, user.id).await?;
    Ok(ResponseJson(milestones))
}

/// POST accepts a single milestone or an array (checklist seeding).
pub async fn create_milestones(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<OneOrMany<CreateMilestone>>,
) -> Result<(StatusCode, Response), ApiError> {
    let body = match payload {
        OneOrMany::One(data) => {
            let record = Milestone::create(&state.db.pool, user.id, &data).await?;
            ResponseJson(record).into_response()
        }
        OneOrMany::Many(items) => {
            let records = Milestone::create_many(&state.db.pool, user.id, &items).await?;
            ResponseJson(records).into_response()
        }
    };
    Ok((StatusCode::CREATED, body))
}

pub async fn update_milestone(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateMilestone>,
) -> Result<ResponseJson<Milestone>, ApiError> {
    let milestone = Milestone::update(&state.db.pool, id, user.id, &payload)
        .await?
        .ok_or(ApiError::NotFound("Milestone"))?;
    Ok(ResponseJson(milestone))
}

pub async fn delete_milestone(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<OkBody>, ApiError> {
    let deleted = Milestone::delete(&state.db.pool, id, user.id).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound("Milestone"));
    }
    Ok(ResponseJson(OkBody::ok()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/milestones", get(list_milestones).post(create_milestones))
        .route(
            "/milestones/{id}",
            patch(update_milestone).delete(delete_milestone),
        )
}
