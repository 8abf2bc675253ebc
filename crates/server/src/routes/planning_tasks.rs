use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::Json as ResponseJson,
    routing::{get, put},
};
use db::models::planning_task::{CreatePlanningTask, PlanningTask, UpdatePlanningTask};
use utils::response::OkBody;
use uuid::Uuid;

use crate::{
    AppState,
    error::ApiError,
    extract::{CurrentUser, Json, Path},
};

pub async fn list_planning_tasks(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<ResponseJson<Vec<PlanningTask>>, ApiError> {
    let tasks = PlanningTask::find_by_user_id(&state.db.pool, user.id).await?;
    Ok(ResponseJson(tasks))
}

pub async fn create_planning_task(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<CreatePlanningTask>,
) -> Result<(StatusCode, ResponseJson<PlanningTask>), ApiError> {
    let task = PlanningTask::create(&state.db.pool, user.id, &payload).await?;
    Ok((StatusCode::CREATED, ResponseJson(task)))
}

pub async fn update_planning_task(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePlanningTask>,
) -> Result<ResponseJson<PlanningTask>, ApiError> {
    let task = PlanningTask::update(&state.db.pool, id, user.id, &payload)
        .await?
        .ok_or(ApiError::NotFound("Planning task"))?;
    Ok(ResponseJson(task))
}

pub async fn delete_planning_task(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<OkBody>, ApiError> {
    let deleted = PlanningTask::delete(&state.db.pool, id, user.id).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound("Planning task"));
    }
    Ok(ResponseJson(OkBody::ok()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/planning-tasks",
            get(list_planning_tasks).post(create_planning_task),
        )
        .route(
            "/planning-tasks/{id}",
            put(update_planning_task).delete(delete_planning_task),
        )
}
