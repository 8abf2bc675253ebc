//! Budget total, categories, and line items.

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json as ResponseJson, Response},
    routing::{get, put},
};
use db::models::budget::{
    Budget, BudgetCategory, BudgetItem, CreateBudgetCategory, CreateBudgetItem,
    DEFAULT_TOTAL_BUDGET, UpdateBudgetCategory, UpdateBudgetItem, UpsertBudget,
};
use utils::{payload::OneOrMany, response::OkBody};
use uuid::Uuid;

use crate::{
    AppState,
    error::ApiError,
    extract::{CurrentUser, Json, Path},
};

/// Before the couple saves anything the page shows a stock starting figure.
pub async fn get_budget(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Response, ApiError> {
    match Budget::find_by_user_id(&state.db.pool, user.id).await? {
        Some(budget) => Ok(ResponseJson(budget).into_response()),
        None => Ok(
            ResponseJson(serde_json::json!({ "totalBudget": DEFAULT_TOTAL_BUDGET }))
                .into_response(),
        ),
    }
}

pub async fn upsert_budget(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<UpsertBudget>,
) -> Result<ResponseJson<Budget>, ApiError> {
    let budget = Budget::upsert(&state.db.pool, user.id, payload.total_budget).await?;
    Ok(ResponseJson(budget))
}

pub async fn list_categories(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<ResponseJson<Vec<BudgetCategory>>, ApiError> {
    let categories = BudgetCategory::find_by_user_id(&state.db.pool, user.id).await?;
    Ok(ResponseJson(categories))
}

/// POST accepts a single category or an array (template seeding).
pub async fn create_categories(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<OneOrMany<CreateBudgetCategory>>,
) -> Result<(StatusCode, Response), ApiError> {
    let body = match payload {
        OneOrMany::One(data) => {
            let record = BudgetCategory::create(&state.db.pool, user.id, &data).await?;
            ResponseJson(record).into_response()
        }
        OneOrMany::Many(items) => {
            let records = BudgetCategory::create_many(&state.db.pool, user.id, &items).await?;
            ResponseJson(records).into_response()
        }
    };
    Ok((StatusCode::CREATED, body))
}

pub async fn update_category(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateBudgetCategory>,
) -> Result<ResponseJson<BudgetCategory>, ApiError> {
    let category = BudgetCategory::update(&state.db.pool, id, user.id, &payload)
        .await?
        .ok_or(ApiError::NotFound("Category"))?;
    Ok(ResponseJson(category))
}

/// Deleting a category takes its items with it (FK cascade).
pub async fn delete_category(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<OkBody>, ApiError> {
    let deleted = BudgetCategory::delete(&state.db.pool, id, user.id).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound("Category"));
    }
    Ok(ResponseJson(OkBody::ok()))
}

pub async fn list_items(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<ResponseJson<Vec<BudgetItem>>, ApiError> {
    let items = BudgetItem::find_by_user_id(&state.db.pool, user.id).await?;
    Ok(ResponseJson(items))
}

pub async fn create_item(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<CreateBudgetItem>,
) -> Result<(StatusCode, ResponseJson<BudgetItem>), ApiError> {
    let item = BudgetItem::create(&state.db.pool, user.id, &payload)
        .await?
        .ok_or_else(|| ApiError::BadRequest("Category not found".to_string()))?;
    Ok((StatusCode::CREATED, ResponseJson(item)))
}

pub async fn update_item(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateBudgetItem>,
) -> Result<ResponseJson<BudgetItem>, ApiError> {
    let item = BudgetItem::update(&state.db.pool, id, user.id, &payload)
        .await?
        .ok_or(ApiError::NotFound("Budget item"))?;
    Ok(ResponseJson(item))
}

pub async fn delete_item(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<OkBody>, ApiError> {
    let deleted = BudgetItem::delete(&state.db.pool, id, user.id).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound("Budget item"));
    }
    Ok(ResponseJson(OkBody::ok()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/budget", get(get_budget).put(upsert_budget))
        .route(
            "/budget/categories",
            get(list_categories).post(create_categories),
        )
        .route(
            "/budget/categories/{id}",
            put(update_category).delete(delete_category),
        )
        .route("/budget/items", get(list_items).post(create_item))
        .route("/budget/items/{id}", put(update_item).delete(delete_item))
}
