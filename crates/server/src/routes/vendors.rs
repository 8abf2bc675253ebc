use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::Json as ResponseJson,
    routing::{get, put},
};
use db::models::vendor::{CreateVendor, UpdateVendor, Vendor};
use utils::response::OkBody;
use uuid::Uuid;

use crate::{
    AppState,
    error::ApiError,
    extract::{CurrentUser, Json, Path},
};

pub async fn list_vendors(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<ResponseJson<Vec<Vendor>>, ApiError> {
    let vendors = Vendor::find_by_user_id(&state.db.pool, user.id).await?;
    Ok(ResponseJson(vendors))
}

pub async fn create_vendor(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<CreateVendor>,
) -> Result<(StatusCode, ResponseJson<Vendor>), ApiError> {
    let vendor = Vendor::create(&state.db.pool, user.id, &payload).await?;
    Ok((StatusCode::CREATED, ResponseJson(vendor)))
}

pub async fn update_vendor(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateVendor>,
) -> Result<ResponseJson<Vendor>, ApiError> {
    let vendor = Vendor::update(&state.db.pool, id, user.id, &payload)
        .await?
        .ok_or(ApiError::NotFound("Vendor"))?;
    Ok(ResponseJson(vendor))
}

pub async fn delete_vendor(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<OkBody>, ApiError> {
    let deleted = Vendor::delete(&state.db.pool, id, user.id).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound("Vendor"));
    }
    Ok(ResponseJson(OkBody::ok()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/vendors", get(list_vendors).post(create_vendor))
        .route("/vendors/{id}", put(update_vendor).delete(delete_vendor))
}
