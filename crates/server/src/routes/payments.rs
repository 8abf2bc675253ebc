use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json as ResponseJson, Response},
    routing::{get, put},
};
use db::models::payment::{CreatePayment, Payment, UpdatePayment};
use utils::{payload::OneOrMany, response::OkBody};
use uuid::Uuid;

use crate::{
    AppState,
    error::ApiError,
    extract::{CurrentUser, Json, Path},
};

pub async fn list_payments(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<ResponseJson<Vec<Payment>>, ApiError> {
    let payments = Payment::find_by_user_id(&state.db.pool, user.id).await?;
    Ok(ResponseJson(payments))
}

/// POST accepts a single payment or an array (schedule seeding).
pub async fn create_payments(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<OneOrMany<CreatePayment>>,
) -> Result<(StatusCode, Response), ApiError> {
    let body = match payload {
        OneOrMany::One(data) => {
            let record = Payment::create(&state.db.pool, user.id, &data).await?;
            ResponseJson(record).into_response()
        }
        OneOrMany::Many(items) => {
            let records = Payment::create_many(&state.db.pool, user.id, &items).await?;
            ResponseJson(records).into_response()
        }
    };
    Ok((StatusCode::CREATED, body))
}

pub async fn update_payment(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePayment>,
) -> Result<ResponseJson<Payment>, ApiError> {
    let payment = Payment::update(&state.db.pool, id, user.id, &payload)
        .await?
        .ok_or(ApiError::NotFound("Payment"))?;
    Ok(ResponseJson(payment))
}

pub async fn delete_payment(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<OkBody>, ApiError> {
    let deleted = Payment::delete(&state.db.pool, id, user.id).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound("Payment"));
    }
    Ok(ResponseJson(OkBody::ok()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/payments", get(list_payments).post(create_payments))
        .route("/payments/{id}", put(update_payment).delete(delete_payment))
}
