use super::common::success_response;
use super::extract::{Json};
use crate::errors::ServiceError;
use crate::services::store_info::{StoreInfoResponse, UpsertStoreInfoRequest};
use crate::AppState;
use axum::{
    extract::State,
    response::IntoResponse,
    routing::get,
    Router,
};

#[utoipa::path(
    get,
    path = "/api/store-info",
    responses(
        (status = 200, description = "Store profile", body = StoreInfoResponse),
        (status = 404, description = "Store profile not set", body = crate::errors::ErrorResponse),
    ),
    tag = "store-info"
)]
pub async fn get_store_info(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServiceError> {
    let info = state.services.store_info.get_store_info().await?;
    Ok(success_response(info))
}

#[utoipa::path(
    put,
    path = "/api/store-info",
    request_body = UpsertStoreInfoRequest,
    responses(
        (status = 200, description = "Store profile saved", body = StoreInfoResponse),
        (status = 400, description = "Invalid request data", body = crate::errors::ErrorResponse),
    ),
    tag = "store-info"
)]
pub async fn upsert_store_info(
    State(state): State<AppState>,
    Json(payload): Json<UpsertStoreInfoRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let info = state.services.store_info.upsert_store_info(payload).await?;
    Ok(success_response(info))
}

pub fn store_info_routes() -> Router<AppState> {
    Router::new().route("/", get(get_store_info).put(upsert_store_info))
}
