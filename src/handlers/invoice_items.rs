use super::common::{no_content_response, success_response};
use super::extract::{Json, Path};
use crate::errors::ServiceError;
use crate::services::invoice_items::{InvoiceItemDetails, UpdateInvoiceItemRequest};
use crate::AppState;
use axum::{
    extract::State,
    response::IntoResponse,
    routing::get,
    Router,
};
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/api/invoice-items/{id}",
    params(("id" = Uuid, Path, description = "Invoice item id")),
    responses(
        (status = 200, description = "Invoice item", body = InvoiceItemDetails),
        (status = 404, description = "Item not found", body = crate::errors::ErrorResponse),
    ),
    tag = "invoice-items"
)]
pub async fn get_invoice_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let item = state.services.invoice_items.get_item(id).await?;
    Ok(success_response(item))
}

#[utoipa::path(
    put,
    path = "/api/invoice-items/{id}",
    params(("id" = Uuid, Path, description = "Invoice item id")),
    request_body = UpdateInvoiceItemRequest,
    responses(
        (status = 200, description = "Item updated", body = InvoiceItemDetails),
        (status = 400, description = "Invalid request data", body = crate::errors::ErrorResponse),
        (status = 404, description = "Item not found", body = crate::errors::ErrorResponse),
    ),
    tag = "invoice-items"
)]
pub async fn update_invoice_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateInvoiceItemRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let item = state.services.invoice_items.update_item(id, payload).await?;
    Ok(success_response(item))
}

#[utoipa::path(
    delete,
    path = "/api/invoice-items/{id}",
    params(("id" = Uuid, Path, description = "Invoice item id")),
    responses(
        (status = 204, description = "Item deleted"),
        (status = 404, description = "Item not found", body = crate::errors::ErrorResponse),
    ),
    tag = "invoice-items"
)]
pub async fn delete_invoice_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.invoice_items.delete_item(id).await?;
    Ok(no_content_response())
}

pub fn invoice_item_routes() -> Router<AppState> {
    Router::new().route(
        "/:id",
        get(get_invoice_item)
            .put(update_invoice_item)
            .delete(delete_invoice_item),
    )
}
