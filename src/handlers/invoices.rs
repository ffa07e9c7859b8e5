use super::common::{
    created_response, no_content_response, parse_optional_date_bound, success_response,
};
use super::extract::{Json, Path, Query};
use crate::errors::ServiceError;
use crate::services::{
    invoice_items::{AddInvoiceItemRequest, InvoiceItemDetails},
    invoices::{CreateInvoiceRequest, InvoiceDetails, InvoiceSearch, InvoiceTotal},
};
use crate::AppState;
use axum::{
    extract::State,
    response::IntoResponse,
    routing::get,
    Router,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct InvoiceSearchQuery {
    /// Case-insensitive fragment of the customer's full name
    pub customer_name: Option<String>,
    /// RFC 3339 timestamp or YYYY-MM-DD
    pub from_date: Option<String>,
    /// RFC 3339 timestamp or YYYY-MM-DD (whole day)
    pub to_date: Option<String>,
    #[param(value_type = Option<String>)]
    pub min_amount: Option<Decimal>,
    #[param(value_type = Option<String>)]
    pub max_amount: Option<Decimal>,
}

impl InvoiceSearchQuery {
    fn into_search(self) -> Result<InvoiceSearch, ServiceError> {
        Ok(InvoiceSearch {
            customer_name: self.customer_name.unwrap_or_default(),
            from_date: parse_optional_date_bound("from_date", self.from_date.as_deref(), false)?,
            to_date: parse_optional_date_bound("to_date", self.to_date.as_deref(), true)?,
            min_amount: self.min_amount,
            max_amount: self.max_amount,
        })
    }
}

#[utoipa::path(
    get,
    path = "/api/invoices",
    responses(
        (status = 200, description = "All invoices with items", body = [InvoiceDetails]),
        (status = 404, description = "No invoices", body = crate::errors::ErrorResponse),
    ),
    tag = "invoices"
)]
pub async fn list_invoices(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServiceError> {
    let invoices = state.services.invoices.list_invoices().await?;
    Ok(success_response(invoices))
}

#[utoipa::path(
    get,
    path = "/api/invoices/{id}",
    params(("id" = Uuid, Path, description = "Invoice id")),
    responses(
        (status = 200, description = "Invoice", body = InvoiceDetails),
        (status = 404, description = "Invoice not found", body = crate::errors::ErrorResponse),
    ),
    tag = "invoices"
)]
pub async fn get_invoice(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let invoice = state.services.invoices.get_invoice(id).await?;
    Ok(success_response(invoice))
}

#[utoipa::path(
    post,
    path = "/api/invoices",
    request_body = CreateInvoiceRequest,
    responses(
        (status = 201, description = "Invoice created", body = InvoiceDetails),
        (status = 400, description = "Invalid request data", body = crate::errors::ErrorResponse),
    ),
    tag = "invoices"
)]
pub async fn create_invoice(
    State(state): State<AppState>,
    Json(payload): Json<CreateInvoiceRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let invoice = state.services.invoices.create_invoice(payload).await?;
    Ok(created_response(invoice))
}

#[utoipa::path(
    delete,
    path = "/api/invoices/{id}",
    params(("id" = Uuid, Path, description = "Invoice id")),
    responses(
        (status = 204, description = "Invoice and its items deleted"),
        (status = 404, description = "Invoice not found", body = crate::errors::ErrorResponse),
    ),
    tag = "invoices"
)]
pub async fn delete_invoice(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.invoices.delete_invoice(id).await?;
    Ok(no_content_response())
}

#[utoipa::path(
    get,
    path = "/api/invoices/{id}/total",
    params(("id" = Uuid, Path, description = "Invoice id")),
    responses(
        (status = 200, description = "Computed total", body = InvoiceTotal),
        (status = 404, description = "Invoice not found", body = crate::errors::ErrorResponse),
    ),
    tag = "invoices"
)]
pub async fn invoice_total(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let total = state.services.invoices.invoice_total(id).await?;
    Ok(success_response(total))
}

#[utoipa::path(
    get,
    path = "/api/invoices/search",
    params(InvoiceSearchQuery),
    responses(
        (status = 200, description = "Matching invoices", body = [InvoiceDetails]),
        (status = 400, description = "Invalid search criteria", body = crate::errors::ErrorResponse),
        (status = 404, description = "No matches", body = crate::errors::ErrorResponse),
    ),
    tag = "invoices"
)]
pub async fn search_invoices(
    State(state): State<AppState>,
    Query(query): Query<InvoiceSearchQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let invoices = state
        .services
        .invoices
        .search_invoices(query.into_search()?)
        .await?;
    Ok(success_response(invoices))
}

#[utoipa::path(
    get,
    path = "/api/invoices/{id}/items",
    params(("id" = Uuid, Path, description = "Invoice id")),
    responses(
        (status = 200, description = "Invoice items", body = [InvoiceItemDetails]),
        (status = 404, description = "Invoice not found or empty", body = crate::errors::ErrorResponse),
    ),
    tag = "invoices"
)]
pub async fn list_invoice_items(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let items = state.services.invoice_items.list_items(id).await?;
    Ok(success_response(items))
}

#[utoipa::path(
    post,
    path = "/api/invoices/{id}/items",
    params(("id" = Uuid, Path, description = "Invoice id")),
    request_body = AddInvoiceItemRequest,
    responses(
        (status = 201, description = "Item added", body = InvoiceItemDetails),
        (status = 400, description = "Invalid request data", body = crate::errors::ErrorResponse),
        (status = 404, description = "Invoice not found", body = crate::errors::ErrorResponse),
    ),
    tag = "invoices"
)]
pub async fn add_invoice_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AddInvoiceItemRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let item = state.services.invoice_items.add_item(id, payload).await?;
    Ok(created_response(item))
}

pub fn invoice_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_invoices).post(create_invoice))
        .route("/search", get(search_invoices))
        .route("/:id", get(get_invoice).delete(delete_invoice))
        .route("/:id/total", get(invoice_total))
        .route(
            "/:id/items",
            get(list_invoice_items).post(add_invoice_item),
        )
}
