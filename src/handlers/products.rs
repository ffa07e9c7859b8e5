use super::common::{created_response, no_content_response, success_response};
use super::extract::{Json, Path, Query};
use crate::errors::ServiceError;
use crate::services::products::{
    LowStockProduct, ProductRequest, ProductResponse, ProductWithCategory, UncategorizedProduct,
    UpdateStockRequest,
};
use crate::AppState;
use axum::{
    extract::State,
    response::IntoResponse,
    routing::{get, put},
    Router,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

#[derive(Debug, Deserialize, IntoParams)]
pub struct LowStockQuery {
    /// Defaults to the configured threshold
    pub threshold: Option<i32>,
}

#[utoipa::path(
    get,
    path = "/api/products",
    responses(
        (status = 200, description = "Products with category name", body = [ProductWithCategory]),
        (status = 404, description = "No products", body = crate::errors::ErrorResponse),
    ),
    tag = "products"
)]
pub async fn list_products(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServiceError> {
    let products = state.services.products.list_products().await?;
    Ok(success_response(products))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(("id" = Uuid, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product", body = ProductResponse),
        (status = 404, description = "Product not found", body = crate::errors::ErrorResponse),
    ),
    tag = "products"
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let product = state.services.products.get_product(id).await?;
    Ok(success_response(product))
}

#[utoipa::path(
    post,
    path = "/api/products",
    request_body = ProductRequest,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, description = "Invalid request data", body = crate::errors::ErrorResponse),
        (status = 404, description = "Category not found", body = crate::errors::ErrorResponse),
    ),
    tag = "products"
)]
pub async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<ProductRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let product = state.services.products.create_product(payload).await?;
    Ok(created_response(product))
}

#[utoipa::path(
    put,
    path = "/api/products/{id}",
    params(("id" = Uuid, Path, description = "Product id")),
    request_body = ProductRequest,
    responses(
        (status = 200, description = "Product updated", body = ProductResponse),
        (status = 400, description = "Invalid request data", body = crate::errors::ErrorResponse),
        (status = 404, description = "Product or category not found", body = crate::errors::ErrorResponse),
    ),
    tag = "products"
)]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ProductRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let product = state.services.products.update_product(id, payload).await?;
    Ok(success_response(product))
}

#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    params(("id" = Uuid, Path, description = "Product id")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 404, description = "Product not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Product is referenced by invoice items", body = crate::errors::ErrorResponse),
    ),
    tag = "products"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.products.delete_product(id).await?;
    Ok(no_content_response())
}

#[utoipa::path(
    put,
    path = "/api/products/{id}/stock",
    params(("id" = Uuid, Path, description = "Product id")),
    request_body = UpdateStockRequest,
    responses(
        (status = 200, description = "Stock updated", body = ProductResponse),
        (status = 400, description = "Negative stock", body = crate::errors::ErrorResponse),
        (status = 404, description = "Product not found", body = crate::errors::ErrorResponse),
    ),
    tag = "products"
)]
pub async fn update_stock(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStockRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let product = state.services.products.update_stock(id, payload).await?;
    Ok(success_response(product))
}

#[utoipa::path(
    put,
    path = "/api/products/{id}/category/{category_id}",
    params(
        ("id" = Uuid, Path, description = "Product id"),
        ("category_id" = Uuid, Path, description = "Category id"),
    ),
    responses(
        (status = 200, description = "Product assigned", body = ProductResponse),
        (status = 404, description = "Product or category not found", body = crate::errors::ErrorResponse),
    ),
    tag = "products"
)]
pub async fn assign_category(
    State(state): State<AppState>,
    Path((id, category_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, ServiceError> {
    let product = state
        .services
        .products
        .assign_category(id, category_id)
        .await?;
    Ok(success_response(product))
}

#[utoipa::path(
    get,
    path = "/api/products/low-stock",
    params(LowStockQuery),
    responses(
        (status = 200, description = "Products at or below the threshold", body = [LowStockProduct]),
        (status = 400, description = "Negative threshold", body = crate::errors::ErrorResponse),
    ),
    tag = "products"
)]
pub async fn low_stock(
    State(state): State<AppState>,
    Query(query): Query<LowStockQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let threshold = query.threshold.unwrap_or(state.config.low_stock_threshold);
    let products = state.services.products.low_stock(threshold).await?;
    Ok(success_response(products))
}

#[utoipa::path(
    get,
    path = "/api/products/uncategorized",
    responses(
        (status = 200, description = "Products without a category", body = [UncategorizedProduct]),
    ),
    tag = "products"
)]
pub async fn uncategorized(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServiceError> {
    let products = state.services.products.uncategorized().await?;
    Ok(success_response(products))
}

pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/low-stock", get(low_stock))
        .route("/uncategorized", get(uncategorized))
        .route(
            "/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/:id/stock", put(update_stock))
        .route("/:id/category/:category_id", put(assign_category))
}
