use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "EshopApp API",
        version = "0.1.0",
        description = r#"
# EshopApp back-office API

Manages the catalogue, customers and invoices of a single small shop.

## Features

- **Categories**: Hierarchical categories rendered as an indented flat list
- **Products**: Pricing, stock levels, low-stock and uncategorized views
- **Customers**: Contact details and customer type
- **Invoices**: Invoices with line items, computed totals and search
- **Store profile**: Name, address, phone and logo of the shop
- **Reports**: Sales per customer over a date range

## Error Handling

Every failure uses the same body shape. Validation failures list messages per field:

```json
{
  "error": "Bad Request",
  "message": "One or more validation errors occurred",
  "errors": { "price": ["must not be negative"] },
  "request_id": "0b7c7c5e-1d1f-4b6a-9a53-9c3f0e8f4c11",
  "timestamp": "2024-01-01T00:00:00Z"
}
```

Monetary amounts are exact decimals serialized as strings.
        "#,
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development")
    ),
    tags(
        (name = "categories", description = "Category tree endpoints"),
        (name = "products", description = "Product catalogue endpoints"),
        (name = "customers", description = "Customer endpoints"),
        (name = "invoices", description = "Invoice endpoints"),
        (name = "invoice-items", description = "Invoice line item endpoints"),
        (name = "store-info", description = "Store profile endpoints"),
        (name = "reports", description = "Reporting endpoints"),
        (name = "health", description = "Health check endpoints")
    ),
    paths(
        crate::api_status,
        crate::health_check,

        crate::handlers::categories::list_categories,
        crate::handlers::categories::get_category,
        crate::handlers::categories::create_category,
        crate::handlers::categories::update_category,
        crate::handlers::categories::delete_category,

        crate::handlers::products::list_products,
        crate::handlers::products::get_product,
        crate::handlers::products::create_product,
        crate::handlers::products::update_product,
        crate::handlers::products::delete_product,
        crate::handlers::products::update_stock,
        crate::handlers::products::assign_category,
        crate::handlers::products::low_stock,
        crate::handlers::products::uncategorized,

        crate::handlers::customers::list_customers,
        crate::handlers::customers::get_customer,
        crate::handlers::customers::create_customer,
        crate::handlers::customers::update_customer,
        crate::handlers::customers::delete_customer,

        crate::handlers::invoices::list_invoices,
        crate::handlers::invoices::get_invoice,
        crate::handlers::invoices::create_invoice,
        crate::handlers::invoices::delete_invoice,
        crate::handlers::invoices::invoice_total,
        crate::handlers::invoices::search_invoices,
        crate::handlers::invoices::list_invoice_items,
        crate::handlers::invoices::add_invoice_item,

        crate::handlers::invoice_items::get_invoice_item,
        crate::handlers::invoice_items::update_invoice_item,
        crate::handlers::invoice_items::delete_invoice_item,

        crate::handlers::store_info::get_store_info,
        crate::handlers::store_info::upsert_store_info,

        crate::handlers::reports::sales_report,
    ),
    components(
        schemas(
            crate::ServiceStatus,
            crate::HealthReport,
            crate::models::FlatCategory,
            crate::entities::customer::CustomerType,
            crate::entities::invoice::InvoiceStatus,

            crate::services::categories::CreateCategoryRequest,
            crate::services::categories::UpdateCategoryRequest,
            crate::services::categories::CategoryResponse,

            crate::services::products::ProductRequest,
            crate::services::products::UpdateStockRequest,
            crate::services::products::ProductResponse,
            crate::services::products::ProductWithCategory,
            crate::services::products::LowStockProduct,
            crate::services::products::UncategorizedProduct,

            crate::services::customers::CustomerRequest,
            crate::services::customers::CustomerResponse,

            crate::services::invoices::CreateInvoiceItem,
            crate::services::invoices::CreateInvoiceRequest,
            crate::services::invoices::InvoiceDetails,
            crate::services::invoices::InvoiceTotal,

            crate::services::invoice_items::AddInvoiceItemRequest,
            crate::services::invoice_items::UpdateInvoiceItemRequest,
            crate::services::invoice_items::InvoiceItemDetails,

            crate::services::store_info::UpsertStoreInfoRequest,
            crate::services::store_info::StoreInfoResponse,

            crate::services::reports::CustomerSales,
            crate::services::reports::SalesReport,

            crate::errors::ErrorResponse
        )
    )
)]
pub struct ApiDocV1;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDocV1::openapi())
        .config(utoipa_swagger_ui::Config::from("/api-docs/openapi.json").try_it_out_enabled(true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_resource() {
        let openapi = ApiDocV1::openapi();
        let json = serde_json::to_string_pretty(&openapi).unwrap();
        assert!(json.contains("EshopApp API"));
        for path in [
            "/api/categories",
            "/api/products/{id}/category/{category_id}",
            "/api/products/low-stock",
            "/api/customers/{id}",
            "/api/invoices/search",
            "/api/invoices/{id}/items",
            "/api/invoice-items/{id}",
            "/api/store-info",
            "/api/reports/sales",
        ] {
            assert!(json.contains(path), "missing path {path}");
        }
    }

    #[test]
    fn error_schema_is_registered() {
        let openapi = ApiDocV1::openapi();
        let components = openapi.components.expect("components expected");
        assert!(components.schemas.contains_key("ErrorResponse"));
        assert!(components.schemas.contains_key("SalesReport"));
    }
}
