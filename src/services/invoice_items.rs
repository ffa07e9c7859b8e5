use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{DatabaseConnection, Set};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument, warn};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::validation::{not_nil, positive};
use crate::entities::{invoice_item, product};
use crate::errors::ServiceError;
use crate::models::InvoiceLine;
use crate::repositories::{InvoiceItemRepository, InvoiceRepository, ProductRepository};

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct AddInvoiceItemRequest {
    #[validate(custom = "not_nil")]
    pub product_id: Uuid,
    #[validate(range(min = 1, message = "must be greater than zero"))]
    pub quantity: i32,
    #[validate(custom = "positive")]
    #[schema(value_type = String, example = "10.00")]
    pub unit_price: Decimal,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateInvoiceItemRequest {
    #[validate(range(min = 1, message = "must be greater than zero"))]
    pub quantity: i32,
    #[validate(custom = "positive")]
    #[schema(value_type = String, example = "10.00")]
    pub unit_price: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InvoiceItemDetails {
    pub id: Uuid,
    pub invoice_id: Uuid,
    pub product_id: Uuid,
    pub product_name: String,
    pub quantity: i32,
    #[schema(value_type = String, example = "10.00")]
    pub unit_price: Decimal,
    /// quantity * unit_price
    #[schema(value_type = String, example = "20.00")]
    pub line_total: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl InvoiceItemDetails {
    pub fn new(item: invoice_item::Model, product: Option<product::Model>) -> Self {
        Self {
            line_total: item.line_total(),
            id: item.id,
            invoice_id: item.invoice_id,
            product_id: item.product_id,
            product_name: product.map(|p| p.name).unwrap_or_default(),
            quantity: item.quantity,
            unit_price: item.unit_price,
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}

impl From<InvoiceLine> for InvoiceItemDetails {
    fn from(line: InvoiceLine) -> Self {
        Self::new(line.item, line.product)
    }
}

#[derive(Clone)]
pub struct InvoiceItemService {
    items: InvoiceItemRepository,
    invoices: InvoiceRepository,
    products: ProductRepository,
}

impl InvoiceItemService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            items: InvoiceItemRepository::new(db.clone()),
            invoices: InvoiceRepository::new(db.clone()),
            products: ProductRepository::new(db),
        }
    }

    #[instrument(skip(self))]
    pub async fn add_item(
        &self,
        invoice_id: Uuid,
        request: AddInvoiceItemRequest,
    ) -> Result<InvoiceItemDetails, ServiceError> {
        request.validate()?;

        let invoice = self
            .invoices
            .find_by_id(invoice_id)
            .await?
            .ok_or_else(|| invoice_not_found(invoice_id))?;

        let product = self
            .products
            .find_by_id(request.product_id)
            .await?
            .ok_or_else(|| {
                warn!(product_id = %request.product_id, "product missing");
                ServiceError::validation(
                    "product_id",
                    format!("Product {} does not exist", request.product_id),
                )
            })?;

        let created = self
            .invoices
            .add_item(
                invoice,
                invoice_item::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    invoice_id: Set(invoice_id),
                    product_id: Set(product.id),
                    quantity: Set(request.quantity),
                    unit_price: Set(request.unit_price),
                    created_at: Set(Utc::now()),
                    updated_at: Set(None),
                },
            )
            .await?;

        info!(%invoice_id, item_id = %created.id, "invoice item added");
        Ok(InvoiceItemDetails::new(created, Some(product)))
    }

    #[instrument(skip(self))]
    pub async fn list_items(
        &self,
        invoice_id: Uuid,
    ) -> Result<Vec<InvoiceItemDetails>, ServiceError> {
        if self.invoices.find_by_id(invoice_id).await?.is_none() {
            return Err(invoice_not_found(invoice_id));
        }

        let items = self.items.find_by_invoice(invoice_id).await?;
        if items.is_empty() {
            return Err(ServiceError::NotFound(format!(
                "Invoice {} has no items",
                invoice_id
            )));
        }

        Ok(items
            .into_iter()
            .map(|(item, product)| InvoiceItemDetails::new(item, product))
            .collect())
    }

    #[instrument(skip(self))]
    pub async fn get_item(&self, id: Uuid) -> Result<InvoiceItemDetails, ServiceError> {
        let (item, product) = self
            .items
            .find_with_product(id)
            .await?
            .ok_or_else(|| not_found(id))?;
        Ok(InvoiceItemDetails::new(item, product))
    }

    #[instrument(skip(self))]
    pub async fn update_item(
        &self,
        id: Uuid,
        request: UpdateInvoiceItemRequest,
    ) -> Result<InvoiceItemDetails, ServiceError> {
        let (item, product) = self
            .items
            .find_with_product(id)
            .await?
            .ok_or_else(|| not_found(id))?;
        request.validate()?;

        let mut active: invoice_item::ActiveModel = item.into();
        active.quantity = Set(request.quantity);
        active.unit_price = Set(request.unit_price);
        active.updated_at = Set(Some(Utc::now()));

        let updated = self.items.update(active).await?;
        info!(item_id = %id, "invoice item updated");
        Ok(InvoiceItemDetails::new(updated, product))
    }

    #[instrument(skip(self))]
    pub async fn delete_item(&self, id: Uuid) -> Result<(), ServiceError> {
        let item = self.items.find_by_id(id).await?.ok_or_else(|| not_found(id))?;
        self.items.delete(item).await?;
        info!(item_id = %id, "invoice item deleted");
        Ok(())
    }
}

fn not_found(id: Uuid) -> ServiceError {
    ServiceError::NotFound(format!("Invoice item {} not found", id))
}

fn invoice_not_found(id: Uuid) -> ServiceError {
    ServiceError::NotFound(format!("Invoice {} not found", id))
}
