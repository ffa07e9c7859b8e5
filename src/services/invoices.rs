use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{DatabaseConnection, Set};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use utoipa::ToSchema;
use uuid::Uuid;

use super::invoice_items::InvoiceItemDetails;
use crate::entities::{
    invoice::{self, InvoiceStatus},
    invoice_item,
};
use crate::errors::{FieldErrors, ServiceError};
use crate::models::InvoiceAggregate;
use crate::repositories::{
    invoice_repository::InvoiceFilter, CustomerRepository, InvoiceRepository, ProductRepository,
};

const UNKNOWN_CUSTOMER: &str = "unknown";

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateInvoiceItem {
    pub product_id: Uuid,
    pub quantity: i32,
    #[schema(value_type = String, example = "10.00")]
    pub unit_price: Decimal,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateInvoiceRequest {
    pub customer_id: Uuid,
    #[serde(default)]
    pub status: Option<InvoiceStatus>,
    #[serde(default)]
    pub items: Vec<CreateInvoiceItem>,
}

impl CreateInvoiceRequest {
    /// Shape checks; item keys are indexed like `items[0].quantity`
    fn validate_shape(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        let mut push = |field: String, message: &str| {
            errors.entry(field).or_default().push(message.to_string());
        };

        if self.customer_id.is_nil() {
            push("customer_id".into(), "must be a valid id");
        }
        if self.items.is_empty() {
            push("items".into(), "an invoice needs at least one item");
        }
        for (index, item) in self.items.iter().enumerate() {
            if item.product_id.is_nil() {
                push(format!("items[{index}].product_id"), "must be a valid id");
            }
            if item.quantity <= 0 {
                push(format!("items[{index}].quantity"), "must be greater than zero");
            }
            if item.unit_price < Decimal::ZERO {
                push(format!("items[{index}].unit_price"), "must not be negative");
            }
        }

        errors
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InvoiceDetails {
    pub id: Uuid,
    pub issued_date: DateTime<Utc>,
    pub status: InvoiceStatus,
    pub customer_id: Option<Uuid>,
    pub customer_name: String,
    /// Recomputed from the items on every read
    #[schema(value_type = String, example = "25.50")]
    pub total_amount: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub items: Vec<InvoiceItemDetails>,
}

impl From<InvoiceAggregate> for InvoiceDetails {
    fn from(aggregate: InvoiceAggregate) -> Self {
        let total_amount = aggregate.total();
        let InvoiceAggregate {
            invoice,
            customer,
            lines,
        } = aggregate;

        Self {
            id: invoice.id,
            issued_date: invoice.issued_date,
            status: invoice.status,
            customer_id: invoice.customer_id,
            customer_name: customer
                .map(|c| c.full_name)
                .unwrap_or_else(|| UNKNOWN_CUSTOMER.to_string()),
            total_amount,
            created_at: invoice.created_at,
            updated_at: invoice.updated_at,
            items: lines.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InvoiceTotal {
    pub invoice_id: Uuid,
    #[schema(value_type = String, example = "25.50")]
    pub total: Decimal,
}

/// Search criteria; bounds are inclusive
#[derive(Debug, Clone, Default)]
pub struct InvoiceSearch {
    pub customer_name: String,
    pub from_date: Option<DateTime<Utc>>,
    pub to_date: Option<DateTime<Utc>>,
    pub min_amount: Option<Decimal>,
    pub max_amount: Option<Decimal>,
}

#[derive(Clone)]
pub struct InvoiceService {
    invoices: InvoiceRepository,
    customers: CustomerRepository,
    products: ProductRepository,
}

impl InvoiceService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            invoices: InvoiceRepository::new(db.clone()),
            customers: CustomerRepository::new(db.clone()),
            products: ProductRepository::new(db),
        }
    }

    #[instrument(skip(self))]
    pub async fn list_invoices(&self) -> Result<Vec<InvoiceDetails>, ServiceError> {
        let invoices = self.invoices.fetch_all().await?;
        if invoices.is_empty() {
            return Err(ServiceError::NotFound("No invoices found".to_string()));
        }
        Ok(invoices.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self))]
    pub async fn get_invoice(&self, id: Uuid) -> Result<InvoiceDetails, ServiceError> {
        self.invoices
            .fetch_by_id(id)
            .await?
            .map(Into::into)
            .ok_or_else(|| not_found(id))
    }

    #[instrument(skip(self, request), fields(items = request.items.len()))]
    pub async fn create_invoice(
        &self,
        request: CreateInvoiceRequest,
    ) -> Result<InvoiceDetails, ServiceError> {
        let errors = request.validate_shape();
        if !errors.is_empty() {
            return Err(ServiceError::ValidationError(errors));
        }

        let mut errors = FieldErrors::new();
        if self.customers.find_by_id(request.customer_id).await?.is_none() {
            errors
                .entry("customer_id".into())
                .or_default()
                .push(format!("Customer {} does not exist", request.customer_id));
        }

        let wanted: Vec<Uuid> = request
            .items
            .iter()
            .map(|i| i.product_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let known: HashSet<Uuid> = self
            .products
            .find_by_ids(wanted)
            .await?
            .into_iter()
            .map(|p| p.id)
            .collect();
        for (index, item) in request.items.iter().enumerate() {
            if !known.contains(&item.product_id) {
                errors
                    .entry(format!("items[{index}].product_id"))
                    .or_default()
                    .push(format!("Product {} does not exist", item.product_id));
            }
        }

        if !errors.is_empty() {
            warn!(customer_id = %request.customer_id, "invoice references missing rows");
            return Err(ServiceError::ValidationError(errors));
        }

        let now = Utc::now();
        let invoice_id = Uuid::new_v4();
        let items = request
            .items
            .iter()
            .map(|item| invoice_item::ActiveModel {
                id: Set(Uuid::new_v4()),
                invoice_id: Set(invoice_id),
                product_id: Set(item.product_id),
                quantity: Set(item.quantity),
                unit_price: Set(item.unit_price),
                created_at: Set(now),
                updated_at: Set(None),
            })
            .collect();

        self.invoices
            .create_with_items(
                invoice::ActiveModel {
                    id: Set(invoice_id),
                    issued_date: Set(now),
                    status: Set(request.status.unwrap_or_default()),
                    customer_id: Set(Some(request.customer_id)),
                    created_at: Set(now),
                    updated_at: Set(None),
                },
                items,
            )
            .await?;

        info!(%invoice_id, "invoice created");
        self.get_invoice(invoice_id).await
    }

    /// Items go with the invoice
    #[instrument(skip(self))]
    pub async fn delete_invoice(&self, id: Uuid) -> Result<(), ServiceError> {
        let invoice = self
            .invoices
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))?;
        self.invoices.delete(invoice).await?;
        info!(invoice_id = %id, "invoice deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn invoice_total(&self, id: Uuid) -> Result<InvoiceTotal, ServiceError> {
        let aggregate = self
            .invoices
            .fetch_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))?;
        Ok(InvoiceTotal {
            invoice_id: id,
            total: aggregate.total(),
        })
    }

    #[instrument(skip(self))]
    pub async fn search_invoices(
        &self,
        search: InvoiceSearch,
    ) -> Result<Vec<InvoiceDetails>, ServiceError> {
        let name = search.customer_name.trim();
        if name.is_empty() {
            return Err(ServiceError::validation("customer_name", "must not be blank"));
        }
        if let (Some(from), Some(to)) = (search.from_date, search.to_date) {
            if from > to {
                return Err(ServiceError::validation(
                    "from_date",
                    "must not be after to_date",
                ));
            }
        }

        let found = self
            .invoices
            .fetch_filtered(&InvoiceFilter {
                customer_name: Some(name.to_string()),
                from: search.from_date,
                to: search.to_date,
            })
            .await?;

        let matches: Vec<InvoiceDetails> = found
            .into_iter()
            .filter(|aggregate| within_amount(aggregate.total(), &search))
            .map(Into::into)
            .collect();

        if matches.is_empty() {
            return Err(ServiceError::NotFound(format!(
                "No invoices found for customer name '{}'",
                name
            )));
        }
        Ok(matches)
    }
}

fn within_amount(total: Decimal, search: &InvoiceSearch) -> bool {
    search.min_amount.map_or(true, |min| total >= min)
        && search.max_amount.map_or(true, |max| total <= max)
}

fn not_found(id: Uuid) -> ServiceError {
    ServiceError::NotFound(format!("Invoice {} not found", id))
}
