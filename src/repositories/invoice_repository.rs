use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, ModelTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::entities::{
    customer,
    invoice::{self, ActiveModel as InvoiceActiveModel, Column, Entity as Invoice},
    invoice_item::{self, ActiveModel as InvoiceItemActiveModel},
    product,
};
use crate::errors::ServiceError;
use crate::models::{InvoiceAggregate, InvoiceLine};
use crate::repositories::Repository;

use super::BaseRepository;

/// Optional narrowing applied before aggregates are loaded
#[derive(Debug, Clone, Default)]
pub struct InvoiceFilter {
    pub customer_name: Option<String>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

/// Repository for invoices and their loaded aggregates
#[derive(Debug, Clone)]
pub struct InvoiceRepository {
    base: BaseRepository,
}

impl InvoiceRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<invoice::Model>, ServiceError> {
        Ok(Invoice::find_by_id(id).one(self.get_db()).await?)
    }

    /// One invoice with customer and items+products
    pub async fn fetch_by_id(&self, id: Uuid) -> Result<Option<InvoiceAggregate>, ServiceError> {
        let Some(invoice) = self.find_by_id(id).await? else {
            return Ok(None);
        };
        Ok(self.load_aggregates(vec![invoice]).await?.pop())
    }

    /// All invoices, oldest first
    pub async fn fetch_all(&self) -> Result<Vec<InvoiceAggregate>, ServiceError> {
        self.fetch_filtered(&InvoiceFilter::default()).await
    }

    pub async fn fetch_filtered(
        &self,
        filter: &InvoiceFilter,
    ) -> Result<Vec<InvoiceAggregate>, ServiceError> {
        let mut condition = Condition::all();
        if let Some(from) = filter.from {
            condition = condition.add(Column::IssuedDate.gte(from));
        }
        if let Some(to) = filter.to {
            condition = condition.add(Column::IssuedDate.lte(to));
        }
        if let Some(name) = &filter.customer_name {
            let customer_ids = self.customer_ids_matching(name).await?;
            if customer_ids.is_empty() {
                return Ok(Vec::new());
            }
            condition = condition.add(Column::CustomerId.is_in(customer_ids));
        }

        let invoices = Invoice::find()
            .filter(condition)
            .order_by_asc(Column::IssuedDate)
            .order_by_asc(Column::Id)
            .all(self.get_db())
            .await?;
        self.load_aggregates(invoices).await
    }

    /// Case-insensitive substring match on the customer's full name
    pub async fn search_by_customer_name(
        &self,
        fragment: &str,
    ) -> Result<Vec<InvoiceAggregate>, ServiceError> {
        self.fetch_filtered(&InvoiceFilter {
            customer_name: Some(fragment.to_string()),
            ..Default::default()
        })
        .await
    }

    /// Names are folded in Rust; SQLite's `LOWER()` only folds ASCII.
    async fn customer_ids_matching(&self, fragment: &str) -> Result<Vec<Uuid>, ServiceError> {
        let needle = fragment.to_lowercase();
        let customers: Vec<(Uuid, String)> = customer::Entity::find()
            .select_only()
            .column(customer::Column::Id)
            .column(customer::Column::FullName)
            .into_tuple()
            .all(self.get_db())
            .await?;

        Ok(customers
            .into_iter()
            .filter(|(_, full_name)| name_matches(full_name, &needle))
            .map(|(id, _)| id)
            .collect())
    }

    async fn load_aggregates(
        &self,
        invoices: Vec<invoice::Model>,
    ) -> Result<Vec<InvoiceAggregate>, ServiceError> {
        if invoices.is_empty() {
            return Ok(Vec::new());
        }
        let db = self.get_db();

        let invoice_ids: Vec<Uuid> = invoices.iter().map(|i| i.id).collect();
        let customer_ids: Vec<Uuid> = invoices.iter().filter_map(|i| i.customer_id).collect();

        let customers: HashMap<Uuid, customer::Model> = if customer_ids.is_empty() {
            HashMap::new()
        } else {
            customer::Entity::find()
                .filter(customer::Column::Id.is_in(customer_ids))
                .all(db)
                .await?
                .into_iter()
                .map(|c| (c.id, c))
                .collect()
        };

        let items = invoice_item::Entity::find()
            .filter(invoice_item::Column::InvoiceId.is_in(invoice_ids))
            .find_also_related(product::Entity)
            .order_by_asc(invoice_item::Column::CreatedAt)
            .order_by_asc(invoice_item::Column::Id)
            .all(db)
            .await?;

        let mut lines_by_invoice: HashMap<Uuid, Vec<InvoiceLine>> = HashMap::new();
        for (item, product) in items {
            lines_by_invoice
                .entry(item.invoice_id)
                .or_default()
                .push(InvoiceLine { item, product });
        }

        debug!(count = invoices.len(), "loaded invoice aggregates");

        Ok(invoices
            .into_iter()
            .map(|invoice| InvoiceAggregate {
                customer: invoice.customer_id.and_then(|id| customers.get(&id).cloned()),
                lines: lines_by_invoice.remove(&invoice.id).unwrap_or_default(),
                invoice,
            })
            .collect())
    }

    /// Inserts the invoice and all of its items atomically
    pub async fn create_with_items(
        &self,
        invoice: InvoiceActiveModel,
        items: Vec<InvoiceItemActiveModel>,
    ) -> Result<invoice::Model, ServiceError> {
        let txn = self.get_db().begin().await?;
        let created = invoice.insert(&txn).await?;
        for mut item in items {
            item.invoice_id = Set(created.id);
            item.insert(&txn).await?;
        }
        txn.commit().await?;
        Ok(created)
    }

    /// Adds one item and bumps the invoice's `updated_at` in the same transaction
    pub async fn add_item(
        &self,
        invoice: invoice::Model,
        item: InvoiceItemActiveModel,
    ) -> Result<invoice_item::Model, ServiceError> {
        let txn = self.get_db().begin().await?;
        let created = item.insert(&txn).await?;
        let mut touched: InvoiceActiveModel = invoice.into();
        touched.updated_at = Set(Some(Utc::now()));
        touched.update(&txn).await?;
        txn.commit().await?;
        Ok(created)
    }

    /// Items are removed by the cascading foreign key
    pub async fn delete(&self, invoice: invoice::Model) -> Result<(), ServiceError> {
        invoice.delete(self.get_db()).await?;
        Ok(())
    }
}

/// `needle` is expected to be lowercased already.
fn name_matches(full_name: &str, needle: &str) -> bool {
    full_name.to_lowercase().contains(needle)
}

impl Repository for InvoiceRepository {
    fn get_db(&self) -> &DatabaseConnection {
        self.base.get_db()
    }
}
