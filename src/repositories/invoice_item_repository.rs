use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::entities::invoice_item::{
    ActiveModel as InvoiceItemActiveModel, Column, Entity as InvoiceItem,
    Model as InvoiceItemModel,
};
use crate::entities::product::{Entity as Product, Model as ProductModel};
use crate::errors::ServiceError;
use crate::repositories::Repository;

use super::BaseRepository;

/// Repository for invoice line items
#[derive(Debug, Clone)]
pub struct InvoiceItemRepository {
    base: BaseRepository,
}

impl InvoiceItemRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<InvoiceItemModel>, ServiceError> {
        Ok(InvoiceItem::find_by_id(id).one(self.get_db()).await?)
    }

    pub async fn find_with_product(
        &self,
        id: Uuid,
    ) -> Result<Option<(InvoiceItemModel, Option<ProductModel>)>, ServiceError> {
        Ok(InvoiceItem::find_by_id(id)
            .find_also_related(Product)
            .one(self.get_db())
            .await?)
    }

    /// Items of one invoice in insertion order
    pub async fn find_by_invoice(
        &self,
        invoice_id: Uuid,
    ) -> Result<Vec<(InvoiceItemModel, Option<ProductModel>)>, ServiceError> {
        Ok(InvoiceItem::find()
            .filter(Column::InvoiceId.eq(invoice_id))
            .find_also_related(Product)
            .order_by_asc(Column::CreatedAt)
            .order_by_asc(Column::Id)
            .all(self.get_db())
            .await?)
    }

    pub async fn update(
        &self,
        item: InvoiceItemActiveModel,
    ) -> Result<InvoiceItemModel, ServiceError> {
        Ok(item.update(self.get_db()).await?)
    }

    pub async fn delete(&self, item: InvoiceItemModel) -> Result<(), ServiceError> {
        item.delete(self.get_db()).await?;
        Ok(())
    }
}

impl Repository for InvoiceItemRepository {
    fn get_db(&self) -> &DatabaseConnection {
        self.base.get_db()
    }
}
