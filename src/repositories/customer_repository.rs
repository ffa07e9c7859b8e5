use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::entities::customer::{
    ActiveModel as CustomerActiveModel, Column, Entity as Customer, Model as CustomerModel,
};
use crate::errors::ServiceError;
use crate::repositories::Repository;

use super::BaseRepository;

/// Repository for customer operations
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    base: BaseRepository,
}

impl CustomerRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<CustomerModel>, ServiceError> {
        Ok(Customer::find_by_id(id).one(self.get_db()).await?)
    }

    pub async fn find_by_ids(&self, ids: Vec<Uuid>) -> Result<Vec<CustomerModel>, ServiceError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(Customer::find()
            .filter(Column::Id.is_in(ids))
            .all(self.get_db())
            .await?)
    }

    pub async fn find_all(&self) -> Result<Vec<CustomerModel>, ServiceError> {
        Ok(Customer::find()
            .order_by_asc(Column::FullName)
            .order_by_asc(Column::Id)
            .all(self.get_db())
            .await?)
    }

    pub async fn create(&self, customer: CustomerActiveModel) -> Result<CustomerModel, ServiceError> {
        Ok(customer.insert(self.get_db()).await?)
    }

    pub async fn update(&self, customer: CustomerActiveModel) -> Result<CustomerModel, ServiceError> {
        Ok(customer.update(self.get_db()).await?)
    }

    pub async fn delete(&self, customer: CustomerModel) -> Result<(), ServiceError> {
        customer.delete(self.get_db()).await?;
        Ok(())
    }
}

impl Repository for CustomerRepository {
    fn get_db(&self) -> &DatabaseConnection {
        self.base.get_db()
    }
}
