use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder};
use std::sync::Arc;

use crate::entities::store_info::{
    ActiveModel as StoreInfoActiveModel, Column, Entity as StoreInfo, Model as StoreInfoModel,
};
use crate::errors::ServiceError;
use crate::repositories::Repository;

use super::BaseRepository;

#[derive(Debug, Clone)]
pub struct StoreInfoRepository {
    base: BaseRepository,
}

impl StoreInfoRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// The oldest row, if any
    pub async fn find_first(&self) -> Result<Option<StoreInfoModel>, ServiceError> {
        Ok(StoreInfo::find()
            .order_by_asc(Column::CreatedAt)
            .one(self.get_db())
            .await?)
    }

    pub async fn create(&self, info: StoreInfoActiveModel) -> Result<StoreInfoModel, ServiceError> {
        Ok(info.insert(self.get_db()).await?)
    }

    pub async fn update(&self, info: StoreInfoActiveModel) -> Result<StoreInfoModel, ServiceError> {
        Ok(info.update(self.get_db()).await?)
    }
}

impl Repository for StoreInfoRepository {
    fn get_db(&self) -> &DatabaseConnection {
        self.base.get_db()
    }
}
