use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::entities::category::{
    ActiveModel as CategoryActiveModel, Column, Entity as Category, Model as CategoryModel,
};
use crate::errors::ServiceError;
use crate::models::CategoryTree;
use crate::repositories::Repository;

use super::BaseRepository;

/// Repository for category operations
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    base: BaseRepository,
}

impl CategoryRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<CategoryModel>, ServiceError> {
        Ok(Category::find_by_id(id).one(self.get_db()).await?)
    }

    /// Category plus its direct children in insertion order
    pub async fn find_by_id_with_children(
        &self,
        id: Uuid,
    ) -> Result<Option<(CategoryModel, Vec<CategoryModel>)>, ServiceError> {
        let Some(category) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let children = Category::find()
            .filter(Column::ParentId.eq(id))
            .order_by_asc(Column::CreatedAt)
            .order_by_asc(Column::Id)
            .all(self.get_db())
            .await?;

        Ok(Some((category, children)))
    }

    /// Every category in insertion order
    pub async fn find_all(&self) -> Result<Vec<CategoryModel>, ServiceError> {
        Ok(Category::find()
            .order_by_asc(Column::CreatedAt)
            .order_by_asc(Column::Id)
            .all(self.get_db())
            .await?)
    }

    /// Loads the whole forest as an arena
    pub async fn fetch_tree(&self) -> Result<CategoryTree, ServiceError> {
        let rows = self.find_all().await?;
        Ok(CategoryTree::from_rows(
            rows.into_iter().map(|c| (c.id, c.name, c.parent_id)),
        ))
    }

    pub async fn create(&self, category: CategoryActiveModel) -> Result<CategoryModel, ServiceError> {
        Ok(category.insert(self.get_db()).await?)
    }

    pub async fn update(&self, category: CategoryActiveModel) -> Result<CategoryModel, ServiceError> {
        Ok(category.update(self.get_db()).await?)
    }

    pub async fn delete(&self, category: CategoryModel) -> Result<(), ServiceError> {
        category
            .delete(self.get_db())
            .await
            .map_err(|e| ServiceError::from_delete_error(e, "Category"))?;
        Ok(())
    }
}

impl Repository for CategoryRepository {
    fn get_db(&self) -> &DatabaseConnection {
        self.base.get_db()
    }
}
