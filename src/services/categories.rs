use chrono::{DateTime, Utc};
use sea_orm::{DatabaseConnection, Set};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument, warn};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::validation::not_blank;
use crate::entities::category;
use crate::errors::ServiceError;
use crate::models::FlatCategory;
use crate::repositories::CategoryRepository;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryRequest {
    #[validate(
        custom = "not_blank",
        length(max = 100, message = "must be at most 100 characters")
    )]
    pub name: String,
    pub parent_id: Option<Uuid>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateCategoryRequest {
    #[validate(
        custom = "not_blank",
        length(max = 100, message = "must be at most 100 characters")
    )]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponse {
    pub id: Uuid,
    pub name: String,
    pub parent_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<category::Model> for CategoryResponse {
    fn from(model: category::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            parent_id: model.parent_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Category hierarchy operations
#[derive(Clone)]
pub struct CategoryService {
    repo: CategoryRepository,
}

impl CategoryService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            repo: CategoryRepository::new(db),
        }
    }

    /// The whole forest as an indented display list
    #[instrument(skip(self))]
    pub async fn list_flattened(&self) -> Result<Vec<FlatCategory>, ServiceError> {
        let tree = self.repo.fetch_tree().await?;
        Ok(tree.flatten())
    }

    #[instrument(skip(self))]
    pub async fn get_category(&self, id: Uuid) -> Result<CategoryResponse, ServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .map(Into::into)
            .ok_or_else(|| not_found(id))
    }

    #[instrument(skip(self))]
    pub async fn create_category(
        &self,
        request: CreateCategoryRequest,
    ) -> Result<CategoryResponse, ServiceError> {
        request.validate()?;

        if let Some(parent_id) = request.parent_id {
            if self.repo.find_by_id(parent_id).await?.is_none() {
                warn!(%parent_id, "parent category missing");
                return Err(ServiceError::NotFound(format!(
                    "Parent category {} not found",
                    parent_id
                )));
            }
        }

        let created = self
            .repo
            .create(category::ActiveModel {
                id: Set(Uuid::new_v4()),
                name: Set(request.name.trim().to_string()),
                parent_id: Set(request.parent_id),
                created_at: Set(Utc::now()),
                updated_at: Set(None),
            })
            .await?;

        info!(category_id = %created.id, "category created");
        Ok(created.into())
    }

    #[instrument(skip(self))]
    pub async fn update_category(
        &self,
        id: Uuid,
        request: UpdateCategoryRequest,
    ) -> Result<CategoryResponse, ServiceError> {
        request.validate()?;

        let existing = self.repo.find_by_id(id).await?.ok_or_else(|| not_found(id))?;
        let mut active: category::ActiveModel = existing.into();
        active.name = Set(request.name.trim().to_string());
        active.updated_at = Set(Some(Utc::now()));

        let updated = self.repo.update(active).await?;
        info!(category_id = %id, "category updated");
        Ok(updated.into())
    }

    /// Refuses to delete a category that still has children
    #[instrument(skip(self))]
    pub async fn delete_category(&self, id: Uuid) -> Result<(), ServiceError> {
        let (category, children) = self
            .repo
            .find_by_id_with_children(id)
            .await?
            .ok_or_else(|| not_found(id))?;

        if !children.is_empty() {
            warn!(category_id = %id, children = children.len(), "delete blocked by children");
            return Err(ServiceError::BadRequest(
                "Category has subcategories; delete children first".to_string(),
            ));
        }

        self.repo.delete(category).await?;
        info!(category_id = %id, "category deleted");
        Ok(())
    }
}

fn not_found(id: Uuid) -> ServiceError {
    ServiceError::NotFound(format!("Category {} not found", id))
}
