use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{DatabaseConnection, Set};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument, warn};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::validation::{non_negative, not_blank, not_nil};
use crate::entities::{category, product};
use crate::errors::ServiceError;
use crate::repositories::{CategoryRepository, ProductRepository};

/// Body for both create and full update
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ProductRequest {
    #[validate(
        custom = "not_blank",
        length(max = 100, message = "must be at most 100 characters")
    )]
    pub name: String,
    #[validate(custom = "non_negative")]
    #[schema(value_type = String, example = "19.99")]
    pub price: Decimal,
    #[validate(range(min = 0, message = "must not be negative"))]
    pub stock: i32,
    #[validate(length(max = 500, message = "must be at most 500 characters"))]
    pub description: Option<String>,
    #[validate(custom = "not_nil")]
    pub category_id: Uuid,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateStockRequest {
    #[validate(range(min = 0, message = "must not be negative"))]
    pub stock: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductResponse {
    pub id: Uuid,
    pub name: String,
    #[schema(value_type = String, example = "19.99")]
    pub price: Decimal,
    pub stock: i32,
    pub description: Option<String>,
    pub category_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<product::Model> for ProductResponse {
    fn from(model: product::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            price: model.price,
            stock: model.stock,
            description: model.description,
            category_id: model.category_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Catalog listing row
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductWithCategory {
    #[serde(flatten)]
    pub product: ProductResponse,
    /// Empty when the product has no category
    pub category_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LowStockProduct {
    pub product_id: Uuid,
    pub name: String,
    pub stock: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UncategorizedProduct {
    pub product_id: Uuid,
    pub name: String,
}

/// Product catalog operations
#[derive(Clone)]
pub struct ProductService {
    products: ProductRepository,
    categories: CategoryRepository,
}

impl ProductService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            products: ProductRepository::new(db.clone()),
            categories: CategoryRepository::new(db),
        }
    }

    async fn require_category(&self, id: Uuid) -> Result<category::Model, ServiceError> {
        self.categories.find_by_id(id).await?.ok_or_else(|| {
            warn!(category_id = %id, "category missing");
            ServiceError::NotFound(format!("Category {} not found", id))
        })
    }

    async fn require_product(&self, id: Uuid) -> Result<product::Model, ServiceError> {
        self.products
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<ProductWithCategory>, ServiceError> {
        let rows = self.products.find_all_with_category().await?;
        if rows.is_empty() {
            return Err(ServiceError::NotFound("No products found".to_string()));
        }

        Ok(rows
            .into_iter()
            .map(|(product, category)| ProductWithCategory {
                product: product.into(),
                category_name: category.map(|c| c.name).unwrap_or_default(),
            })
            .collect())
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: Uuid) -> Result<ProductResponse, ServiceError> {
        Ok(self.require_product(id).await?.into())
    }

    #[instrument(skip(self))]
    pub async fn create_product(
        &self,
        request: ProductRequest,
    ) -> Result<ProductResponse, ServiceError> {
        request.validate()?;
        self.require_category(request.category_id).await?;

        let created = self
            .products
            .create(product::ActiveModel {
                id: Set(Uuid::new_v4()),
                name: Set(request.name.trim().to_string()),
                price: Set(request.price),
                stock: Set(request.stock),
                description: Set(request.description),
                category_id: Set(Some(request.category_id)),
                created_at: Set(Utc::now()),
                updated_at: Set(None),
            })
            .await?;

        info!(product_id = %created.id, "product created");
        Ok(created.into())
    }

    #[instrument(skip(self))]
    pub async fn update_product(
        &self,
        id: Uuid,
        request: ProductRequest,
    ) -> Result<ProductResponse, ServiceError> {
        request.validate()?;
        let existing = self.require_product(id).await?;
        self.require_category(request.category_id).await?;

        let mut active: product::ActiveModel = existing.into();
        active.name = Set(request.name.trim().to_string());
        active.price = Set(request.price);
        active.stock = Set(request.stock);
        active.description = Set(request.description);
        active.category_id = Set(Some(request.category_id));
        active.updated_at = Set(Some(Utc::now()));

        let updated = self.products.update(active).await?;
        info!(product_id = %id, "product updated");
        Ok(updated.into())
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: Uuid) -> Result<(), ServiceError> {
        let existing = self.require_product(id).await?;
        let referenced = self.products.count_invoice_items(id).await?;
        if referenced > 0 {
            warn!(product_id = %id, items = referenced, "delete blocked by invoice items");
            return Err(ServiceError::Conflict(format!(
                "Product {} is still used by {} invoice item(s)",
                id, referenced
            )));
        }
        self.products.delete(existing).await?;
        info!(product_id = %id, "product deleted");
        Ok(())
    }

    /// Last write wins; concurrent updates are not coordinated
    #[instrument(skip(self))]
    pub async fn update_stock(
        &self,
        id: Uuid,
        request: UpdateStockRequest,
    ) -> Result<ProductResponse, ServiceError> {
        request.validate()?;
        let existing = self.require_product(id).await?;

        let mut active: product::ActiveModel = existing.into();
        active.stock = Set(request.stock);
        active.updated_at = Set(Some(Utc::now()));

        let updated = self.products.update(active).await?;
        info!(product_id = %id, stock = request.stock, "stock updated");
        Ok(updated.into())
    }

    #[instrument(skip(self))]
    pub async fn assign_category(
        &self,
        id: Uuid,
        category_id: Uuid,
    ) -> Result<ProductResponse, ServiceError> {
        let existing = self.require_product(id).await?;
        self.require_category(category_id).await?;

        let mut active: product::ActiveModel = existing.into();
        active.category_id = Set(Some(category_id));
        active.updated_at = Set(Some(Utc::now()));

        let updated = self.products.update(active).await?;
        info!(product_id = %id, %category_id, "product assigned to category");
        Ok(updated.into())
    }

    #[instrument(skip(self))]
    pub async fn low_stock(&self, threshold: i32) -> Result<Vec<LowStockProduct>, ServiceError> {
        if threshold < 0 {
            return Err(ServiceError::validation(
                "threshold",
                "must not be negative",
            ));
        }

        Ok(self
            .products
            .find_low_stock(threshold)
            .await?
            .into_iter()
            .map(|p| LowStockProduct {
                product_id: p.id,
                name: p.name,
                stock: p.stock,
            })
            .collect())
    }

    #[instrument(skip(self))]
    pub async fn uncategorized(&self) -> Result<Vec<UncategorizedProduct>, ServiceError> {
        Ok(self
            .products
            .find_uncategorized()
            .await?
            .into_iter()
            .map(|p| UncategorizedProduct {
                product_id: p.id,
                name: p.name,
            })
            .collect())
    }
}

fn not_found(id: Uuid) -> ServiceError {
    ServiceError::NotFound(format!("Product {} not found", id))
}
