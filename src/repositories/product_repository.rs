use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::entities::category::{Entity as Category, Model as CategoryModel};
use crate::entities::invoice_item;
use crate::entities::product::{
    ActiveModel as ProductActiveModel, Column, Entity as Product, Model as ProductModel,
};
use crate::errors::ServiceError;
use crate::repositories::Repository;

use super::BaseRepository;

/// Repository for product operations
#[derive(Debug, Clone)]
pub struct ProductRepository {
    base: BaseRepository,
}

impl ProductRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<ProductModel>, ServiceError> {
        Ok(Product::find_by_id(id).one(self.get_db()).await?)
    }

    pub async fn find_by_ids(&self, ids: Vec<Uuid>) -> Result<Vec<ProductModel>, ServiceError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(Product::find()
            .filter(Column::Id.is_in(ids))
            .all(self.get_db())
            .await?)
    }

    /// Every product with its category, ordered by name
    pub async fn find_all_with_category(
        &self,
    ) -> Result<Vec<(ProductModel, Option<CategoryModel>)>, ServiceError> {
        Ok(Product::find()
            .find_also_related(Category)
            .order_by_asc(Column::Name)
            .order_by_asc(Column::Id)
            .all(self.get_db())
            .await?)
    }

    /// Products with `stock <= threshold`, lowest stock first
    pub async fn find_low_stock(&self, threshold: i32) -> Result<Vec<ProductModel>, ServiceError> {
        Ok(Product::find()
            .filter(Column::Stock.lte(threshold))
            .order_by_asc(Column::Stock)
            .order_by_asc(Column::Name)
            .all(self.get_db())
            .await?)
    }

    pub async fn find_uncategorized(&self) -> Result<Vec<ProductModel>, ServiceError> {
        Ok(Product::find()
            .filter(Column::CategoryId.is_null())
            .order_by_asc(Column::Name)
            .all(self.get_db())
            .await?)
    }

    pub async fn create(&self, product: ProductActiveModel) -> Result<ProductModel, ServiceError> {
        Ok(product.insert(self.get_db()).await?)
    }

    pub async fn update(&self, product: ProductActiveModel) -> Result<ProductModel, ServiceError> {
        Ok(product.update(self.get_db()).await?)
    }

    /// Number of invoice items that reference the product
    pub async fn count_invoice_items(&self, id: Uuid) -> Result<u64, ServiceError> {
        Ok(invoice_item::Entity::find()
            .filter(invoice_item::Column::ProductId.eq(id))
            .count(self.get_db())
            .await?)
    }

    /// Fails with `Conflict` while invoice items still reference the product
    pub async fn delete(&self, product: ProductModel) -> Result<(), ServiceError> {
        product
            .delete(self.get_db())
            .await
            .map_err(|e| ServiceError::from_delete_error(e, "Product"))?;
        Ok(())
    }
}

impl Repository for ProductRepository {
    fn get_db(&self) -> &DatabaseConnection {
        self.base.get_db()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{establish_connection, run_migrations};
    use crate::entities::{category, invoice, product};
    use assert_matches::assert_matches;
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use sea_orm::Set;
    use tempfile::TempDir;

    async fn seeded(dir: &TempDir) -> (ProductRepository, ProductModel) {
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("db.sqlite").display());
        let db = Arc::new(establish_connection(&url).await.unwrap());
        run_migrations(&db).await.unwrap();

        let now = Utc::now();
        let category = category::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set("Tools".into()),
            parent_id: Set(None),
            created_at: Set(now),
            updated_at: Set(None),
        }
        .insert(db.as_ref())
        .await
        .unwrap();
        let product = product::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set("Hammer".into()),
            price: Set(dec!(15.00)),
            stock: Set(3),
            description: Set(None),
            category_id: Set(Some(category.id)),
            created_at: Set(now),
            updated_at: Set(None),
        }
        .insert(db.as_ref())
        .await
        .unwrap();

        (ProductRepository::new(db), product)
    }

    #[tokio::test]
    async fn referenced_product_delete_is_a_conflict() {
        let dir = TempDir::new().unwrap();
        let (repo, product) = seeded(&dir).await;
        let now = Utc::now();

        let invoice = invoice::ActiveModel {
            id: Set(Uuid::new_v4()),
            issued_date: Set(now),
            status: Set(invoice::InvoiceStatus::Draft),
            customer_id: Set(None),
            created_at: Set(now),
            updated_at: Set(None),
        }
        .insert(repo.get_db())
        .await
        .unwrap();
        invoice_item::ActiveModel {
            id: Set(Uuid::new_v4()),
            invoice_id: Set(invoice.id),
            product_id: Set(product.id),
            quantity: Set(1),
            unit_price: Set(dec!(15.00)),
            created_at: Set(now),
            updated_at: Set(None),
        }
        .insert(repo.get_db())
        .await
        .unwrap();

        assert_eq!(repo.count_invoice_items(product.id).await.unwrap(), 1);
        assert_matches!(repo.delete(product).await, Err(ServiceError::Conflict(_)));
    }

    #[tokio::test]
    async fn unreferenced_product_deletes() {
        let dir = TempDir::new().unwrap();
        let (repo, product) = seeded(&dir).await;
        let id = product.id;

        assert_eq!(repo.count_invoice_items(id).await.unwrap(), 0);
        repo.delete(product).await.unwrap();
        assert!(repo.find_by_id(id).await.unwrap().is_none());
    }
}
