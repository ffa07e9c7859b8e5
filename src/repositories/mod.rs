use sea_orm::DatabaseConnection;
use std::sync::Arc;

pub mod category_repository;
pub mod customer_repository;
pub mod invoice_item_repository;
pub mod invoice_repository;
pub mod product_repository;
pub mod store_info_repository;

pub use category_repository::CategoryRepository;
pub use customer_repository::CustomerRepository;
pub use invoice_item_repository::InvoiceItemRepository;
pub use invoice_repository::InvoiceRepository;
pub use product_repository::ProductRepository;
pub use store_info_repository::StoreInfoRepository;

/// Repository trait for common database operations
pub trait Repository {
    fn get_db(&self) -> &DatabaseConnection;
}

#[derive(Debug, Clone)]
pub struct BaseRepository {
    db: Arc<DatabaseConnection>,
}

impl BaseRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl Repository for BaseRepository {
    fn get_db(&self) -> &DatabaseConnection {
        &self.db
    }
}
