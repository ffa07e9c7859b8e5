pub mod categories;
pub mod common;
pub mod customers;
pub mod extract;
pub mod invoice_items;
pub mod invoices;
pub mod products;
pub mod reports;
pub mod store_info;

use crate::config::AppConfig;
use crate::db::DbPool;
use std::sync::Arc;

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

/// Services layer that encapsulates business logic used by HTTP handlers
#[derive(Clone)]
pub struct AppServices {
    pub categories: Arc<crate::services::categories::CategoryService>,
    pub products: Arc<crate::services::products::ProductService>,
    pub customers: Arc<crate::services::customers::CustomerService>,
    pub invoices: Arc<crate::services::invoices::InvoiceService>,
    pub invoice_items: Arc<crate::services::invoice_items::InvoiceItemService>,
    pub store_info: Arc<crate::services::store_info::StoreInfoService>,
    pub reports: Arc<crate::services::reports::ReportService>,
}

impl AppServices {
    pub fn new(db_pool: Arc<DbPool>, config: &AppConfig) -> Self {
        Self {
            categories: Arc::new(crate::services::categories::CategoryService::new(
                db_pool.clone(),
            )),
            products: Arc::new(crate::services::products::ProductService::new(
                db_pool.clone(),
            )),
            customers: Arc::new(crate::services::customers::CustomerService::new(
                db_pool.clone(),
            )),
            invoices: Arc::new(crate::services::invoices::InvoiceService::new(
                db_pool.clone(),
            )),
            invoice_items: Arc::new(crate::services::invoice_items::InvoiceItemService::new(
                db_pool.clone(),
            )),
            store_info: Arc::new(crate::services::store_info::StoreInfoService::new(
                db_pool.clone(),
                config.store_defaults.clone(),
            )),
            reports: Arc::new(crate::services::reports::ReportService::new(db_pool)),
        }
    }
}
