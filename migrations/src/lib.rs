pub use sea_orm_migration::prelude::*;

mod m20240601_000001_create_categories_table;
mod m20240601_000002_create_products_table;
mod m20240601_000003_create_customers_table;
mod m20240601_000004_create_invoices_table;
mod m20240601_000005_create_invoice_items_table;
mod m20240601_000006_create_store_info_table;

pub struct Migrator;

/// Money column: `decimal(18, 2)`, narrowed to the 16 digits SQLite accepts.
pub(crate) fn money_column<T: IntoIden>(backend: sea_orm::DbBackend, name: T) -> ColumnDef {
    let precision = match backend {
        sea_orm::DbBackend::Sqlite => 16,
        _ => 18,
    };
    ColumnDef::new(name).decimal_len(precision, 2).to_owned()
}

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240601_000001_create_categories_table::Migration),
            Box::new(m20240601_000002_create_products_table::Migration),
            Box::new(m20240601_000003_create_customers_table::Migration),
            Box::new(m20240601_000004_create_invoices_table::Migration),
            Box::new(m20240601_000005_create_invoice_items_table::Migration),
            Box::new(m20240601_000006_create_store_info_table::Migration),
        ]
    }
}
