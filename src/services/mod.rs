pub mod categories;
pub mod customers;
pub mod invoice_items;
pub mod invoices;
pub mod products;
pub mod reports;
pub mod store_info;

pub(crate) mod validation;
