pub mod category;
pub mod customer;
pub mod invoice;
pub mod invoice_item;
pub mod product;
pub mod store_info;
