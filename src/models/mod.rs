pub mod category_tree;
pub mod invoice;
pub mod value_objects;

pub use category_tree::{flatten, CategoryTree, FlatCategory};
pub use invoice::{compute_total, InvoiceAggregate, InvoiceLine};
pub use value_objects::{EmailAddress, PhoneNumber};
