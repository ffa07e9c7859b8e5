use crate::entities::{customer, invoice, invoice_item, product};
use rust_decimal::Decimal;

/// Sum of `quantity * unit_price` over `items`; zero when empty.
pub fn compute_total<'a, I>(items: I) -> Decimal
where
    I: IntoIterator<Item = &'a invoice_item::Model>,
{
    items
        .into_iter()
        .map(invoice_item::Model::line_total)
        .fold(Decimal::ZERO, |acc, line| acc + line)
}

/// A line item with the product it points at, if still loadable.
#[derive(Debug, Clone)]
pub struct InvoiceLine {
    pub item: invoice_item::Model,
    pub product: Option<product::Model>,
}

/// An invoice with its customer and items loaded.
#[derive(Debug, Clone)]
pub struct InvoiceAggregate {
    pub invoice: invoice::Model,
    pub customer: Option<customer::Model>,
    pub lines: Vec<InvoiceLine>,
}

impl InvoiceAggregate {
    /// Recomputed from the loaded lines on every call.
    pub fn total(&self) -> Decimal {
        compute_total(self.lines.iter().map(|line| &line.item))
    }
}
