//! Sales report over a date range, grouped by customer.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::models::InvoiceAggregate;
use crate::repositories::{invoice_repository::InvoiceFilter, InvoiceRepository};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CustomerSales {
    pub customer_id: Uuid,
    pub customer_name: String,
    pub invoice_count: usize,
    #[schema(value_type = String, example = "150.00")]
    pub total_spent: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SalesReport {
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub total_invoices: usize,
    #[schema(value_type = String, example = "150.00")]
    pub total_revenue: Decimal,
    pub sales_by_customers: Vec<CustomerSales>,
}

/// Aggregates `invoices` issued within `[start, end]`.
///
/// Invoices without a loaded customer are skipped. Groups are keyed by
/// customer id and appear in first-seen order. An empty selection is reported
/// as `NotFound`.
pub fn generate_sales_report(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    invoices: &[InvoiceAggregate],
) -> Result<SalesReport, ServiceError> {
    if start > end {
        return Err(ServiceError::validation(
            "start_date",
            "start_date must not be after end_date",
        ));
    }

    let mut groups: Vec<CustomerSales> = Vec::new();
    let mut index: HashMap<Uuid, usize> = HashMap::new();
    let mut total_invoices = 0usize;
    let mut total_revenue = Decimal::ZERO;

    for aggregate in invoices {
        let issued = aggregate.invoice.issued_date;
        if issued < start || issued > end {
            continue;
        }
        let Some(customer) = &aggregate.customer else {
            continue;
        };

        let total = aggregate.total();
        total_invoices += 1;
        total_revenue += total;

        let slot = *index.entry(customer.id).or_insert_with(|| {
            groups.push(CustomerSales {
                customer_id: customer.id,
                customer_name: customer.full_name.clone(),
                invoice_count: 0,
                total_spent: Decimal::ZERO,
            });
            groups.len() - 1
        });
        groups[slot].invoice_count += 1;
        groups[slot].total_spent += total;
    }

    if total_invoices == 0 {
        return Err(ServiceError::NotFound(
            "No invoices found in the selected period".to_string(),
        ));
    }

    Ok(SalesReport {
        start_date: start,
        end_date: end,
        total_invoices,
        total_revenue,
        sales_by_customers: groups,
    })
}

#[derive(Clone)]
pub struct ReportService {
    invoices: InvoiceRepository,
}

impl ReportService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            invoices: InvoiceRepository::new(db),
        }
    }

    #[instrument(skip(self))]
    pub async fn sales_report(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<SalesReport, ServiceError> {
        if start > end {
            return generate_sales_report(start, end, &[]);
        }

        let invoices = self
            .invoices
            .fetch_filtered(&InvoiceFilter {
                from: Some(start),
                to: Some(end),
                ..Default::default()
            })
            .await?;

        let report = generate_sales_report(start, end, &invoices)?;
        info!(
            total_invoices = report.total_invoices,
            customers = report.sales_by_customers.len(),
            "sales report generated"
        );
        Ok(report)
    }
}
