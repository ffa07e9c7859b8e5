use super::common::{parse_date_bound, success_response};
use super::extract::{Query};
use crate::errors::ServiceError;
use crate::services::reports::SalesReport;
use crate::AppState;
use axum::{
    extract::State,
    response::IntoResponse,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Debug, Deserialize, IntoParams)]
pub struct SalesReportQuery {
    /// RFC 3339 timestamp or YYYY-MM-DD
    pub start_date: String,
    /// RFC 3339 timestamp or YYYY-MM-DD (whole day)
    pub end_date: String,
}

#[utoipa::path(
    get,
    path = "/api/reports/sales",
    params(SalesReportQuery),
    responses(
        (status = 200, description = "Sales grouped by customer", body = SalesReport),
        (status = 400, description = "Invalid date range", body = crate::errors::ErrorResponse),
        (status = 404, description = "No invoices in range", body = crate::errors::ErrorResponse),
    ),
    tag = "reports"
)]
pub async fn sales_report(
    State(state): State<AppState>,
    Query(query): Query<SalesReportQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let start = parse_date_bound("start_date", &query.start_date, false)?;
    let end = parse_date_bound("end_date", &query.end_date, true)?;
    let report = state.services.reports.sales_report(start, end).await?;
    Ok(success_response(report))
}

pub fn report_routes() -> Router<AppState> {
    Router::new().route("/sales", get(sales_report))
}
