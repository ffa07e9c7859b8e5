use crate::errors::ServiceError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Serialize;

/// Standard success response
pub fn success_response<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(data)).into_response()
}

/// Standard created response
pub fn created_response<T: Serialize>(data: T) -> Response {
    (StatusCode::CREATED, Json(data)).into_response()
}

/// Standard no content response
pub fn no_content_response() -> Response {
    StatusCode::NO_CONTENT.into_response()
}

/// Parses an RFC 3339 timestamp or a plain `YYYY-MM-DD` date.
///
/// A plain date maps to the start of the day, or to its last microsecond when
/// `end_of_day` is set, so inclusive ranges cover whole days.
pub fn parse_date_bound(
    field: &str,
    raw: &str,
    end_of_day: bool,
) -> Result<DateTime<Utc>, ServiceError> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }

    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        ServiceError::validation(field, "must be an RFC 3339 timestamp or a YYYY-MM-DD date")
    })?;
    let time = if end_of_day {
        NaiveTime::from_hms_micro_opt(23, 59, 59, 999_999)
    } else {
        NaiveTime::from_hms_opt(0, 0, 0)
    }
    .ok_or_else(|| ServiceError::InternalError("invalid time of day".to_string()))?;

    Ok(date.and_time(time).and_utc())
}

/// Like [`parse_date_bound`], but blank or absent input is `None`.
pub fn parse_optional_date_bound(
    field: &str,
    raw: Option<&str>,
    end_of_day: bool,
) -> Result<Option<DateTime<Utc>>, ServiceError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_date_bound(field, value, end_of_day).map(Some),
    }
}
