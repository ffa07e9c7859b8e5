use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::{DbErr, RuntimeErr, SqlErr};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

fn current_request_id() -> Option<String> {
    crate::tracing::current_request_id().map(|rid| rid.as_str().to_string())
}

/// SQLite reports `ON DELETE RESTRICT` failures as extended code 1811,
/// which `DbErr::sql_err` leaves unclassified.
fn is_restrict_violation(err: &DbErr) -> bool {
    match err {
        DbErr::Exec(RuntimeErr::SqlxError(sea_orm::sqlx::Error::Database(e)))
        | DbErr::Query(RuntimeErr::SqlxError(sea_orm::sqlx::Error::Database(e))) => {
            e.code().as_deref() == Some(SQLITE_CONSTRAINT_TRIGGER)
        }
        _ => false,
    }
}

const SQLITE_CONSTRAINT_TRIGGER: &str = "1811";

/// Field name to the list of messages reported for it.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Error body returned by every failing endpoint
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "error": "Bad Request",
    "message": "One or more validation errors occurred",
    "errors": { "name": ["must not be blank"] },
    "request_id": "req-abc123xyz",
    "timestamp": "2024-12-09T10:30:00.000Z"
}))]
pub struct ErrorResponse {
    /// HTTP status category (e.g., "Not Found", "Bad Request")
    #[schema(example = "Not Found")]
    pub error: String,
    /// Human-readable error description
    #[schema(example = "Category 550e8400-e29b-41d4-a716-446655440000 not found")]
    pub message: String,
    /// Field-level validation messages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub errors: Option<FieldErrors>,
    /// Underlying cause of an internal error, only when detail exposure is enabled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Unique request identifier for support and debugging
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "req-abc123xyz")]
    pub request_id: Option<String>,
    /// RFC 3339 timestamp when the error occurred
    pub timestamp: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] DbErr),

    #[error("{0}")]
    NotFound(String),

    #[error("One or more validation errors occurred")]
    ValidationError(FieldErrors),

    #[error("{0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    InternalError(String),

    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(err: validator::ValidationErrors) -> Self {
        let mut fields = FieldErrors::new();
        for (field, errors) in err.field_errors() {
            let messages = fields.entry(field.to_string()).or_default();
            for error in errors {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| error.code.to_string());
                messages.push(message);
            }
        }
        ServiceError::ValidationError(fields)
    }
}

impl ServiceError {
    /// Single-field validation failure.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut fields = FieldErrors::new();
        fields.insert(field.into(), vec![message.into()]);
        ServiceError::ValidationError(fields)
    }

    /// Maps a failed delete to `Conflict` when rows still reference the target.
    pub fn from_delete_error(err: DbErr, what: &str) -> Self {
        let referenced = matches!(
            err.sql_err(),
            Some(SqlErr::ForeignKeyConstraintViolation(_))
        ) || is_restrict_violation(&err);
        if referenced {
            ServiceError::Conflict(format!("{} is still referenced by other records", what))
        } else {
            ServiceError::DatabaseError(err)
        }
    }

    /// Returns the HTTP status code for this error.
    /// This is the single source of truth for error-to-status mapping.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::ValidationError(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::DatabaseError(_) | Self::InternalError(_) | Self::Other(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Returns the error message suitable for HTTP responses.
    /// Internal errors return generic messages to avoid leaking implementation details.
    pub fn response_message(&self) -> String {
        match self {
            Self::DatabaseError(_) => "Database error".to_string(),
            Self::InternalError(_) | Self::Other(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        }
    }

    fn internal_details(&self) -> Option<String> {
        match self {
            Self::DatabaseError(err) => Some(err.to_string()),
            Self::InternalError(msg) => Some(msg.clone()),
            Self::Other(err) => Some(format!("{:?}", err)),
            _ => None,
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::warn!(status = status.as_u16(), error = %self, "request rejected");
        }

        let details = if crate::middleware_helpers::error_details::error_details_enabled() {
            self.internal_details()
        } else {
            None
        };
        let message = self.response_message();
        let errors = match self {
            ServiceError::ValidationError(fields) => Some(fields),
            _ => None,
        };

        let body = ErrorResponse {
            error: status.canonical_reason().unwrap_or("Error").to_string(),
            message,
            errors,
            details,
            request_id: current_request_id(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use validator::Validate;

    async fn body_of(response: Response) -> ErrorResponse {
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn service_error_response_includes_request_id() {
        let response =
            crate::tracing::scope_request_id(crate::tracing::RequestId::new("req-123"), async {
                ServiceError::NotFound("missing".into()).into_response()
            })
            .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let payload = body_of(response).await;
        assert_eq!(payload.request_id.as_deref(), Some("req-123"));
        assert_eq!(payload.message, "missing");
    }

    #[tokio::test]
    async fn validation_error_renders_field_map() {
        let mut fields = FieldErrors::new();
        fields.insert("name".into(), vec!["must not be blank".into()]);
        fields.insert("price".into(), vec!["must not be negative".into()]);

        let response = ServiceError::ValidationError(fields).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let payload = body_of(response).await;
        let errors = payload.errors.expect("field errors expected");
        assert_eq!(errors["name"], vec!["must not be blank".to_string()]);
        assert!(errors.contains_key("price"));
        assert!(payload.details.is_none());
    }

    #[tokio::test]
    async fn internal_details_hidden_by_default() {
        let response = ServiceError::InternalError("pool exhausted".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let payload = body_of(response).await;
        assert_eq!(payload.message, "Internal server error");
        assert!(payload.details.is_none());
    }

    #[tokio::test]
    async fn internal_details_exposed_when_enabled() {
        let response = crate::middleware_helpers::error_details::scope_error_details(true, async {
            ServiceError::InternalError("pool exhausted".into()).into_response()
        })
        .await;

        let payload = body_of(response).await;
        assert_eq!(payload.details.as_deref(), Some("pool exhausted"));
    }

    #[tokio::test]
    async fn details_never_attached_to_client_errors() {
        let response = crate::middleware_helpers::error_details::scope_error_details(true, async {
            ServiceError::BadRequest("delete children first".into()).into_response()
        })
        .await;

        let payload = body_of(response).await;
        assert!(payload.details.is_none());
        assert_eq!(payload.message, "delete children first");
    }

    #[test]
    fn service_error_status_code_mapping() {
        assert_eq!(
            ServiceError::NotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ServiceError::validation("x", "y").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServiceError::BadRequest("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServiceError::Unauthorized("x".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ServiceError::Forbidden("x".into()).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ServiceError::Conflict("x".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ServiceError::DatabaseError(DbErr::Custom("x".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn response_message_hides_internal_details() {
        assert_eq!(
            ServiceError::DatabaseError(DbErr::Custom("secret".into())).response_message(),
            "Database error"
        );
        assert_eq!(
            ServiceError::Other(anyhow::anyhow!("boom")).response_message(),
            "Internal server error"
        );
        assert_eq!(
            ServiceError::Conflict("in use".into()).response_message(),
            "Conflict: in use"
        );
    }

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 1, message = "must not be blank"))]
        name: String,
        #[validate(range(min = 0))]
        stock: i32,
    }

    #[test]
    fn validator_errors_flatten_into_field_map() {
        let err: ServiceError = Sample {
            name: String::new(),
            stock: -1,
        }
        .validate()
        .unwrap_err()
        .into();

        match err {
            ServiceError::ValidationError(fields) => {
                assert_eq!(fields["name"], vec!["must not be blank".to_string()]);
                assert_eq!(fields["stock"], vec!["range".to_string()]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
