//! Per-request switch controlling whether 500 bodies carry the underlying cause.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::future::Future;

tokio::task_local! {
    static EXPOSE_ERROR_DETAILS: bool;
}

pub async fn scope_error_details<Fut, R>(enabled: bool, future: Fut) -> R
where
    Fut: Future<Output = R>,
{
    EXPOSE_ERROR_DETAILS.scope(enabled, future).await
}

/// False outside of a scoped request.
pub fn error_details_enabled() -> bool {
    EXPOSE_ERROR_DETAILS.try_with(|enabled| *enabled).unwrap_or(false)
}

/// Scopes the flag held in state for every request it wraps.
pub async fn error_details_middleware(
    State(enabled): State<bool>,
    request: Request,
    next: Next,
) -> Response {
    scope_error_details(enabled, next.run(request)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request as HttpRequest, routing::get, Router};
    use tower::ServiceExt;

    async fn report() -> String {
        error_details_enabled().to_string()
    }

    #[tokio::test]
    async fn flag_defaults_to_off() {
        assert!(!error_details_enabled());
    }

    #[tokio::test]
    async fn layer_scopes_flag_for_handlers() {
        let app = Router::new()
            .route("/", get(report))
            .layer(axum::middleware::from_fn_with_state(
                true,
                error_details_middleware,
            ));

        let response = app
            .oneshot(HttpRequest::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"true");
    }
}
