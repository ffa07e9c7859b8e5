#![allow(dead_code)]

use std::str::FromStr;
use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use eshop_api::{config::AppConfig, db, AppState};
use rust_decimal::Decimal;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

/// Full application router backed by a throwaway SQLite file.
pub struct TestApp {
    router: Router,
    pub state: AppState,
    _dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    /// Same as [`TestApp::new`] with a hook to adjust configuration first.
    pub async fn with_config(tweak: impl FnOnce(&mut AppConfig)) -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let db_path = dir.path().join("eshop_test.db");

        let mut cfg = AppConfig::new(
            format!("sqlite://{}?mode=rwc", db_path.display()),
            "127.0.0.1".to_string(),
            18_080,
            "development".to_string(),
        );
        cfg.db_max_connections = 4;
        cfg.db_min_connections = 1;
        tweak(&mut cfg);

        let pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("failed to create test database");
        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");

        let state = AppState::new(Arc::new(pool), cfg);
        let router = eshop_api::build_router(state.clone()).expect("router should build");

        Self {
            router,
            state,
            _dir: dir,
        }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> axum::response::Response {
        let mut builder = Request::builder().method(method).uri(uri);

        let body = if let Some(json) = body {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&json).expect("failed to serialize json request body"))
        } else {
            Body::empty()
        };

        let request = builder.body(body).expect("failed to build request");
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request")
    }

    /// Sends a request and decodes the body; an empty body becomes `Value::Null`.
    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let response = self.request(method, uri, body).await;
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("failed to read body");
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("response body should be json")
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::DELETE, uri, None).await
    }

    pub async fn create_category(&self, name: &str, parent_id: Option<&str>) -> String {
        let (status, body) = self
            .post("/api/categories", json!({ "name": name, "parent_id": parent_id }))
            .await;
        assert_eq!(status, StatusCode::CREATED, "create category failed: {body}");
        id_of(&body)
    }

    pub async fn create_product(&self, name: &str, price: &str, stock: i32, category_id: &str) -> String {
        let (status, body) = self
            .post(
                "/api/products",
                json!({
                    "name": name,
                    "price": price,
                    "stock": stock,
                    "category_id": category_id,
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create product failed: {body}");
        id_of(&body)
    }

    pub async fn create_customer(&self, full_name: &str, phone: &str) -> String {
        let (status, body) = self
            .post(
                "/api/customers",
                json!({ "full_name": full_name, "phone_number": phone }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create customer failed: {body}");
        id_of(&body)
    }

    /// `items` are `(product_id, quantity, unit_price)`.
    pub async fn create_invoice(&self, customer_id: &str, items: &[(&str, i32, &str)]) -> Value {
        let items: Vec<Value> = items
            .iter()
            .map(|(product_id, quantity, unit_price)| {
                json!({
                    "product_id": product_id,
                    "quantity": quantity,
                    "unit_price": unit_price,
                })
            })
            .collect();
        let (status, body) = self
            .post(
                "/api/invoices",
                json!({ "customer_id": customer_id, "items": items }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create invoice failed: {body}");
        body
    }
}

pub fn id_of(body: &Value) -> String {
    body["id"]
        .as_str()
        .expect("response should carry an id")
        .to_string()
}

/// Decimals travel as strings; compare them numerically.
pub fn decimal(value: &Value) -> Decimal {
    match value {
        Value::String(s) => Decimal::from_str(s).expect("decimal string"),
        Value::Number(n) => Decimal::from_str(&n.to_string()).expect("decimal number"),
        other => panic!("expected a decimal, got {other}"),
    }
}

pub fn dec(raw: &str) -> Decimal {
    Decimal::from_str(raw).expect("decimal literal")
}
