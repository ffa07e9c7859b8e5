mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn create_defaults_to_normal_customer() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post(
            "/api/customers",
            json!({ "full_name": "Grace Hopper", "phone_number": " 5550199 " }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["customer_type"], "normal");
    assert_eq!(body["phone_number"], "5550199");
    assert!(body["email"].is_null());
}

#[tokio::test]
async fn every_invalid_field_is_reported() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post(
            "/api/customers",
            json!({
                "full_name": "",
                "phone_number": "",
                "email": "not-an-email",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let errors = body["errors"].as_object().unwrap();
    assert!(errors.contains_key("full_name"));
    assert!(errors.contains_key("phone_number"));
    assert!(errors.contains_key("email"));
}

#[tokio::test]
async fn unknown_customer_type_is_rejected() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post(
            "/api/customers",
            json!({
                "full_name": "Grace Hopper",
                "phone_number": "5550199",
                "customer_type": "platinum",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Bad Request");
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("customer_type"), "{message}");
}

#[tokio::test]
async fn update_replaces_fields() {
    let app = TestApp::new().await;
    let id = app.create_customer("Grace Hopper", "5550199").await;

    let (status, body) = app
        .put(
            &format!("/api/customers/{id}"),
            json!({
                "full_name": "Rear Admiral Grace Hopper",
                "phone_number": "5550200",
                "email": "grace@navy.example",
                "customer_type": "vip",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["full_name"], "Rear Admiral Grace Hopper");
    assert_eq!(body["customer_type"], "vip");
    assert_eq!(body["email"], "grace@navy.example");
}

#[tokio::test]
async fn listing_and_deleting() {
    let app = TestApp::new().await;

    let (status, _) = app.get("/api/customers").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let id = app.create_customer("Alan Turing", "5550111").await;
    let (status, body) = app.get("/api/customers").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, _) = app.delete(&format!("/api/customers/{id}")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = app.get(&format!("/api/customers/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = app.delete(&format!("/api/customers/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleting_a_customer_keeps_their_invoices() {
    let app = TestApp::new().await;
    let category = app.create_category("Misc", None).await;
    let product = app.create_product("Widget", "5.00", 10, &category).await;
    let customer = app.create_customer("Alan Turing", "5550111").await;
    let invoice = app.create_invoice(&customer, &[(&product, 2, "5.00")]).await;
    let invoice_id = invoice["id"].as_str().unwrap();

    let (status, _) = app.delete(&format!("/api/customers/{customer}")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = app.get(&format!("/api/invoices/{invoice_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["customer_id"].is_null());
    assert_eq!(body["customer_name"], "unknown");
}
