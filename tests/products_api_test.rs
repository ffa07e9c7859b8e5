mod common;

use axum::http::StatusCode;
use common::{dec, decimal, TestApp};
use serde_json::json;

#[tokio::test]
async fn create_then_fetch_product() {
    let app = TestApp::new().await;
    let category = app.create_category("Stationery", None).await;

    let (status, created) = app
        .post(
            "/api/products",
            json!({
                "name": "  Notebook ",
                "price": "4.25",
                "stock": 40,
                "description": "A5 ruled",
                "category_id": category,
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], "Notebook");

    let id = created["id"].as_str().unwrap();
    let (status, fetched) = app.get(&format!("/api/products/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(decimal(&fetched["price"]), dec("4.25"));
    assert_eq!(fetched["stock"], 40);
    assert_eq!(fetched["category_id"], category.as_str());
}

#[tokio::test]
async fn listing_is_not_found_when_catalog_is_empty() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/products").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "No products found");
}

#[tokio::test]
async fn listing_carries_category_name() {
    let app = TestApp::new().await;
    let category = app.create_category("Toys", None).await;
    app.create_product("Kite", "9.50", 5, &category).await;

    let (status, body) = app.get("/api/products").await;
    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["name"], "Kite");
    assert_eq!(rows[0]["category_name"], "Toys");
}

#[tokio::test]
async fn invalid_fields_are_all_reported() {
    let app = TestApp::new().await;
    let category = app.create_category("Toys", None).await;

    let (status, body) = app
        .post(
            "/api/products",
            json!({
                "name": "",
                "price": "-1.00",
                "stock": -3,
                "category_id": category,
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let errors = &body["errors"];
    assert!(errors["name"].is_array());
    assert!(errors["price"].is_array());
    assert!(errors["stock"].is_array());
}

#[tokio::test]
async fn unknown_category_is_not_found() {
    let app = TestApp::new().await;

    let (status, _) = app
        .post(
            "/api/products",
            json!({
                "name": "Kite",
                "price": "9.50",
                "stock": 1,
                "category_id": uuid::Uuid::new_v4(),
            }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn stock_update_and_category_reassignment() {
    let app = TestApp::new().await;
    let toys = app.create_category("Toys", None).await;
    let games = app.create_category("Games", None).await;
    let id = app.create_product("Chess set", "30.00", 2, &toys).await;

    let (status, body) = app
        .put(&format!("/api/products/{id}/stock"), json!({ "stock": 15 }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["stock"], 15);

    let (status, body) = app
        .put(&format!("/api/products/{id}/stock"), json!({ "stock": -1 }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["errors"]["stock"].is_array());

    let (status, body) = app
        .put(&format!("/api/products/{id}/category/{games}"), json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["category_id"], games.as_str());

    let missing = uuid::Uuid::new_v4();
    let (status, _) = app
        .put(&format!("/api/products/{id}/category/{missing}"), json!({}))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn low_stock_is_inclusive_and_sorted() {
    let app = TestApp::new().await;
    let category = app.create_category("Pantry", None).await;
    app.create_product("Rice", "2.00", 10, &category).await;
    app.create_product("Salt", "0.50", 0, &category).await;
    app.create_product("Flour", "1.25", 4, &category).await;
    app.create_product("Sugar", "1.50", 11, &category).await;

    let (status, body) = app.get("/api/products/low-stock").await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Salt", "Flour", "Rice"]);

    let (status, body) = app.get("/api/products/low-stock?threshold=4").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);

    let (status, _) = app.get("/api/products/low-stock?threshold=-1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn low_stock_threshold_follows_configuration() {
    let app = TestApp::with_config(|cfg| cfg.low_stock_threshold = 3).await;
    let category = app.create_category("Pantry", None).await;
    app.create_product("Rice", "2.00", 10, &category).await;
    app.create_product("Salt", "0.50", 3, &category).await;

    let (_, body) = app.get("/api/products/low-stock").await;
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["name"], "Salt");
}

#[tokio::test]
async fn product_on_an_invoice_cannot_be_deleted() {
    let app = TestApp::new().await;
    let category = app.create_category("Tools", None).await;
    let product = app.create_product("Hammer", "15.00", 5, &category).await;
    let customer = app.create_customer("Ada Lovelace", "5550100").await;
    app.create_invoice(&customer, &[(&product, 1, "15.00")]).await;

    let (status, body) = app.delete(&format!("/api/products/{product}")).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Conflict");
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("invoice item"), "{message}");

    let (status, _) = app.get(&format!("/api/products/{product}")).await;
    assert_eq!(status, StatusCode::OK);

    let unused = app.create_product("Saw", "20.00", 1, &category).await;
    let (status, body) = app.delete(&format!("/api/products/{unused}")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());
}
