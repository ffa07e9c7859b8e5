mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{dec, decimal, TestApp};
use serde_json::json;

struct Fixture {
    app: TestApp,
    pen: String,
    paper: String,
    ada: String,
    alan: String,
}

async fn fixture() -> Fixture {
    let app = TestApp::new().await;
    let category = app.create_category("Office", None).await;
    let pen = app.create_product("Pen", "1.50", 100, &category).await;
    let paper = app.create_product("Paper", "4.25", 50, &category).await;
    let ada = app.create_customer("Ada Lovelace", "5550100").await;
    let alan = app.create_customer("Alan Turing", "5550111").await;
    Fixture {
        app,
        pen,
        paper,
        ada,
        alan,
    }
}

#[tokio::test]
async fn created_invoice_carries_items_and_computed_total() {
    let f = fixture().await;

    let invoice = f
        .app
        .create_invoice(&f.ada, &[(&f.pen, 3, "1.50"), (&f.paper, 2, "10.50")])
        .await;

    assert_eq!(invoice["customer_name"], "Ada Lovelace");
    assert_eq!(invoice["status"], "draft");
    assert_eq!(invoice["items"].as_array().unwrap().len(), 2);
    assert_eq!(decimal(&invoice["total_amount"]), dec("25.50"));

    let id = invoice["id"].as_str().unwrap();
    let (status, total) = f.app.get(&format!("/api/invoices/{id}/total")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(total["invoice_id"], id);
    assert_eq!(decimal(&total["total"]), dec("25.50"));
}

#[tokio::test]
async fn missing_references_are_reported_per_field() {
    let f = fixture().await;
    let ghost = uuid::Uuid::new_v4();

    let (status, body) = f
        .app
        .post(
            "/api/invoices",
            json!({
                "customer_id": ghost,
                "items": [
                    { "product_id": f.pen, "quantity": 1, "unit_price": "1.50" },
                    { "product_id": ghost, "quantity": 1, "unit_price": "1.00" },
                ],
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let errors = body["errors"].as_object().unwrap();
    assert!(errors.contains_key("customer_id"));
    assert!(errors.contains_key("items[1].product_id"));
    assert!(!errors.contains_key("items[0].product_id"));

    let (status, _) = f.app.get("/api/invoices").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invoice_without_items_is_rejected() {
    let f = fixture().await;

    let (status, body) = f
        .app
        .post("/api/invoices", json!({ "customer_id": f.ada, "items": [] }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["errors"]["items"].is_array());
}

#[tokio::test]
async fn items_can_be_added_updated_and_removed() {
    let f = fixture().await;
    let invoice = f.app.create_invoice(&f.ada, &[(&f.pen, 2, "1.50")]).await;
    let id = invoice["id"].as_str().unwrap();

    let (status, item) = f
        .app
        .post(
            &format!("/api/invoices/{id}/items"),
            json!({ "product_id": f.paper, "quantity": 2, "unit_price": "4.25" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(item["product_name"], "Paper");
    assert_eq!(decimal(&item["line_total"]), dec("8.50"));
    let item_id = item["id"].as_str().unwrap();

    let (status, items) = f.app.get(&format!("/api/invoices/{id}/items")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(items.as_array().unwrap().len(), 2);

    let (_, total) = f.app.get(&format!("/api/invoices/{id}/total")).await;
    assert_eq!(decimal(&total["total"]), dec("11.50"));

    let (status, updated) = f
        .app
        .put(
            &format!("/api/invoice-items/{item_id}"),
            json!({ "quantity": 4, "unit_price": "4.25" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["quantity"], 4);

    let (_, total) = f.app.get(&format!("/api/invoices/{id}/total")).await;
    assert_eq!(decimal(&total["total"]), dec("20.00"));

    let (status, _) = f
        .app
        .put(
            &format!("/api/invoice-items/{item_id}"),
            json!({ "quantity": 0, "unit_price": "4.25" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = f.app.delete(&format!("/api/invoice-items/{item_id}")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = f.app.get(&format!("/api/invoice-items/{item_id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn adding_an_unknown_product_is_a_validation_error() {
    let f = fixture().await;
    let invoice = f.app.create_invoice(&f.ada, &[(&f.pen, 1, "1.50")]).await;
    let id = invoice["id"].as_str().unwrap();

    let (status, body) = f
        .app
        .post(
            &format!("/api/invoices/{id}/items"),
            json!({ "product_id": uuid::Uuid::new_v4(), "quantity": 1, "unit_price": "1.00" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["errors"]["product_id"].is_array());

    let missing = uuid::Uuid::new_v4();
    let (status, _) = f
        .app
        .post(
            &format!("/api/invoices/{missing}/items"),
            json!({ "product_id": f.pen, "quantity": 1, "unit_price": "1.00" }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleting_an_invoice_removes_its_items() {
    let f = fixture().await;
    let invoice = f.app.create_invoice(&f.ada, &[(&f.pen, 1, "1.50")]).await;
    let id = invoice["id"].as_str().unwrap();
    let item_id = invoice["items"][0]["id"].as_str().unwrap();

    let (status, _) = f.app.delete(&format!("/api/invoices/{id}")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = f.app.get(&format!("/api/invoices/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = f.app.get(&format!("/api/invoice-items/{item_id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // the product is free to go once nothing references it
    let (status, _) = f.app.delete(&format!("/api/products/{}", f.pen)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn search_matches_name_fragment_case_insensitively() {
    let f = fixture().await;
    f.app.create_invoice(&f.ada, &[(&f.pen, 2, "1.50")]).await;
    f.app.create_invoice(&f.ada, &[(&f.paper, 10, "4.25")]).await;
    f.app.create_invoice(&f.alan, &[(&f.pen, 1, "1.50")]).await;

    let (status, body) = f.app.get("/api/invoices/search?customer_name=LOVE").await;
    assert_eq!(status, StatusCode::OK);
    let found = body.as_array().unwrap();
    assert_eq!(found.len(), 2);
    assert!(found.iter().all(|i| i["customer_name"] == "Ada Lovelace"));

    let (status, body) = f
        .app
        .get("/api/invoices/search?customer_name=ada&min_amount=10")
        .await;
    assert_eq!(status, StatusCode::OK);
    let found = body.as_array().unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(decimal(&found[0]["total_amount"]), dec("42.50"));

    let (status, _) = f.app.get("/api/invoices/search?customer_name=grace").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn search_folds_case_of_accented_names() {
    let f = fixture().await;
    let elodie = f.app.create_customer("Élodie Ünal", "5550122").await;
    f.app.create_invoice(&elodie, &[(&f.pen, 1, "1.50")]).await;
    f.app.create_invoice(&f.ada, &[(&f.pen, 1, "1.50")]).await;

    // Élodie, élodie, ÉLODIE, ünal
    for fragment in ["%C3%89lodie", "%C3%A9lodie", "%C3%89LODIE", "%C3%BCnal"] {
        let (status, body) = f
            .app
            .get(&format!("/api/invoices/search?customer_name={fragment}"))
            .await;
        assert_eq!(status, StatusCode::OK, "{fragment}: {body}");
        let found = body.as_array().unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0]["customer_name"], "Élodie Ünal");
    }
}

#[tokio::test]
async fn search_respects_date_bounds() {
    let f = fixture().await;
    f.app.create_invoice(&f.alan, &[(&f.pen, 1, "1.50")]).await;

    let today = Utc::now().format("%Y-%m-%d");
    let (status, body) = f
        .app
        .get(&format!(
            "/api/invoices/search?customer_name=turing&from_date={today}&to_date={today}"
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let tomorrow = (Utc::now() + Duration::days(1)).format("%Y-%m-%d");
    let (status, _) = f
        .app
        .get(&format!(
            "/api/invoices/search?customer_name=turing&from_date={tomorrow}"
        ))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn search_rejects_bad_criteria() {
    let f = fixture().await;

    let (status, body) = f.app.get("/api/invoices/search?customer_name=%20").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["errors"]["customer_name"].is_array());

    let (status, body) = f
        .app
        .get("/api/invoices/search?customer_name=ada&from_date=2024-02-01&to_date=2024-01-01")
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["errors"]["from_date"].is_array());

    let (status, body) = f
        .app
        .get("/api/invoices/search?customer_name=ada&from_date=yesterday")
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["errors"]["from_date"].is_array());
}
