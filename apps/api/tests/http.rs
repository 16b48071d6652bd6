//! End-to-end tests of the router against an in-memory database.
//!
//! Requests go through `Router::oneshot`, so routing, extractor rejections
//! and error mapping are exercised exactly as a client would see them.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::FixedOffset;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt; // For oneshot()

use kasir_api::{app, ApiError, AppState, ErrorCode};
use kasir_core::{Category, Product, SalesReport, Transaction};
use kasir_db::{Database, DbConfig};

async fn test_app() -> Router {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    let offset = FixedOffset::east_opt(7 * 3600).unwrap();
    app(AppState::new(db, offset))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, bytes.to_vec())
}

fn parse<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> T {
    serde_json::from_slice(bytes).unwrap()
}

async fn create_product(app: &Router, name: &str, price: i64, stock: i64) -> Product {
    let (status, body) = send(
        app,
        "POST",
        "/api/products",
        Some(json!({ "name": name, "price": price, "stock": stock })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    parse(&body)
}

#[tokio::test]
async fn test_health() {
    let app = test_app().await;

    let (status, body) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    let body: Value = parse(&body);
    assert_eq!(body, json!({ "status": "OK", "message": "API Running" }));
}

#[tokio::test]
async fn test_product_crud() {
    let app = test_app().await;

    let created = create_product(&app, "Indomie Goreng", 3_500, 40).await;
    assert_eq!(created.stock, 40);

    let (status, body) = send(&app, "GET", &format!("/api/products/{}", created.id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse::<Product>(&body).name, "Indomie Goreng");

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/products/{}", created.id),
        Some(json!({ "name": "Indomie Goreng Jumbo", "price": 4_500, "stock": 30 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let updated: Product = parse(&body);
    assert_eq!(updated.price, 4_500);
    assert_eq!(updated.stock, 30);

    create_product(&app, "Teh Botol", 5_000, 10).await;
    let (status, body) = send(&app, "GET", "/api/products?name=indomie", None).await;
    assert_eq!(status, StatusCode::OK);
    let found: Vec<Product> = parse(&body);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, created.id);

    let (status, _) = send(&app, "DELETE", &format!("/api/products/{}", created.id), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, "GET", &format!("/api/products/{}", created.id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(parse::<ApiError>(&body).code, ErrorCode::NotFound);
}

#[tokio::test]
async fn test_product_validation_and_bad_id() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/products",
        Some(json!({ "name": "Mizone", "price": -1, "stock": 5 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(parse::<ApiError>(&body).code, ErrorCode::ValidationError);

    let (status, body) = send(&app, "GET", "/api/products/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(parse::<ApiError>(&body).code, ErrorCode::ValidationError);
}

#[tokio::test]
async fn test_category_crud() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/categories",
        Some(json!({ "name": "Minuman", "description": "Drinks" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let category: Category = parse(&body);

    let (status, body) = send(&app, "GET", "/api/categories", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse::<Vec<Category>>(&body), vec![category.clone()]);

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/api/categories/{}", category.id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "GET", &format!("/api/categories/{}", category.id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_checkout_success() {
    let app = test_app().await;
    let mie = create_product(&app, "Indomie Goreng", 3_500, 40).await;
    let teh = create_product(&app, "Teh Botol", 5_000, 10).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/checkout",
        Some(json!({ "items": [
            { "product_id": mie.id, "quantity": 3 },
            { "product_id": teh.id, "quantity": 2 }
        ]})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let transaction: Transaction = parse(&body);
    assert_eq!(transaction.total_amount, 3 * 3_500 + 2 * 5_000);
    assert_eq!(transaction.details.len(), 2);
    assert_eq!(transaction.details[0].product_name, "Indomie Goreng");
    assert_eq!(transaction.details[0].subtotal, 10_500);

    let (_, body) = send(&app, "GET", &format!("/api/products/{}", mie.id), None).await;
    assert_eq!(parse::<Product>(&body).stock, 37);

    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/transactions/{}", transaction.id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let stored: Transaction = parse(&body);
    assert_eq!(stored.id, transaction.id);
    assert_eq!(stored.total_amount, transaction.total_amount);
    assert_eq!(stored.details, transaction.details);
}

#[tokio::test]
async fn test_checkout_accepts_bare_array() {
    let app = test_app().await;
    let teh = create_product(&app, "Teh Botol", 5_000, 10).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/checkout",
        Some(json!([{ "product_id": teh.id, "quantity": 1 }])),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(parse::<Transaction>(&body).total_amount, 5_000);
}

#[tokio::test]
async fn test_checkout_insufficient_stock_changes_nothing() {
    let app = test_app().await;
    let mie = create_product(&app, "Indomie Goreng", 3_500, 40).await;
    let mizone = create_product(&app, "Mizone", 6_000, 5).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/checkout",
        Some(json!({ "items": [
            { "product_id": mie.id, "quantity": 2 },
            { "product_id": mizone.id, "quantity": 6 }
        ]})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: ApiError = parse(&body);
    assert_eq!(error.code, ErrorCode::InsufficientStock);
    assert!(error.message.contains("Mizone"));

    // First line rolled back with the second
    let (_, body) = send(&app, "GET", &format!("/api/products/{}", mie.id), None).await;
    assert_eq!(parse::<Product>(&body).stock, 40);
}

#[tokio::test]
async fn test_checkout_unknown_product() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/checkout",
        Some(json!({ "items": [{ "product_id": 999, "quantity": 1 }] })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    let error: ApiError = parse(&body);
    assert_eq!(error.code, ErrorCode::NotFound);
    assert!(error.message.contains("999"));
}

#[tokio::test]
async fn test_checkout_rejects_bad_bodies() {
    let app = test_app().await;

    let (status, body) = send(&app, "POST", "/api/checkout", Some(json!({ "items": [] }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(parse::<ApiError>(&body).code, ErrorCode::ValidationError);

    let request = Request::builder()
        .method("POST")
        .uri("/api/checkout")
        .header("content-type", "application/json")
        .body(Body::from("{\"items\": [}"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(parse::<ApiError>(&bytes).code, ErrorCode::ValidationError);
}

#[tokio::test]
async fn test_report_today() {
    let app = test_app().await;

    let (status, body) = send(&app, "GET", "/api/report/today", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse::<SalesReport>(&body), SalesReport::empty());

    let mie = create_product(&app, "Indomie Goreng", 3_500, 40).await;
    let teh = create_product(&app, "Teh Botol", 5_000, 10).await;
    for (product_id, quantity) in [(mie.id, 3), (teh.id, 1), (mie.id, 1)] {
        let (status, _) = send(
            &app,
            "POST",
            "/api/checkout",
            Some(json!([{ "product_id": product_id, "quantity": quantity }])),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(&app, "GET", "/api/report/today", None).await;
    assert_eq!(status, StatusCode::OK);
    let report: SalesReport = parse(&body);
    assert_eq!(report.total_transactions, 3);
    assert_eq!(report.total_revenue, 4 * 3_500 + 5_000);
    assert_eq!(report.best_seller.name, "Indomie Goreng");
    assert_eq!(report.best_seller.quantity, 4);
}

#[tokio::test]
async fn test_report_range_queries() {
    let app = test_app().await;

    let (status, body) = send(&app, "GET", "/api/report?start_date=2024-03-01", None).await;
    assert_eq!(status, StatusCode::OK);
    let report: SalesReport = parse(&body);
    assert_eq!(report.total_transactions, 0);
    assert_eq!(report.best_seller.name, "-");

    let (status, body) = send(
        &app,
        "GET",
        "/api/report?start_date=2024-03-01&end_date=2024-03-31",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse::<SalesReport>(&body), SalesReport::empty());

    let (status, body) = send(&app, "GET", "/api/report?start_date=2024-13-01", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(parse::<ApiError>(&body).code, ErrorCode::ValidationError);

    let (status, _) = send(&app, "GET", "/api/report", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        "GET",
        "/api/report?start_date=2024-03-10&end_date=2024-03-01",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(parse::<ApiError>(&body).code, ErrorCode::ValidationError);
}

#[tokio::test]
async fn test_sold_product_cannot_be_deleted() {
    let app = test_app().await;
    let teh = create_product(&app, "Teh Botol", 5_000, 10).await;

    let (status, _) = send(
        &app,
        "POST",
        "/api/checkout",
        Some(json!([{ "product_id": teh.id, "quantity": 1 }])),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, "DELETE", &format!("/api/products/{}", teh.id), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(parse::<ApiError>(&body).code, ErrorCode::Conflict);
}
