use std::sync::Arc;

use catalog_api::app::{build_app, AppServices};
use catalog_products::Product;
use reqwest::StatusCode;
use serde_json::json;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

struct TestServer {
    base_url: String,
    services: Arc<AppServices>,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Same router as prod, in-memory store, ephemeral port.
        let services = Arc::new(AppServices::in_memory());
        let app = build_app(Arc::clone(&services), CancellationToken::new());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            services,
            handle,
        }
    }

    fn stored_product(&self, id: &str) -> Option<Product> {
        let id: Uuid = id.parse().unwrap();
        self.services
            .in_memory_store()
            .unwrap()
            .load::<Product>(id)
            .unwrap()
    }

    fn product_count(&self) -> usize {
        self.services
            .in_memory_store()
            .unwrap()
            .count(Product::COLLECTION)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn mug() -> serde_json::Value {
    json!({
        "name": "Mug",
        "category": ["Kitchen"],
        "description": "",
        "imageFile": "mug.png",
        "price": 9.99
    })
}

#[tokio::test]
async fn health_is_ok() {
    let server = TestServer::spawn().await;
    let res = reqwest::get(format!("{}/health", server.base_url)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn create_product_returns_id_and_persists_fields() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/products", server.base_url))
        .json(&mug())
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let body: serde_json::Value = res.json().await.unwrap();
    let id = body["id"].as_str().unwrap().to_string();

    let product = server.stored_product(&id).expect("product was not stored");
    assert_eq!(product.name(), "Mug");
    assert_eq!(product.category(), ["Kitchen"]);
    assert_eq!(product.description(), "");
    assert_eq!(product.image_file(), "mug.png");
    assert_eq!(product.price().to_string(), "9.99");
    assert_eq!(server.product_count(), 1);
}

#[tokio::test]
async fn identical_requests_create_distinct_products() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let mut ids = Vec::new();
    for _ in 0..2 {
        let body: serde_json::Value = client
            .post(format!("{}/products", server.base_url))
            .json(&mug())
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        ids.push(body["id"].as_str().unwrap().to_string());
    }

    assert_ne!(ids[0], ids[1]);
    assert_eq!(server.product_count(), 2);
}

#[tokio::test]
async fn invalid_request_is_400_with_first_violation() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let mut body = mug();
    body["name"] = json!("");
    body["price"] = json!(0);

    let res = client
        .post(format!("{}/products", server.base_url))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let err: serde_json::Value = res.json().await.unwrap();
    assert_eq!(err["error"], "validation_error");
    assert_eq!(err["message"], "Name is required");
    assert_eq!(server.product_count(), 0);
}

#[tokio::test]
async fn missing_image_file_is_reported() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/products", server.base_url))
        .json(&json!({ "name": "Mug", "category": ["Kitchen"], "price": "4.50" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let err: serde_json::Value = res.json().await.unwrap();
    assert_eq!(err["message"], "ImageFile is required");
}

#[tokio::test]
async fn shutdown_cancels_commit() {
    let services = Arc::new(AppServices::in_memory());
    let shutdown = CancellationToken::new();
    shutdown.cancel();
    let app = build_app(Arc::clone(&services), shutdown);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let res = reqwest::Client::new()
        .post(format!("http://{}/products", addr))
        .json(&mug())
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert!(services.in_memory_store().unwrap().is_empty());

    handle.abort();
}
