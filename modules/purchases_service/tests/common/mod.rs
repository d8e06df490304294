//! Common test utilities: SQLite-backed app and HTTP helpers
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use purchases_service::config::Config;
use purchases_service::infra::storage::entity::customer;
use purchases_service::PurchasesServiceModule;
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub const APP: &str = "greenfirmhouseapp";

pub fn print_test_header(test_name: &str, purpose: &[&str]) {
    println!("\n🧪 TEST: {}", test_name);
    if let Some(first) = purpose.first() {
        println!("📋 PURPOSE: {}", first);
    }
    for line in purpose.iter().skip(1) {
        println!("   {}", line);
    }
}

/// Fresh in-memory SQLite database with migrations applied.
///
/// One pooled connection: every new SQLite memory connection is a new,
/// empty database.
pub async fn setup_db(module: &PurchasesServiceModule) -> Arc<DatabaseConnection> {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = Database::connect(options).await.unwrap();
    module.migrate(&db).await.unwrap();
    Arc::new(db)
}

/// Insert a customer row directly; customers have no endpoints
pub async fn seed_customer(db: &DatabaseConnection, name: &str) -> i64 {
    let model = customer::ActiveModel {
        name: Set(name.to_string()),
        email: Set(Some(format!("{}@example.com", name.to_lowercase()))),
        phone: Set("+91 98450 00000".to_string()),
        address: Set("Green Lane 1".to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap();
    model.id
}

pub struct TestApp {
    pub router: Router,
    pub db: Arc<DatabaseConnection>,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_config(Config::default()).await
    }

    pub async fn with_config(config: Config) -> Self {
        let module = PurchasesServiceModule::new();
        let db = setup_db(&module).await;
        module.init(config, db.clone()).unwrap();
        let router = module.register_rest(Router::new()).unwrap();
        Self { router, db }
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(
            Request::builder()
                .method(Method::GET)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.send(
            Request::builder()
                .method(Method::DELETE)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    pub async fn post(&self, uri: &str, body: Value) -> TestResponse {
        self.send(json_request(Method::POST, uri, "application/json", &body))
            .await
    }

    pub async fn put(&self, uri: &str, body: Value) -> TestResponse {
        self.send(json_request(Method::PUT, uri, "application/json", &body))
            .await
    }

    pub async fn patch(&self, uri: &str, body: Value) -> TestResponse {
        self.send(json_request(
            Method::PATCH,
            uri,
            "application/merge-patch+json",
            &body,
        ))
        .await
    }
}

pub fn json_request(method: Method, uri: &str, content_type: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn id(&self) -> i64 {
        self.body["id"].as_i64().unwrap()
    }
}
