#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::{Body, Bytes},
    http::{HeaderMap, Request, StatusCode},
    Router,
};
use catalog_service::models::{Customer, Product};
use catalog_service::services::{within_deadline, CatalogStore, Lookup, StorageError};
use catalog_service::startup::{build_ops_router, build_router, AppState};
use chrono::{TimeZone, Utc};
use service_core::error::AppError;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tower::util::ServiceExt;

/// Text the fake puts in its failures; must never reach a response body.
pub const INTERNAL_FAILURE: &str = "connection refused: mongo-primary.internal:27017";

#[derive(Default)]
enum Mode {
    #[default]
    Healthy,
    Unreachable,
    Hanging,
}

/// In-memory stand-in for MongoDB.
#[derive(Default)]
pub struct FakeStore {
    products: HashMap<String, Product>,
    customers: HashMap<String, Customer>,
    mode: Mode,
}

impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_product(mut self, product: Product) -> Self {
        self.products.insert(product.product_id.clone(), product);
        self
    }

    pub fn with_customer(mut self, customer: Customer) -> Self {
        self.customers.insert(customer.customer_id.clone(), customer);
        self
    }

    pub fn unreachable() -> Self {
        Self {
            mode: Mode::Unreachable,
            ..Self::default()
        }
    }

    pub fn hanging() -> Self {
        Self {
            mode: Mode::Hanging,
            ..Self::default()
        }
    }

    async fn query<T: Clone>(
        &self,
        rows: &HashMap<String, T>,
        id: &str,
    ) -> Result<Option<T>, StorageError> {
        match self.mode {
            Mode::Healthy => Ok(rows.get(id).cloned()),
            Mode::Unreachable => Err(StorageError::Unavailable(INTERNAL_FAILURE.to_string())),
            Mode::Hanging => std::future::pending().await,
        }
    }
}

#[async_trait]
impl CatalogStore for FakeStore {
    async fn find_product(&self, product_id: &str, deadline: Instant) -> Lookup<Product> {
        within_deadline(deadline, self.query(&self.products, product_id)).await
    }

    async fn find_customer(&self, customer_id: &str, deadline: Instant) -> Lookup<Customer> {
        within_deadline(deadline, self.query(&self.customers, customer_id)).await
    }

    async fn ping(&self) -> Result<(), AppError> {
        match self.mode {
            Mode::Healthy => Ok(()),
            _ => Err(AppError::database(
                "Could not reach the database",
                anyhow::anyhow!(INTERNAL_FAILURE),
            )),
        }
    }
}

pub fn state(store: FakeStore) -> AppState {
    AppState::new(Arc::new(store), Duration::from_millis(200))
}

pub fn app(store: FakeStore) -> Router {
    build_router(state(store))
}

pub fn ops_app(store: FakeStore) -> Router {
    build_ops_router(state(store))
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("Body is not JSON")
    }

    pub fn text(&self) -> String {
        String::from_utf8(self.body.to_vec()).expect("Body is not UTF-8")
    }
}

pub async fn send(app: Router, method: &str, uri: &str) -> TestResponse {
    let response = app
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    TestResponse {
        status,
        headers,
        body,
    }
}

pub async fn get(app: Router, uri: &str) -> TestResponse {
    send(app, "GET", uri).await
}

pub fn widget() -> Product {
    let at = Utc.with_ymd_and_hms(2025, 1, 15, 9, 0, 0).unwrap();
    Product {
        product_id: "P100".to_string(),
        name: "Widget".to_string(),
        description: "A widget".to_string(),
        category: "tools".to_string(),
        price: 9.99,
        stock: 5,
        active: true,
        created_at: at,
        updated_at: at,
    }
}

pub fn customer(customer_id: &str, name: &str, active: bool) -> Customer {
    let at = Utc.with_ymd_and_hms(2025, 1, 15, 9, 0, 0).unwrap();
    Customer {
        customer_id: customer_id.to_string(),
        name: name.to_string(),
        email: format!("{}@example.com", customer_id.to_lowercase()),
        phone: "+51 987654321".to_string(),
        active,
        created_at: at,
        updated_at: at,
    }
}
