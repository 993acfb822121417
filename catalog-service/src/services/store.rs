//! Storage gateway contract shared by the MongoDB implementation and test fakes.

use crate::models::{Customer, Product};
use async_trait::async_trait;
use service_core::error::AppError;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tokio::time::Instant;

/// Outcome of a point lookup by business identifier.
#[derive(Debug)]
pub enum Lookup<T> {
    Found(T),
    NotFound,
    StorageError(StorageError),
}

impl<T> Lookup<T> {
    pub fn outcome(&self) -> &'static str {
        match self {
            Lookup::Found(_) => "found",
            Lookup::NotFound => "not_found",
            Lookup::StorageError(_) => "error",
        }
    }
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("lookup timed out after {0:?}")]
    Timeout(Duration),

    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("driver error: {0}")]
    Driver(mongodb::error::Error),
}

impl From<mongodb::error::Error> for StorageError {
    fn from(err: mongodb::error::Error) -> Self {
        if let mongodb::error::ErrorKind::ServerSelection { message, .. } = err.kind.as_ref() {
            return StorageError::Unavailable(message.clone());
        }
        StorageError::Driver(err)
    }
}

#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn find_product(&self, product_id: &str, deadline: Instant) -> Lookup<Product>;

    async fn find_customer(&self, customer_id: &str, deadline: Instant) -> Lookup<Customer>;

    /// Round trip to the backend, used by the health endpoints.
    async fn ping(&self) -> Result<(), AppError>;
}

/// Runs `query` until `deadline`. The query future is dropped if the deadline
/// passes first, and no retry is attempted.
pub async fn within_deadline<T, F, E>(deadline: Instant, query: F) -> Lookup<T>
where
    F: Future<Output = Result<Option<T>, E>>,
    E: Into<StorageError>,
{
    let budget = deadline.saturating_duration_since(Instant::now());
    match tokio::time::timeout_at(deadline, query).await {
        Ok(Ok(Some(found))) => Lookup::Found(found),
        Ok(Ok(None)) => Lookup::NotFound,
        Ok(Err(e)) => Lookup::StorageError(e.into()),
        Err(_) => Lookup::StorageError(StorageError::Timeout(budget)),
    }
}
