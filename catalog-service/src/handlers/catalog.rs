use crate::dtos::{CustomerResponse, ProductResponse};
use crate::models::{Customer, Product};
use crate::services::{record_lookup, Lookup, StorageError};
use crate::startup::AppState;
use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::{Method, Uri},
    Json,
};
use service_core::error::AppError;
use std::time::Instant;

/// The two resources the API serves, with the wording used in responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Product,
    Customer,
}

impl Resource {
    pub fn noun(self) -> &'static str {
        match self {
            Resource::Product => "Product",
            Resource::Customer => "Customer",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Resource::Product => "product",
            Resource::Customer => "customer",
        }
    }

    pub fn not_found(self, id: &str) -> AppError {
        AppError::not_found(
            format!("{} not found", self.noun()),
            format!("{} with ID '{}' does not exist", self.noun(), id),
        )
    }

    pub fn storage_error(self, cause: StorageError) -> AppError {
        AppError::database(
            format!("An error occurred while fetching the {}", self.label()),
            cause,
        )
    }
}

fn respond<T, R>(
    resource: Resource,
    id: &str,
    lookup: Lookup<T>,
    started: Instant,
    summary: impl FnOnce(&T) -> String,
) -> Result<Json<R>, AppError>
where
    R: From<T>,
{
    record_lookup(resource.label(), lookup.outcome(), started.elapsed());

    match lookup {
        Lookup::Found(entity) => {
            tracing::info!(
                resource = resource.label(),
                id = %id,
                "{} found: {}",
                resource.noun(),
                summary(&entity)
            );
            Ok(Json(R::from(entity)))
        }
        Lookup::NotFound => {
            tracing::info!(
                resource = resource.label(),
                id = %id,
                "{} not found: {}",
                resource.noun(),
                id
            );
            Err(resource.not_found(id))
        }
        Lookup::StorageError(e) => {
            tracing::error!(
                resource = resource.label(),
                id = %id,
                error = %e,
                "Error querying {}: {}",
                resource.label(),
                e
            );
            Err(resource.storage_error(e))
        }
    }
}

/// Stored identifiers are UTF-8 strings, so a segment that does not decode to
/// UTF-8 cannot match any document. It is answered as not found, quoting the
/// segment as received.
fn path_id(
    resource: Resource,
    path: Result<Path<String>, PathRejection>,
    uri: &Uri,
) -> Result<String, AppError> {
    match path {
        Ok(Path(id)) => Ok(id),
        Err(rejection) => {
            let raw = uri.path().rsplit('/').next().unwrap_or_default();
            tracing::info!(
                resource = resource.label(),
                id = %raw,
                error = %rejection,
                "{} not found: {}",
                resource.noun(),
                raw
            );
            Err(resource.not_found(raw))
        }
    }
}

pub async fn get_product(
    State(state): State<AppState>,
    uri: Uri,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<ProductResponse>, AppError> {
    let product_id = path_id(Resource::Product, path, &uri)?;
    tracing::info!(product_id = %product_id, "GET /api/products/{}", product_id);

    let started = Instant::now();
    let lookup = state
        .store
        .find_product(&product_id, state.lookup_deadline())
        .await;

    respond(Resource::Product, &product_id, lookup, started, |p: &Product| {
        format!("{} - {} (${:.2})", p.product_id, p.name, p.price)
    })
}

pub async fn get_customer(
    State(state): State<AppState>,
    uri: Uri,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<CustomerResponse>, AppError> {
    let customer_id = path_id(Resource::Customer, path, &uri)?;
    tracing::info!(customer_id = %customer_id, "GET /api/customers/{}", customer_id);

    let started = Instant::now();
    let lookup = state
        .store
        .find_customer(&customer_id, state.lookup_deadline())
        .await;

    respond(Resource::Customer, &customer_id, lookup, started, |c: &Customer| {
        format!("{} - {} (active: {})", c.customer_id, c.name, c.active)
    })
}

/// Unmatched paths still answer with the JSON error envelope.
pub async fn fallback(method: Method, uri: Uri) -> AppError {
    tracing::debug!(method = %method, path = %uri.path(), "No route matched");
    AppError::not_found(
        "Not found",
        format!("No route for {} {}", method, uri.path()),
    )
}
