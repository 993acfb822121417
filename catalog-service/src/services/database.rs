use crate::config::MongoConfig;
use crate::models::{Customer, Product};
use crate::services::store::{within_deadline, CatalogStore, Lookup};
use async_trait::async_trait;
use mongodb::{
    bson::{doc, Document},
    options::{ClientOptions, FindOneOptions},
    Client as MongoClient, Collection, Database,
};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use service_core::error::AppError;
use std::time::Duration;
use tokio::time::Instant;

#[derive(Clone)]
pub struct MongoDb {
    client: MongoClient,
    db: Database,
    products: Collection<Product>,
    customers: Collection<Customer>,
}

impl MongoDb {
    /// Connects and pings the server, all within `config.connect_timeout`.
    /// Callers treat an error here as fatal.
    pub async fn connect(config: &MongoConfig) -> Result<Self, AppError> {
        let uri = config.redacted_uri();
        tracing::info!(uri = %uri, "Connecting to MongoDB");

        let timeout = config.connect_timeout;
        let open = Self::open(config.uri.expose_secret(), timeout);
        let client = tokio::time::timeout(timeout, open)
            .await
            .map_err(|_| {
                tracing::error!(
                    "Timed out after {:?} connecting to MongoDB at {}",
                    timeout,
                    uri
                );
                AppError::database(
                    "Could not reach the database",
                    anyhow::anyhow!("connect timed out after {:?}", timeout),
                )
            })?
            .map_err(|e| {
                tracing::error!("Failed to connect to MongoDB at {}: {}", uri, e);
                e
            })?;

        let db = client.database(&config.database);
        tracing::info!(database = %config.database, "Successfully connected to MongoDB database");

        Ok(Self {
            products: db.collection(Product::COLLECTION),
            customers: db.collection(Customer::COLLECTION),
            client,
            db,
        })
    }

    async fn open(uri: &str, timeout: Duration) -> Result<MongoClient, AppError> {
        let mut options = ClientOptions::parse(uri).await?;
        options.app_name = Some("catalog-service".to_string());
        options.connect_timeout = Some(timeout);
        options.server_selection_timeout = Some(timeout);

        let client = MongoClient::with_options(options)?;
        client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await?;
        Ok(client)
    }

    pub async fn health_check(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }

    /// Releases the connection pool. Never fails; a slow shutdown is abandoned
    /// after `timeout` and logged.
    pub async fn disconnect(&self, timeout: Duration) {
        match tokio::time::timeout(timeout, self.client.clone().shutdown()).await {
            Ok(()) => tracing::info!("Disconnected from MongoDB"),
            Err(_) => tracing::error!(
                "Error disconnecting from MongoDB: shutdown did not finish within {:?}",
                timeout
            ),
        }
    }

    pub fn products(&self) -> &Collection<Product> {
        &self.products
    }

    pub fn customers(&self) -> &Collection<Customer> {
        &self.customers
    }

    pub fn client(&self) -> &MongoClient {
        &self.client
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

async fn find_by_business_id<T>(
    collection: &Collection<T>,
    field: &str,
    id: &str,
    deadline: Instant,
) -> Lookup<T>
where
    T: DeserializeOwned + Unpin + Send + Sync,
{
    let mut filter = Document::new();
    filter.insert(field, id);

    // Let the server give up at the same point the client does.
    let options = FindOneOptions::builder()
        .max_time(deadline.saturating_duration_since(Instant::now()))
        .build();

    within_deadline(deadline, collection.find_one(filter, options)).await
}

#[async_trait]
impl CatalogStore for MongoDb {
    async fn find_product(&self, product_id: &str, deadline: Instant) -> Lookup<Product> {
        find_by_business_id(&self.products, Product::ID_FIELD, product_id, deadline).await
    }

    async fn find_customer(&self, customer_id: &str, deadline: Instant) -> Lookup<Customer> {
        find_by_business_id(&self.customers, Customer::ID_FIELD, customer_id, deadline).await
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.health_check().await
    }
}
