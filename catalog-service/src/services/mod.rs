pub mod database;
pub mod metrics;
pub mod store;

pub use database::MongoDb;
pub use metrics::{get_metrics, init_metrics, record_lookup};
pub use store::{within_deadline, CatalogStore, Lookup, StorageError};
