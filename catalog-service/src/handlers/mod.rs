pub mod catalog;
pub mod health;

pub use catalog::{fallback, get_customer, get_product, Resource};
pub use health::{health_check, metrics_endpoint, readiness_check};
