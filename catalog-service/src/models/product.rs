use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A document from the `products` collection.
///
/// `productId` is the business identifier; the internal `_id` is ignored.
/// Price and stock are carried as stored, without range checks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub product_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    pub price: f64,
    pub stock: i64,
    pub active: bool,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub const ID_FIELD: &'static str = "productId";
    pub const COLLECTION: &'static str = "products";
}
