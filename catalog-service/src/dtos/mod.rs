pub mod catalog;

pub use catalog::{CustomerResponse, ProductResponse};
