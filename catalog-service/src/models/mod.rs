pub mod customer;
pub mod product;

pub use customer::Customer;
pub use product::Product;
