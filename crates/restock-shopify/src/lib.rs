pub mod client;
pub mod error;
pub mod types;

pub use client::CatalogPublisher;
pub use error::PublishError;
pub use types::{PublishedProduct, ShippingPolicy};
