//! Products

pub mod errors;
pub(crate) mod query;
pub mod records;
mod service;
mod store;

pub use errors::CatalogServiceError;
pub use service::*;
pub use store::*;
