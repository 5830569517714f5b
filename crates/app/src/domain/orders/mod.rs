//! Orders

pub mod data;
pub mod errors;
pub mod records;
mod repository;
mod serial;
pub mod service;

pub use errors::OrdersServiceError;
pub use service::*;
