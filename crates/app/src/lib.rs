//! Storage, notification and service layer for the showroom marketplace.

pub mod auth;
pub mod context;
pub mod database;
pub mod domain;
pub mod notifications;

#[cfg(test)]
mod test;

mod uuids;

pub use uuids::TypedUuid;
