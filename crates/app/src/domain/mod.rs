//! Showroom Domain Concerns

pub mod carts;
pub mod favorites;
pub mod orders;
pub mod products;
