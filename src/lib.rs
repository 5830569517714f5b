//! Showroom
//!
//! Showroom is the pure domain core of a wholesale fashion marketplace: cart aggregation,
//! product listing filters, pagination and facet summaries. It performs no I/O.

pub mod cart;
pub mod facets;
pub mod filters;
pub mod pagination;
