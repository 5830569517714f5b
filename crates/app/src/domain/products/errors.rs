//! Catalog service errors.

use showroom::filters::FilterError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogServiceError {
    #[error(transparent)]
    InvalidFilter(#[from] FilterError),

    #[error("product not found")]
    NotFound,

    #[error("storage error")]
    Sql(#[from] sqlx::Error),
}
