//! Product Errors

use salvo::http::StatusError;
use tracing::error;

use showroom_app::domain::products::CatalogServiceError;

pub(crate) fn into_status_error(error: CatalogServiceError) -> StatusError {
    match error {
        CatalogServiceError::InvalidFilter(source) => {
            StatusError::bad_request().brief(source.to_string())
        }
        CatalogServiceError::NotFound => StatusError::not_found().brief("Product not found"),
        CatalogServiceError::Sql(source) => {
            error!("failed to read catalog: {source}");

            StatusError::internal_server_error()
        }
    }
}
