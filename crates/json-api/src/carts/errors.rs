//! Errors

use salvo::http::StatusError;
use tracing::error;

use showroom_app::domain::carts::CartsServiceError;

pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    match error {
        // Lines owned by another user are reported as missing.
        CartsServiceError::NotFound | CartsServiceError::Forbidden => {
            StatusError::not_found().brief("Cart item not found")
        }
        CartsServiceError::InvalidQuantity => {
            StatusError::bad_request().brief("Quantity must be positive")
        }
        CartsServiceError::InvalidReference => {
            StatusError::bad_request().brief("Unknown product")
        }
        CartsServiceError::UnresolvedLine(source) => {
            error!("cart holds a line without product data: {source}");

            StatusError::internal_server_error()
        }
        CartsServiceError::Sql(source) => {
            error!("cart storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
