//! Order Errors

use salvo::http::StatusError;
use tracing::error;

use showroom_app::domain::orders::OrdersServiceError;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::EmptyCart => StatusError::bad_request().brief("Cart is empty"),
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found"),
        OrdersServiceError::Forbidden => StatusError::forbidden(),
        invalid @ OrdersServiceError::InvalidStatus { .. } => {
            StatusError::bad_request().brief(invalid.to_string())
        }
        OrdersServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid order payload")
        }
        OrdersServiceError::UnresolvedLine(source) => {
            error!("cannot order a line without product data: {source}");

            StatusError::internal_server_error()
        }
        OrdersServiceError::Sql(source) => {
            error!("order storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
