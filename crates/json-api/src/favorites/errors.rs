//! Favorite Errors

use salvo::http::StatusError;
use tracing::error;

use showroom_app::domain::favorites::FavoritesServiceError;

pub(crate) fn into_status_error(error: FavoritesServiceError) -> StatusError {
    match error {
        FavoritesServiceError::NotFound => StatusError::not_found().brief("Favorite not found"),
        FavoritesServiceError::InvalidReference => {
            StatusError::not_found().brief("Product not found")
        }
        FavoritesServiceError::Sql(source) => {
            error!("favorite storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
