//! Favorites service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FavoritesServiceError {
    #[error("favorite not found")]
    NotFound,

    #[error("product not found")]
    InvalidReference,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for FavoritesServiceError {
    fn from(error: Error) -> Self {
        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_errors_map_to_sql() {
        let error = FavoritesServiceError::from(Error::PoolClosed);

        assert!(
            matches!(error, FavoritesServiceError::Sql(_)),
            "expected Sql, got {error:?}"
        );
    }
}
