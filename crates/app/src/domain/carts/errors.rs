//! Carts service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::carts::records::UnresolvedLine;

/// SQLSTATE raised when a summed quantity no longer fits its column.
const NUMERIC_VALUE_OUT_OF_RANGE: &str = "22003";

#[derive(Debug, Error)]
pub enum CartsServiceError {
    #[error("cart item not found")]
    NotFound,

    #[error("cart item belongs to another user")]
    Forbidden,

    #[error("quantity must be positive")]
    InvalidQuantity,

    #[error("product not found")]
    InvalidReference,

    #[error(transparent)]
    UnresolvedLine(#[from] UnresolvedLine),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for CartsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        let code = error.as_database_error().and_then(DatabaseError::code);

        if code.as_deref() == Some(NUMERIC_VALUE_OUT_OF_RANGE) {
            return Self::InvalidQuantity;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::CheckViolation) => Self::InvalidQuantity,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
