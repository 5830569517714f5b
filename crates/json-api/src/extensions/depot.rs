//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};

use showroom_app::auth::Identity;

const IDENTITY_KEY: &str = "identity";

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    fn insert_identity(&mut self, identity: Identity);

    /// The authenticated caller, or 401 when the auth middleware did not run.
    fn identity_or_401(&self) -> Result<Identity, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_identity(&mut self, identity: Identity) {
        self.insert(IDENTITY_KEY, identity);
    }

    fn identity_or_401(&self) -> Result<Identity, StatusError> {
        self.get::<Identity>(IDENTITY_KEY)
            .copied()
            .map_err(|_ignored| StatusError::unauthorized())
    }
}
